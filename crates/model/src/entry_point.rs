use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use utility::id::HasId;

use crate::{location::Location, ExampleData, WithDistance};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryPointType {
    Airport,
    Seaport,
    #[default]
    LandBorder,
    Checkpoint,
}

/// A border crossing, airport or seaport where trips start and end.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EntryPoint {
    pub name: String,
    pub name_ar: String,
    #[serde(rename = "type")]
    pub entry_point_type: EntryPointType,
    pub location: Location,
    pub is_active: bool,
    pub operating_hours: String,
    /// vehicles per day.
    pub capacity: u32,
    pub current_load: u32,
}

impl HasId for EntryPoint {
    type IdType = String;
}

impl EntryPoint {
    pub fn with_distance_to(self, latitude: f64, longitude: f64) -> WithDistance<Self> {
        let distance = self.location.distance_to(&Location::new(latitude, longitude));
        WithDistance::new(distance, self)
    }
}

impl ExampleData for EntryPoint {
    fn example_data() -> Self {
        Self {
            name: "King Fahd Causeway".to_owned(),
            name_ar: "جسر الملك فهد".to_owned(),
            entry_point_type: EntryPointType::LandBorder,
            location: Location::new(26.1866, 50.3236),
            is_active: true,
            operating_hours: "24/7".to_owned(),
            capacity: 5000,
            current_load: 3200,
        }
    }
}
