use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::id::HasId;

use crate::{location::Location, ExampleData};

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Checkpoint {
    pub name: String,
    pub name_ar: String,
    pub location: Location,
    pub is_active: bool,
    /// minutes.
    pub average_wait_time: u32,
    /// km/h.
    pub max_speed: f64,
    pub required_documents: Vec<String>,
}

impl HasId for Checkpoint {
    type IdType = String;
}

impl ExampleData for Checkpoint {
    fn example_data() -> Self {
        Self {
            name: "Al-Hasa Inspection Point".to_owned(),
            name_ar: "نقطة تفتيش الأحساء".to_owned(),
            location: Location::new(25.3833, 49.5867),
            is_active: true,
            average_wait_time: 25,
            max_speed: 60.0,
            required_documents: vec![
                "Customs Declaration".to_owned(),
                "Vehicle Registration".to_owned(),
            ],
        }
    }
}
