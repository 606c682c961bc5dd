use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::id::{HasId, Id};

use crate::ExampleData;

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Cargo {
    pub id: Id<Cargo>,
    #[serde(rename = "type")]
    pub cargo_type: String,
    #[serde(default)]
    pub description: String,
    /// kg.
    pub weight: f64,
    /// declared value in SAR.
    pub value: f64,
    pub is_hazardous: bool,
    pub requires_temperature_control: bool,
    pub temperature_range: Option<TemperatureRange>,
}

impl HasId for Cargo {
    type IdType = String;
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TemperatureRange {
    pub min: f64,
    pub max: f64,
}

impl ExampleData for Cargo {
    fn example_data() -> Self {
        Self {
            id: Id::new("cargo_001".to_owned()),
            cargo_type: "Frozen Food".to_owned(),
            description: "Frozen poultry, 24 pallets".to_owned(),
            weight: 18000.0,
            value: 450000.0,
            is_hazardous: false,
            requires_temperature_control: true,
            temperature_range: Some(TemperatureRange {
                min: -20.0,
                max: -15.0,
            }),
        }
    }
}
