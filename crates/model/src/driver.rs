use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::id::HasId;

use crate::ExampleData;

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    pub name: String,
    pub license_number: String,
    pub phone: String,
    pub national_id: String,
    /// years of professional driving.
    pub experience: u32,
    /// average rating between 1 and 5.
    pub rating: f64,
}

impl HasId for Driver {
    type IdType = String;
}

impl ExampleData for Driver {
    fn example_data() -> Self {
        Self {
            name: "Ahmed Al-Rashid".to_owned(),
            license_number: "DL-2019-44821".to_owned(),
            phone: "+966 50 123 4567".to_owned(),
            national_id: "1023456789".to_owned(),
            experience: 12,
            rating: 4.8,
        }
    }
}
