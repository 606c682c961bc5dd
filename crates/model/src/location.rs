use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::geo;

use crate::ExampleData;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn as_tuple(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }

    /// haversine distance in km.
    pub fn distance_to(&self, other: &Location) -> f64 {
        geo::haversine_distance(self.lat, self.lng, other.lat, other.lng)
    }
}

impl From<(f64, f64)> for Location {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}

impl ExampleData for Location {
    fn example_data() -> Self {
        Self::new(24.7136, 46.6753)
    }
}

pub fn as_tuples(locations: &[Location]) -> Vec<(f64, f64)> {
    locations.iter().map(Location::as_tuple).collect()
}
