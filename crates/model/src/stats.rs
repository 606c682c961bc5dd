use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::ExampleData;

/// Fleet wide counters shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SystemStats {
    pub total_trips: usize,
    pub active_trips: usize,
    pub completed_trips: usize,
    pub delayed_trips: usize,
    pub total_vehicles: usize,
    /// vehicles with the engine running.
    pub active_vehicles: usize,
    pub total_drivers: usize,
    pub unacknowledged_alerts: usize,
    /// hours from actual start to actual end, averaged over completed trips.
    pub average_delivery_time: f64,
    /// percent of completed trips that arrived no later than planned.
    pub on_time_delivery_rate: f64,
}

impl ExampleData for SystemStats {
    fn example_data() -> Self {
        Self {
            total_trips: 6,
            active_trips: 2,
            completed_trips: 2,
            delayed_trips: 1,
            total_vehicles: 6,
            active_vehicles: 3,
            total_drivers: 6,
            unacknowledged_alerts: 2,
            average_delivery_time: 6.5,
            on_time_delivery_rate: 50.0,
        }
    }
}
