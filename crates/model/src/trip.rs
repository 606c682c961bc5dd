use chrono::{DateTime, Duration, TimeZone, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::id::{HasId, Id};

use crate::{
    alert::Alert,
    cargo::Cargo,
    checkpoint::Checkpoint,
    driver::Driver,
    entry_point::EntryPoint,
    location::Location,
    vehicle::Vehicle,
    ExampleData, WithId,
};

pub const DEFAULT_MAX_SPEED: f64 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TripStatus {
    #[default]
    Planned,
    InProgress,
    Completed,
    Delayed,
    Cancelled,
    Emergency,
}

impl TripStatus {
    /// whether a vehicle is on the road for this trip.
    pub fn is_underway(&self) -> bool {
        matches!(self, Self::InProgress | Self::Delayed | Self::Emergency)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Compliance {
    pub is_on_route: bool,
    pub is_speed_compliant: bool,
    pub is_lock_compliant: bool,
}

impl Default for Compliance {
    fn default() -> Self {
        Self {
            is_on_route: true,
            is_speed_compliant: true,
            is_lock_compliant: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TripStats {
    /// km.
    pub distance_traveled: f64,
    /// km.
    pub total_distance: f64,
    /// km/h.
    pub average_speed: f64,
    /// liters.
    pub fuel_consumed: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TripRequirements {
    /// km/h.
    pub max_speed: f64,
    pub required_documents: Vec<String>,
    pub special_instructions: Vec<String>,
}

impl Default for TripRequirements {
    fn default() -> Self {
        Self {
            max_speed: DEFAULT_MAX_SPEED,
            required_documents: vec![],
            special_instructions: vec![],
        }
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub name: String,
    pub status: TripStatus,
    pub driver: WithId<Driver>,
    pub vehicle: WithId<Vehicle>,
    pub cargo: Cargo,
    pub origin: WithId<EntryPoint>,
    pub destination: WithId<EntryPoint>,
    pub checkpoints: Vec<WithId<Checkpoint>>,
    pub planned_route: Vec<Location>,
    /// positions reported while underway. Append only.
    pub actual_route: Vec<Location>,
    pub planned_start_time: DateTime<Utc>,
    pub actual_start_time: Option<DateTime<Utc>>,
    pub planned_end_time: DateTime<Utc>,
    pub estimated_arrival_time: Option<DateTime<Utc>>,
    pub actual_end_time: Option<DateTime<Utc>>,
    pub last_update: DateTime<Utc>,
    pub compliance: Compliance,
    pub stats: TripStats,
    pub requirements: TripRequirements,
    pub alerts: Vec<Alert>,
}

impl HasId for Trip {
    type IdType = String;
}

impl Trip {
    /// Appends a reported position to the actual route and accounts the
    /// distance from the previous position.
    pub fn record_position(&mut self, location: Location, at: DateTime<Utc>) {
        if let Some(previous) = self.actual_route.last() {
            self.stats.distance_traveled += previous.distance_to(&location);
        }
        self.actual_route.push(location);
        self.last_update = at;
    }

    /// Sets the status without checking the transition. Start and end
    /// timestamps are filled in the first time a trip starts or completes.
    pub fn set_status(&mut self, status: TripStatus, at: DateTime<Utc>) {
        if status == TripStatus::InProgress && self.actual_start_time.is_none() {
            self.actual_start_time = Some(at);
        }
        if status == TripStatus::Completed && self.actual_end_time.is_none() {
            self.actual_end_time = Some(at);
        }
        self.status = status;
        self.last_update = at;
    }

    pub fn acknowledge_alert(&mut self, alert_id: &Id<Alert>) -> Option<&Alert> {
        let alert = self.alerts.iter_mut().find(|alert| &alert.id == alert_id)?;
        alert.acknowledged = true;
        Some(&*alert)
    }

    pub fn unacknowledged_alerts(&self) -> usize {
        self.alerts.iter().filter(|alert| !alert.acknowledged).count()
    }

    /// Delivery duration, if the trip has both an actual start and end.
    pub fn delivery_time(&self) -> Option<Duration> {
        self.actual_start_time
            .zip(self.actual_end_time)
            .map(|(start, end)| end - start)
    }

    /// `None` until the trip has ended.
    pub fn arrived_on_time(&self) -> Option<bool> {
        self.actual_end_time.map(|end| end <= self.planned_end_time)
    }

    /// Case insensitive match of an already lowercased query against the trip
    /// name, driver name, plate number and cargo type.
    pub fn matches_query(&self, lowercase_query: &str) -> bool {
        [
            &self.name,
            &self.driver.content.name,
            &self.vehicle.content.plate_number,
            &self.cargo.cargo_type,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(lowercase_query))
    }
}

/// Input of trip creation. Everything left out is filled with defaults.
///
/// Embedded records take precedence over the corresponding `*_id` reference.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewTrip {
    pub name: Option<String>,
    pub status: Option<TripStatus>,
    pub driver: Option<WithId<Driver>>,
    pub driver_id: Option<Id<Driver>>,
    pub vehicle: Option<WithId<Vehicle>>,
    pub vehicle_id: Option<Id<Vehicle>>,
    pub cargo: Option<Cargo>,
    pub origin: Option<WithId<EntryPoint>>,
    pub origin_id: Option<Id<EntryPoint>>,
    pub destination: Option<WithId<EntryPoint>>,
    pub destination_id: Option<Id<EntryPoint>>,
    pub checkpoints: Option<Vec<WithId<Checkpoint>>>,
    pub checkpoint_ids: Option<Vec<Id<Checkpoint>>>,
    pub planned_route: Option<Vec<Location>>,
    pub planned_start_time: Option<DateTime<Utc>>,
    pub planned_end_time: Option<DateTime<Utc>>,
    pub estimated_arrival_time: Option<DateTime<Utc>>,
    pub requirements: Option<TripRequirements>,
}

impl ExampleData for Trip {
    fn example_data() -> Self {
        let start = Utc
            .with_ymd_and_hms(2024, 6, 10, 6, 0, 0)
            .single()
            .unwrap_or_default();
        let origin = EntryPoint::example_data();
        let destination = EntryPoint {
            name: "Riyadh Dry Port".to_owned(),
            name_ar: "ميناء الرياض الجاف".to_owned(),
            location: Location::new(24.6877, 46.7981),
            ..EntryPoint::example_data()
        };
        let planned_route = vec![
            origin.location,
            Checkpoint::example_data().location,
            destination.location,
        ];
        Self {
            name: "Causeway - Riyadh Frozen Goods".to_owned(),
            status: TripStatus::InProgress,
            driver: WithId::new(Id::new("driver_001".to_owned()), Driver::example_data()),
            vehicle: WithId::new(Id::new("vehicle_001".to_owned()), Vehicle::example_data()),
            cargo: Cargo::example_data(),
            origin: WithId::new(Id::new("ep_001".to_owned()), origin),
            destination: WithId::new(Id::new("ep_005".to_owned()), destination),
            checkpoints: vec![WithId::new(
                Id::new("cp_001".to_owned()),
                Checkpoint::example_data(),
            )],
            actual_route: planned_route[..2].to_vec(),
            planned_route,
            planned_start_time: start,
            actual_start_time: Some(start + Duration::minutes(15)),
            planned_end_time: start + Duration::hours(6),
            estimated_arrival_time: Some(start + Duration::hours(6) + Duration::minutes(20)),
            actual_end_time: None,
            last_update: start + Duration::hours(3),
            compliance: Compliance::default(),
            stats: TripStats {
                distance_traveled: 140.0,
                total_distance: 410.0,
                average_speed: 78.0,
                fuel_consumed: 52.0,
            },
            requirements: TripRequirements::default(),
            alerts: vec![],
        }
    }
}
