use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::id::HasId;

use crate::{location::Location, ExampleData};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleType {
    #[default]
    Truck,
    ContainerTruck,
    Tanker,
    Refrigerated,
    Flatbed,
    HeavyEquipment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DoorStatus {
    Open,
    #[default]
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EngineStatus {
    On,
    #[default]
    Off,
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Sensors {
    /// °C, only reported by refrigerated units and tankers.
    pub temperature: Option<f64>,
    /// percent.
    pub humidity: Option<f64>,
    pub door_status: DoorStatus,
    pub engine_status: EngineStatus,
    /// percent, 0 to 100.
    pub fuel_level: f64,
}

impl Default for Sensors {
    fn default() -> Self {
        Self {
            temperature: None,
            humidity: None,
            door_status: DoorStatus::Closed,
            engine_status: EngineStatus::Off,
            fuel_level: 100.0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub plate_number: String,
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
    pub model: String,
    pub year: u16,
    /// tons.
    pub capacity: f64,
    pub current_location: Location,
    /// km/h.
    pub speed: f64,
    /// degrees clockwise from north.
    pub heading: f64,
    pub is_locked: bool,
    pub sensors: Sensors,
}

impl HasId for Vehicle {
    type IdType = String;
}

impl Vehicle {
    pub fn is_engine_on(&self) -> bool {
        self.sensors.engine_status == EngineStatus::On
    }

    /// Lowers the fuel level by `percentage_points`, never below zero.
    pub fn consume_fuel(&mut self, percentage_points: f64) {
        self.sensors.fuel_level = (self.sensors.fuel_level - percentage_points).max(0.0);
    }
}

impl ExampleData for Vehicle {
    fn example_data() -> Self {
        Self {
            plate_number: "ABC 1234".to_owned(),
            vehicle_type: VehicleType::Refrigerated,
            model: "Mercedes-Benz Actros".to_owned(),
            year: 2021,
            capacity: 24.0,
            current_location: Location::new(24.7136, 46.6753),
            speed: 82.0,
            heading: 65.0,
            is_locked: true,
            sensors: Sensors {
                temperature: Some(-18.0),
                humidity: Some(40.0),
                door_status: DoorStatus::Closed,
                engine_status: EngineStatus::On,
                fuel_level: 68.5,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fuel_never_drops_below_zero() {
        let mut vehicle = Vehicle::example_data();
        vehicle.sensors.fuel_level = 0.05;
        vehicle.consume_fuel(0.1);
        assert_eq!(vehicle.sensors.fuel_level, 0.0);
        vehicle.consume_fuel(0.1);
        assert_eq!(vehicle.sensors.fuel_level, 0.0);
    }

    #[test]
    fn deserializes_fixture_shape() {
        let vehicle: Vehicle = serde_json::from_str(
            r#"{
                "plateNumber": "XYZ 9876",
                "type": "CONTAINER_TRUCK",
                "model": "Volvo FH16",
                "year": 2020,
                "capacity": 40,
                "currentLocation": { "lat": 26.4207, "lng": 50.0888 },
                "speed": 0,
                "heading": 180,
                "isLocked": false,
                "sensors": { "doorStatus": "OPEN", "engineStatus": "OFF", "fuelLevel": 45.5 }
            }"#,
        )
        .unwrap();
        assert_eq!(vehicle.vehicle_type, VehicleType::ContainerTruck);
        assert_eq!(vehicle.sensors.door_status, DoorStatus::Open);
        assert_eq!(vehicle.sensors.temperature, None);
        assert!(!vehicle.is_engine_on());
    }
}
