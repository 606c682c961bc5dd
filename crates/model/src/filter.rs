use crate::{
    trip::{Trip, TripStatus},
    vehicle::VehicleType,
};

/// Narrows down a trip listing. All set criteria must hold. Empty sets do not
/// restrict anything, and substring matches are case sensitive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripFilters {
    pub status: Option<Vec<TripStatus>>,
    pub vehicle_type: Option<Vec<VehicleType>>,
    pub plate_number: Option<String>,
    pub driver_name: Option<String>,
}

impl TripFilters {
    pub fn with_status(mut self, status: impl IntoIterator<Item = TripStatus>) -> Self {
        self.status = Some(status.into_iter().collect());
        self
    }

    pub fn with_vehicle_type(
        mut self,
        vehicle_type: impl IntoIterator<Item = VehicleType>,
    ) -> Self {
        self.vehicle_type = Some(vehicle_type.into_iter().collect());
        self
    }

    pub fn with_plate_number(mut self, plate_number: impl Into<String>) -> Self {
        self.plate_number = Some(plate_number.into());
        self
    }

    pub fn with_driver_name(mut self, driver_name: impl Into<String>) -> Self {
        self.driver_name = Some(driver_name.into());
        self
    }

    pub fn matches(&self, trip: &Trip) -> bool {
        fn one_of<T: PartialEq>(allowed: &Option<Vec<T>>, value: &T) -> bool {
            match allowed {
                Some(allowed) if !allowed.is_empty() => allowed.contains(value),
                _ => true,
            }
        }

        fn contains(pattern: &Option<String>, value: &str) -> bool {
            pattern
                .as_deref()
                .map_or(true, |pattern| value.contains(pattern))
        }

        one_of(&self.status, &trip.status)
            && one_of(&self.vehicle_type, &trip.vehicle.content.vehicle_type)
            && contains(&self.plate_number, &trip.vehicle.content.plate_number)
            && contains(&self.driver_name, &trip.driver.content.name)
    }
}
