use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use model::{
    alert::Alert,
    checkpoint::Checkpoint,
    driver::Driver,
    entry_point::{EntryPoint, EntryPointType},
    filter::TripFilters,
    location::{self, Location},
    stats::SystemStats,
    trip::{NewTrip, Trip, TripStats, TripStatus},
    vehicle::Vehicle,
    WithDistance, WithId,
};
use utility::{
    geo,
    id::{HasId, Id},
};

use crate::fixtures::{FixtureError, FixtureSet, Result, TripRecord};

/// Fuel drawn per reported position, in percentage points.
pub const FUEL_PER_POSITION_UPDATE: f64 = 0.1;

/// In-memory logistics data. The trips embed their driver, vehicle, entry
/// points and checkpoints, resolved from the fixture references when the
/// store is built. Nothing is persisted.
#[derive(Debug, Clone)]
pub struct LogisticsStore {
    entry_points: IndexMap<Id<EntryPoint>, EntryPoint>,
    checkpoints: IndexMap<Id<Checkpoint>, Checkpoint>,
    drivers: IndexMap<Id<Driver>, Driver>,
    vehicles: IndexMap<Id<Vehicle>, Vehicle>,
    trips: IndexMap<Id<Trip>, Trip>,
}

fn index<T>(kind: &'static str, records: Vec<WithId<T>>) -> Result<IndexMap<Id<T>, T>>
where
    T: HasId<IdType = String>,
{
    let mut by_id = IndexMap::with_capacity(records.len());
    for record in records {
        if by_id.contains_key(&record.id) {
            return Err(FixtureError::DuplicateId {
                kind,
                id: record.id.raw(),
            });
        }
        by_id.insert(record.id, record.content);
    }
    Ok(by_id)
}

fn resolve<T>(
    records: &IndexMap<Id<T>, T>,
    trip: &Id<Trip>,
    kind: &'static str,
    id: &Id<T>,
) -> Result<WithId<T>>
where
    T: HasId<IdType = String> + Clone,
{
    records
        .get(id)
        .map(|record| WithId::new(id.clone(), record.clone()))
        .ok_or_else(|| FixtureError::MissingReference {
            trip: trip.raw(),
            kind,
            id: id.raw(),
        })
}

fn lookup<T>(records: &IndexMap<Id<T>, T>, id: Option<Id<T>>) -> Option<WithId<T>>
where
    T: HasId<IdType = String> + Clone,
{
    let id = id?;
    let record = records.get(&id)?.clone();
    Some(WithId::new(id, record))
}

fn snapshot<T>(records: &IndexMap<Id<T>, T>) -> Vec<WithId<T>>
where
    T: HasId<IdType = String> + Clone,
{
    records
        .iter()
        .map(|(id, record)| WithId::new(id.clone(), record.clone()))
        .collect()
}

impl LogisticsStore {
    /// Joins the fixture records. Fails if a trip references a driver,
    /// vehicle, entry point or checkpoint that does not exist.
    pub fn from_fixtures(fixtures: FixtureSet) -> Result<Self> {
        let entry_points = index("entry point", fixtures.entry_points)?;
        let checkpoints = index("checkpoint", fixtures.checkpoints)?;
        let drivers = index("driver", fixtures.drivers)?;
        let vehicles = index("vehicle", fixtures.vehicles)?;

        let mut trips = IndexMap::with_capacity(fixtures.trips.len());
        for record in fixtures.trips {
            if trips.contains_key(&record.id) {
                return Err(FixtureError::DuplicateId {
                    kind: "trip",
                    id: record.id.raw(),
                });
            }
            let (id, trip) =
                Self::join_trip(record, &entry_points, &checkpoints, &drivers, &vehicles)?;
            trips.insert(id, trip);
        }

        log::info!(
            "joined {} trips, {} vehicles, {} drivers, {} entry points, {} checkpoints",
            trips.len(),
            vehicles.len(),
            drivers.len(),
            entry_points.len(),
            checkpoints.len(),
        );

        Ok(Self {
            entry_points,
            checkpoints,
            drivers,
            vehicles,
            trips,
        })
    }

    pub fn bundled() -> Result<Self> {
        Self::from_fixtures(FixtureSet::bundled()?)
    }

    fn join_trip(
        record: TripRecord,
        entry_points: &IndexMap<Id<EntryPoint>, EntryPoint>,
        checkpoints: &IndexMap<Id<Checkpoint>, Checkpoint>,
        drivers: &IndexMap<Id<Driver>, Driver>,
        vehicles: &IndexMap<Id<Vehicle>, Vehicle>,
    ) -> Result<(Id<Trip>, Trip)> {
        let trip_id = &record.id;
        let driver = resolve(drivers, trip_id, "driver", &record.driver_id)?;
        let vehicle = resolve(vehicles, trip_id, "vehicle", &record.vehicle_id)?;
        let origin = resolve(entry_points, trip_id, "origin", &record.origin_id)?;
        let destination =
            resolve(entry_points, trip_id, "destination", &record.destination_id)?;
        let checkpoints = record
            .checkpoint_ids
            .iter()
            .map(|id| resolve(checkpoints, trip_id, "checkpoint", id))
            .collect::<Result<Vec<_>>>()?;

        let trip = Trip {
            name: record.name,
            status: record.status,
            driver,
            vehicle,
            cargo: record.cargo,
            origin,
            destination,
            checkpoints,
            planned_route: record.planned_route,
            actual_route: record.actual_route,
            planned_start_time: record.planned_start_time,
            actual_start_time: record.actual_start_time,
            planned_end_time: record.planned_end_time,
            estimated_arrival_time: record.estimated_arrival_time,
            actual_end_time: record.actual_end_time,
            last_update: record.last_update,
            compliance: record.compliance,
            stats: record.stats,
            requirements: record.requirements,
            alerts: record.alerts,
        };
        Ok((record.id, trip))
    }

    fn with_id(id: &Id<Trip>, trip: &Trip) -> WithId<Trip> {
        WithId::new(id.clone(), trip.clone())
    }

    pub fn trips(&self, filters: Option<&TripFilters>) -> Vec<WithId<Trip>> {
        self.trips
            .iter()
            .filter(|(_, trip)| filters.map_or(true, |filters| filters.matches(trip)))
            .map(|(id, trip)| Self::with_id(id, trip))
            .collect()
    }

    pub fn trip(&self, id: &Id<Trip>) -> Option<WithId<Trip>> {
        self.trips.get(id).map(|trip| Self::with_id(id, trip))
    }

    pub fn search_trips(&self, query: &str) -> Vec<WithId<Trip>> {
        let query = query.to_lowercase();
        self.trips
            .iter()
            .filter(|(_, trip)| trip.matches_query(&query))
            .map(|(id, trip)| Self::with_id(id, trip))
            .collect()
    }

    pub fn entry_points(
        &self,
        entry_point_type: Option<EntryPointType>,
    ) -> Vec<WithId<EntryPoint>> {
        self.entry_points
            .iter()
            .filter(|(_, entry_point)| {
                entry_point_type.map_or(true, |t| entry_point.entry_point_type == t)
            })
            .map(|(id, entry_point)| WithId::new(id.clone(), entry_point.clone()))
            .collect()
    }

    /// Entry points within `radius_km`, closest first.
    pub fn entry_points_nearby(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: f64,
    ) -> Vec<WithDistance<WithId<EntryPoint>>> {
        let ((min_lat, min_lon), (max_lat, max_lon)) =
            geo::calculate_bounding_box(latitude, longitude, radius_km);
        let mut nearby = self
            .entry_points
            .iter()
            .filter(|(_, entry_point)| {
                (min_lat..=max_lat).contains(&entry_point.location.lat)
                    && (min_lon..=max_lon).contains(&entry_point.location.lng)
            })
            .map(|(id, entry_point)| {
                entry_point
                    .clone()
                    .with_distance_to(latitude, longitude)
                    .with_id(id.clone())
            })
            .filter(|entry_point| entry_point.distance_km <= radius_km)
            .collect::<Vec<_>>();
        nearby.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
        nearby
    }

    pub fn checkpoints(&self) -> Vec<WithId<Checkpoint>> {
        snapshot(&self.checkpoints)
    }

    pub fn drivers(&self) -> Vec<WithId<Driver>> {
        snapshot(&self.drivers)
    }

    pub fn vehicles(&self) -> Vec<WithId<Vehicle>> {
        snapshot(&self.vehicles)
    }

    pub fn vehicle(&self, id: &Id<Vehicle>) -> Option<WithId<Vehicle>> {
        self.vehicles
            .get(id)
            .map(|vehicle| WithId::new(id.clone(), vehicle.clone()))
    }

    pub fn system_stats(&self) -> SystemStats {
        let count = |status: TripStatus| {
            self.trips
                .values()
                .filter(|trip| trip.status == status)
                .count()
        };

        let delivered = self
            .trips
            .values()
            .filter(|trip| trip.status == TripStatus::Completed)
            .filter_map(|trip| trip.delivery_time().zip(trip.arrived_on_time()))
            .collect::<Vec<_>>();
        let (average_delivery_time, on_time_delivery_rate) = if delivered.is_empty() {
            (0.0, 0.0)
        } else {
            let total_hours = delivered
                .iter()
                .map(|(duration, _)| duration.num_seconds() as f64 / 3600.0)
                .sum::<f64>();
            let on_time = delivered.iter().filter(|(_, on_time)| *on_time).count();
            (
                total_hours / delivered.len() as f64,
                on_time as f64 / delivered.len() as f64 * 100.0,
            )
        };

        SystemStats {
            total_trips: self.trips.len(),
            active_trips: count(TripStatus::InProgress),
            completed_trips: count(TripStatus::Completed),
            delayed_trips: count(TripStatus::Delayed),
            total_vehicles: self.vehicles.len(),
            active_vehicles: self
                .vehicles
                .values()
                .filter(|vehicle| vehicle.is_engine_on())
                .count(),
            total_drivers: self.drivers.len(),
            unacknowledged_alerts: self
                .trips
                .values()
                .map(Trip::unacknowledged_alerts)
                .sum(),
            average_delivery_time,
            on_time_delivery_rate,
        }
    }

    /// Moves a vehicle and draws a fixed [`FUEL_PER_POSITION_UPDATE`] of fuel,
    /// regardless of the distance covered. The position is
    /// appended to the route of the trip using the vehicle, preferring a trip
    /// that is underway. Every trip embedding the vehicle sees the new
    /// location and fuel level.
    pub fn update_vehicle_location(
        &mut self,
        vehicle_id: &Id<Vehicle>,
        location: Location,
        at: DateTime<Utc>,
    ) -> Option<WithId<Vehicle>> {
        let vehicle = self.vehicles.get_mut(vehicle_id)?;
        vehicle.current_location = location;
        vehicle.consume_fuel(FUEL_PER_POSITION_UPDATE);
        let vehicle = vehicle.clone();

        let tracked_trip = self
            .trips
            .iter()
            .filter(|(_, trip)| &trip.vehicle.id == vehicle_id)
            .min_by_key(|(_, trip)| !trip.status.is_underway())
            .map(|(id, _)| id.clone());

        for (id, trip) in self.trips.iter_mut() {
            if &trip.vehicle.id != vehicle_id {
                continue;
            }
            trip.vehicle.content = vehicle.clone();
            if Some(id) == tracked_trip.as_ref() {
                trip.record_position(location, at);
            }
        }

        log::debug!(
            "vehicle {} moved to {},{} (fuel {:.1}%)",
            vehicle_id,
            location.lat,
            location.lng,
            vehicle.sensors.fuel_level
        );
        Some(WithId::new(vehicle_id.clone(), vehicle))
    }

    fn unused_trip_id(&self, at: DateTime<Utc>) -> Id<Trip> {
        let mut millis = at.timestamp_millis();
        loop {
            let id = Id::prefixed("trip", millis);
            if !self.trips.contains_key(&id) {
                return id;
            }
            millis += 1;
        }
    }

    /// Creates a trip from whatever the caller provided. Referenced records are
    /// not validated: unknown ids fall back to empty defaults.
    pub fn create_trip(&mut self, new_trip: NewTrip, at: DateTime<Utc>) -> WithId<Trip> {
        let id = self.unused_trip_id(at);

        let driver = new_trip
            .driver
            .or_else(|| lookup(&self.drivers, new_trip.driver_id))
            .unwrap_or_default();
        let vehicle = new_trip
            .vehicle
            .or_else(|| lookup(&self.vehicles, new_trip.vehicle_id))
            .unwrap_or_default();
        let origin = new_trip
            .origin
            .or_else(|| lookup(&self.entry_points, new_trip.origin_id))
            .unwrap_or_default();
        let destination = new_trip
            .destination
            .or_else(|| lookup(&self.entry_points, new_trip.destination_id))
            .unwrap_or_default();
        let checkpoints = new_trip.checkpoints.unwrap_or_else(|| {
            new_trip
                .checkpoint_ids
                .unwrap_or_default()
                .into_iter()
                .filter_map(|id| lookup(&self.checkpoints, Some(id)))
                .collect()
        });
        let planned_route = new_trip.planned_route.unwrap_or_default();
        let total_distance = geo::path_length(&location::as_tuples(&planned_route));

        let planned_start_time = new_trip.planned_start_time.unwrap_or(at);
        let trip = Trip {
            name: new_trip.name.unwrap_or_else(|| format!("Trip {}", id)),
            status: new_trip.status.unwrap_or_default(),
            driver,
            vehicle,
            cargo: new_trip.cargo.unwrap_or_default(),
            origin,
            destination,
            checkpoints,
            planned_route,
            actual_route: vec![],
            planned_start_time,
            actual_start_time: None,
            planned_end_time: new_trip.planned_end_time.unwrap_or(planned_start_time),
            estimated_arrival_time: new_trip.estimated_arrival_time,
            actual_end_time: None,
            last_update: at,
            compliance: Default::default(),
            stats: TripStats {
                total_distance,
                ..Default::default()
            },
            requirements: new_trip.requirements.unwrap_or_default(),
            alerts: vec![],
        };

        log::info!("created trip {} ({})", id, trip.name);
        self.trips.insert(id.clone(), trip.clone());
        WithId::new(id, trip)
    }

    pub fn update_trip_status(
        &mut self,
        trip_id: &Id<Trip>,
        status: TripStatus,
        at: DateTime<Utc>,
    ) -> Option<WithId<Trip>> {
        let trip = self.trips.get_mut(trip_id)?;
        log::info!("trip {} status {:?} -> {:?}", trip_id, trip.status, status);
        trip.set_status(status, at);
        Some(Self::with_id(trip_id, trip))
    }

    pub fn acknowledge_alert(
        &mut self,
        trip_id: &Id<Trip>,
        alert_id: &Id<Alert>,
    ) -> Option<WithId<Trip>> {
        let trip = self.trips.get_mut(trip_id)?;
        trip.acknowledge_alert(alert_id)?;
        Some(Self::with_id(trip_id, trip))
    }
}
