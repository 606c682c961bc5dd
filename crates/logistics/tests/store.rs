use chrono::{TimeZone, Utc};
use logistics::{
    fixtures::{FixtureError, FixtureSet},
    store::LogisticsStore,
};
use model::{
    entry_point::EntryPointType,
    filter::TripFilters,
    location::Location,
    trip::{NewTrip, TripStatus},
    vehicle::VehicleType,
};
use utility::id::Id;

fn store() -> LogisticsStore {
    LogisticsStore::bundled().unwrap()
}

fn ids<T>(records: &[model::WithId<T>]) -> Vec<String>
where
    T: utility::id::HasId<IdType = String>,
    T::IdType: serde::Serialize + std::fmt::Debug + Clone,
{
    records.iter().map(|record| record.id.raw()).collect()
}

#[test]
fn joined_trips_keep_fixture_references() {
    let fixtures = FixtureSet::bundled().unwrap();
    let trips = store().trips(None);
    assert_eq!(fixtures.trips.len(), trips.len());

    for (record, trip) in fixtures.trips.iter().zip(&trips) {
        assert_eq!(record.id, trip.id);
        let trip = &trip.content;
        assert_eq!(record.driver_id, trip.driver.id);
        assert_eq!(record.vehicle_id, trip.vehicle.id);
        assert_eq!(record.origin_id, trip.origin.id);
        assert_eq!(record.destination_id, trip.destination.id);
        let checkpoint_ids = trip
            .checkpoints
            .iter()
            .map(|checkpoint| checkpoint.id.clone())
            .collect::<Vec<_>>();
        assert_eq!(record.checkpoint_ids, checkpoint_ids);
    }
}

#[test]
fn trips_embed_the_referenced_records() {
    let store = store();
    let drivers = store.drivers();
    let vehicles = store.vehicles();
    let entry_points = store.entry_points(None);
    let checkpoints = store.checkpoints();

    for trip in store.trips(None) {
        let trip = trip.content;
        let driver = drivers.iter().find(|d| d.id == trip.driver.id).unwrap();
        assert_eq!(
            serde_json::to_value(driver).unwrap(),
            serde_json::to_value(&trip.driver).unwrap()
        );
        let vehicle = vehicles.iter().find(|v| v.id == trip.vehicle.id).unwrap();
        assert_eq!(
            serde_json::to_value(vehicle).unwrap(),
            serde_json::to_value(&trip.vehicle).unwrap()
        );
        for endpoint in [&trip.origin, &trip.destination] {
            let entry_point = entry_points.iter().find(|e| e.id == endpoint.id).unwrap();
            assert_eq!(
                serde_json::to_value(entry_point).unwrap(),
                serde_json::to_value(endpoint).unwrap()
            );
        }
        for checkpoint in &trip.checkpoints {
            assert!(checkpoints.iter().any(|c| c.id == checkpoint.id));
        }
    }
}

#[test]
fn status_filter_returns_subset() {
    let store = store();
    let filters = TripFilters::default()
        .with_status(vec![TripStatus::InProgress, TripStatus::Delayed]);
    let trips = store.trips(Some(&filters));

    assert_eq!(ids(&trips), vec!["trip_001", "trip_002", "trip_004"]);
    assert!(trips.iter().all(|trip| matches!(
        trip.content.status,
        TripStatus::InProgress | TripStatus::Delayed
    )));
}

#[test]
fn empty_filter_sets_do_not_restrict() {
    let store = store();
    let filters = TripFilters::default().with_status(vec![]).with_vehicle_type(vec![]);
    assert_eq!(store.trips(Some(&filters)).len(), 6);
}

#[test]
fn filters_combine() {
    let store = store();
    let filters = TripFilters::default()
        .with_vehicle_type(vec![VehicleType::ContainerTruck, VehicleType::Truck])
        .with_driver_name("Mohammed");
    assert_eq!(ids(&store.trips(Some(&filters))), vec!["trip_002", "trip_006"]);

    let filters = TripFilters::default().with_plate_number("abc");
    assert!(store.trips(Some(&filters)).is_empty());
}

#[test]
fn empty_search_returns_everything() {
    assert_eq!(store().search_trips("").len(), 6);
}

#[test]
fn search_is_case_insensitive() {
    let store = store();
    assert_eq!(
        ids(&store.search_trips("mohammed al-qahtani")),
        vec!["trip_002", "trip_006"]
    );
    assert_eq!(ids(&store.search_trips("abc 1234")), vec!["trip_001"]);
    assert_eq!(ids(&store.search_trips("FROZEN")), vec!["trip_001"]);
    assert!(store.search_trips("no such trip").is_empty());
}

#[test]
fn entry_points_by_type() {
    let store = store();
    assert_eq!(
        ids(&store.entry_points(Some(EntryPointType::Seaport))),
        vec!["ep_002", "ep_003"]
    );
    assert_eq!(store.entry_points(None).len(), 7);
}

#[test]
fn nearby_entry_points_are_sorted_by_distance() {
    let nearby = store().entry_points_nearby(26.5116, 50.2044, 100.0);
    let found = nearby
        .iter()
        .map(|entry_point| entry_point.content.id.raw())
        .collect::<Vec<_>>();

    assert_eq!(found, vec!["ep_003", "ep_001"]);
    assert!(nearby[0].distance_km < 0.001);
    assert!(nearby.windows(2).all(|w| w[0].distance_km <= w[1].distance_km));
    assert!(nearby.iter().all(|entry_point| entry_point.distance_km <= 100.0));
}

#[test]
fn location_update_extends_the_route() {
    let mut store = store();
    let vehicle_id = Id::new("vehicle_001".to_owned());
    let before = store.trip(&Id::new("trip_001".to_owned())).unwrap();
    let location = Location::new(24.9, 48.05);
    let at = Utc.with_ymd_and_hms(2024, 6, 10, 7, 0, 0).unwrap();

    let vehicle = store
        .update_vehicle_location(&vehicle_id, location, at)
        .unwrap();
    assert_eq!(vehicle.content.current_location, location);

    let after = store.trip(&Id::new("trip_001".to_owned())).unwrap().content;
    assert_eq!(
        after.actual_route.len(),
        before.content.actual_route.len() + 1
    );
    assert_eq!(after.actual_route.last(), Some(&location));
    assert_eq!(after.vehicle.content.current_location, location);
    assert_eq!(after.last_update, at);
    assert!(after.stats.distance_traveled > before.content.stats.distance_traveled);
    assert_eq!(
        store.vehicle(&vehicle_id).unwrap().content.current_location,
        location
    );
}

#[test]
fn fuel_level_never_drops_below_zero() {
    let mut store = store();
    let vehicle_id = Id::new("vehicle_005".to_owned());
    let vehicle = store
        .update_vehicle_location(&vehicle_id, Location::new(24.7, 46.8), Utc::now())
        .unwrap();
    assert_eq!(vehicle.content.sensors.fuel_level, 0.0);
}

#[test]
fn unknown_vehicle_is_not_updated() {
    let mut store = store();
    let result = store.update_vehicle_location(
        &Id::new("vehicle_999".to_owned()),
        Location::new(24.7, 46.8),
        Utc::now(),
    );
    assert!(result.is_none());
}

#[test]
fn created_trip_gets_defaults() {
    let mut store = store();
    let at = Utc.with_ymd_and_hms(2024, 6, 11, 8, 0, 0).unwrap();
    let first = store.create_trip(NewTrip::default(), at);
    let second = store.create_trip(NewTrip::default(), at);

    for trip in [&first, &second] {
        let digits = trip.id.as_str().strip_prefix("trip_").unwrap();
        assert!(!digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(trip.content.status, TripStatus::Planned);
        assert_eq!(trip.content.stats.total_distance, 0.0);
        assert_eq!(trip.content.stats.distance_traveled, 0.0);
        assert_eq!(trip.content.requirements.max_speed, 80.0);
        assert!(trip.content.requirements.required_documents.is_empty());
        assert!(trip.content.requirements.special_instructions.is_empty());
        assert!(trip.content.actual_route.is_empty());
        assert!(trip.content.alerts.is_empty());
    }
    assert_ne!(first.id, second.id);
    assert_eq!(store.trips(None).len(), 8);
    assert!(store.trip(&first.id).is_some());
}

#[test]
fn created_trip_resolves_references() {
    let mut store = store();
    let trip = store
        .create_trip(
            NewTrip {
                name: Some("Jeddah - Riyadh".to_owned()),
                driver_id: Some(Id::new("driver_003".to_owned())),
                vehicle_id: Some(Id::new("vehicle_006".to_owned())),
                origin_id: Some(Id::new("ep_002".to_owned())),
                destination_id: Some(Id::new("ep_006".to_owned())),
                planned_route: Some(vec![
                    Location::new(21.4858, 39.1735),
                    Location::new(24.6877, 46.7981),
                ]),
                ..Default::default()
            },
            Utc::now(),
        )
        .content;

    assert_eq!(trip.name, "Jeddah - Riyadh");
    assert_eq!(trip.driver.content.name, "Khalid Al-Otaibi");
    assert_eq!(trip.vehicle.content.plate_number, "JED 5567");
    assert_eq!(trip.origin.content.name, "Jeddah Islamic Port");
    assert!(trip.stats.total_distance > 800.0 && trip.stats.total_distance < 900.0);
}

#[test]
fn status_update_stamps_start_time() {
    let mut store = store();
    let id = Id::new("trip_005".to_owned());
    let at = Utc.with_ymd_and_hms(2024, 6, 12, 5, 0, 0).unwrap();
    let trip = store
        .update_trip_status(&id, TripStatus::InProgress, at)
        .unwrap();
    assert_eq!(trip.content.status, TripStatus::InProgress);
    assert_eq!(trip.content.actual_start_time, Some(at));
    assert!(store
        .update_trip_status(&Id::new("trip_999".to_owned()), TripStatus::Cancelled, at)
        .is_none());
}

#[test]
fn stats_are_derived_from_fixtures() {
    let stats = store().system_stats();
    assert_eq!(stats.total_trips, 6);
    assert_eq!(stats.active_trips, 2);
    assert_eq!(stats.completed_trips, 2);
    assert_eq!(stats.delayed_trips, 1);
    assert_eq!(stats.total_vehicles, 6);
    assert_eq!(stats.active_vehicles, 3);
    assert_eq!(stats.total_drivers, 5);
    assert_eq!(stats.unacknowledged_alerts, 2);
    assert!((stats.average_delivery_time - 7.0).abs() < 1e-9);
    assert!((stats.on_time_delivery_rate - 50.0).abs() < 1e-9);
}

#[test]
fn acknowledging_an_alert_updates_stats() {
    let mut store = store();
    let trip_id = Id::new("trip_002".to_owned());
    let trip = store
        .acknowledge_alert(&trip_id, &Id::new("alert_001".to_owned()))
        .unwrap();
    assert_eq!(trip.content.unacknowledged_alerts(), 0);
    assert_eq!(store.system_stats().unacknowledged_alerts, 1);
    assert!(store
        .acknowledge_alert(&trip_id, &Id::new("alert_999".to_owned()))
        .is_none());
}

fn assert_missing_reference(
    fixtures: FixtureSet,
    expected_trip: &str,
    expected_kind: &str,
    expected_id: &str,
) {
    match LogisticsStore::from_fixtures(fixtures).unwrap_err() {
        FixtureError::MissingReference { trip, kind, id } => {
            assert_eq!(trip, expected_trip);
            assert_eq!(kind, expected_kind);
            assert_eq!(id, expected_id);
        }
        other => panic!("expected a missing reference, got {:?}", other),
    }
}

#[test]
fn missing_reference_is_rejected() {
    let mut fixtures = FixtureSet::bundled().unwrap();
    fixtures.trips[2].driver_id = Id::new("driver_999".to_owned());
    assert_missing_reference(fixtures, "trip_003", "driver", "driver_999");

    let mut fixtures = FixtureSet::bundled().unwrap();
    fixtures.trips[0].vehicle_id = Id::new("vehicle_999".to_owned());
    assert_missing_reference(fixtures, "trip_001", "vehicle", "vehicle_999");

    let mut fixtures = FixtureSet::bundled().unwrap();
    fixtures.trips[1].origin_id = Id::new("ep_999".to_owned());
    assert_missing_reference(fixtures, "trip_002", "origin", "ep_999");

    let mut fixtures = FixtureSet::bundled().unwrap();
    fixtures.trips[4].destination_id = Id::new("ep_998".to_owned());
    assert_missing_reference(fixtures, "trip_005", "destination", "ep_998");

    let mut fixtures = FixtureSet::bundled().unwrap();
    fixtures.trips[3].checkpoint_ids.push(Id::new("cp_999".to_owned()));
    assert_missing_reference(fixtures, "trip_004", "checkpoint", "cp_999");
}

#[test]
fn duplicate_ids_are_rejected() {
    let mut fixtures = FixtureSet::bundled().unwrap();
    let duplicate = fixtures.vehicles[0].clone();
    fixtures.vehicles.push(duplicate);
    let error = LogisticsStore::from_fixtures(fixtures).unwrap_err();
    assert!(matches!(error, FixtureError::DuplicateId { kind: "vehicle", .. }));
}
