use std::{sync::Arc, time::Duration};

use logistics::{
    client::Client,
    latency::{NoLatency, SimulatedLatency},
    none_to_not_found,
    server::Server,
    simulator::Simulator,
    store::LogisticsStore,
    RequestError,
};
use model::{
    filter::TripFilters,
    location::Location,
    trip::{NewTrip, TripStatus},
};
use tokio::time::Instant;
use utility::id::Id;

fn client() -> Client {
    Server::start(LogisticsStore::bundled().unwrap(), Arc::new(NoLatency)).client("test")
}

#[tokio::test]
async fn reads_go_through_the_server() {
    let client = client();
    assert_eq!(client.get_trips(None).await.unwrap().len(), 6);
    assert_eq!(client.get_vehicles().await.unwrap().len(), 6);
    assert_eq!(client.get_drivers().await.unwrap().len(), 5);
    assert_eq!(client.get_checkpoints().await.unwrap().len(), 4);
    assert_eq!(client.get_entry_points(None).await.unwrap().len(), 7);
    assert_eq!(client.get_system_stats().await.unwrap().total_trips, 6);

    let trip = client
        .get_trip_by_id(&Id::new("trip_004".to_owned()))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(trip.content.status, TripStatus::Delayed);
    assert!(client
        .get_trip_by_id(&Id::new("trip_999".to_owned()))
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn missing_records_map_to_not_found() {
    let client = client();
    let result = none_to_not_found(
        client
            .get_vehicle_by_id(&Id::new("vehicle_999".to_owned()))
            .await,
    );
    assert!(matches!(result, Err(RequestError::NotFound)));
}

#[tokio::test]
async fn writes_are_visible_to_other_clients() {
    let server = Server::start(LogisticsStore::bundled().unwrap(), Arc::new(NoLatency));
    let writer = server.client("writer");
    let reader = server.client("reader");

    let created = writer.create_trip(NewTrip::default()).await.unwrap();
    let found = reader.get_trip_by_id(&created.id).await.unwrap().unwrap();
    assert_eq!(found.content.name, created.content.name);

    writer
        .update_trip_status(&created.id, TripStatus::InProgress)
        .await
        .unwrap()
        .unwrap();
    let in_progress = reader
        .get_trips(Some(
            TripFilters::default().with_status(vec![TripStatus::InProgress]),
        ))
        .await
        .unwrap();
    assert_eq!(in_progress.len(), 3);
    assert_eq!(reader.get_system_stats().await.unwrap().active_trips, 3);
}

#[tokio::test]
async fn acknowledge_alert_through_client() {
    let client = client();
    let trip = client
        .acknowledge_alert(
            &Id::new("trip_004".to_owned()),
            &Id::new("alert_003".to_owned()),
        )
        .await
        .unwrap()
        .unwrap();
    assert!(trip.content.alerts.iter().all(|alert| alert.acknowledged));
    assert_eq!(client.get_system_stats().await.unwrap().unacknowledged_alerts, 1);
}

#[tokio::test]
async fn search_and_nearby_through_client() {
    let client = client();
    assert_eq!(client.search_trips("electronics").await.unwrap().len(), 1);
    let nearby = client
        .get_entry_points_nearby(24.6877, 46.7981, 50.0)
        .await
        .unwrap();
    assert_eq!(nearby[0].content.id.raw(), "ep_006");
}

#[tokio::test(start_paused = true)]
async fn calls_wait_for_simulated_latency() {
    let client = Server::start(
        LogisticsStore::bundled().unwrap(),
        Arc::new(SimulatedLatency::default()),
    )
    .client("slow");

    let start = Instant::now();
    client.get_system_stats().await.unwrap();
    assert!(start.elapsed() >= Duration::from_millis(600));

    let start = Instant::now();
    client
        .update_vehicle_location(
            &Id::new("vehicle_001".to_owned()),
            Location::new(24.9, 48.05),
        )
        .await
        .unwrap();
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_millis(200));
    assert!(elapsed < Duration::from_millis(600));
}

#[tokio::test]
async fn simulator_moves_trips_in_progress() {
    let client = client();
    let simulator = Simulator::new(client.clone(), Duration::from_secs(5));

    // both trips in progress have planned points left
    assert_eq!(simulator.step().await.unwrap(), 2);

    let trip = client
        .get_trip_by_id(&Id::new("trip_001".to_owned()))
        .await
        .unwrap()
        .unwrap()
        .content;
    assert_eq!(trip.actual_route.len(), 4);
    assert_eq!(trip.actual_route.last(), Some(&Location::new(24.9, 48.05)));

    // trip_002 reaches its destination on the first step
    assert_eq!(simulator.step().await.unwrap(), 1);
    assert_eq!(simulator.step().await.unwrap(), 0);

    let planned = client
        .get_trip_by_id(&Id::new("trip_005".to_owned()))
        .await
        .unwrap()
        .unwrap();
    assert!(planned.content.actual_route.is_empty());
}
