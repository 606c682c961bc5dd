use std::{
    panic::{self, AssertUnwindSafe},
    sync::Arc,
};

use chrono::Utc;
use tokio::sync::{mpsc, oneshot};

use crate::{client::Client, latency::Latency, store::LogisticsStore, Request};

const MAILBOX_SIZE: usize = 64;

/// Owns the store on a dedicated task. All reads and writes arrive as
/// [`Request`]s and are handled one at a time, in the order received.
pub struct Server {
    sender: mpsc::Sender<Request>,
    latency: Arc<dyn Latency>,
}

impl Server {
    pub fn start(store: LogisticsStore, latency: Arc<dyn Latency>) -> Self {
        let (sender, receiver) = mpsc::channel(MAILBOX_SIZE);
        tokio::spawn(run(store, receiver));
        log::info!("logistics server started ({:?})", latency);
        Self { sender, latency }
    }

    pub fn client<S: Into<String>>(&self, id: S) -> Client {
        Client::new(id, self.sender.clone(), self.latency.clone())
    }
}

async fn run(mut store: LogisticsStore, mut receiver: mpsc::Receiver<Request>) {
    while let Some(request) = receiver.recv().await {
        // a panicking handler drops its responder; the caller sees a
        // ResponseError and the loop keeps serving
        let result = panic::catch_unwind(AssertUnwindSafe(|| handle(&mut store, request)));
        if let Err(why) = result {
            log::error!("logistics request handler panicked: {:?}", why);
        }
    }
    log::info!("all clients dropped, logistics server stops");
}

fn respond<T>(responder: oneshot::Sender<T>, value: T) {
    if responder.send(value).is_err() {
        log::debug!("client went away before the response was sent");
    }
}

fn handle(store: &mut LogisticsStore, request: Request) {
    let now = Utc::now();
    match request {
        Request::GetTrips { filters, responder } => {
            respond(responder, store.trips(filters.as_ref()))
        }
        Request::GetTripById { id, responder } => respond(responder, store.trip(&id)),
        Request::SearchTrips { query, responder } => {
            respond(responder, store.search_trips(&query))
        }
        Request::GetEntryPoints {
            entry_point_type,
            responder,
        } => respond(responder, store.entry_points(entry_point_type)),
        Request::GetEntryPointsNearby {
            latitude,
            longitude,
            radius_km,
            responder,
        } => respond(
            responder,
            store.entry_points_nearby(latitude, longitude, radius_km),
        ),
        Request::GetCheckpoints { responder } => respond(responder, store.checkpoints()),
        Request::GetVehicles { responder } => respond(responder, store.vehicles()),
        Request::GetVehicleById { id, responder } => respond(responder, store.vehicle(&id)),
        Request::GetDrivers { responder } => respond(responder, store.drivers()),
        Request::GetSystemStats { responder } => respond(responder, store.system_stats()),
        Request::UpdateVehicleLocation {
            vehicle_id,
            location,
            responder,
        } => respond(
            responder,
            store.update_vehicle_location(&vehicle_id, location, now),
        ),
        Request::CreateTrip { trip, responder } => {
            respond(responder, store.create_trip(*trip, now))
        }
        Request::UpdateTripStatus {
            trip_id,
            status,
            responder,
        } => respond(responder, store.update_trip_status(&trip_id, status, now)),
        Request::AcknowledgeAlert {
            trip_id,
            alert_id,
            responder,
        } => respond(responder, store.acknowledge_alert(&trip_id, &alert_id)),
    }
}
