use std::sync::Arc;

use model::{
    alert::Alert,
    checkpoint::Checkpoint,
    driver::Driver,
    entry_point::{EntryPoint, EntryPointType},
    filter::TripFilters,
    location::Location,
    stats::SystemStats,
    trip::{NewTrip, Trip, TripStatus},
    vehicle::Vehicle,
    WithDistance, WithId,
};
use tokio::sync::{mpsc, oneshot};
use utility::id::Id;

use crate::{
    latency::{Latency, Operation},
    Request, RequestResult,
};

/// Handle to a running [`crate::server::Server`]. Cheap to clone. Every call
/// first waits for the configured latency and then queues a request.
#[derive(Debug, Clone)]
pub struct Client {
    id: String,
    sender: mpsc::Sender<Request>,
    latency: Arc<dyn Latency>,
}

impl Client {
    pub(crate) fn new<S>(id: S, sender: mpsc::Sender<Request>, latency: Arc<dyn Latency>) -> Self
    where
        S: Into<String>,
    {
        Self {
            id: id.into(),
            sender,
            latency,
        }
    }

    async fn request<T, F>(&self, operation: Operation, build: F) -> RequestResult<T>
    where
        F: FnOnce(oneshot::Sender<T>) -> Request,
    {
        self.latency.delay(operation).await;
        log::trace!("{} requests {:?}", self.id, operation);
        let (responder, receiver) = oneshot::channel();
        self.sender.send(build(responder)).await?;
        Ok(receiver.await?)
    }

    pub async fn get_trips(
        &self,
        filters: Option<TripFilters>,
    ) -> RequestResult<Vec<WithId<Trip>>> {
        self.request(Operation::GetTrips, |responder| Request::GetTrips {
            filters,
            responder,
        })
        .await
    }

    pub async fn get_trip_by_id(&self, id: &Id<Trip>) -> RequestResult<Option<WithId<Trip>>> {
        let id = id.clone();
        self.request(Operation::GetTripById, |responder| Request::GetTripById {
            id,
            responder,
        })
        .await
    }

    pub async fn search_trips<S: Into<String>>(
        &self,
        query: S,
    ) -> RequestResult<Vec<WithId<Trip>>> {
        let query = query.into();
        self.request(Operation::SearchTrips, |responder| Request::SearchTrips {
            query,
            responder,
        })
        .await
    }

    pub async fn get_entry_points(
        &self,
        entry_point_type: Option<EntryPointType>,
    ) -> RequestResult<Vec<WithId<EntryPoint>>> {
        self.request(Operation::GetEntryPoints, |responder| {
            Request::GetEntryPoints {
                entry_point_type,
                responder,
            }
        })
        .await
    }

    pub async fn get_entry_points_nearby(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: f64,
    ) -> RequestResult<Vec<WithDistance<WithId<EntryPoint>>>> {
        self.request(Operation::GetEntryPointsNearby, |responder| {
            Request::GetEntryPointsNearby {
                latitude,
                longitude,
                radius_km,
                responder,
            }
        })
        .await
    }

    pub async fn get_checkpoints(&self) -> RequestResult<Vec<WithId<Checkpoint>>> {
        self.request(Operation::GetCheckpoints, |responder| {
            Request::GetCheckpoints { responder }
        })
        .await
    }

    pub async fn get_vehicles(&self) -> RequestResult<Vec<WithId<Vehicle>>> {
        self.request(Operation::GetVehicles, |responder| Request::GetVehicles {
            responder,
        })
        .await
    }

    pub async fn get_vehicle_by_id(
        &self,
        id: &Id<Vehicle>,
    ) -> RequestResult<Option<WithId<Vehicle>>> {
        let id = id.clone();
        self.request(Operation::GetVehicleById, |responder| {
            Request::GetVehicleById { id, responder }
        })
        .await
    }

    pub async fn get_drivers(&self) -> RequestResult<Vec<WithId<Driver>>> {
        self.request(Operation::GetDrivers, |responder| Request::GetDrivers {
            responder,
        })
        .await
    }

    pub async fn get_system_stats(&self) -> RequestResult<SystemStats> {
        self.request(Operation::GetSystemStats, |responder| {
            Request::GetSystemStats { responder }
        })
        .await
    }

    /// Returns `None` if the vehicle does not exist.
    pub async fn update_vehicle_location(
        &self,
        vehicle_id: &Id<Vehicle>,
        location: Location,
    ) -> RequestResult<Option<WithId<Vehicle>>> {
        let vehicle_id = vehicle_id.clone();
        self.request(Operation::UpdateVehicleLocation, |responder| {
            Request::UpdateVehicleLocation {
                vehicle_id,
                location,
                responder,
            }
        })
        .await
    }

    pub async fn create_trip(&self, trip: NewTrip) -> RequestResult<WithId<Trip>> {
        self.request(Operation::CreateTrip, |responder| Request::CreateTrip {
            trip: Box::new(trip),
            responder,
        })
        .await
    }

    pub async fn update_trip_status(
        &self,
        trip_id: &Id<Trip>,
        status: TripStatus,
    ) -> RequestResult<Option<WithId<Trip>>> {
        let trip_id = trip_id.clone();
        self.request(Operation::UpdateTripStatus, |responder| {
            Request::UpdateTripStatus {
                trip_id,
                status,
                responder,
            }
        })
        .await
    }

    /// Returns `None` if either the trip or the alert does not exist.
    pub async fn acknowledge_alert(
        &self,
        trip_id: &Id<Trip>,
        alert_id: &Id<Alert>,
    ) -> RequestResult<Option<WithId<Trip>>> {
        let trip_id = trip_id.clone();
        let alert_id = alert_id.clone();
        self.request(Operation::AcknowledgeAlert, |responder| {
            Request::AcknowledgeAlert {
                trip_id,
                alert_id,
                responder,
            }
        })
        .await
    }
}
