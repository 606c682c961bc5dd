use std::{error, fmt};

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

pub mod client;
pub mod fixtures;
pub mod latency;
pub mod server;
pub mod simulator;
pub mod store;

#[derive(Debug)]
pub enum RequestError {
    NotFound,
    SendError(mpsc::error::SendError<Request>),
    ResponseError(oneshot::error::RecvError),
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not found"),
            Self::SendError(_) => write!(f, "logistics server is not running"),
            Self::ResponseError(why) => {
                write!(f, "logistics server did not respond: {}", why)
            }
        }
    }
}

impl error::Error for RequestError {}

impl From<mpsc::error::SendError<Request>> for RequestError {
    fn from(why: mpsc::error::SendError<Request>) -> Self {
        Self::SendError(why)
    }
}

impl From<oneshot::error::RecvError> for RequestError {
    fn from(why: oneshot::error::RecvError) -> Self {
        Self::ResponseError(why)
    }
}

pub type RequestResult<O> = Result<O, RequestError>;

/// For callers which treat a missing record as an error.
pub fn none_to_not_found<O>(result: RequestResult<Option<O>>) -> RequestResult<O> {
    result.and_then(|value| value.ok_or(RequestError::NotFound))
}

type Responder<T> = oneshot::Sender<T>;

/// Commands understood by the logistics server. Each carries the channel the
/// answer is sent back on.
#[derive(Debug)]
pub enum Request {
    GetTrips {
        filters: Option<TripFilters>,
        responder: Responder<Vec<WithId<Trip>>>,
    },
    GetTripById {
        id: Id<Trip>,
        responder: Responder<Option<WithId<Trip>>>,
    },
    SearchTrips {
        query: String,
        responder: Responder<Vec<WithId<Trip>>>,
    },
    GetEntryPoints {
        entry_point_type: Option<EntryPointType>,
        responder: Responder<Vec<WithId<EntryPoint>>>,
    },
    GetEntryPointsNearby {
        latitude: f64,
        longitude: f64,
        radius_km: f64,
        responder: Responder<Vec<WithDistance<WithId<EntryPoint>>>>,
    },
    GetCheckpoints {
        responder: Responder<Vec<WithId<Checkpoint>>>,
    },
    GetVehicles {
        responder: Responder<Vec<WithId<Vehicle>>>,
    },
    GetVehicleById {
        id: Id<Vehicle>,
        responder: Responder<Option<WithId<Vehicle>>>,
    },
    GetDrivers {
        responder: Responder<Vec<WithId<Driver>>>,
    },
    GetSystemStats {
        responder: Responder<SystemStats>,
    },
    UpdateVehicleLocation {
        vehicle_id: Id<Vehicle>,
        location: Location,
        responder: Responder<Option<WithId<Vehicle>>>,
    },
    CreateTrip {
        trip: Box<NewTrip>,
        responder: Responder<WithId<Trip>>,
    },
    UpdateTripStatus {
        trip_id: Id<Trip>,
        status: TripStatus,
        responder: Responder<Option<WithId<Trip>>>,
    },
    AcknowledgeAlert {
        trip_id: Id<Trip>,
        alert_id: Id<Alert>,
        responder: Responder<Option<WithId<Trip>>>,
    },
}
