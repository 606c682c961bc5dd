use std::{fmt::Debug, time::Duration};

use async_trait::async_trait;

/// The operations of the logistics service, used to look up how long a
/// simulated call takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    GetTrips,
    GetTripById,
    GetEntryPoints,
    GetEntryPointsNearby,
    GetCheckpoints,
    GetVehicles,
    GetVehicleById,
    GetDrivers,
    GetSystemStats,
    UpdateVehicleLocation,
    CreateTrip,
    UpdateTripStatus,
    AcknowledgeAlert,
    SearchTrips,
}

impl Operation {
    /// Round trip time of a typical backend for this operation.
    pub fn typical_latency(&self) -> Duration {
        let millis = match self {
            Self::GetTrips => 500,
            Self::GetTripById => 300,
            Self::GetEntryPoints => 400,
            Self::GetEntryPointsNearby => 400,
            Self::GetCheckpoints => 300,
            Self::GetVehicles => 400,
            Self::GetVehicleById => 300,
            Self::GetDrivers => 300,
            Self::GetSystemStats => 600,
            Self::UpdateVehicleLocation => 200,
            Self::CreateTrip => 500,
            Self::UpdateTripStatus => 300,
            Self::AcknowledgeAlert => 300,
            Self::SearchTrips => 400,
        };
        Duration::from_millis(millis)
    }
}

/// Delays a call before it reaches the store, so that consumers experience
/// the service like a remote api.
#[async_trait]
pub trait Latency: Debug + Send + Sync {
    async fn delay(&self, operation: Operation);
}

/// Answers immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLatency;

#[async_trait]
impl Latency for NoLatency {
    async fn delay(&self, _operation: Operation) {}
}

/// Sleeps for the typical latency of each operation, multiplied by `scale`.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedLatency {
    scale: f64,
}

impl SimulatedLatency {
    pub fn new(scale: f64) -> Self {
        Self {
            scale: scale.max(0.0),
        }
    }

    /// Saturates at `Duration::MAX` for scales too large to represent.
    pub fn duration(&self, operation: Operation) -> Duration {
        let secs = operation.typical_latency().as_secs_f64() * self.scale;
        Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
    }
}

impl Default for SimulatedLatency {
    fn default() -> Self {
        Self::new(1.0)
    }
}

#[async_trait]
impl Latency for SimulatedLatency {
    async fn delay(&self, operation: Operation) {
        let duration = self.duration(operation);
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}
