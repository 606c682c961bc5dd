use std::{error, fmt, io, path::Path, result};

use chrono::{DateTime, Utc};
use model::{
    alert::Alert,
    cargo::Cargo,
    checkpoint::Checkpoint,
    driver::Driver,
    entry_point::EntryPoint,
    location::Location,
    trip::{Compliance, Trip, TripRequirements, TripStats, TripStatus},
    vehicle::Vehicle,
    WithId,
};
use serde::{de::DeserializeOwned, Deserialize};
use utility::id::Id;

pub const ENTRY_POINTS_FILE: &str = "entryPoints.json";
pub const CHECKPOINTS_FILE: &str = "checkpoints.json";
pub const DRIVERS_FILE: &str = "drivers.json";
pub const VEHICLES_FILE: &str = "vehicles.json";
pub const TRIPS_FILE: &str = "trips.json";

#[derive(Debug)]
pub enum FixtureError {
    Io {
        file: String,
        source: io::Error,
    },
    Parse {
        file: String,
        source: serde_json::Error,
    },
    /// a trip references a record which does not exist.
    MissingReference {
        trip: String,
        kind: &'static str,
        id: String,
    },
    DuplicateId {
        kind: &'static str,
        id: String,
    },
}

impl fmt::Display for FixtureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { file, source } => write!(f, "can not read {}: {}", file, source),
            Self::Parse { file, source } => {
                write!(f, "can not parse {}: {}", file, source)
            }
            Self::MissingReference { trip, kind, id } => {
                write!(f, "trip {} references unknown {} {}", trip, kind, id)
            }
            Self::DuplicateId { kind, id } => write!(f, "duplicate {} id {}", kind, id),
        }
    }
}

impl error::Error for FixtureError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type Result<T> = result::Result<T, FixtureError>;

/// A trip as stored in `trips.json`, referencing other records by id.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRecord {
    pub id: Id<Trip>,
    pub name: String,
    pub status: TripStatus,
    pub driver_id: Id<Driver>,
    pub vehicle_id: Id<Vehicle>,
    pub cargo: Cargo,
    pub origin_id: Id<EntryPoint>,
    pub destination_id: Id<EntryPoint>,
    #[serde(default)]
    pub checkpoint_ids: Vec<Id<Checkpoint>>,
    pub planned_route: Vec<Location>,
    #[serde(default)]
    pub actual_route: Vec<Location>,
    pub planned_start_time: DateTime<Utc>,
    pub actual_start_time: Option<DateTime<Utc>>,
    pub planned_end_time: DateTime<Utc>,
    pub estimated_arrival_time: Option<DateTime<Utc>>,
    pub actual_end_time: Option<DateTime<Utc>>,
    pub last_update: DateTime<Utc>,
    #[serde(default)]
    pub compliance: Compliance,
    #[serde(default)]
    pub stats: TripStats,
    #[serde(default)]
    pub requirements: TripRequirements,
    #[serde(default)]
    pub alerts: Vec<Alert>,
}

/// The raw, not yet joined content of the fixture files.
#[derive(Debug, Clone)]
pub struct FixtureSet {
    pub entry_points: Vec<WithId<EntryPoint>>,
    pub checkpoints: Vec<WithId<Checkpoint>>,
    pub drivers: Vec<WithId<Driver>>,
    pub vehicles: Vec<WithId<Vehicle>>,
    pub trips: Vec<TripRecord>,
}

impl FixtureSet {
    /// The fixtures compiled into the binary.
    pub fn bundled() -> Result<Self> {
        Ok(Self {
            entry_points: parse(
                ENTRY_POINTS_FILE,
                include_str!("../fixtures/entryPoints.json"),
            )?,
            checkpoints: parse(
                CHECKPOINTS_FILE,
                include_str!("../fixtures/checkpoints.json"),
            )?,
            drivers: parse(DRIVERS_FILE, include_str!("../fixtures/drivers.json"))?,
            vehicles: parse(VEHICLES_FILE, include_str!("../fixtures/vehicles.json"))?,
            trips: parse(TRIPS_FILE, include_str!("../fixtures/trips.json"))?,
        })
    }

    /// Reads all five fixture files from `directory`.
    pub async fn load_dir(directory: impl AsRef<Path>) -> Result<Self> {
        let directory = directory.as_ref();
        log::info!("loading fixtures from {}", directory.display());
        Ok(Self {
            entry_points: read(directory, ENTRY_POINTS_FILE).await?,
            checkpoints: read(directory, CHECKPOINTS_FILE).await?,
            drivers: read(directory, DRIVERS_FILE).await?,
            vehicles: read(directory, VEHICLES_FILE).await?,
            trips: read(directory, TRIPS_FILE).await?,
        })
    }
}

fn parse<T: DeserializeOwned>(file: &str, content: &str) -> Result<Vec<T>> {
    serde_json::from_str(content).map_err(|source| FixtureError::Parse {
        file: file.to_owned(),
        source,
    })
}

async fn read<T: DeserializeOwned>(directory: &Path, file: &str) -> Result<Vec<T>> {
    let path = directory.join(file);
    let content = tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| FixtureError::Io {
            file: path.display().to_string(),
            source,
        })?;
    parse(file, &content)
}
