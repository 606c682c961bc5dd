use std::{error, fmt, result};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub mod animation;
pub mod builder;
pub mod shape;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawingError {
    /// finish was requested while nothing is being drawn.
    NotDrawing,
    NotEnoughPoints { required: usize, actual: usize },
}

impl fmt::Display for DrawingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotDrawing => write!(f, "not drawing"),
            Self::NotEnoughPoints { required, actual } => write!(
                f,
                "at least {} points are required, got {}",
                required, actual
            ),
        }
    }
}

impl error::Error for DrawingError {}

pub type Result<T> = result::Result<T, DrawingError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DrawingMode {
    #[default]
    Idle,
    Active,
}

impl DrawingMode {
    pub fn is_active(&self) -> bool {
        *self == Self::Active
    }
}
