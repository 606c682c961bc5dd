use model::location::{self, Location};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::geo::{self, Bounds};

use crate::{DrawingError, Result};

pub const POLYGON_MIN_POINTS: usize = 3;
pub const POLYLINE_MIN_POINTS: usize = 2;

/// A finished drawing on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Shape {
    Polygon { path: Vec<Location> },
    Polyline { path: Vec<Location> },
    Rectangle { bounds: Bounds },
    /// `radius` in meters.
    Circle {
        center: Location,
        radius: f64,
        color: String,
    },
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Measurements {
    /// km, polylines only.
    pub length_km: Option<f64>,
    /// km, closed shapes only.
    pub perimeter_km: Option<f64>,
    /// m², closed shapes only.
    pub area_m2: Option<f64>,
}

fn require(path: &[Location], required: usize) -> Result<()> {
    if path.len() < required {
        return Err(DrawingError::NotEnoughPoints {
            required,
            actual: path.len(),
        });
    }
    Ok(())
}

impl Shape {
    /// Distance and area of the shape. Paths with too few points for their
    /// kind can not be measured.
    pub fn measure(&self) -> Result<Measurements> {
        let measurements = match self {
            Self::Polygon { path } => {
                require(path, POLYGON_MIN_POINTS)?;
                let points = location::as_tuples(path);
                Measurements {
                    length_km: None,
                    perimeter_km: Some(geo::ring_length(&points)),
                    area_m2: Some(geo::polygon_area(&points)),
                }
            }
            Self::Polyline { path } => {
                require(path, POLYLINE_MIN_POINTS)?;
                Measurements {
                    length_km: Some(geo::path_length(&location::as_tuples(path))),
                    ..Default::default()
                }
            }
            Self::Rectangle { bounds } => {
                let corners = [
                    (bounds.north, bounds.west),
                    (bounds.north, bounds.east),
                    (bounds.south, bounds.east),
                    (bounds.south, bounds.west),
                ];
                Measurements {
                    length_km: None,
                    perimeter_km: Some(geo::ring_length(&corners)),
                    area_m2: Some(bounds.area()),
                }
            }
            Self::Circle { radius, .. } => Measurements {
                length_km: None,
                perimeter_km: Some(2.0 * std::f64::consts::PI * radius / 1000.0),
                area_m2: Some(geo::circle_area(*radius)),
            },
        };
        Ok(measurements)
    }
}
