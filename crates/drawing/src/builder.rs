//! Click driven builders for the shapes a user draws on the map.
//!
//! Every builder starts [`DrawingMode::Idle`]. Toggling makes it active and
//! map clicks are collected until the shape is complete. Clicks while idle
//! are ignored.

use model::location::Location;
use utility::geo;

use crate::{
    shape::{Shape, POLYGON_MIN_POINTS, POLYLINE_MIN_POINTS},
    DrawingError, DrawingMode, Result,
};

pub const DEFAULT_CIRCLE_RADIUS: f64 = 1000.0;
pub const DEFAULT_CIRCLE_COLOR: &str = "#FF0000";

pub trait ShapeBuilder {
    fn mode(&self) -> DrawingMode;

    /// Starts drawing when idle. Cancels the shape in progress when active.
    fn toggle(&mut self);

    /// Handles a map click. Returns the shape if the click completed it.
    fn click(&mut self, location: Location) -> Option<Shape>;

    /// Discards everything collected so far and returns to idle.
    fn clear(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PathKind {
    Polygon,
    Polyline,
}

/// Collects points for a polygon or polyline until [`PathBuilder::finish`].
#[derive(Debug, Clone)]
pub struct PathBuilder {
    kind: PathKind,
    mode: DrawingMode,
    points: Vec<Location>,
}

impl PathBuilder {
    pub fn polygon() -> Self {
        Self::new(PathKind::Polygon)
    }

    pub fn polyline() -> Self {
        Self::new(PathKind::Polyline)
    }

    fn new(kind: PathKind) -> Self {
        Self {
            kind,
            mode: DrawingMode::Idle,
            points: vec![],
        }
    }

    pub fn minimum_points(&self) -> usize {
        match self.kind {
            PathKind::Polygon => POLYGON_MIN_POINTS,
            PathKind::Polyline => POLYLINE_MIN_POINTS,
        }
    }

    pub fn points(&self) -> &[Location] {
        &self.points
    }

    /// Completes the shape. With too few points nothing changes and the
    /// user can keep clicking.
    pub fn finish(&mut self) -> Result<Shape> {
        if !self.mode.is_active() {
            return Err(DrawingError::NotDrawing);
        }
        let required = self.minimum_points();
        if self.points.len() < required {
            return Err(DrawingError::NotEnoughPoints {
                required,
                actual: self.points.len(),
            });
        }

        let path = std::mem::take(&mut self.points);
        self.mode = DrawingMode::Idle;
        log::debug!("finished {:?} with {} points", self.kind, path.len());
        Ok(match self.kind {
            PathKind::Polygon => Shape::Polygon { path },
            PathKind::Polyline => Shape::Polyline { path },
        })
    }
}

impl ShapeBuilder for PathBuilder {
    fn mode(&self) -> DrawingMode {
        self.mode
    }

    fn toggle(&mut self) {
        match self.mode {
            DrawingMode::Idle => self.mode = DrawingMode::Active,
            DrawingMode::Active => self.clear(),
        }
    }

    fn click(&mut self, location: Location) -> Option<Shape> {
        if self.mode.is_active() {
            self.points.push(location);
        }
        None
    }

    fn clear(&mut self) {
        self.points.clear();
        self.mode = DrawingMode::Idle;
    }
}

/// First click sets a corner, the second one the opposite corner.
#[derive(Debug, Clone, Default)]
pub struct RectangleBuilder {
    mode: DrawingMode,
    start: Option<Location>,
}

impl RectangleBuilder {
    pub fn start(&self) -> Option<Location> {
        self.start
    }
}

impl ShapeBuilder for RectangleBuilder {
    fn mode(&self) -> DrawingMode {
        self.mode
    }

    fn toggle(&mut self) {
        match self.mode {
            DrawingMode::Idle => self.mode = DrawingMode::Active,
            DrawingMode::Active => self.clear(),
        }
    }

    fn click(&mut self, location: Location) -> Option<Shape> {
        if !self.mode.is_active() {
            return None;
        }
        match self.start.take() {
            None => {
                self.start = Some(location);
                None
            }
            Some(start) => {
                self.mode = DrawingMode::Idle;
                let bounds = geo::bounds_from_corners(start.as_tuple(), location.as_tuple());
                Some(Shape::Rectangle { bounds })
            }
        }
    }

    fn clear(&mut self) {
        self.start = None;
        self.mode = DrawingMode::Idle;
    }
}

/// Places a circle of the preselected radius and color with one click.
#[derive(Debug, Clone)]
pub struct CircleBuilder {
    mode: DrawingMode,
    radius: f64,
    color: String,
}

impl Default for CircleBuilder {
    fn default() -> Self {
        Self {
            mode: DrawingMode::Idle,
            radius: DEFAULT_CIRCLE_RADIUS,
            color: DEFAULT_CIRCLE_COLOR.to_owned(),
        }
    }
}

impl CircleBuilder {
    /// `radius` in meters. Negative values are treated as zero.
    pub fn set_radius(&mut self, radius: f64) {
        self.radius = radius.max(0.0);
    }

    pub fn set_color<S: Into<String>>(&mut self, color: S) {
        self.color = color.into();
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn color(&self) -> &str {
        &self.color
    }
}

impl ShapeBuilder for CircleBuilder {
    fn mode(&self) -> DrawingMode {
        self.mode
    }

    fn toggle(&mut self) {
        self.mode = match self.mode {
            DrawingMode::Idle => DrawingMode::Active,
            DrawingMode::Active => DrawingMode::Idle,
        };
    }

    fn click(&mut self, center: Location) -> Option<Shape> {
        if !self.mode.is_active() {
            return None;
        }
        self.mode = DrawingMode::Idle;
        Some(Shape::Circle {
            center,
            radius: self.radius,
            color: self.color.clone(),
        })
    }

    fn clear(&mut self) {
        self.mode = DrawingMode::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clicks(builder: &mut impl ShapeBuilder, points: &[(f64, f64)]) -> Option<Shape> {
        points
            .iter()
            .fold(None, |_, point| builder.click(Location::from(*point)))
    }

    #[test]
    fn polygon_needs_three_points() {
        let mut builder = PathBuilder::polygon();
        builder.toggle();
        clicks(&mut builder, &[(24.0, 46.0), (24.5, 46.0)]);

        assert_eq!(
            builder.finish(),
            Err(DrawingError::NotEnoughPoints {
                required: 3,
                actual: 2
            })
        );
        assert_eq!(builder.mode(), DrawingMode::Active);
        assert_eq!(builder.points().len(), 2);

        builder.click(Location::new(24.5, 46.5));
        let shape = builder.finish().unwrap();
        assert!(matches!(&shape, Shape::Polygon { path } if path.len() == 3));
        assert_eq!(builder.mode(), DrawingMode::Idle);
        assert!(builder.points().is_empty());
    }

    #[test]
    fn polyline_needs_two_points() {
        let mut builder = PathBuilder::polyline();
        builder.toggle();
        builder.click(Location::new(24.0, 46.0));
        assert!(builder.finish().is_err());
        builder.click(Location::new(24.1, 46.1));
        assert!(matches!(builder.finish(), Ok(Shape::Polyline { .. })));
    }

    #[test]
    fn finish_while_idle_fails() {
        assert_eq!(
            PathBuilder::polygon().finish(),
            Err(DrawingError::NotDrawing)
        );
    }

    #[test]
    fn idle_clicks_are_ignored() {
        let mut builder = PathBuilder::polygon();
        builder.click(Location::new(24.0, 46.0));
        assert!(builder.points().is_empty());

        let mut circle = CircleBuilder::default();
        assert!(circle.click(Location::new(24.0, 46.0)).is_none());
    }

    #[test]
    fn toggle_off_cancels() {
        let mut builder = PathBuilder::polygon();
        builder.toggle();
        clicks(&mut builder, &[(24.0, 46.0), (24.5, 46.0), (24.5, 46.5)]);
        builder.toggle();
        assert_eq!(builder.mode(), DrawingMode::Idle);
        assert!(builder.points().is_empty());
    }

    #[test]
    fn rectangle_bounds_from_any_corner_order() {
        let mut builder = RectangleBuilder::default();
        builder.toggle();
        assert!(builder.click(Location::new(25.2, 46.1)).is_none());
        assert_eq!(builder.start(), Some(Location::new(25.2, 46.1)));

        let shape = builder.click(Location::new(24.8, 46.9)).unwrap();
        let Shape::Rectangle { bounds } = shape else {
            panic!("expected a rectangle, got {shape:?}");
        };
        assert_eq!(bounds.north, 25.2);
        assert_eq!(bounds.south, 24.8);
        assert_eq!(bounds.east, 46.9);
        assert_eq!(bounds.west, 46.1);
        assert_eq!(builder.mode(), DrawingMode::Idle);
        assert_eq!(builder.start(), None);
    }

    #[test]
    fn circle_uses_preselected_style() {
        let mut builder = CircleBuilder::default();
        builder.set_radius(2500.0);
        builder.set_color("#00FF00");
        builder.toggle();

        let shape = builder.click(Location::new(24.7, 46.7)).unwrap();
        assert_eq!(
            shape,
            Shape::Circle {
                center: Location::new(24.7, 46.7),
                radius: 2500.0,
                color: "#00FF00".to_owned(),
            }
        );
        assert_eq!(builder.mode(), DrawingMode::Idle);
    }

    #[test]
    fn clear_returns_to_idle() {
        let mut builder = RectangleBuilder::default();
        builder.toggle();
        builder.click(Location::new(24.0, 46.0));
        builder.clear();
        assert_eq!(builder.mode(), DrawingMode::Idle);
        assert_eq!(builder.start(), None);
    }
}
