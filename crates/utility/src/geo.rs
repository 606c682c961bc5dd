use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const EARTH_RADIUS_KM: f64 = 6371.0;
pub const EARTH_RADIUS_M: f64 = EARTH_RADIUS_KM * 1000.0;

fn to_radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

fn to_degrees(radians: f64) -> f64 {
    radians * 180.0 / std::f64::consts::PI
}

pub fn calculate_bounding_box(
    lat: f64,
    lon: f64,
    radius_km: f64,
) -> ((f64, f64), (f64, f64)) {
    // Convert latitude and longitude from degrees to radians
    let lat_rad = to_radians(lat);
    let lon_rad = to_radians(lon);

    // Latitude bounds
    let min_lat = lat_rad - radius_km / EARTH_RADIUS_KM;
    let max_lat = lat_rad + radius_km / EARTH_RADIUS_KM;

    // Longitude bounds (adjusted by latitude)
    let min_lon = lon_rad - radius_km / (EARTH_RADIUS_KM * lat_rad.cos());
    let max_lon = lon_rad + radius_km / (EARTH_RADIUS_KM * lat_rad.cos());

    ((to_degrees(min_lat), to_degrees(min_lon)), (to_degrees(max_lat), to_degrees(max_lon)))
}

pub fn haversine_distance(
    latitude_1: f64,
    longitude_1: f64,
    latitude_2: f64,
    longitude_2: f64,
) -> f64 {
    let lat1_rad = to_radians(latitude_1);
    let lon1_rad = to_radians(longitude_1);
    let lat2_rad = to_radians(latitude_2);
    let lon2_rad = to_radians(longitude_2);

    let dlat = lat2_rad - lat1_rad;
    let dlon = lon2_rad - lon1_rad;

    let a = (dlat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Great-circle distance in km using the spherical law of cosines. Cheaper
/// than haversine and good enough beyond a few meters.
pub fn spherical_distance(
    latitude_1: f64,
    longitude_1: f64,
    latitude_2: f64,
    longitude_2: f64,
) -> f64 {
    let lat1_rad = to_radians(latitude_1);
    let lat2_rad = to_radians(latitude_2);
    let dlon = to_radians(longitude_2 - longitude_1);

    // rounding may push the cosine slightly out of [-1, 1] for identical points
    let cosine = (lat1_rad.sin() * lat2_rad.sin()
        + lat1_rad.cos() * lat2_rad.cos() * dlon.cos())
    .clamp(-1.0, 1.0);

    EARTH_RADIUS_KM * cosine.acos()
}

/// Length of a path given as `(latitude, longitude)` points, in km.
pub fn path_length(points: &[(f64, f64)]) -> f64 {
    points
        .windows(2)
        .map(|pair| haversine_distance(pair[0].0, pair[0].1, pair[1].0, pair[1].1))
        .sum()
}

/// Perimeter of a closed ring of `(latitude, longitude)` points, in km.
pub fn ring_length(points: &[(f64, f64)]) -> f64 {
    match (points.first(), points.last()) {
        (Some(first), Some(last)) if points.len() > 2 => {
            path_length(points) + haversine_distance(last.0, last.1, first.0, first.1)
        }
        _ => path_length(points),
    }
}

/// Approximate area of a polygon in m².
///
/// Projects the points onto a plane tangent at the mean latitude
/// (equirectangular) and applies the shoelace formula. Accurate for the
/// small, city-sized shapes drawn on a map; degrades for shapes spanning
/// several degrees of latitude.
pub fn polygon_area(points: &[(f64, f64)]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mean_latitude =
        points.iter().map(|(lat, _)| *lat).sum::<f64>() / points.len() as f64;
    let scale_x = EARTH_RADIUS_M * to_radians(mean_latitude).cos();

    let projected = points
        .iter()
        .map(|(lat, lng)| (to_radians(*lng) * scale_x, to_radians(*lat) * EARTH_RADIUS_M))
        .collect::<Vec<_>>();

    let doubled = projected
        .iter()
        .zip(projected.iter().cycle().skip(1))
        .map(|((x1, y1), (x2, y2))| x1 * y2 - x2 * y1)
        .sum::<f64>();

    doubled.abs() / 2.0
}

pub fn circle_area(radius_m: f64) -> f64 {
    std::f64::consts::PI * radius_m * radius_m
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Bounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl Bounds {
    fn center(&self) -> (f64, f64) {
        ((self.north + self.south) / 2.0, (self.east + self.west) / 2.0)
    }

    /// Approximate area in m², measuring the width along the center latitude.
    pub fn area(&self) -> f64 {
        let (center_lat, center_lng) = self.center();
        let width = haversine_distance(center_lat, self.west, center_lat, self.east);
        let height = haversine_distance(self.south, center_lng, self.north, center_lng);
        width * height * 1_000_000.0
    }
}

/// Bounds spanned by two opposite corners, in whatever order they were given.
pub fn bounds_from_corners(a: (f64, f64), b: (f64, f64)) -> Bounds {
    Bounds {
        north: a.0.max(b.0),
        south: a.0.min(b.0),
        east: a.1.max(b.1),
        west: a.1.min(b.1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RIYADH: (f64, f64) = (24.7136, 46.6753);
    const DAMMAM: (f64, f64) = (26.4207, 50.0888);

    #[test]
    fn haversine_riyadh_dammam() {
        let distance = haversine_distance(RIYADH.0, RIYADH.1, DAMMAM.0, DAMMAM.1);
        // roughly 390 km as the crow flies
        assert!(distance > 370.0 && distance < 410.0, "{distance}");
    }

    #[test]
    fn law_of_cosines_agrees_with_haversine() {
        let haversine = haversine_distance(RIYADH.0, RIYADH.1, DAMMAM.0, DAMMAM.1);
        let cosines = spherical_distance(RIYADH.0, RIYADH.1, DAMMAM.0, DAMMAM.1);
        assert!((haversine - cosines).abs() < 0.01);
    }

    #[test]
    fn law_of_cosines_identical_points() {
        let distance = spherical_distance(RIYADH.0, RIYADH.1, RIYADH.0, RIYADH.1);
        assert!(distance.abs() < 1e-6);
    }

    #[test]
    fn path_length_sums_segments() {
        let via = (25.5, 48.0);
        let direct = path_length(&[RIYADH, DAMMAM]);
        let detour = path_length(&[RIYADH, via, DAMMAM]);
        assert!(detour > direct);
        assert_eq!(path_length(&[RIYADH]), 0.0);
    }

    #[test]
    fn polygon_area_of_small_square() {
        // ~0.01° square at the equator, ~1.113 km a side
        let square = [(0.0, 0.0), (0.0, 0.01), (0.01, 0.01), (0.01, 0.0)];
        let area = polygon_area(&square);
        let expected = 1_236_000.0;
        assert!((area - expected).abs() / expected < 0.01, "{area}");
    }

    #[test]
    fn polygon_area_ignores_orientation() {
        let clockwise = [(0.0, 0.0), (0.01, 0.0), (0.01, 0.01), (0.0, 0.01)];
        let counter = [(0.0, 0.0), (0.0, 0.01), (0.01, 0.01), (0.01, 0.0)];
        assert!((polygon_area(&clockwise) - polygon_area(&counter)).abs() < 1e-6);
    }

    #[test]
    fn degenerate_polygon_has_no_area() {
        assert_eq!(polygon_area(&[RIYADH, DAMMAM]), 0.0);
    }

    #[test]
    fn corners_in_any_order() {
        let bounds = bounds_from_corners(DAMMAM, RIYADH);
        assert_eq!(bounds, bounds_from_corners(RIYADH, DAMMAM));
        assert_eq!(bounds.north, DAMMAM.0);
        assert_eq!(bounds.south, RIYADH.0);
        assert_eq!(bounds.east, DAMMAM.1);
        assert_eq!(bounds.west, RIYADH.1);
    }

    #[test]
    fn bounding_box_contains_radius() {
        let ((min_lat, min_lon), (max_lat, max_lon)) =
            calculate_bounding_box(RIYADH.0, RIYADH.1, 10.0);
        assert!(min_lat < RIYADH.0 && RIYADH.0 < max_lat);
        assert!(min_lon < RIYADH.1 && RIYADH.1 < max_lon);
        let north_edge = haversine_distance(RIYADH.0, RIYADH.1, max_lat, RIYADH.1);
        assert!((north_edge - 10.0).abs() < 0.01);
    }
}
