use geo::{Distance, Geodesic, Point, point};

use crate::model::geo::Coordinates;

pub const METERS_PER_MILE: f64 = 1_609.344;

fn to_point(c: Coordinates) -> Point<f64> {
    point!(x: c.longitude(), y: c.latitude())
}

/// Geodesic distance on the WGS-84 ellipsoid (Karney), in meters.
pub fn geodesic_meters(a: Coordinates, b: Coordinates) -> f64 {
    Geodesic::distance(to_point(a), to_point(b))
}

/// Geodesic distance in statute miles.
pub fn distance_miles(a: Coordinates, b: Coordinates) -> f64 {
    geodesic_meters(a, b) / METERS_PER_MILE
}

#[cfg(test)]
#[path = "../tests/src_inline/geodesy.rs"]
mod tests;
