use crate::models::Coordinate;

/// Earth's radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculate the Haversine distance between two points in kilometers
///
/// # Arguments
/// * `lat1` - Latitude of first point in degrees
/// * `lon1` - Longitude of first point in degrees
/// * `lat2` - Latitude of second point in degrees
/// * `lon2` - Longitude of second point in degrees
///
/// # Returns
/// Distance in kilometers, unrounded
#[inline]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    // Rounding can push `a` just past 1.0 for near-antipodal points
    let a = ((delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2))
    .clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Great-circle distance between two coordinates in kilometers
#[inline]
pub fn distance_between(from: &Coordinate, to: &Coordinate) -> f64 {
    haversine_distance(from.latitude, from.longitude, to.latitude, to.longitude)
}

/// Round a distance to one decimal place, halves going up.
///
/// Distances are never negative, so `f64::round` (half away from zero)
/// behaves as round-half-up here.
#[inline]
pub fn round_to_tenth(km: f64) -> f64 {
    (km * 10.0).round() / 10.0
}
