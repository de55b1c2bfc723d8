//! Great-circle travel-time estimation.
//!
//! When no authoritative timing exists for a pair of adjacent stations, the
//! edge weight is estimated from the stations' coordinates: Haversine
//! distance covered at an assumed constant average metro speed.

/// Mean Earth radius in kilometres.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Assumed average metro speed in km/h.
const AVERAGE_SPEED_KMH: f64 = 35.0;

/// Great-circle distance between two coordinate pairs, in kilometres.
///
/// Coordinates are in degrees.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();

    let a = (dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Estimated traversal time between two coordinate pairs, in whole seconds.
///
/// The distance is covered at a constant 35 km/h and the result is
/// truncated, not rounded.
pub fn travel_time_secs(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> u32 {
    let km = haversine_km(lat1, lon1, lat2, lon2);
    (km / AVERAGE_SPEED_KMH * 3600.0) as u32
}
