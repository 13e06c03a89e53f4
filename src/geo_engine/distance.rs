use crate::domain::GeoPoint;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Returns the great-circle distance between `a` and `b` in kilometers using the Haversine formula.
pub fn distance_km(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let lat1 = a.latitude().to_radians();
    let lat2 = b.latitude().to_radians();
    let delta_lat = lat2 - lat1;
    let delta_lon = (b.longitude() - a.longitude()).to_radians();

    let haversine = (delta_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    // Rounding can push the value just past 1 for antipodal points, which would make asin NaN
    let c = 2.0 * haversine.sqrt().min(1.0).asin();

    EARTH_RADIUS_KM * c
}
