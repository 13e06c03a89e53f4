use crate::domain::GeoPoint;

/// Returns the initial great-circle bearing (forward azimuth) from `from` to `to` in degrees within
/// [0, 360), where 0 is north and 90 is east.
///
/// The bearing between two equal points is not meaningful, it currently evaluates to `atan2(0, 0)`,
/// which is 0.
pub fn bearing_degrees(from: &GeoPoint, to: &GeoPoint) -> f64 {
    let lat1 = from.latitude().to_radians();
    let lat2 = to.latitude().to_radians();
    let delta_lon = (to.longitude() - from.longitude()).to_radians();

    let y = delta_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * delta_lon.cos();
    let degrees = y.atan2(x).to_degrees();

    // rem_euclid may yield exactly 360.0 for tiny negative angles, this form does not
    ((degrees % 360.0) + 360.0) % 360.0
}
