use crate::domain::GeoPoint;
use crate::geo_engine::{bearing_degrees, distance_km};

/// Location of the Kaaba in Mecca.
pub const KAABA: GeoPoint = GeoPoint::new_const(21.4225, 39.8262);

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct QiblaResult {
    /// Initial bearing towards the Kaaba within [0, 360).
    pub bearing_degrees: f64,
    pub distance_km: f64,
}

/// Returns the Qibla direction and the distance to the Kaaba from `from`, at full precision.
pub fn qibla(from: &GeoPoint) -> QiblaResult {
    QiblaResult {
        bearing_degrees: bearing_degrees(from, &KAABA),
        distance_km: distance_km(from, &KAABA),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case::new_york(40.7128, -74.0060, 58.48, 10306.31)]
    #[case::rotterdam(51.8615899, 4.3580323, 124.46, 4551.42)]
    #[case::sydney(-33.8688, 151.2093, 277.50, 13236.26)]
    fn qibla_from_known_cities(#[case] latitude: f64, #[case] longitude: f64, #[case] bearing: f64, #[case] distance: f64) {
        let result = qibla(&GeoPoint::new(latitude, longitude).unwrap());

        assert!((result.bearing_degrees - bearing).abs() < 0.01, "Expected bearing ~{bearing}, got {}", result.bearing_degrees);
        assert!((result.distance_km - distance).abs() < 1.0, "Expected distance ~{distance}, got {}", result.distance_km);
    }

    #[test]
    fn qibla_from_new_york_points_east_north_east() {
        let result = qibla(&GeoPoint::new(40.7128, -74.0060).unwrap());

        assert!((58.0..=60.0).contains(&result.bearing_degrees), "Expected 58-60 degrees, got {}", result.bearing_degrees);
    }

    #[test]
    fn qibla_from_the_kaaba_is_zero_distance() {
        let result = qibla(&KAABA);

        assert_eq!(result.distance_km, 0.0);
        assert!((0.0..360.0).contains(&result.bearing_degrees));
    }

    #[test]
    fn qibla_is_deterministic() {
        let from = GeoPoint::new(-6.2088, 106.8456).unwrap();

        assert_eq!(qibla(&from), qibla(&from));
    }
}
