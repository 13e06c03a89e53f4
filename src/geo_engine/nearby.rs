use crate::domain::GeoPoint;
use crate::geo_engine::distance_km;
use ordered_float::OrderedFloat;

/// Anything that sits at a fixed point on the map.
pub trait Locatable {
    fn location(&self) -> &GeoPoint;
}

/// A point annotated with its distance to the query origin, if there was one.
#[derive(Clone, PartialEq, Debug)]
pub struct Nearby<P> {
    pub point: P,
    pub distance_km: Option<f64>,
}

/// Returns the points within `radius_km` of `origin`, closest first. Points at an equal distance keep
/// their input order.
///
/// Without an origin all points are returned as-is, in their input order and without a distance.
pub fn find_nearby<P: Locatable>(origin: Option<&GeoPoint>, points: Vec<P>, radius_km: f64) -> Vec<Nearby<P>> {
    let Some(origin) = origin else {
        return points.into_iter().map(|point| Nearby { point, distance_km: None }).collect();
    };

    let mut in_range = points
        .into_iter()
        .map(|point| {
            let distance = distance_km(origin, point.location());
            (point, distance)
        })
        .filter(|(_, distance)| *distance <= radius_km)
        .collect::<Vec<_>>();

    // sort_by_key is stable, which keeps ties in input order
    in_range.sort_by_key(|(_, distance)| OrderedFloat(*distance));

    in_range
        .into_iter()
        .map(|(point, distance)| Nearby {
            point,
            distance_km: Some(distance),
        })
        .collect()
}
