use crate::api::{ApiError, AppState};
use crate::auth::CurrentUser;
use crate::domain::{GeoPoint, Mosque};
use crate::extensions::float_ext::RoundTo;
use crate::geo_engine::{Nearby, find_nearby, qibla};
use crate::prayer_times::{Prayer, PrayerTimes, next_prayer, prayer_times};
use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use chrono::{NaiveDate, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, instrument};

const DISPLAY_DECIMALS: u32 = 2;

#[derive(Debug, Deserialize)]
pub struct MosquesQuery {
    lat: Option<f64>,
    lng: Option<f64>,
    radius: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct LocationQuery {
    lat: Option<f64>,
    lng: Option<f64>,
    date: Option<NaiveDate>,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct MosqueResponse {
    pub id: String,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub prayer_times: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

impl From<Nearby<Mosque>> for MosqueResponse {
    fn from(nearby: Nearby<Mosque>) -> Self {
        let mosque = nearby.point;
        MosqueResponse {
            id: mosque.id,
            name: mosque.name,
            address: mosque.address,
            latitude: mosque.location.latitude(),
            longitude: mosque.location.longitude(),
            phone: mosque.phone,
            website: mosque.website,
            prayer_times: mosque.prayer_times,
            distance: nearby.distance_km.map(|d| d.round_to(DISPLAY_DECIMALS)),
        }
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct QiblaResponse {
    pub qibla_direction: f64,
    pub distance_km: f64,
}

#[derive(Debug, Serialize)]
pub struct PrayerTimesResponse {
    location: GeoPoint,
    date: NaiveDate,
    prayer_times: PrayerTimes,
    next_prayer: Prayer,
    time_until_next: String,
}

/// Lists mosques, or the mosques within `radius` km of `lat`/`lng` closest first when a location is given.
#[instrument(skip_all)]
pub async fn mosques_handler(
    _user: CurrentUser,
    State(state): State<Arc<AppState>>,
    query: Result<Query<MosquesQuery>, QueryRejection>,
) -> Result<Json<Vec<MosqueResponse>>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::MalformedQuery(e.body_text()))?;

    let origin = optional_origin(query.lat, query.lng)?;
    let radius_km = query.radius.unwrap_or(state.default_radius_km);
    if origin.is_some() && (!radius_km.is_finite() || radius_km < 0.0) {
        return Err(ApiError::InvalidRadius(radius_km));
    }

    let mosques = state.mosques.list().await;
    let nearby = find_nearby(origin.as_ref(), mosques, radius_km);
    debug!("🕌 Found {} mosque(s)", nearby.len());

    Ok(Json(nearby.into_iter().map(MosqueResponse::from).collect()))
}

#[instrument(skip_all)]
pub async fn mosque_handler(_user: CurrentUser, State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Result<Json<MosqueResponse>, ApiError> {
    let mosque = state.mosques.get(&id).await.ok_or_else(|| ApiError::NotFound(format!("mosque '{}'", id)))?;

    Ok(Json(MosqueResponse::from(Nearby {
        point: mosque,
        distance_km: None,
    })))
}

#[instrument(skip_all)]
pub async fn qibla_direction_handler(_user: CurrentUser, query: Result<Query<LocationQuery>, QueryRejection>) -> Result<Json<QiblaResponse>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::MalformedQuery(e.body_text()))?;
    let from = required_origin(query.lat, query.lng)?;

    let result = qibla(&from);

    Ok(Json(QiblaResponse {
        qibla_direction: display_bearing(result.bearing_degrees),
        distance_km: result.distance_km.round_to(DISPLAY_DECIMALS),
    }))
}

#[instrument(skip_all)]
pub async fn prayer_times_handler(
    _user: CurrentUser,
    query: Result<Query<LocationQuery>, QueryRejection>,
) -> Result<Json<PrayerTimesResponse>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::MalformedQuery(e.body_text()))?;
    let location = required_origin(query.lat, query.lng)?;
    let now = Utc::now();
    let date = query.date.unwrap_or_else(|| now.date_naive());

    let prayer_times = prayer_times(&location, date)?;
    let upcoming = next_prayer(&location, now)?;

    Ok(Json(PrayerTimesResponse {
        location,
        date,
        prayer_times,
        next_prayer: upcoming.prayer,
        time_until_next: countdown(upcoming.time_until),
    }))
}

/// A location is optional, but only as a whole.
fn optional_origin(lat: Option<f64>, lng: Option<f64>) -> Result<Option<GeoPoint>, ApiError> {
    match (lat, lng) {
        (Some(lat), Some(lng)) => Ok(Some(GeoPoint::new(lat, lng)?)),
        (None, None) => Ok(None),
        (Some(_), None) => Err(ApiError::MissingQueryParameter("lng")),
        (None, Some(_)) => Err(ApiError::MissingQueryParameter("lat")),
    }
}

fn required_origin(lat: Option<f64>, lng: Option<f64>) -> Result<GeoPoint, ApiError> {
    let lat = lat.ok_or(ApiError::MissingQueryParameter("lat"))?;
    let lng = lng.ok_or(ApiError::MissingQueryParameter("lng"))?;
    Ok(GeoPoint::new(lat, lng)?)
}

/// Rounds a bearing for display, where a bearing that rounds up to a full turn is north.
fn display_bearing(bearing_degrees: f64) -> f64 {
    let rounded = bearing_degrees.round_to(DISPLAY_DECIMALS);
    if rounded >= 360.0 { 0.0 } else { rounded }
}

/// Formats a countdown as whole hours and minutes, e.g. `2h 15m`.
fn countdown(remaining: TimeDelta) -> String {
    let minutes = remaining.num_minutes().max(0);
    format!("{}h {}m", minutes / 60, minutes % 60)
}
