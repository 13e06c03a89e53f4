use crate::domain::GeoPoint;
use chrono::{DateTime, Datelike, NaiveDate, TimeDelta, Utc};
use serde::Serialize;
use std::f64::consts::PI;
use sunrise::{Coordinates, DawnType, SolarDay, SolarEvent};
use thiserror::Error;

/// Beyond this latitude the sun may not rise or set at all on some days.
pub const MAX_LATITUDE: f64 = 65.0;

/// Length of an object's shadow at asr, relative to the object's height, on top of its noon shadow.
const ASR_SHADOW_FACTOR: f64 = 1.0;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Prayer {
    Fajr,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

/// Prayer times that follow directly from the position of the sun.
///
/// Fajr and isha are the astronomical dawn and dusk (sun 18° below the horizon). In summer, far from
/// the equator, the sun never gets that low and both are absent.
#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct PrayerTimes {
    pub fajr: Option<DateTime<Utc>>,
    pub sunrise: DateTime<Utc>,
    pub dhuhr: DateTime<Utc>,
    pub asr: DateTime<Utc>,
    pub maghrib: DateTime<Utc>,
    pub isha: Option<DateTime<Utc>>,
}

impl PrayerTimes {
    /// The prayers of the day in chronological order, skipping the ones that do not occur.
    pub fn prayers(&self) -> impl Iterator<Item = (Prayer, DateTime<Utc>)> {
        [
            (Prayer::Fajr, self.fajr),
            (Prayer::Dhuhr, Some(self.dhuhr)),
            (Prayer::Asr, Some(self.asr)),
            (Prayer::Maghrib, Some(self.maghrib)),
            (Prayer::Isha, self.isha),
        ]
        .into_iter()
        .filter_map(|(prayer, time)| time.map(|time| (prayer, time)))
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct UpcomingPrayer {
    pub prayer: Prayer,
    pub at: DateTime<Utc>,
    pub time_until: TimeDelta,
}

/// Returns the prayer times at sea level for `location` on `date`. Dhuhr is taken as the midpoint
/// between sunrise and sunset, asr as the moment the shadow of an object is its own length longer
/// than at noon.
pub fn prayer_times(location: &GeoPoint, date: NaiveDate) -> Result<PrayerTimes, PrayerTimesError> {
    if location.latitude().abs() > MAX_LATITUDE {
        return Err(PrayerTimesError::UnsupportedLatitude(location.latitude()));
    }

    let coordinates = Coordinates::new(location.latitude(), location.longitude()).ok_or(PrayerTimesError::InvalidCoordinates)?;
    let day = SolarDay::new(coordinates, date).with_altitude(0.0);

    let sunrise = day.event_time(SolarEvent::Sunrise);
    let maghrib = day.event_time(SolarEvent::Sunset);
    let dhuhr = sunrise + (maghrib - sunrise) / 2;

    // The solar calculator measures event angles downwards from the horizon.
    let asr = day.event_time(SolarEvent::Elevation {
        elevation: -asr_elevation(location.latitude(), date),
        morning: false,
    });

    let half_a_day = TimeDelta::hours(12);
    let fajr = Some(day.event_time(SolarEvent::Dawn(DawnType::Astronomical))).filter(|fajr| *fajr < sunrise && sunrise - *fajr < half_a_day);
    let isha = Some(day.event_time(SolarEvent::Dusk(DawnType::Astronomical))).filter(|isha| *isha > maghrib && *isha - maghrib < half_a_day);

    Ok(PrayerTimes {
        fajr,
        sunrise,
        dhuhr,
        asr,
        maghrib,
        isha,
    })
}

/// Returns the first prayer after `now` at `location`.
pub fn next_prayer(location: &GeoPoint, now: DateTime<Utc>) -> Result<UpcomingPrayer, PrayerTimesError> {
    let today = now.date_naive();
    // Far from Greenwich a solar day straddles two UTC dates, so the neighbouring days are searched too.
    let days = [today.pred_opt(), Some(today), today.succ_opt()];

    let upcoming = days
        .into_iter()
        .flatten()
        .map(|date| Ok(prayer_times(location, date)?.prayers().find(|(_, at)| *at > now)))
        .collect::<Result<Vec<_>, PrayerTimesError>>()?
        .into_iter()
        .flatten()
        .min_by_key(|(_, at)| *at);

    let (prayer, at) = upcoming.ok_or(PrayerTimesError::NoUpcomingPrayer)?;
    Ok(UpcomingPrayer {
        prayer,
        at,
        time_until: at - now,
    })
}

/// Sun elevation in radians at which asr begins.
fn asr_elevation(latitude: f64, date: NaiveDate) -> f64 {
    let noon_zenith = (latitude.to_radians() - solar_declination(date)).abs();
    (1.0 / (ASR_SHADOW_FACTOR + noon_zenith.tan())).atan()
}

/// Approximate solar declination in radians (Spencer's Fourier series).
fn solar_declination(date: NaiveDate) -> f64 {
    let gamma = 2.0 * PI / 365.0 * f64::from(date.ordinal0());
    0.006918 - 0.399912 * gamma.cos() + 0.070257 * gamma.sin() - 0.006758 * (2.0 * gamma).cos() + 0.000907 * (2.0 * gamma).sin()
        - 0.002697 * (3.0 * gamma).cos()
        + 0.00148 * (3.0 * gamma).sin()
}

#[derive(Error, Debug, PartialEq)]
pub enum PrayerTimesError {
    #[error("prayer times are only available between latitudes -{MAX_LATITUDE} and {MAX_LATITUDE}, got {0}")]
    UnsupportedLatitude(f64),
    #[error("coordinates rejected by the solar calculator")]
    InvalidCoordinates,
    #[error("no upcoming prayer found")]
    NoUpcomingPrayer,
}
