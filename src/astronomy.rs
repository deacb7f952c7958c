//! Astronomical provider: solar day times and lunar data
//!
//! Sun times come from the `sunrise` crate and are converted to station-local
//! time. Lunar phase, illumination, and rise/set use a low-precision
//! ephemeris (Sky & Telescope "MOONFX" lineage): phase from the synodic
//! cycle, ecliptic position from the anomalistic/draconic/sidereal cycles,
//! rise/set from an hourly altitude scan with linear interpolation.
//! Accuracy is a few minutes for rise/set, well inside forecast tolerance.

use crate::models::{MoonData, MoonPhase, SunTimes};
use crate::{FishcastError, Result};
use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use std::f64::consts::TAU;
use sunrise::{Coordinates, DawnType, SolarDay, SolarEvent};

/// Mean synodic month length in days
const SYNODIC_MONTH: f64 = 29.530_588_853;

/// JD of the 2000-01-06 new moon, the phase epoch
const NEW_MOON_EPOCH_JD: f64 = 2_451_550.1;

/// Mean obliquity of the ecliptic (degrees), adequate at this precision
const OBLIQUITY_DEG: f64 = 23.4397;

/// Altitude of the moon's center at rise/set (parallax vs refraction, degrees)
const MOON_RISE_ALTITUDE_DEG: f64 = 0.125;

/// Computes sun and moon data for a fixed geographic location.
///
/// Pure function of (date, location): no I/O, safe to call per day.
#[derive(Debug, Clone)]
pub struct AstronomicalProvider {
    coords: Coordinates,
    latitude: f64,
    longitude: f64,
    tz: Tz,
}

impl AstronomicalProvider {
    /// Create a provider for the given location and station timezone
    pub fn new(latitude: f64, longitude: f64, tz: Tz) -> Result<Self> {
        let coords = Coordinates::new(latitude, longitude).ok_or_else(|| {
            FishcastError::validation(format!(
                "invalid coordinates: lat={latitude}, lon={longitude}"
            ))
        })?;
        Ok(Self {
            coords,
            latitude,
            longitude,
            tz,
        })
    }

    /// Solar day times for one calendar day, station-local
    #[must_use]
    pub fn sun_times(&self, date: NaiveDate) -> SunTimes {
        let solar_day = SolarDay::new(self.coords, date);
        let local = |event: SolarEvent| {
            solar_day
                .event_time(event)
                .expect("solar event occurs daily at the reference station's latitude")
                .with_timezone(&self.tz)
                .naive_local()
        };

        SunTimes {
            sunrise: local(SolarEvent::Sunrise),
            sunset: local(SolarEvent::Sunset),
            dawn: local(SolarEvent::Dawn(DawnType::Civil)),
            dusk: local(SolarEvent::Dusk(DawnType::Civil)),
            nautical_dawn: local(SolarEvent::Dawn(DawnType::Nautical)),
            nautical_dusk: local(SolarEvent::Dusk(DawnType::Nautical)),
        }
    }

    /// Lunar data for one calendar day, station-local
    #[must_use]
    pub fn moon_data(&self, date: NaiveDate) -> MoonData {
        // Phase is slow-moving; local noon represents the day
        let noon = date
            .and_hms_opt(12, 0, 0)
            .unwrap_or_else(|| date.and_time(chrono::NaiveTime::MIN));
        let jd = julian_date(&self.to_utc(noon));
        let phase = moon_phase_fraction(jd);
        let illumination = (1.0 - (TAU * phase).cos()) / 2.0;

        let (moonrise, moonset) = self.moon_rise_set(date);

        MoonData {
            phase,
            phase_name: MoonPhase::from_phase(phase),
            illumination,
            moonrise,
            moonset,
        }
    }

    /// Scan the local day hourly for horizon crossings of the moon
    fn moon_rise_set(&self, date: NaiveDate) -> (Option<NaiveDateTime>, Option<NaiveDateTime>) {
        let altitude_at = |minutes: i64| -> Option<f64> {
            let local = date.and_hms_opt(0, 0, 0)? + chrono::Duration::minutes(minutes);
            let jd = julian_date(&self.to_utc(local));
            Some(moon_altitude_deg(jd, self.latitude, self.longitude) - MOON_RISE_ALTITUDE_DEG)
        };

        let mut rise = None;
        let mut set = None;
        let mut prev = match altitude_at(0) {
            Some(alt) => alt,
            None => return (None, None),
        };

        for hour in 1..=24i64 {
            let Some(cur) = altitude_at(hour * 60) else {
                break;
            };
            if prev < 0.0 && cur >= 0.0 && rise.is_none() {
                let frac = prev / (prev - cur);
                let minutes = (hour - 1) * 60 + (frac * 60.0).round() as i64;
                rise = date
                    .and_hms_opt(0, 0, 0)
                    .map(|midnight| midnight + chrono::Duration::minutes(minutes));
            }
            if prev >= 0.0 && cur < 0.0 && set.is_none() {
                let frac = prev / (prev - cur);
                let minutes = (hour - 1) * 60 + (frac * 60.0).round() as i64;
                set = date
                    .and_hms_opt(0, 0, 0)
                    .map(|midnight| midnight + chrono::Duration::minutes(minutes));
            }
            prev = cur;
        }

        (rise, set)
    }

    /// Station-local naive instant to UTC, resolving DST gaps to the
    /// earliest valid interpretation
    fn to_utc(&self, local: NaiveDateTime) -> NaiveDateTime {
        match self.tz.from_local_datetime(&local).earliest() {
            Some(aware) => aware.with_timezone(&Utc).naive_utc(),
            None => local,
        }
    }
}

/// Julian date of a UTC instant
#[must_use]
pub fn julian_date(dt: &NaiveDateTime) -> f64 {
    let (mut y, mut m) = (f64::from(dt.year()), f64::from(dt.month()));
    if m <= 2.0 {
        y -= 1.0;
        m += 12.0;
    }
    let a = (y / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();
    let day = f64::from(dt.day())
        + (f64::from(dt.hour())
            + f64::from(dt.minute()) / 60.0
            + f64::from(dt.second()) / 3600.0)
            / 24.0;
    (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + day + b - 1524.5
}

/// Lunar phase fraction in [0,1): 0.0 new, 0.5 full
#[must_use]
pub fn moon_phase_fraction(jd: f64) -> f64 {
    frac((jd - NEW_MOON_EPOCH_JD) / SYNODIC_MONTH)
}

/// Low-precision geocentric ecliptic longitude/latitude of the moon (degrees)
fn moon_ecliptic(jd: f64) -> (f64, f64) {
    let phase = moon_phase_fraction(jd);
    // Anomalistic, draconic, and sidereal cycle fractions
    let dp = frac((jd - 2_451_562.2) / 27.554_549_88) * TAU;
    let np = frac((jd - 2_451_565.2) / 27.212_220_817) * TAU;
    let rp = frac((jd - 2_451_555.8) / 27.321_582_241);

    let lon = (360.0 * rp
        + 6.3 * dp.sin()
        + 1.3 * (2.0 * TAU * phase - dp).sin()
        + 0.7 * (2.0 * TAU * phase).sin())
    .rem_euclid(360.0);
    let lat = 5.1 * np.sin();
    (lon, lat)
}

/// Altitude of the moon above the horizon (degrees) at a UTC instant
fn moon_altitude_deg(jd: f64, latitude: f64, longitude: f64) -> f64 {
    let (ecl_lon, ecl_lat) = moon_ecliptic(jd);
    let (l, b) = (ecl_lon.to_radians(), ecl_lat.to_radians());
    let e = OBLIQUITY_DEG.to_radians();

    // Ecliptic to equatorial
    let dec = (b.sin() * e.cos() + b.cos() * e.sin() * l.sin()).asin();
    let ra = (l.sin() * e.cos() - b.tan() * e.sin()).atan2(l.cos());

    // Greenwich mean sidereal time, then local hour angle
    let gmst = (280.460_618_37 + 360.985_647_366_29 * (jd - 2_451_545.0)).rem_euclid(360.0);
    let lst = (gmst + longitude).to_radians();
    let hour_angle = lst - ra;

    let phi = latitude.to_radians();
    (phi.sin() * dec.sin() + phi.cos() * dec.cos() * hour_angle.cos())
        .asin()
        .to_degrees()
}

fn frac(v: f64) -> f64 {
    let f = v - v.floor();
    if f < 0.0 { f + 1.0 } else { f }
}
