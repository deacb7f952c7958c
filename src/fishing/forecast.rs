//! Fishing forecast assembly
//!
//! This module combines tide, solar/lunar, seasonal, and water-temperature
//! signals into per-day forecasts and a multi-day outlook.

use crate::astronomy::AstronomicalProvider;
use crate::config::{FishcastConfig, ScoringConfig};
use crate::fishing::scorer::{DayInputs, compute_hourly_scores};
use crate::fishing::seasons::SeasonalTable;
use crate::fishing::signals::moon_phase_score;
use crate::fishing::spots::{FishingSpot, SpotCatalog};
use crate::fishing::windows::find_best_windows;
use crate::models::tide::{extrema_for_day, tidal_range};
use crate::models::{
    FishingMode, FishingWindow, HourlyScore, HourlyTideHeight, MoonData, SunTimes, TidePrediction,
};
use crate::noaa::ForecastInputs;
use anyhow::Result;
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Minutes before sunrise the vessel should arrive on the grounds
const ARRIVAL_LEAD_MINUTES: i64 = 15;

/// The full forecast for one calendar day and one mode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayForecast {
    /// Calendar day
    pub date: NaiveDate,
    /// Mode this forecast was scored for
    pub mode: FishingMode,
    /// Overall quality rating, 1-5
    pub overall_rating: u8,
    /// Up to three windows, best first
    pub best_windows: Vec<FishingWindow>,
    /// The 24-entry score curve
    pub hourly_scores: Vec<HourlyScore>,
    /// The day's tide extrema
    pub tides: Vec<TidePrediction>,
    /// Hourly tide heights for display, when available
    pub tide_curve: Vec<HourlyTideHeight>,
    /// Solar day times
    pub sun_times: SunTimes,
    /// Lunar data
    pub moon: MoonData,
    /// Water temperature, if known
    pub water_temp_f: Option<f64>,
    /// Seasonal status text for the mode
    pub season_status: String,
    /// Recommended spots for the day
    pub recommended_spots: Vec<FishingSpot>,
    /// When to leave the dock to reach the closest recommended spot
    /// shortly before sunrise (offshore only)
    pub suggested_departure: Option<NaiveDateTime>,
}

impl DayForecast {
    /// Hours scoring at or above a threshold, e.g. the configured
    /// visual-highlight threshold
    #[must_use]
    pub fn hours_at_or_above(&self, threshold: f64) -> Vec<&HourlyScore> {
        self.hourly_scores
            .iter()
            .filter(|s| s.score >= threshold)
            .collect()
    }
}

/// Fishing forecast service
///
/// Holds the astronomical provider and the immutable seasonal/spot
/// reference tables; scoring itself is pure and side-effect-free.
pub struct ForecastService {
    scoring: ScoringConfig,
    astro: AstronomicalProvider,
    seasons: SeasonalTable,
    spots: SpotCatalog,
}

impl ForecastService {
    /// Create a service from configuration with the built-in reference tables
    pub fn new(config: &FishcastConfig) -> Result<Self> {
        let astro = AstronomicalProvider::new(
            config.station.latitude,
            config.station.longitude,
            config.station_timezone()?,
        )?;
        Ok(Self::with_reference_data(
            config.scoring.clone(),
            astro,
            SeasonalTable::builtin(),
            SpotCatalog::builtin(),
        ))
    }

    /// Create a service with injected reference tables
    #[must_use]
    pub fn with_reference_data(
        scoring: ScoringConfig,
        astro: AstronomicalProvider,
        seasons: SeasonalTable,
        spots: SpotCatalog,
    ) -> Self {
        Self {
            scoring,
            astro,
            seasons,
            spots,
        }
    }

    /// Assemble the forecast for one calendar day.
    ///
    /// `tides` and `tide_curve` must already be filtered to the day;
    /// an empty extrema list degrades to a no-signal day, never an error.
    #[must_use]
    pub fn day_forecast(
        &self,
        date: NaiveDate,
        mode: FishingMode,
        tides: &[TidePrediction],
        tide_curve: &[HourlyTideHeight],
        water_temp_f: Option<f64>,
    ) -> DayForecast {
        let season = self.seasons.entry(date.month());
        let seasonal_score = season.score_for(mode);
        let range_ft = tidal_range(tides);

        let sun_times = self.astro.sun_times(date);
        let moon = self.astro.moon_data(date);
        let moon_score = moon_phase_score(moon.phase);

        let inputs = DayInputs {
            date,
            tides,
            sun_times: &sun_times,
            moon_phase_score: moon_score,
            seasonal_score,
            water_temp_f,
            tidal_range_ft: range_ft,
        };
        let hourly_scores = compute_hourly_scores(mode, &inputs, &self.scoring);

        let best_windows = find_best_windows(&hourly_scores, self.scoring.window_threshold);
        let peak_score = hourly_scores.iter().map(|s| s.score).fold(0.0, f64::max);
        let overall_rating = rating_from_scores(peak_score, seasonal_score);

        let recommended_spots = self.recommended_spots(mode, date.month());

        let suggested_departure = if mode == FishingMode::Offshore {
            closest_spot(&recommended_spots).and_then(|spot| {
                departure_time(spot, sun_times.sunrise, self.scoring.cruise_speed_kts)
            })
        } else {
            None
        };

        debug!(
            "{date} {mode}: peak {peak_score:.2}, rating {overall_rating}, {} window(s)",
            best_windows.len()
        );

        DayForecast {
            date,
            mode,
            overall_rating,
            best_windows,
            hourly_scores,
            tides: tides.to_vec(),
            tide_curve: tide_curve.to_vec(),
            sun_times,
            moon,
            water_temp_f,
            season_status: season.status_for(mode).to_string(),
            recommended_spots,
            suggested_departure,
        }
    }

    /// Assemble forecasts for the configured number of days starting at
    /// `start`, slicing the shared extrema list per calendar day.
    #[must_use]
    pub fn outlook(
        &self,
        start: NaiveDate,
        mode: FishingMode,
        inputs: &ForecastInputs,
    ) -> Vec<DayForecast> {
        let days = self.scoring.forecast_days;
        info!("Assembling {days}-day {mode} outlook from {start}");

        let water_temp_f = inputs.water_temp.as_ref().map(|r| r.temp_f);

        (0..days)
            .map(|offset| {
                let date = start + Duration::days(i64::from(offset));
                let day_tides = extrema_for_day(&inputs.extrema, date);
                let day_curve: Vec<HourlyTideHeight> = inputs
                    .hourly_heights
                    .iter()
                    .filter(|h| h.time.date() == date)
                    .cloned()
                    .collect();
                self.day_forecast(date, mode, &day_tides, &day_curve, water_temp_f)
            })
            .collect()
    }

    /// Spots worth running to this month.
    ///
    /// Offshore recommendations follow the seasonal table's spot list;
    /// inshore recommendations honor per-spot month data when present
    /// (none of the built-in inshore spots carry any, so today this
    /// returns the full inshore catalog).
    fn recommended_spots(&self, mode: FishingMode, month: u32) -> Vec<FishingSpot> {
        match mode {
            FishingMode::Offshore => {
                let season = self.seasons.entry(month);
                self.spots
                    .offshore()
                    .iter()
                    .filter(|s| season.offshore_spots.iter().any(|name| *name == s.name))
                    .cloned()
                    .collect()
            }
            FishingMode::Inshore => self
                .spots
                .inshore()
                .iter()
                .filter(|s| s.active_in(month))
                .cloned()
                .collect(),
        }
    }
}

/// Quantize the day's peak hourly score, blended with seasonal context,
/// into a 1-5 rating
#[must_use]
pub fn rating_from_scores(peak_score: f64, seasonal_score: f64) -> u8 {
    let combined = peak_score * 0.7 + seasonal_score * 0.3;
    match combined {
        c if c >= 0.8 => 5,
        c if c >= 0.65 => 4,
        c if c >= 0.5 => 3,
        c if c >= 0.3 => 2,
        _ => 1,
    }
}

/// The closest recommended spot by charted run distance
fn closest_spot(spots: &[FishingSpot]) -> Option<&FishingSpot> {
    spots.iter().min_by(|a, b| {
        a.distance_nm
            .partial_cmp(&b.distance_nm)
            .unwrap_or(std::cmp::Ordering::Equal)
    })
}

/// When to leave the dock to arrive at the spot shortly before sunrise.
///
/// Spots with no run distance yield no suggestion.
fn departure_time(
    spot: &FishingSpot,
    sunrise: NaiveDateTime,
    cruise_speed_kts: f64,
) -> Option<NaiveDateTime> {
    if spot.distance_nm <= 0.0 {
        return None;
    }
    let travel_secs = (spot.distance_nm / cruise_speed_kts * 3600.0).round() as i64;
    let arrival_target = sunrise - Duration::minutes(ARRIVAL_LEAD_MINUTES);
    Some(arrival_target - Duration::seconds(travel_secs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fishing::spots::SpotCategory;
    use crate::models::TideKind;
    use chrono::{NaiveTime, Timelike};

    fn create_test_service() -> ForecastService {
        ForecastService::new(&FishcastConfig::default()).unwrap()
    }

    fn tide(date: NaiveDate, h: u32, m: u32, height: f64, kind: TideKind) -> TidePrediction {
        TidePrediction {
            time: date.and_hms_opt(h, m, 0).unwrap(),
            height_ft: height,
            kind,
        }
    }

    fn scenario_tides(date: NaiveDate) -> Vec<TidePrediction> {
        vec![
            tide(date, 4, 23, 6.1, TideKind::High),
            tide(date, 10, 30, 0.2, TideKind::Low),
            tide(date, 16, 45, 6.1, TideKind::High),
            tide(date, 22, 50, 0.2, TideKind::Low),
        ]
    }

    #[test]
    fn test_day_forecast_shape() {
        let service = create_test_service();
        let date = NaiveDate::from_ymd_opt(2026, 6, 15).unwrap();
        let forecast = service.day_forecast(
            date,
            FishingMode::Offshore,
            &scenario_tides(date),
            &[],
            Some(58.0),
        );

        assert_eq!(forecast.hourly_scores.len(), 24);
        assert!(forecast.best_windows.len() <= 3);
        assert!((1..=5).contains(&forecast.overall_rating));
        assert_eq!(forecast.tides.len(), 4);
        for pair in forecast.best_windows.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_june_scenario_offshore() {
        let service = create_test_service();
        let date = NaiveDate::from_ymd_opt(2026, 6, 15).unwrap();
        let tides = scenario_tides(date);

        assert!((tidal_range(&tides) - 5.9).abs() < 1e-9);

        let forecast =
            service.day_forecast(date, FishingMode::Offshore, &tides, &[], Some(58.0));
        // 58 F is squarely in the ideal band
        assert!(forecast
            .hourly_scores
            .iter()
            .all(|s| s.factors.water_temp == 1.0));
        // Hour 4 sits minutes from the 04:23 high
        let hour4 = &forecast.hourly_scores[4];
        assert!(hour4.factors.slack_tide > 0.85);
    }

    #[test]
    fn test_september_peak_rates_five() {
        let service = create_test_service();
        let date = NaiveDate::from_ymd_opt(2026, 9, 15).unwrap();
        // A high tide right at the dawn bite maximizes slack and time-of-day
        let sunrise = service.astro.sun_times(date).sunrise;
        let tides = vec![
            tide(date, sunrise.time().hour(), 0, 6.0, TideKind::High),
            tide(date, 13, 0, 0.4, TideKind::Low),
        ];
        let forecast = service.day_forecast(date, FishingMode::Offshore, &tides, &[], Some(58.0));

        let peak = forecast
            .hourly_scores
            .iter()
            .map(|s| s.score)
            .fold(0.0, f64::max);
        assert!(peak >= 0.8, "peak was {peak}");
        assert_eq!(forecast.overall_rating, 5);
        assert!(forecast.season_status.contains("BEST MONTH"));
    }

    #[test]
    fn test_rating_quantization_bands() {
        // combined = 0.7 * peak + 0.3 * seasonal
        assert_eq!(rating_from_scores(1.0, 1.0), 5); // 1.0
        assert_eq!(rating_from_scores(0.9, 0.7), 5); // 0.84
        assert_eq!(rating_from_scores(0.9, 0.5), 4); // 0.78
        assert_eq!(rating_from_scores(0.6, 0.5), 3); // 0.57
        assert_eq!(rating_from_scores(0.4, 0.3), 2); // 0.37
        assert_eq!(rating_from_scores(0.1, 0.1), 1); // 0.10
        assert_eq!(rating_from_scores(0.0, 0.0), 1);
    }

    #[test]
    fn test_rating_monotonic_in_peak() {
        for seasonal in [0.0, 0.3, 0.7, 1.0] {
            let mut last = 0;
            for step in 0..=100 {
                let peak = f64::from(step) / 100.0;
                let rating = rating_from_scores(peak, seasonal);
                assert!(rating >= last, "rating dropped at peak {peak}");
                last = rating;
            }
        }
    }

    #[test]
    fn test_departure_time_matches_run_math() {
        let spot = FishingSpot {
            name: "Crab Ledge".to_string(),
            latitude: 41.72,
            longitude: -69.6,
            distance_nm: 15.0,
            category: SpotCategory::Offshore,
            notes: String::new(),
            active_months: None,
        };
        let sunrise = NaiveDate::from_ymd_opt(2026, 6, 15)
            .unwrap()
            .and_hms_opt(5, 12, 0)
            .unwrap();
        // 15 nm at 25 kts is 36 minutes; leave at 05:12 - 15 - 36 = 04:21
        let departure = departure_time(&spot, sunrise, 25.0).unwrap();
        assert_eq!(departure.time(), NaiveTime::from_hms_opt(4, 21, 0).unwrap());
    }

    #[test]
    fn test_departure_skipped_for_zero_distance() {
        let spot = FishingSpot {
            name: "Dock".to_string(),
            latitude: 41.68,
            longitude: -69.95,
            distance_nm: 0.0,
            category: SpotCategory::Offshore,
            notes: String::new(),
            active_months: None,
        };
        let sunrise = NaiveDate::from_ymd_opt(2026, 6, 15)
            .unwrap()
            .and_hms_opt(5, 12, 0)
            .unwrap();
        assert!(departure_time(&spot, sunrise, 25.0).is_none());
    }

    #[test]
    fn test_offshore_june_recommends_seasonal_spots_and_departure() {
        let service = create_test_service();
        let date = NaiveDate::from_ymd_opt(2026, 6, 15).unwrap();
        let forecast = service.day_forecast(
            date,
            FishingMode::Offshore,
            &scenario_tides(date),
            &[],
            None,
        );

        let names: Vec<&str> = forecast
            .recommended_spots
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, ["Crab Ledge", "BC Buoy", "Nauset / Outer Beach"]);

        // Closest June spot is Nauset / Outer Beach at 8 nm
        let departure = forecast.suggested_departure.unwrap();
        assert!(departure < forecast.sun_times.sunrise);
    }

    #[test]
    fn test_offshore_january_has_no_spots_or_departure() {
        let service = create_test_service();
        let date = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        let forecast =
            service.day_forecast(date, FishingMode::Offshore, &scenario_tides(date), &[], None);
        assert!(forecast.recommended_spots.is_empty());
        assert!(forecast.suggested_departure.is_none());
    }

    #[test]
    fn test_inshore_gets_full_catalog_and_no_departure() {
        let service = create_test_service();
        let date = NaiveDate::from_ymd_opt(2026, 6, 15).unwrap();
        let forecast = service.day_forecast(
            date,
            FishingMode::Inshore,
            &scenario_tides(date),
            &[],
            Some(58.0),
        );
        assert_eq!(forecast.recommended_spots.len(), 7);
        assert!(forecast.suggested_departure.is_none());
    }

    #[test]
    fn test_empty_tides_degrade_gracefully() {
        let service = create_test_service();
        let date = NaiveDate::from_ymd_opt(2026, 6, 15).unwrap();
        let forecast = service.day_forecast(date, FishingMode::Offshore, &[], &[], None);

        assert_eq!(forecast.hourly_scores.len(), 24);
        assert!(forecast
            .hourly_scores
            .iter()
            .all(|s| s.factors.slack_tide == 0.0));
        // Unknown temperature scores neutrally
        assert!(forecast
            .hourly_scores
            .iter()
            .all(|s| s.factors.water_temp == 0.5));
    }

    #[test]
    fn test_outlook_slices_tides_per_day() {
        let service = create_test_service();
        let start = NaiveDate::from_ymd_opt(2026, 6, 15).unwrap();
        let mut extrema = Vec::new();
        for offset in 0..7 {
            extrema.extend(scenario_tides(start + Duration::days(offset)));
        }
        let inputs = ForecastInputs {
            extrema,
            hourly_heights: Vec::new(),
            water_temp: None,
        };

        let outlook = service.outlook(start, FishingMode::Offshore, &inputs);
        assert_eq!(outlook.len(), 7);
        for (offset, day) in outlook.iter().enumerate() {
            assert_eq!(day.date, start + Duration::days(offset as i64));
            assert_eq!(day.tides.len(), 4);
            assert!(day.tides.iter().all(|t| t.time.date() == day.date));
        }
    }

    #[test]
    fn test_highlight_hours_filter() {
        let service = create_test_service();
        let date = NaiveDate::from_ymd_opt(2026, 9, 15).unwrap();
        let forecast = service.day_forecast(
            date,
            FishingMode::Offshore,
            &scenario_tides(date),
            &[],
            Some(58.0),
        );
        let highlighted = forecast.hours_at_or_above(0.6);
        assert!(highlighted.iter().all(|s| s.score >= 0.6));
        assert!(highlighted.len() <= 24);
    }
}
