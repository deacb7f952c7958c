//! NOAA Tides and Currents / NDBC buoy client
//!
//! This module provides HTTP client functionality for retrieving tide
//! predictions and water temperature with retry logic, request timeouts,
//! and error handling. The scoring core never calls it; fetched data is
//! handed to the forecast service as plain values.

use crate::config::FishcastConfig;
use crate::models::tide::{parse_noaa_height, parse_noaa_time};
use crate::models::{HourlyTideHeight, TideKind, TidePrediction, WaterTempReading};
use crate::{FishcastError, Result};
use chrono::NaiveDate;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

/// Everything the forecast service needs from upstream, fetched in one join
#[derive(Debug, Clone)]
pub struct ForecastInputs {
    /// Tide extrema for the requested date range
    pub extrema: Vec<TidePrediction>,
    /// Hourly tide heights for the requested date range (display curve)
    pub hourly_heights: Vec<HourlyTideHeight>,
    /// Latest water temperature, if the buoy reported one
    pub water_temp: Option<WaterTempReading>,
}

/// HTTP client for NOAA tide predictions and NDBC buoy observations
pub struct NoaaClient {
    client: ClientWithMiddleware,
    config: FishcastConfig,
}

impl NoaaClient {
    /// Create a new client with the configured timeout and retry policy
    pub fn new(config: FishcastConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.fetch.timeout_seconds.into());

        let inner = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent("fishcast/0.1.0")
            .build()
            .map_err(|e| FishcastError::api(format!("Failed to create HTTP client: {e}")))?;

        let retry_policy =
            ExponentialBackoff::builder().build_with_max_retries(config.fetch.max_retries);
        let client = ClientBuilder::new(inner)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self { client, config })
    }

    /// Fetch tide extrema, hourly heights, and water temperature concurrently.
    ///
    /// Tide failures propagate; a water-temperature failure degrades to
    /// `None` since scoring treats an unknown temperature as neutral.
    pub async fn fetch_forecast_inputs(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<ForecastInputs> {
        let (extrema, hourly_heights, water_temp) = futures::join!(
            self.fetch_tide_extrema(start, end),
            self.fetch_hourly_heights(start, end),
            self.fetch_water_temp(),
        );

        let water_temp = match water_temp {
            Ok(reading) => reading,
            Err(e) => {
                warn!("Water temperature unavailable, scoring neutrally: {e}");
                None
            }
        };

        Ok(ForecastInputs {
            extrema: extrema?,
            hourly_heights: hourly_heights?,
            water_temp,
        })
    }

    /// Fetch high/low tide predictions for a date range
    #[instrument(skip(self))]
    pub async fn fetch_tide_extrema(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<TidePrediction>> {
        info!(
            "Fetching tide extrema for station {} ({start} to {end})",
            self.config.station.tide_station
        );
        let started = Instant::now();

        let response: wire::PredictionsResponse = self
            .get_json(&self.config.fetch.noaa_base_url, &[
                ("begin_date", start.format("%Y%m%d").to_string()),
                ("end_date", end.format("%Y%m%d").to_string()),
                ("station", self.config.station.tide_station.clone()),
                ("product", "predictions".to_string()),
                ("datum", "MLLW".to_string()),
                ("time_zone", "lst_ldt".to_string()),
                ("interval", "hilo".to_string()),
                ("units", "english".to_string()),
                ("format", "json".to_string()),
            ])
            .await?;

        if let Some(err) = response.error {
            return Err(FishcastError::api(format!(
                "NOAA tide API error: {}",
                err.message
            )));
        }

        let extrema = response
            .predictions
            .unwrap_or_default()
            .into_iter()
            .map(wire::RawExtremum::into_prediction)
            .collect::<Result<Vec<_>>>()?;

        debug!(
            "Parsed {} tide extrema in {:.3}s",
            extrema.len(),
            started.elapsed().as_secs_f64()
        );
        Ok(extrema)
    }

    /// Fetch the hourly tide-height curve for a date range
    #[instrument(skip(self))]
    pub async fn fetch_hourly_heights(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<HourlyTideHeight>> {
        info!(
            "Fetching hourly tide heights for station {} ({start} to {end})",
            self.config.station.tide_station
        );

        let response: wire::HourlyResponse = self
            .get_json(&self.config.fetch.noaa_base_url, &[
                ("begin_date", start.format("%Y%m%d").to_string()),
                ("end_date", end.format("%Y%m%d").to_string()),
                ("station", self.config.station.tide_station.clone()),
                ("product", "predictions".to_string()),
                ("datum", "MLLW".to_string()),
                ("time_zone", "lst_ldt".to_string()),
                ("interval", "h".to_string()),
                ("units", "english".to_string()),
                ("format", "json".to_string()),
            ])
            .await?;

        if let Some(err) = response.error {
            return Err(FishcastError::api(format!(
                "NOAA hourly tide API error: {}",
                err.message
            )));
        }

        response
            .predictions
            .unwrap_or_default()
            .into_iter()
            .map(wire::RawHeight::into_height)
            .collect()
    }

    /// Fetch the latest water temperature from the NDBC buoy.
    ///
    /// Returns `Ok(None)` when the buoy is reporting but has no current
    /// temperature reading ("MM" column); network failures are errors.
    #[instrument(skip(self))]
    pub async fn fetch_water_temp(&self) -> Result<Option<WaterTempReading>> {
        let url = format!(
            "{}/{}.txt",
            self.config.fetch.ndbc_base_url, self.config.station.ndbc_buoy
        );
        info!("Fetching water temperature from NDBC buoy {}", self.config.station.ndbc_buoy);

        let text = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FishcastError::api(format!("NDBC request failed: {e}")))?
            .error_for_status()
            .map_err(|e| FishcastError::api(format!("NDBC responded with error: {e}")))?
            .text()
            .await
            .map_err(|e| FishcastError::api(format!("Failed to read NDBC response: {e}")))?;

        parse_ndbc_water_temp(&text)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| FishcastError::api(format!("NOAA request failed: {e}")))?
            .error_for_status()
            .map_err(|e| FishcastError::api(format!("NOAA responded with error: {e}")))?;

        response
            .json::<T>()
            .await
            .map_err(|e| FishcastError::api(format!("Invalid NOAA response payload: {e}")))
    }
}

/// Parse the newest water-temperature row of an NDBC realtime2 report.
///
/// Columns: YY MM DD hh mm WDIR WSPD GST WVHT DPD APD MWD PRES ATMP WTMP ...
/// WTMP is column 14 (0-based), in Celsius; "MM" marks a missing value.
fn parse_ndbc_water_temp(report: &str) -> Result<Option<WaterTempReading>> {
    let Some(row) = report
        .lines()
        .find(|line| !line.starts_with('#') && !line.trim().is_empty())
    else {
        return Ok(None);
    };

    let cols: Vec<&str> = row.split_whitespace().collect();
    let Some(&wtmp) = cols.get(14) else {
        return Ok(None);
    };
    if wtmp == "MM" {
        return Ok(None);
    }

    let temp_c: f64 = wtmp
        .parse()
        .map_err(|e| FishcastError::parse(format!("bad NDBC WTMP '{wtmp}': {e}")))?;
    let temp_f = temp_c * 9.0 / 5.0 + 32.0;

    if cols.len() < 5 {
        return Err(FishcastError::parse(format!(
            "truncated NDBC observation row: '{row}'"
        )));
    }
    let stamp = format!(
        "{}-{}-{} {}:{}",
        cols[0], cols[1], cols[2], cols[3], cols[4]
    );
    let time = parse_noaa_time(&stamp)?;

    Ok(Some(WaterTempReading { time, temp_f }))
}

/// NOAA/NDBC wire formats and conversion into internal models
mod wire {
    use super::*;
    use serde::Deserialize;

    /// Response envelope for `interval=hilo` predictions
    #[derive(Debug, Deserialize)]
    pub struct PredictionsResponse {
        pub predictions: Option<Vec<RawExtremum>>,
        pub error: Option<ApiError>,
    }

    /// Response envelope for `interval=h` predictions
    #[derive(Debug, Deserialize)]
    pub struct HourlyResponse {
        pub predictions: Option<Vec<RawHeight>>,
        pub error: Option<ApiError>,
    }

    /// NOAA error payload (returned with HTTP 200)
    #[derive(Debug, Deserialize)]
    pub struct ApiError {
        pub message: String,
    }

    /// One hilo prediction row: `{"t": "2026-06-15 04:23", "v": "6.1", "type": "H"}`
    #[derive(Debug, Deserialize)]
    pub struct RawExtremum {
        pub t: String,
        pub v: String,
        #[serde(rename = "type")]
        pub kind: String,
    }

    /// One hourly prediction row: `{"t": "2026-06-15 04:00", "v": "5.2"}`
    #[derive(Debug, Deserialize)]
    pub struct RawHeight {
        pub t: String,
        pub v: String,
    }

    impl RawExtremum {
        pub fn into_prediction(self) -> Result<TidePrediction> {
            Ok(TidePrediction {
                time: parse_noaa_time(&self.t)?,
                height_ft: parse_noaa_height(&self.v)?,
                kind: TideKind::from_noaa(&self.kind)?,
            })
        }
    }

    impl RawHeight {
        pub fn into_height(self) -> Result<HourlyTideHeight> {
            Ok(HourlyTideHeight {
                time: parse_noaa_time(&self.t)?,
                height_ft: parse_noaa_height(&self.v)?,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hilo_response() {
        let json = r#"{"predictions": [
            {"t": "2026-06-15 04:23", "v": "6.1", "type": "H"},
            {"t": "2026-06-15 10:30", "v": "0.2", "type": "L"}
        ]}"#;
        let response: wire::PredictionsResponse = serde_json::from_str(json).unwrap();
        let extrema: Vec<TidePrediction> = response
            .predictions
            .unwrap()
            .into_iter()
            .map(|r| r.into_prediction().unwrap())
            .collect();

        assert_eq!(extrema.len(), 2);
        assert_eq!(extrema[0].kind, TideKind::High);
        assert_eq!(extrema[0].height_ft, 6.1);
        assert_eq!(extrema[1].kind, TideKind::Low);
    }

    #[test]
    fn test_parse_noaa_error_envelope() {
        let json = r#"{"error": {"message": "No Predictions data was found."}}"#;
        let response: wire::PredictionsResponse = serde_json::from_str(json).unwrap();
        assert!(response.predictions.is_none());
        assert_eq!(
            response.error.unwrap().message,
            "No Predictions data was found."
        );
    }

    #[test]
    fn test_parse_malformed_extremum_fails() {
        let raw = wire::RawExtremum {
            t: "2026-06-15 04:23".to_string(),
            v: "not-a-number".to_string(),
            kind: "H".to_string(),
        };
        assert!(raw.into_prediction().is_err());
    }

    #[test]
    fn test_parse_ndbc_report() {
        let report = "\
#YY  MM DD hh mm WDIR WSPD GST  WVHT   DPD   APD MWD   PRES  ATMP  WTMP  DEWP  VIS PTDY  TIDE
#yr  mo dy hr mn degT m/s  m/s     m   sec   sec degT   hPa  degC  degC  degC  nmi hPa    ft
2026 06 15 11 50 220  5.0  6.0   0.5     7   4.5 180 1015.2  18.0  15.0  12.0 99.0 +0.0    MM";
        let reading = parse_ndbc_water_temp(report).unwrap().unwrap();
        // 15.0 C = 59.0 F
        assert!((reading.temp_f - 59.0).abs() < 1e-9);
        assert_eq!(reading.time, parse_noaa_time("2026-06-15 11:50").unwrap());
    }

    #[test]
    fn test_parse_ndbc_missing_temp() {
        let report = "\
#YY  MM DD hh mm WDIR WSPD GST  WVHT   DPD   APD MWD   PRES  ATMP  WTMP  DEWP  VIS PTDY  TIDE
2026 06 15 11 50 220  5.0  6.0   0.5     7   4.5 180 1015.2  18.0    MM  12.0 99.0 +0.0    MM";
        assert!(parse_ndbc_water_temp(report).unwrap().is_none());
    }

    #[test]
    fn test_parse_ndbc_empty_report() {
        assert!(parse_ndbc_water_temp("# header only\n").unwrap().is_none());
    }
}
