use anyhow::Result;
use chrono::{Duration, Utc};
use fishcast::models::FishingMode;
use fishcast::{FishcastConfig, ForecastService, NoaaClient};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = FishcastConfig::load()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let tz = config.station_timezone()?;
    let today = Utc::now().with_timezone(&tz).date_naive();
    let days = config.scoring.forecast_days;
    let end = today + Duration::days(i64::from(days) - 1);

    info!(
        "Fetching forecast inputs for station {} ({today} to {end})",
        config.station.tide_station
    );
    let client = NoaaClient::new(config.clone())?;
    let inputs = client.fetch_forecast_inputs(today, end).await?;

    let service = ForecastService::new(&config)?;

    println!(
        "Fishcast: {days}-day outlook for station {} from {today}",
        config.station.tide_station
    );
    if let Some(reading) = &inputs.water_temp {
        println!("Water temp: {:.1} F (buoy {})", reading.temp_f, config.station.ndbc_buoy);
    } else {
        println!("Water temp: unavailable, scoring neutrally");
    }

    for mode in [FishingMode::Offshore, FishingMode::Inshore] {
        println!("\n== {mode} ==");
        for day in service.outlook(today, mode, &inputs) {
            println!(
                "{} rating {}/5 - {}",
                day.date, day.overall_rating, day.season_status
            );
            if let Some(window) = day.best_windows.first() {
                println!(
                    "  best window {}-{} (score {:.2}: {})",
                    window.start.format("%H:%M"),
                    window.end.format("%H:%M"),
                    window.score,
                    window.reason
                );
            }
            let strong_hours = day.hours_at_or_above(config.scoring.highlight_threshold);
            if !strong_hours.is_empty() {
                println!("  {} strong hour(s)", strong_hours.len());
            }
            if let Some(departure) = day.suggested_departure {
                println!("  leave the dock by {}", departure.format("%H:%M"));
            }
            if !day.recommended_spots.is_empty() {
                let names: Vec<&str> = day
                    .recommended_spots
                    .iter()
                    .map(|s| s.name.as_str())
                    .collect();
                println!("  spots: {}", names.join(", "));
            }
        }
    }

    Ok(())
}
