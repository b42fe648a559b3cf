use std::{fs::File, io::BufReader, time::Instant};

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::Parser;
use tracing::warn;

use triply::{
    export::day_features,
    forecast::fetch_forecast,
    summary::summarize_day,
    timeline::build_timeline,
    trip::{DayPlan, Trip},
    weather::{check_weather_conflicts, OutdoorClassifier, WeatherData},
};

#[derive(Parser)]
struct Args {
    /// Path to trip file
    trip_path: String,
    /// Day number to report (1-based); all days when omitted
    #[arg(short, long)]
    day: Option<usize>,
    /// Path to a saved forecast file, applied to every reported day
    #[arg(long)]
    forecast: Option<String>,
    /// Fetch the forecast from Open-Meteo using each day's first stop
    #[arg(long)]
    fetch_weather: bool,
    /// Print each day's stops as a GeoJSON feature collection instead
    #[arg(long)]
    geojson: bool,
}

fn day_weather(args: &Args, saved: Option<&WeatherData>, day: &DayPlan) -> Option<WeatherData> {
    if let Some(weather) = saved {
        return Some(weather.clone());
    }
    if !args.fetch_weather {
        return None;
    }

    let first = day.stops.first()?;
    let date = NaiveDate::parse_from_str(&day.date, "%Y-%m-%d").ok()?;
    match fetch_forecast(
        first.location.y(),
        first.location.x(),
        date,
        Local::now().date_naive(),
    ) {
        Ok(weather) => weather,
        Err(err) => {
            warn!("forecast for {} unavailable: {err:#}", day.date);
            None
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let now = Instant::now();
    let trip = Trip::read(&args.trip_path)?;
    println!("Read trip \"{}\" in {:?}", trip.name, now.elapsed());

    let saved_forecast: Option<WeatherData> = match &args.forecast {
        Some(path) => {
            let f =
                File::open(path).with_context(|| format!("Failed to open forecast file {path}"))?;
            Some(
                serde_json::from_reader(BufReader::new(f))
                    .context("Forecast file is not valid forecast JSON")?,
            )
        }
        None => None,
    };

    let classifier = OutdoorClassifier::default();

    for (i, day) in trip.days.iter().enumerate() {
        let number = i + 1;
        if args.day.is_some_and(|d| d != number) {
            continue;
        }

        let timeline = build_timeline(&day.date, &day.start_time, &day.stops);

        if args.geojson {
            println!("{}", day_features(&day.stops, &timeline)?);
            continue;
        }

        println!("\nDay {number} ({})", day.date);

        if timeline.is_empty() && !day.stops.is_empty() {
            println!("  (timeline unavailable: invalid date or start time)");
        }

        let weather = day_weather(&args, saved_forecast.as_ref(), day);
        let conflicts =
            check_weather_conflicts(&day.stops, &timeline, weather.as_ref(), &classifier);

        for (idx, stop) in day.stops.iter().enumerate() {
            match timeline.get(idx) {
                Some(t) => println!(
                    "  {} - {}  {}",
                    t.arrival_display(),
                    t.departure_display(),
                    stop.name
                ),
                None => println!("  --:-- - --:--  {}", stop.name),
            }
            if idx + 1 < day.stops.len() {
                if let Some(leg) = &stop.transit_to_next {
                    println!("      ↓ {} ({})", leg.duration, leg.distance);
                }
            }
            if let Some(warning) = conflicts.get(&stop.id) {
                println!("      ⚠ {warning}");
            }
        }

        if let Some(weather) = &weather {
            let tag = if weather.is_historical { " (last year)" } else { "" };
            println!(
                "  Weather: {} to {}°C{tag}",
                weather.temp_min, weather.temp_max
            );
        }

        if let Some(summary) = summarize_day(day, &timeline, &trip) {
            println!(
                "  {} stops, {} - {}, transit {} over {}",
                summary.total_stops,
                summary.start_time,
                summary.end_time,
                summary.transit_display,
                summary.total_distance
            );
            if let Some(cost) = &summary.day_cost {
                println!("  Day transit cost: {cost}");
            }
            if let Some(cost) = &summary.trip_cost {
                println!("  Trip transit cost: {cost}");
            }
        }
    }

    Ok(())
}
