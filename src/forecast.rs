use anyhow::{bail, Context, Result};
use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use tracing::debug;

use crate::weather::{HourlyForecast, WeatherData};

const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
const ARCHIVE_URL: &str = "https://archive-api.open-meteo.com/v1/archive";

const DAILY_PARAMS: &str = "&daily=weather_code,temperature_2m_max,temperature_2m_min";
const HOURLY_PARAMS: &str = "&hourly=temperature_2m,precipitation_probability,weather_code";

#[derive(Deserialize)]
struct ApiResponse {
    daily: Option<ApiDaily>,
    hourly: Option<ApiHourly>,
}

#[derive(Deserialize)]
struct ApiDaily {
    #[serde(default)]
    weather_code: Vec<Option<u32>>,
    #[serde(default)]
    temperature_2m_max: Vec<Option<f64>>,
    #[serde(default)]
    temperature_2m_min: Vec<Option<f64>>,
}

// The archive endpoint returns nulls in hourly arrays for some stations.
#[derive(Deserialize)]
struct ApiHourly {
    #[serde(default)]
    precipitation_probability: Vec<Option<u32>>,
    #[serde(default)]
    weather_code: Vec<Option<u32>>,
    #[serde(default)]
    time: Vec<String>,
}

fn year_earlier(date: NaiveDate) -> NaiveDate {
    // Feb 29 has no previous-year counterpart.
    date.with_year(date.year() - 1)
        .or_else(|| NaiveDate::from_ymd_opt(date.year() - 1, 2, 28))
        .unwrap_or(date)
}

/// Builds the Open-Meteo request for a coordinate and date. Dates within the
/// provider's 14-day forecast horizon hit the forecast endpoint; anything
/// else falls back to last year's archive data for the same calendar day.
/// Returns the URL and whether the data will be historical.
///
/// Coordinates are rounded to two decimals so nearby stops share responses.
/// `today` is passed in rather than read from the clock.
pub fn forecast_request(lat: f64, lng: f64, date: NaiveDate, today: NaiveDate) -> (String, bool) {
    let lat = format!("{lat:.2}");
    let lng = format!("{lng:.2}");
    let days_ahead = (date - today).num_days();

    if (0..=14).contains(&days_ahead) {
        let url = format!(
            "{FORECAST_URL}?latitude={lat}&longitude={lng}{DAILY_PARAMS}{HOURLY_PARAMS}\
             &timezone=auto&start_date={date}&end_date={date}"
        );
        (url, false)
    } else {
        let mut past = year_earlier(date);
        if past > today {
            past = year_earlier(past);
        }
        let url = format!(
            "{ARCHIVE_URL}?latitude={lat}&longitude={lng}{DAILY_PARAMS}{HOURLY_PARAMS}\
             &timezone=auto&start_date={past}&end_date={past}"
        );
        (url, true)
    }
}

/// Fetches the forecast for one coordinate and date. `Ok(None)` means the
/// provider had no usable daily data for that day, which callers treat the
/// same as no forecast at all.
pub fn fetch_forecast(
    lat: f64,
    lng: f64,
    date: NaiveDate,
    today: NaiveDate,
) -> Result<Option<WeatherData>> {
    let (url, is_historical) = forecast_request(lat, lng, date, today);
    debug!("fetching forecast: {url}");

    let response = reqwest::blocking::get(&url).context("Forecast request failed")?;
    if !response.status().is_success() {
        bail!("Weather API status: {}", response.status());
    }
    let body: ApiResponse = response.json().context("Invalid forecast response")?;

    let Some(daily) = body.daily else {
        return Ok(None);
    };
    let (Some(Some(temp_max)), Some(Some(temp_min))) = (
        daily.temperature_2m_max.first().copied(),
        daily.temperature_2m_min.first().copied(),
    ) else {
        return Ok(None);
    };

    Ok(Some(WeatherData {
        temp_max: temp_max.round() as i32,
        temp_min: temp_min.round() as i32,
        weather_code: daily.weather_code.first().copied().flatten().unwrap_or(0),
        is_historical,
        hourly: body.hourly.map(|h| HourlyForecast {
            precipitation_probability: h
                .precipitation_probability
                .into_iter()
                .map(Option::unwrap_or_default)
                .collect(),
            weather_code: h
                .weather_code
                .into_iter()
                .map(Option::unwrap_or_default)
                .collect(),
            time: h.time,
        }),
    }))
}
