use std::collections::HashMap;

use chrono::Timelike;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::timeline::StopTimes;
use crate::trip::stop::{Stop, StopId};

/// Daily forecast plus optional hourly arrays, in the shape cached by the
/// web client (Open-Meteo arrays kept verbatim under `hourly`).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherData {
    pub temp_max: i32,
    pub temp_min: i32,
    pub weather_code: u32,
    pub is_historical: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hourly: Option<HourlyForecast>,
}

/// Parallel per-hour arrays, indexed by hour-of-day.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct HourlyForecast {
    #[serde(default)]
    pub precipitation_probability: Vec<u32>,
    #[serde(default)]
    pub weather_code: Vec<u32>,
    #[serde(default)]
    pub time: Vec<String>,
}

pub const OUTDOOR_KEYWORDS: &[&str] = &[
    "park", "garden", "beach", "hiking", "trail", "zoo", "outdoor", "walk", "camp", "forest",
    "mountain", "lake", "river", "botanical", "plaza", "square", "market", "temple", "shrine",
    "mount", "island", "公園", "花園", "海灘", "步道", "動物園", "戶外", "健行", "森林", "山",
    "湖", "廣場", "市場", "廟", "寺", "島",
];

/// Flags stops that are likely exposed to weather, by case-insensitive
/// substring match of name and note against a keyword set.
#[derive(Clone, Debug)]
pub struct OutdoorClassifier {
    keywords: Vec<String>,
}

impl Default for OutdoorClassifier {
    fn default() -> Self {
        Self::with_keywords(OUTDOOR_KEYWORDS.iter().map(|k| (*k).to_owned()))
    }
}

impl OutdoorClassifier {
    pub fn with_keywords(keywords: impl IntoIterator<Item = String>) -> Self {
        Self {
            keywords: keywords.into_iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    pub fn is_outdoor(&self, stop: &Stop) -> bool {
        let text = format!("{} {}", stop.name, stop.note.as_deref().unwrap_or("")).to_lowercase();
        self.keywords.iter().any(|k| text.contains(k.as_str()))
    }
}

/// WMO thunderstorm family.
const STORM_CODES: [u32; 3] = [95, 96, 99];

pub const STORM_WARNING: &str = "暴風雨警報！建議改為室內行程";

fn rain_warning(chance: u32) -> String {
    format!("降雨機率高 ({chance}%)，請攜帶雨具")
}

/// Matches each outdoor stop's occupied hours against the hourly forecast.
///
/// Returns warnings keyed by stop id; empty whenever the forecast or its
/// hourly arrays are missing. A departure hour below the arrival hour means
/// the stop runs past midnight; the scan clamps to 23 instead of wrapping,
/// so overnight segments only cover the first day's evening hours.
pub fn check_weather_conflicts(
    stops: &[Stop],
    timeline: &[StopTimes],
    weather: Option<&WeatherData>,
    classifier: &OutdoorClassifier,
) -> HashMap<StopId, String> {
    let Some(hourly) = weather.and_then(|w| w.hourly.as_ref()) else {
        debug!("weather conflict check skipped: no hourly forecast");
        return HashMap::new();
    };
    if stops.is_empty() {
        return HashMap::new();
    }

    let mut conflicts = HashMap::new();
    let mut checked = 0usize;

    for (index, stop) in stops.iter().enumerate() {
        if !classifier.is_outdoor(stop) {
            continue;
        }
        checked += 1;

        let Some(times) = timeline.get(index) else {
            continue;
        };
        let start_hour = times.arrival.hour() as usize;
        let end_hour = times.departure.hour() as usize;
        let end_hour = if end_hour < start_hour { 23 } else { end_hour };

        let mut max_rain = 0;
        let mut worst_code = 0;
        for h in start_hour..=end_hour {
            let Some(&rain) = hourly.precipitation_probability.get(h) else {
                continue;
            };
            let code = hourly.weather_code.get(h).copied().unwrap_or(0);
            max_rain = max_rain.max(rain);
            worst_code = worst_code.max(code);
        }

        if STORM_CODES.contains(&worst_code) {
            conflicts.insert(stop.id.clone(), STORM_WARNING.to_owned());
        } else if max_rain >= 60 {
            conflicts.insert(stop.id.clone(), rain_warning(max_rain));
        }
    }

    debug!(
        outdoor_stops = checked,
        warnings = conflicts.len(),
        "weather conflict check done"
    );
    conflicts
}
