use crate::timeline::StopTimes;
use crate::trip::{DayPlan, Trip};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Currency {
    Twd,
    Jpy,
    Usd,
    Hkd,
}

impl Currency {
    pub fn code(self) -> &'static str {
        match self {
            Currency::Twd => "TWD",
            Currency::Jpy => "JPY",
            Currency::Usd => "USD",
            Currency::Hkd => "HKD",
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            Currency::Twd => "NT$",
            Currency::Jpy => "¥",
            Currency::Usd => "US$",
            Currency::Hkd => "HK$",
        }
    }

    /// Whole units with thousands grouping, e.g. `NT$1,250`.
    pub fn format(self, amount: f64) -> String {
        format!("{}{}", self.symbol(), group_thousands(amount.round() as u64))
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Extracts the numeric magnitude and a currency guess from a localized fare
/// string such as `NT$120`, `¥350` or `US$4`.
///
/// Classification is by symbol/code substring, JPY checked first, TWD the
/// fallback. Unparseable magnitudes become 0 rather than an error.
pub fn parse_fare(fare: &str) -> (f64, Currency) {
    let numeric: String = fare
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let value = numeric.parse::<f64>().unwrap_or(0.0);

    let currency = if fare.contains('¥') || fare.contains('￥') || fare.contains("JPY") {
        Currency::Jpy
    } else if fare.contains("US$") || fare.contains("USD") {
        Currency::Usd
    } else if fare.contains("HK$") || fare.contains("HKD") {
        Currency::Hkd
    } else {
        Currency::Twd
    };

    (value, currency)
}

/// Leg distance displays are either `X.Y km` or `N m`, with or without a
/// space before the unit.
fn distance_meters(display: &str) -> f64 {
    let display = display.trim();
    if let Some(km) = display.strip_suffix("km") {
        km.trim().parse::<f64>().unwrap_or(0.0) * 1000.0
    } else if let Some(m) = display.strip_suffix('m') {
        m.trim().parse::<f64>().unwrap_or(0.0)
    } else {
        0.0
    }
}

#[derive(Clone, Debug)]
pub struct DaySummary {
    pub total_stops: usize,
    pub start_time: String,
    /// Last departure of the day, `--:--` when the timeline is unavailable.
    pub end_time: String,
    pub transit_display: String,
    pub total_distance: String,
    pub day_cost: Option<String>,
    pub trip_cost: Option<String>,
}

/// Aggregates transit time, distance and fares for one day, plus the fare
/// total across the whole trip.
///
/// Fare sums add raw magnitudes without conversion and are labeled with the
/// day's last-seen currency. Multi-currency days therefore get a mislabeled
/// total; kept as-is to match the shipped behavior.
pub fn summarize_day(day: &DayPlan, timeline: &[StopTimes], trip: &Trip) -> Option<DaySummary> {
    if day.stops.is_empty() {
        return None;
    }

    let mut transit_secs: u64 = 0;
    let mut distance_m = 0.0;
    let mut day_sum = 0.0;
    let mut currency = Currency::Twd;

    for stop in &day.stops {
        let Some(leg) = &stop.transit_to_next else {
            continue;
        };
        transit_secs += u64::from(leg.duration_value);
        distance_m += distance_meters(&leg.distance);

        if let Some(fare) = leg.fare_display.as_deref().filter(|f| !f.is_empty()) {
            let (value, code) = parse_fare(fare);
            day_sum += value;
            currency = code;
        }
    }

    let trip_sum: f64 = trip
        .days
        .iter()
        .flat_map(|d| &d.stops)
        .filter_map(|s| s.transit_to_next.as_ref())
        .filter_map(|leg| leg.fare_display.as_deref())
        .filter(|f| !f.is_empty())
        .map(|f| parse_fare(f).0)
        .sum();

    let transit_mins = transit_secs / 60;
    let transit_display = if transit_mins >= 60 {
        format!("{}h {}m", transit_mins / 60, transit_mins % 60)
    } else {
        format!("{transit_mins}m")
    };

    Some(DaySummary {
        total_stops: day.stops.len(),
        start_time: day.start_time.clone(),
        end_time: timeline
            .last()
            .map_or_else(|| "--:--".to_owned(), StopTimes::departure_display),
        transit_display,
        total_distance: format!("{:.1} km", distance_m / 1000.0),
        day_cost: (day_sum > 0.0).then(|| currency.format(day_sum)),
        trip_cost: (trip_sum > 0.0).then(|| currency.format(trip_sum)),
    })
}
