use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

use crate::trip::stop::Stop;

/// Arrival and departure instants for one stop. Kept as naive datetimes so
/// the computation never depends on the host timezone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StopTimes {
    pub arrival: NaiveDateTime,
    pub departure: NaiveDateTime,
}

impl StopTimes {
    pub fn arrival_display(&self) -> String {
        self.arrival.format("%H:%M").to_string()
    }

    pub fn departure_display(&self) -> String {
        self.departure.format("%H:%M").to_string()
    }
}

fn day_start(date: &str, start_time: &str) -> Option<NaiveDateTime> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    let time = NaiveTime::parse_from_str(start_time, "%H:%M").ok()?;
    Some(NaiveDateTime::new(date, time))
}

/// Walks the day's stops once, accumulating stay and transit time.
///
/// Returns one entry per stop. An unparseable date or start time yields an
/// empty timeline rather than an error; callers display "unavailable". The
/// terminal stop's `transit_to_next` never shifts anything: the cursor it
/// would advance is discarded, so stale legs are harmless.
pub fn build_timeline(date: &str, start_time: &str, stops: &[Stop]) -> Vec<StopTimes> {
    let Some(mut cursor) = day_start(date, start_time) else {
        return vec![];
    };

    stops
        .iter()
        .map(|stop| {
            let arrival = cursor;
            let departure = arrival + TimeDelta::minutes(i64::from(stop.stay_duration));
            let transit_secs = stop
                .transit_to_next
                .as_ref()
                .map_or(0, |leg| leg.duration_value);
            cursor = departure + TimeDelta::seconds(i64::from(transit_secs));
            StopTimes { arrival, departure }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trip::stop::{StopId, TransitLeg, TravelMode};
    use geo_types::Point;

    fn stop(id: &str, stay_minutes: u32, transit_secs: Option<u32>) -> Stop {
        Stop {
            id: StopId::new(id),
            name: id.to_owned(),
            address: String::new(),
            note: None,
            location: Point::new(121.5, 25.0),
            stay_duration: stay_minutes,
            transit_to_next: transit_secs.map(|secs| TransitLeg {
                duration: format!("{} mins", secs / 60),
                duration_value: secs,
                distance: "1.0 km".to_owned(),
                mode: TravelMode::Driving,
                fare_display: None,
            }),
        }
    }

    #[test]
    fn zero_transit_chains_departure_to_next_arrival() {
        let stops = vec![stop("a", 60, None), stop("b", 30, None)];
        let tl = build_timeline("2025-05-01", "09:00", &stops);

        assert_eq!(tl.len(), 2);
        assert_eq!(tl[0].arrival_display(), "09:00");
        assert_eq!(tl[0].departure_display(), "10:00");
        assert_eq!(tl[1].arrival, tl[0].departure);
        assert_eq!(tl[1].departure_display(), "10:30");
    }

    #[test]
    fn transit_advances_the_cursor() {
        let stops = vec![stop("a", 45, Some(900)), stop("b", 60, None)];
        let tl = build_timeline("2025-05-01", "09:00", &stops);

        assert_eq!(tl[0].departure_display(), "09:45");
        assert_eq!(tl[1].arrival_display(), "10:00");
    }

    #[test]
    fn terminal_stop_leg_does_not_change_output() {
        let without = vec![stop("a", 60, Some(600)), stop("b", 30, None)];
        let with_stale = vec![stop("a", 60, Some(600)), stop("b", 30, Some(9999))];

        assert_eq!(
            build_timeline("2025-05-01", "09:00", &without),
            build_timeline("2025-05-01", "09:00", &with_stale)
        );
    }

    #[test]
    fn invalid_date_yields_empty_timeline() {
        let stops = vec![stop("a", 60, None)];
        assert!(build_timeline("not-a-date", "09:00", &stops).is_empty());
        assert!(build_timeline("2025-05-01", "99:99", &stops).is_empty());
        assert!(build_timeline("", "", &stops).is_empty());
    }

    #[test]
    fn empty_stop_list_yields_empty_timeline() {
        assert!(build_timeline("2025-05-01", "09:00", &[]).is_empty());
    }

    #[test]
    fn rerun_is_identical() {
        let stops = vec![stop("a", 90, Some(1200)), stop("b", 15, None)];
        let first = build_timeline("2025-05-01", "08:30", &stops);
        let second = build_timeline("2025-05-01", "08:30", &stops);
        assert_eq!(first, second);
    }

    #[test]
    fn long_days_cross_midnight() {
        let stops = vec![stop("a", 120, Some(3600)), stop("b", 180, None)];
        let tl = build_timeline("2025-05-01", "22:00", &stops);

        assert_eq!(tl[1].arrival_display(), "01:00");
        assert_eq!(tl[1].departure_display(), "04:00");
        assert_eq!(tl[1].arrival.date(), NaiveDate::from_ymd_opt(2025, 5, 2).unwrap());
    }
}
