use anyhow::Result;
use geo_types::Point;
use itertools::Itertools;
use tracing::warn;

use crate::trip::stop::{Stop, TransitLeg, TravelMode};

/// Boundary to the routing provider. The engine never computes routes
/// itself; implementations wrap whatever directions API the app is using.
pub trait RouteSource {
    fn route(
        &self,
        origin: Point<f64>,
        destination: Point<f64>,
        mode: TravelMode,
    ) -> Result<TransitLeg>;
}

/// Recomputes `transit_to_next` for every consecutive stop pair, one lookup
/// per leg in order.
///
/// Each leg keeps its previously chosen travel mode (DRIVING for new legs).
/// A failed lookup leaves the old leg in place so a partial recompute still
/// renders, and the terminal stop's stale leg is cleared.
pub fn apply_routes<S: RouteSource>(stops: &[Stop], source: &S) -> Vec<Stop> {
    let mut routed = stops.to_vec();
    if routed.len() < 2 {
        return routed;
    }

    let legs: Vec<Option<TransitLeg>> = routed
        .iter()
        .tuple_windows()
        .map(|(from, to)| {
            let mode = from
                .transit_to_next
                .as_ref()
                .map_or(TravelMode::Driving, |leg| leg.mode);
            match source.route(from.location, to.location, mode) {
                Ok(leg) => Some(leg),
                Err(err) => {
                    warn!("route lookup {} -> {} failed: {err:#}", from.name, to.name);
                    None
                }
            }
        })
        .collect();

    for (stop, leg) in routed.iter_mut().zip(legs) {
        if let Some(leg) = leg {
            stop.transit_to_next = Some(leg);
        }
    }
    if let Some(last) = routed.last_mut() {
        last.transit_to_next = None;
    }

    routed
}

/// `X mins` under an hour, `X hr Y mins` above, rounding seconds up.
pub fn format_duration(seconds: u32) -> String {
    let mins = seconds.div_ceil(60);
    if mins < 60 {
        format!("{mins} mins")
    } else {
        format!("{} hr {} mins", mins / 60, mins % 60)
    }
}

pub fn format_distance(meters: u32) -> String {
    if meters >= 1000 {
        format!("{:.1} km", f64::from(meters) / 1000.0)
    } else {
        format!("{meters} m")
    }
}
