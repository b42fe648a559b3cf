use anyhow::Context;
use geo_types::Point;
use serde::Serialize;

use crate::timeline::StopTimes;
use crate::trip::stop::{Stop, StopId};

#[derive(Serialize)]
struct StopFeature {
    id: StopId,
    name: String,
    #[serde(serialize_with = "geojson::ser::serialize_geometry")]
    geometry: Point<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    arrival: Option<String>,
}

/// Serializes a day's stops as a GeoJSON feature collection for map display,
/// each feature carrying its arrival time when the timeline is available.
pub fn day_features(stops: &[Stop], timeline: &[StopTimes]) -> anyhow::Result<String> {
    let features: Vec<StopFeature> = stops
        .iter()
        .enumerate()
        .map(|(i, stop)| StopFeature {
            id: stop.id.clone(),
            name: stop.name.clone(),
            geometry: stop.location,
            arrival: timeline.get(i).map(StopTimes::arrival_display),
        })
        .collect();

    geojson::ser::to_feature_collection_string(&features).context("Failed to serialize")
}
