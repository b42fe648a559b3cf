use geo_types::Point;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StopId(String);

impl StopId {
    pub fn new(s: &str) -> Self {
        Self(s.to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TravelMode {
    Walking,
    Transit,
    Driving,
}

/// Transit segment from one stop to the next stop in the same day, as
/// returned by the routing provider. Display strings come pre-formatted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitLeg {
    pub duration: String,
    /// Seconds.
    pub duration_value: u32,
    pub distance: String,
    pub mode: TravelMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fare_display: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stop {
    pub id: StopId,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(with = "latlng")]
    pub location: Point<f64>,
    /// Minutes spent at the stop once the traveler arrives.
    pub stay_duration: u32,
    /// Only meaningful for non-terminal stops; may hold stale data while
    /// routes are being recomputed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transit_to_next: Option<TransitLeg>,
}

/// Trip files store locations as `{"lat": .., "lng": ..}` objects.
mod latlng {
    use geo_types::Point;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct LatLng {
        lat: f64,
        lng: f64,
    }

    pub fn serialize<S: Serializer>(point: &Point<f64>, ser: S) -> Result<S::Ok, S::Error> {
        LatLng {
            lat: point.y(),
            lng: point.x(),
        }
        .serialize(ser)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Point<f64>, D::Error> {
        let ll = LatLng::deserialize(de)?;
        Ok(Point::new(ll.lng, ll.lat))
    }
}
