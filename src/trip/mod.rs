pub mod stop;

use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::trip::stop::Stop;

/// One calendar day of a trip. `date` and `start_time` are kept as the raw
/// strings the editing UI wrote; they may be invalid while a day is being
/// edited, which downstream computations treat as "timeline unavailable".
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPlan {
    pub id: String,
    /// ISO date, `YYYY-MM-DD`.
    pub date: String,
    /// 24-hour `HH:mm`.
    pub start_time: String,
    /// Visitation order, not insertion order.
    pub stops: Vec<Stop>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Trip {
    pub id: String,
    pub name: String,
    pub days: Vec<DayPlan>,
}

impl Trip {
    pub fn read<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let f = File::open(&path)
            .with_context(|| format!("Failed to open trip file {}", path.as_ref().display()))?;
        let trip = serde_json::from_reader(BufReader::new(f))
            .context("Trip file is not valid trip JSON")?;
        Ok(trip)
    }
}
