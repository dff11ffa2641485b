use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Latest odometer reading recorded for a vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OdometerReading {
    /// Kilometers.
    pub reading: f64,
    pub date: NaiveDate,
    pub last_updated: DateTime<Utc>,
}
