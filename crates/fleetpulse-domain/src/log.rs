//! Per-vehicle log entries kept in client storage, and date-range filtering.

use std::cmp::Reverse;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::number::lenient_f64;

/// Client-assigned entry identifier (milliseconds since the epoch at creation).
pub type EntryId = i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuelEntry {
    pub id: EntryId,
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub liters: f64,
    /// Total amount paid for the fill-up.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub price: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub odometer: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceEntry {
    pub id: EntryId,
    pub date: Option<NaiveDate>,
    /// Kind of service performed ("Oil change", "Tyres", ...).
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub cost: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub odometer: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsuranceEntry {
    pub id: EntryId,
    pub provider: String,
    pub policy_number: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub cost: f64,
    pub created_at: DateTime<Utc>,
}

/// Fields a caller supplies for a fuel fill-up; the log book assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFuelEntry {
    pub date: Option<NaiveDate>,
    pub liters: f64,
    pub price: f64,
    #[serde(default)]
    pub odometer: f64,
}

impl NewFuelEntry {
    pub fn into_entry(self, id: EntryId, created_at: DateTime<Utc>) -> FuelEntry {
        FuelEntry {
            id,
            date: self.date,
            liters: self.liters,
            price: self.price,
            odometer: self.odometer,
            created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMaintenanceEntry {
    pub date: Option<NaiveDate>,
    #[serde(rename = "type")]
    pub kind: String,
    pub cost: f64,
    #[serde(default)]
    pub odometer: f64,
}

impl NewMaintenanceEntry {
    pub fn into_entry(self, id: EntryId, created_at: DateTime<Utc>) -> MaintenanceEntry {
        MaintenanceEntry {
            id,
            date: self.date,
            kind: self.kind,
            cost: self.cost,
            odometer: self.odometer,
            created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInsuranceEntry {
    pub provider: String,
    pub policy_number: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub cost: f64,
}

impl NewInsuranceEntry {
    pub fn into_entry(self, id: EntryId, created_at: DateTime<Utc>) -> InsuranceEntry {
        InsuranceEntry {
            id,
            provider: self.provider,
            policy_number: self.policy_number,
            start_date: self.start_date,
            end_date: self.end_date,
            cost: self.cost,
            created_at,
        }
    }
}

/// Entries that can be filtered and ordered by a calendar date.
pub trait Dated {
    fn log_date(&self) -> Option<NaiveDate>;
}

impl Dated for FuelEntry {
    fn log_date(&self) -> Option<NaiveDate> {
        self.date
    }
}

impl Dated for MaintenanceEntry {
    fn log_date(&self) -> Option<NaiveDate> {
        self.date
    }
}

/// Insurance policies are ordered and filtered by their start date.
impl Dated for InsuranceEntry {
    fn log_date(&self) -> Option<NaiveDate> {
        self.start_date
    }
}

/// Sort newest first. Undated entries go last; ties keep insertion order.
pub fn sort_newest_first<T: Dated>(entries: &mut [T]) {
    entries.sort_by_key(|e| Reverse(e.log_date()));
}

/// Inclusive whole-day range. Either bound may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Whether an entry with this date passes the filter.
    ///
    /// Undated entries pass only an unbounded range.
    pub fn contains(&self, date: Option<NaiveDate>) -> bool {
        if self.is_unbounded() {
            return true;
        }
        let Some(date) = date else {
            return false;
        };
        self.start.is_none_or(|start| date >= start) && self.end.is_none_or(|end| date <= end)
    }

    /// Entries inside the range, newest first.
    pub fn filter_sorted<T: Dated + Clone>(&self, entries: &[T]) -> Vec<T> {
        let mut kept: Vec<T> = entries
            .iter()
            .filter(|e| self.contains(e.log_date()))
            .cloned()
            .collect();
        sort_newest_first(&mut kept);
        kept
    }
}
