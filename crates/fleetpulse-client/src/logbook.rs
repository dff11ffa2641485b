//! Per-vehicle log book persisted in a [`KeyValueStore`].
//!
//! Each category lives under `<prefix><vehicle id>` as a JSON document. Reads
//! never fail: a missing key is empty, and a corrupt one is logged and treated
//! as empty. An empty vehicle id reads as empty and ignores writes.

use std::sync::Mutex;

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;

use fleetpulse_domain::log::{
    DateRange, EntryId, FuelEntry, InsuranceEntry, MaintenanceEntry, NewFuelEntry,
    NewInsuranceEntry, NewMaintenanceEntry, sort_newest_first,
};
use fleetpulse_domain::mileage::{MileageError, MileageReport, average_fuel_price, calculate_mileage};
use fleetpulse_domain::odometer::OdometerReading;
use fleetpulse_domain::reminder::{self, DueReminder, NewReminder, Reminder};
use fleetpulse_domain::summary::LogSummary;

use crate::error::StorageError;
use crate::storage::KeyValueStore;

pub const FUEL_PREFIX: &str = "fuelLogs:";
pub const MAINTENANCE_PREFIX: &str = "maintenanceLogs:";
pub const INSURANCE_PREFIX: &str = "insuranceLogs:";
pub const ODOMETER_PREFIX: &str = "odometer:";
pub const REMINDERS_PREFIX: &str = "reminders:";

/// Every key prefix owned by the log book.
pub const LOG_PREFIXES: [&str; 5] = [
    FUEL_PREFIX,
    MAINTENANCE_PREFIX,
    INSURANCE_PREFIX,
    ODOMETER_PREFIX,
    REMINDERS_PREFIX,
];

#[derive(Debug, thiserror::Error)]
pub enum OdometerError {
    #[error("odometer reading must be a non-negative number")]
    InvalidReading,
    #[error("reading {attempted} km is below the recorded {current} km")]
    Decrease { current: f64, attempted: f64 },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub struct LogBook<S> {
    store: S,
    last_id: Mutex<EntryId>,
}

impl<S: KeyValueStore> LogBook<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            last_id: Mutex::new(0),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn key(prefix: &str, vehicle: &str) -> Option<String> {
        (!vehicle.is_empty()).then(|| format!("{prefix}{vehicle}"))
    }

    fn read<T: DeserializeOwned>(&self, prefix: &str, vehicle: &str) -> Option<T> {
        let key = Self::key(prefix, vehicle)?;
        let raw = self.store.get(&key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "corrupt log data, treating as empty");
                None
            }
        }
    }

    /// Entries that fail to decode are dropped one by one so the rest survive
    /// the next write.
    fn read_list<T: DeserializeOwned>(&self, prefix: &str, vehicle: &str) -> Vec<T> {
        let Some(items) = self.read::<Vec<serde_json::Value>>(prefix, vehicle) else {
            return Vec::new();
        };
        items
            .into_iter()
            .filter_map(|item| match serde_json::from_value(item) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!(prefix, vehicle, error = %e, "skipping unreadable log entry");
                    None
                }
            })
            .collect()
    }

    fn write<T: Serialize + ?Sized>(
        &self,
        prefix: &str,
        vehicle: &str,
        value: &T,
    ) -> Result<(), StorageError> {
        let Some(key) = Self::key(prefix, vehicle) else {
            return Ok(());
        };
        self.store.set(&key, &serde_json::to_string(value)?)
    }

    /// Millisecond timestamp, bumped when two entries land in the same millisecond.
    fn next_id(&self) -> EntryId {
        let now = Utc::now().timestamp_millis();
        let mut last = self
            .last_id
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *last = now.max(*last + 1);
        *last
    }

    // ── fuel ────────────────────────────────────────────────────────────────

    pub fn fuel_logs(&self, vehicle: &str) -> Vec<FuelEntry> {
        self.read_list(FUEL_PREFIX, vehicle)
    }

    pub fn save_fuel_logs(&self, vehicle: &str, logs: &[FuelEntry]) -> Result<(), StorageError> {
        self.write(FUEL_PREFIX, vehicle, logs)
    }

    /// Record a fill-up and return the updated list, newest first.
    pub fn add_fuel_log(
        &self,
        vehicle: &str,
        entry: NewFuelEntry,
    ) -> Result<Vec<FuelEntry>, StorageError> {
        if vehicle.is_empty() {
            return Ok(Vec::new());
        }
        let mut logs = self.fuel_logs(vehicle);
        logs.insert(0, entry.into_entry(self.next_id(), Utc::now()));
        sort_newest_first(&mut logs);
        self.save_fuel_logs(vehicle, &logs)?;
        Ok(logs)
    }

    // ── maintenance ─────────────────────────────────────────────────────────

    pub fn maintenance_logs(&self, vehicle: &str) -> Vec<MaintenanceEntry> {
        self.read_list(MAINTENANCE_PREFIX, vehicle)
    }

    pub fn save_maintenance_logs(
        &self,
        vehicle: &str,
        logs: &[MaintenanceEntry],
    ) -> Result<(), StorageError> {
        self.write(MAINTENANCE_PREFIX, vehicle, logs)
    }

    pub fn add_maintenance_log(
        &self,
        vehicle: &str,
        entry: NewMaintenanceEntry,
    ) -> Result<Vec<MaintenanceEntry>, StorageError> {
        if vehicle.is_empty() {
            return Ok(Vec::new());
        }
        let mut logs = self.maintenance_logs(vehicle);
        logs.insert(0, entry.into_entry(self.next_id(), Utc::now()));
        sort_newest_first(&mut logs);
        self.save_maintenance_logs(vehicle, &logs)?;
        Ok(logs)
    }

    // ── insurance ───────────────────────────────────────────────────────────

    pub fn insurance_logs(&self, vehicle: &str) -> Vec<InsuranceEntry> {
        self.read_list(INSURANCE_PREFIX, vehicle)
    }

    pub fn save_insurance_logs(
        &self,
        vehicle: &str,
        logs: &[InsuranceEntry],
    ) -> Result<(), StorageError> {
        self.write(INSURANCE_PREFIX, vehicle, logs)
    }

    /// Ordered by policy start date, newest first.
    pub fn add_insurance_log(
        &self,
        vehicle: &str,
        entry: NewInsuranceEntry,
    ) -> Result<Vec<InsuranceEntry>, StorageError> {
        if vehicle.is_empty() {
            return Ok(Vec::new());
        }
        let mut logs = self.insurance_logs(vehicle);
        logs.insert(0, entry.into_entry(self.next_id(), Utc::now()));
        sort_newest_first(&mut logs);
        self.save_insurance_logs(vehicle, &logs)?;
        Ok(logs)
    }

    // ── odometer ────────────────────────────────────────────────────────────

    pub fn odometer(&self, vehicle: &str) -> Option<OdometerReading> {
        self.read(ODOMETER_PREFIX, vehicle)
    }

    /// Replace the vehicle's reading. `date` defaults to today (UTC).
    ///
    /// Readings below the stored one are rejected unless `allow_decrease` is set,
    /// which covers odometer replacement or a typo fix.
    pub fn update_odometer(
        &self,
        vehicle: &str,
        reading: f64,
        date: Option<NaiveDate>,
        allow_decrease: bool,
    ) -> Result<Option<OdometerReading>, OdometerError> {
        if vehicle.is_empty() {
            return Ok(None);
        }
        if !reading.is_finite() || reading < 0.0 {
            return Err(OdometerError::InvalidReading);
        }
        if !allow_decrease {
            if let Some(current) = self.odometer(vehicle).filter(|c| reading < c.reading) {
                return Err(OdometerError::Decrease {
                    current: current.reading,
                    attempted: reading,
                });
            }
        }

        let now = Utc::now();
        let updated = OdometerReading {
            reading,
            date: date.unwrap_or_else(|| now.date_naive()),
            last_updated: now,
        };
        self.write(ODOMETER_PREFIX, vehicle, &updated)?;
        Ok(Some(updated))
    }

    // ── reminders ───────────────────────────────────────────────────────────

    pub fn reminders(&self, vehicle: &str) -> Vec<Reminder> {
        self.read_list(REMINDERS_PREFIX, vehicle)
    }

    pub fn save_reminders(&self, vehicle: &str, reminders: &[Reminder]) -> Result<(), StorageError> {
        self.write(REMINDERS_PREFIX, vehicle, reminders)
    }

    /// Create an active reminder at the head of the list.
    pub fn add_reminder(
        &self,
        vehicle: &str,
        new: NewReminder,
    ) -> Result<Option<Reminder>, StorageError> {
        if vehicle.is_empty() {
            return Ok(None);
        }
        let created = Reminder::from_new(self.next_id(), new, Utc::now());
        let mut reminders = self.reminders(vehicle);
        reminders.insert(0, created.clone());
        self.save_reminders(vehicle, &reminders)?;
        Ok(Some(created))
    }

    pub fn delete_reminder(
        &self,
        vehicle: &str,
        id: EntryId,
    ) -> Result<Vec<Reminder>, StorageError> {
        if vehicle.is_empty() {
            return Ok(Vec::new());
        }
        let mut reminders = self.reminders(vehicle);
        reminders.retain(|r| r.id != id);
        self.save_reminders(vehicle, &reminders)?;
        Ok(reminders)
    }

    pub fn set_reminder_active(
        &self,
        vehicle: &str,
        id: EntryId,
        is_active: bool,
    ) -> Result<Vec<Reminder>, StorageError> {
        if vehicle.is_empty() {
            return Ok(Vec::new());
        }
        let mut reminders = self.reminders(vehicle);
        for r in reminders.iter_mut().filter(|r| r.id == id) {
            r.is_active = is_active;
        }
        self.save_reminders(vehicle, &reminders)?;
        Ok(reminders)
    }

    /// Reminders that fire today against the stored odometer reading.
    pub fn due_reminders(&self, vehicle: &str, today: NaiveDate) -> Vec<DueReminder> {
        let odometer = self.odometer(vehicle);
        reminder::due_reminders(&self.reminders(vehicle), today, odometer.as_ref())
    }

    // ── reports ─────────────────────────────────────────────────────────────

    pub fn summary(&self, vehicle: &str, range: &DateRange) -> LogSummary {
        LogSummary::from_logs(
            &range.filter_sorted(&self.fuel_logs(vehicle)),
            &range.filter_sorted(&self.maintenance_logs(vehicle)),
            &range.filter_sorted(&self.insurance_logs(vehicle)),
        )
    }

    /// Mileage over the fuel logs in `range`, priced at their own average.
    pub fn mileage(&self, vehicle: &str, range: &DateRange) -> Result<MileageReport, MileageError> {
        let fuel = range.filter_sorted(&self.fuel_logs(vehicle));
        calculate_mileage(&fuel, average_fuel_price(&fuel))
    }
}
