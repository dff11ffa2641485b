//! Export and restore of stored log data, e.g. when moving to another device.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::StorageError;
use crate::logbook::LOG_PREFIXES;
use crate::storage::KeyValueStore;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RestoreReport {
    pub migrated: usize,
    pub skipped: usize,
}

fn is_log_key(key: &str) -> bool {
    LOG_PREFIXES.iter().any(|prefix| key.starts_with(prefix))
}

/// Every log-book key with its raw stored string.
pub fn export_logs<S: KeyValueStore + ?Sized>(store: &S) -> Map<String, Value> {
    store
        .keys()
        .into_iter()
        .filter(|key| is_log_key(key))
        .filter_map(|key| {
            let value = store.get(&key)?;
            Some((key, Value::String(value)))
        })
        .collect()
}

/// Write the log-book keys of `data` into `store`.
///
/// String values are stored verbatim; any other JSON value is serialized first.
/// Keys without a log-book prefix are skipped, as are keys the store fails to
/// write (logged).
pub fn restore_logs<S: KeyValueStore + ?Sized>(
    store: &S,
    data: &Map<String, Value>,
) -> RestoreReport {
    let mut report = RestoreReport::default();
    for (key, value) in data {
        if !is_log_key(key) {
            report.skipped += 1;
            continue;
        }
        match write_value(store, key, value) {
            Ok(()) => {
                tracing::debug!(key = %key, "restored");
                report.migrated += 1;
            }
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "failed to restore key");
                report.skipped += 1;
            }
        }
    }
    tracing::info!(
        migrated = report.migrated,
        skipped = report.skipped,
        "log restore complete"
    );
    report
}

fn write_value<S: KeyValueStore + ?Sized>(
    store: &S,
    key: &str,
    value: &Value,
) -> Result<(), StorageError> {
    match value {
        Value::String(raw) => store.set(key, raw),
        other => store.set(key, &serde_json::to_string(other)?),
    }
}
