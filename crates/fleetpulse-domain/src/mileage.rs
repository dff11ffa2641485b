//! Fuel economy over a set of fuel log entries.

use serde::Serialize;

use crate::log::FuelEntry;

/// Why a mileage figure could not be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MileageError {
    #[error("no fuel logs available")]
    NoEntries,
    #[error("total fuel consumed is zero")]
    NoFuel,
    #[error("need at least 2 fuel log entries with odometer readings")]
    InsufficientReadings,
    #[error("odometer readings do not cover any distance")]
    InvalidDistance,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MileageReport {
    /// Liters across every entry.
    pub total_fuel: f64,
    /// Highest minus lowest positive odometer reading.
    pub total_kilometers: f64,
    /// Kilometers per liter.
    pub fuel_mileage: f64,
    pub cost_per_kilometer: f64,
    pub total_fuel_cost: f64,
    /// Cost of the covered distance at `average_fuel_price`; absent when no price was given.
    pub cost_to_travel: Option<f64>,
    pub min_odometer: f64,
    pub max_odometer: f64,
    pub average_fuel_price: f64,
}

/// Total price paid divided by total liters; 0 when no fuel was logged.
pub fn average_fuel_price(entries: &[FuelEntry]) -> f64 {
    let liters: f64 = entries.iter().map(|e| e.liters).sum();
    if liters > 0.0 {
        entries.iter().map(|e| e.price).sum::<f64>() / liters
    } else {
        0.0
    }
}

/// Compute mileage and running cost from `entries`.
///
/// `average_price` (per liter) only feeds `cost_to_travel` and is ignored unless positive.
pub fn calculate_mileage(
    entries: &[FuelEntry],
    average_price: f64,
) -> Result<MileageReport, MileageError> {
    if entries.is_empty() {
        return Err(MileageError::NoEntries);
    }

    let total_fuel: f64 = entries.iter().map(|e| e.liters).sum();
    if total_fuel.is_nan() || total_fuel <= 0.0 {
        return Err(MileageError::NoFuel);
    }

    let readings: Vec<f64> = entries
        .iter()
        .map(|e| e.odometer)
        .filter(|odo| *odo > 0.0)
        .collect();
    if readings.len() < 2 {
        return Err(MileageError::InsufficientReadings);
    }

    let min_odometer = readings.iter().copied().fold(f64::INFINITY, f64::min);
    let max_odometer = readings.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let total_kilometers = max_odometer - min_odometer;
    if total_kilometers <= 0.0 {
        return Err(MileageError::InvalidDistance);
    }

    let fuel_mileage = total_kilometers / total_fuel;
    let total_fuel_cost: f64 = entries.iter().map(|e| e.price).sum();
    let cost_per_kilometer = total_fuel_cost / total_kilometers;
    let cost_to_travel =
        (average_price > 0.0).then(|| (total_kilometers / fuel_mileage) * average_price);

    Ok(MileageReport {
        total_fuel,
        total_kilometers,
        fuel_mileage,
        cost_per_kilometer,
        total_fuel_cost,
        cost_to_travel,
        min_odometer,
        max_odometer,
        average_fuel_price: average_price,
    })
}
