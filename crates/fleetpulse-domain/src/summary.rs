use serde::Serialize;

use crate::log::{FuelEntry, InsuranceEntry, MaintenanceEntry};
use crate::mileage::average_fuel_price;

/// Spending totals across the three log categories.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogSummary {
    pub total_fuel_cost: f64,
    pub total_fuel_liters: f64,
    pub average_fuel_price: f64,
    pub total_maintenance_cost: f64,
    pub total_insurance_cost: f64,
    pub total_cost: f64,
    pub fuel_count: usize,
    pub maintenance_count: usize,
    pub insurance_count: usize,
}

impl LogSummary {
    pub fn from_logs(
        fuel: &[FuelEntry],
        maintenance: &[MaintenanceEntry],
        insurance: &[InsuranceEntry],
    ) -> Self {
        let total_fuel_cost: f64 = fuel.iter().map(|e| e.price).sum();
        let total_fuel_liters: f64 = fuel.iter().map(|e| e.liters).sum();
        let total_maintenance_cost: f64 = maintenance.iter().map(|e| e.cost).sum();
        let total_insurance_cost: f64 = insurance.iter().map(|e| e.cost).sum();

        Self {
            total_fuel_cost,
            total_fuel_liters,
            average_fuel_price: average_fuel_price(fuel),
            total_maintenance_cost,
            total_insurance_cost,
            total_cost: total_fuel_cost + total_maintenance_cost + total_insurance_cost,
            fuel_count: fuel.len(),
            maintenance_count: maintenance.len(),
            insurance_count: insurance.len(),
        }
    }
}
