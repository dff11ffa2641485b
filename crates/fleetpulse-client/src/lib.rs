//! Client side of FleetPulse: an authenticated API wrapper plus the per-vehicle
//! log book kept in local key-value storage.
//!
//! Log data (fuel, maintenance, insurance, odometer, reminders) never leaves
//! the device; only accounts and vehicles live on the server.

pub mod api;
pub mod backup;
pub mod config;
pub mod error;
pub mod http;
pub mod logbook;
pub mod storage;
