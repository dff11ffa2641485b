//! Domain types shared by the FleetPulse API and its client.
//!
//! This crate contains only pure types and calculations with no framework
//! dependencies. Log entries, reminders and odometer readings never reach the
//! server; vehicle and profile types are the API's wire format.

pub mod currency;
pub mod id;
pub mod log;
pub mod mileage;
pub mod number;
pub mod odometer;
pub mod reminder;
pub mod summary;
pub mod user;
pub mod vehicle;
