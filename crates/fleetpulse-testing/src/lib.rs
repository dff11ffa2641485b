//! Test utilities for FleetPulse services.
//!
//! Provides `MockAuth` for signed bearer headers and sample domain fixtures.
//! Use from dev-dependencies only.

pub mod auth;
pub mod fixture;
