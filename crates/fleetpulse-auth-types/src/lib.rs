//! Auth types shared by the FleetPulse API and its test helpers.
//!
//! Provides JWT claims and validation, refresh-cookie builders, and the
//! `BearerIdentity` extractor.

pub mod cookie;
pub mod identity;
pub mod token;
