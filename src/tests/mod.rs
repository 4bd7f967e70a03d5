//! Behavioral tests for the flight core.
//!
//! ## Organization
//!
//! - `pid_tests`: controller math, anti-windup, derivative handling
//! - `mixer_tests`: force mixing, propeller spin, flight computer
//! - `wind_tests`: wind state machines, determinism, target registry
//! - `navigation_tests`: waypoint progression and queries
//! - `integration_tests`: full ticks through `FlightCore`
//! - `property_tests`: invariants over randomized inputs

pub mod pid_tests;
pub mod mixer_tests;
pub mod property_tests;
