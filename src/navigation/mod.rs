//! Waypoint progression.
//!
//! A `WaypointNavigator` walks a shared `WaypointPath`, advancing when the
//! tracked body enters the current waypoint's arrival radius, and answers
//! distance and heading queries for the setpoint planner.

mod navigator;
mod waypoint;

pub use navigator::{HeadingAngles, NavigationEvent, WaypointNavigator};
pub use waypoint::{Waypoint, WaypointPath};
