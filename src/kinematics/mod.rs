//! Kinematic inputs and rotation math.
//!
//! Contains:
//! - Raw quaternion operations (scalar arrays)
//! - Vehicle pose/state supplied by the physics collaborator

pub mod quaternion;
pub mod state;

pub use quaternion::*;
pub use state::{Pose, VehicleState};
