//! Randomized environmental wind.
//!
//! Two independent state machines drive the force: a pulse machine for
//! magnitude (calm, then a ramped gust) and a motion machine for heading
//! (slerp toward a freshly drawn yaw). The generator combines them into one
//! world-frame force and fans it out to registered bodies.

mod generator;
pub mod state;
pub mod targets;

pub use generator::WindGenerator;
pub use state::{MotionMode, MotionPhase, MotionState, PulseMode, PulsePhase, PulseState};
pub use targets::{BodyId, WindImpulse, WindTargets};
