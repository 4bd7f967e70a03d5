//! Multi-Rotor Flight Core
//!
//! Flight stabilization and propulsion for a simulated multi-rotor: turns
//! attitude and altitude targets into per-motor lift, injects randomized
//! wind, and walks the vehicle through a sequence of waypoints.
//!
//! # Features
//!
//! - **PID Control**: anti-windup clamping, derivative-kick avoidance, and
//!   error or measurement derivative strategies
//! - **Force Mixing**: per-motor authority coefficients with clamped or signed
//!   output, reaction torque, and propeller spin for animation
//! - **Stochastic Wind**: pulse and motion state machines over a seedable
//!   stream, reproducible bit-for-bit
//! - **Waypoint Navigation**: shared immutable paths, looping or one-shot,
//!   with distance and heading queries
//!
//! # Architecture
//!
//! The core never integrates physics. Each tick the physics collaborator
//! hands over a `VehicleState` and a timestep; the core hands back motor
//! forces, a wind force with per-body impulses, and navigation events.
//!
//! # Example
//!
//! ```rust,ignore
//! use multirotor_core::{FlightConfig, FlightCore, VehicleState, Vec3, Waypoint, WaypointPath};
//!
//! let path = WaypointPath::new(vec![
//!     Waypoint::new("takeoff", Vec3::new(0.0, 0.0, 5.0), 0.5)?,
//!     Waypoint::new("field", Vec3::new(20.0, 0.0, 5.0), 1.0)?,
//! ]);
//! let mut core = FlightCore::new(FlightConfig::new().with_seed(42), path)?;
//!
//! let state = VehicleState::at_rest(Vec3::zero());
//! let report = core.tick(&state, 0.02)?;
//! for (motor, out) in report.motors.iter().enumerate() {
//!     physics.apply_lift(motor, out.lift_force, out.torque);
//! }
//! physics.apply_force(report.wind_force);
//! ```

// Core modules
pub mod config;
pub mod constants;
pub mod error;
pub mod random;
pub mod types;

// Kinematics
pub mod kinematics;

// Flight components
pub mod control;
pub mod navigation;
pub mod wind;

// Per-tick driver
pub mod driver;

// Comprehensive test suite
#[cfg(test)]
pub mod tests;

// Re-exports for convenience
pub use config::{ControlConfig, FlightConfig, NavigationConfig, WindConfig};
pub use control::{
    AttitudeSetpoint, Axis, AxisController, ControlInputs, Controller, ControllerKind,
    DerivativeSource, FlightComputer, InstrumentedPid, IntegralClamp, MixMode, MotorMixer,
    MotorRuntime, MotorSpec, PidController, PidParameters, PidTerms, PropellerAnimator,
    PropellerConfig,
};
pub use driver::{FlightCore, SetpointPlanner, TickReport};
pub use error::{ConfigError, ControlError};
pub use kinematics::{Pose, VehicleState};
pub use navigation::{HeadingAngles, NavigationEvent, Waypoint, WaypointNavigator, WaypointPath};
pub use random::{seeded_rng, Gaussian, SimRng};
pub use types::{BodyFrame, PositiveScalar, UnitQuaternion, Vec3, WorldFrame};
pub use wind::{BodyId, MotionMode, PulseMode, WindGenerator, WindImpulse, WindTargets};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
