//! Fixed-step driver tying wind, navigation and control together.
//!
//! Every `tick` runs, in order:
//! 1. wind generator (independent of the other two)
//! 2. waypoint navigator (consumes the tracked pose)
//! 3. setpoint planning and the flight computer (PID x4 then mixer)
//!
//! Same seed and same `dt` sequence reproduce every output bit-for-bit.

use rand::Rng;

use crate::config::{FlightConfig, NavigationConfig};
use crate::control::{AttitudeSetpoint, FlightComputer, MotorRuntime};
use crate::error::{check_timestep, ConfigError, ControlError};
use crate::kinematics::VehicleState;
use crate::navigation::{NavigationEvent, WaypointNavigator, WaypointPath};
use crate::random::{seeded_rng, SimRng};
use crate::types::{Vec3, WorldFrame};
use crate::wind::{WindGenerator, WindImpulse};

// ============================================================================
// Setpoint planning
// ============================================================================

/// Turns navigator queries into attitude/altitude targets.
///
/// While a waypoint is active: face it, match its altitude, and tilt
/// forward in proportion to horizontal distance once roughly aligned.
/// With no waypoint: hold the pose captured on the first idle tick.
#[derive(Clone, Debug)]
pub struct SetpointPlanner {
    config: NavigationConfig,
    hold: Option<AttitudeSetpoint>,
}

impl SetpointPlanner {
    pub fn new(config: NavigationConfig) -> Self {
        Self { config, hold: None }
    }

    pub fn config(&self) -> &NavigationConfig {
        &self.config
    }

    pub fn plan(&mut self, navigator: &WaypointNavigator, state: &VehicleState) -> AttitudeSetpoint {
        let (waypoint, heading) = match (navigator.current_waypoint(), navigator.heading_to_current()) {
            (Some(wp), Some(heading)) => (wp, heading),
            _ => return *self.hold.get_or_insert_with(|| AttitudeSetpoint::hold(state)),
        };
        self.hold = None;

        let target = waypoint.position();
        let dx = target.x() - state.position().x();
        let dy = target.y() - state.position().y();
        let horizontal = (dx * dx + dy * dy).sqrt();

        // Positive pitch is nose-down, which drives the body forward.
        let pitch = if heading.yaw.abs() <= self.config.align_tolerance_deg {
            (self.config.pitch_gain * horizontal).min(self.config.max_pitch_deg)
        } else {
            0.0
        };

        AttitudeSetpoint {
            pitch,
            roll: 0.0,
            yaw: state.attitude_degrees()[2] + heading.yaw,
            altitude: target.z(),
        }
    }

    /// Forget the captured hold pose.
    pub fn reset(&mut self) {
        self.hold = None;
    }
}

// ============================================================================
// Tick report
// ============================================================================

/// Everything produced by one tick, for the physics collaborator and telemetry.
#[derive(Clone, Debug, PartialEq)]
pub struct TickReport {
    pub wind_force: Vec3<WorldFrame>,
    pub wind_impulses: Vec<WindImpulse>,
    pub navigation: Option<NavigationEvent>,
    pub setpoint: AttitudeSetpoint,
    pub motors: Vec<MotorRuntime>,
    /// Sum of |PID output| over all axes.
    pub aggregate_output: f32,
    /// Distance to the current waypoint, `-1.0` when finished.
    pub waypoint_distance: f32,
}

impl TickReport {
    pub fn total_lift(&self) -> f32 {
        self.motors.iter().map(|m| m.lift_force).sum()
    }
}

// ============================================================================
// Flight core
// ============================================================================

#[derive(Debug)]
pub struct FlightCore<R: Rng = SimRng> {
    computer: FlightComputer,
    wind: Option<WindGenerator<R>>,
    navigator: WaypointNavigator,
    planner: SetpointPlanner,
    ticks: u64,
}

impl FlightCore<SimRng> {
    /// Build from configuration, seeding the wind stream from `config.seed`.
    pub fn new(config: FlightConfig, path: WaypointPath) -> Result<Self, ConfigError> {
        let rng = seeded_rng(config.seed);
        Self::with_rng(config, path, rng)
    }
}

impl<R: Rng> FlightCore<R> {
    /// Build with a caller-supplied random stream. `config.seed` is ignored.
    pub fn with_rng(config: FlightConfig, path: WaypointPath, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let wind = if config.enable_wind {
            Some(WindGenerator::new(config.wind, rng)?)
        } else {
            None
        };
        Ok(Self {
            computer: FlightComputer::new(&config.control)?,
            wind,
            navigator: WaypointNavigator::new(path, config.navigation.looping),
            planner: SetpointPlanner::new(config.navigation),
            ticks: 0,
        })
    }

    /// Advance one fixed step. A rejected `dt` leaves every component untouched.
    pub fn tick(&mut self, state: &VehicleState, dt: f32) -> Result<TickReport, ControlError> {
        check_timestep(dt)?;

        let (wind_force, wind_impulses) = match self.wind.as_mut() {
            Some(wind) => (wind.tick(dt)?, wind.impulses()),
            None => (Vec3::zero(), Vec::new()),
        };

        let navigation = self.navigator.update(state.pose);
        let setpoint = self.planner.plan(&self.navigator, state);
        let motors = self.computer.compute(&setpoint, state, dt)?.to_vec();

        self.ticks += 1;
        Ok(TickReport {
            wind_force,
            wind_impulses,
            navigation,
            setpoint,
            motors,
            aggregate_output: self.computer.aggregate_output(),
            waypoint_distance: self.navigator.current_distance(),
        })
    }

    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn computer(&self) -> &FlightComputer {
        &self.computer
    }

    pub fn computer_mut(&mut self) -> &mut FlightComputer {
        &mut self.computer
    }

    pub fn wind(&self) -> Option<&WindGenerator<R>> {
        self.wind.as_ref()
    }

    pub fn wind_mut(&mut self) -> Option<&mut WindGenerator<R>> {
        self.wind.as_mut()
    }

    pub fn navigator(&self) -> &WaypointNavigator {
        &self.navigator
    }

    pub fn navigator_mut(&mut self) -> &mut WaypointNavigator {
        &mut self.navigator
    }

    pub fn planner(&self) -> &SetpointPlanner {
        &self.planner
    }

    /// Follow a new path from its first waypoint.
    pub fn reset_path(&mut self, path: WaypointPath) {
        self.navigator.reset_path(path);
        self.planner.reset();
    }

    /// Re-arm every component. The wind stream continues where it was.
    pub fn reset(&mut self) {
        self.computer.reset();
        if let Some(wind) = self.wind.as_mut() {
            wind.reset();
        }
        self.navigator.reset_waypoint();
        self.planner.reset();
        self.ticks = 0;
    }
}
