//! Configuration types and builders for the flight core.
//!
//! Provides static configuration through builder patterns for:
//! - PID gain sets and controller strategy
//! - Motor layout, mixing mode and propeller animation
//! - Wind pulse and motion distributions
//! - Waypoint following and setpoint planning
//!
//! Every struct derives serde so an authoring tool can supply it. Dynamic
//! state is never part of these types.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::control::{ControllerKind, MixMode, MotorSpec, PidParameters, PropellerConfig};
use crate::error::{check_finite, check_non_negative, ConfigError};
use crate::random::Gaussian;

// ============================================================================
// Control Configuration
// ============================================================================

/// PID banks, motor layout and throttle trim for the flight computer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ControlConfig {
    /// Strategy used for all four axes
    pub controller: ControllerKind,
    pub pitch: PidParameters,
    pub roll: PidParameters,
    pub yaw: PidParameters,
    pub altitude: PidParameters,
    /// One entry per rotor
    pub motors: Vec<MotorSpec>,
    pub mix_mode: MixMode,
    pub propeller: PropellerConfig,
    /// Per-motor throttle that balances gravity
    pub hover_throttle: f32,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self::quad_x()
    }
}

impl ControlConfig {
    /// X-configuration quad with the stock gain presets.
    pub fn quad_x() -> Self {
        Self {
            controller: ControllerKind::Standard,
            pitch: PidParameters::attitude(),
            roll: PidParameters::attitude(),
            yaw: PidParameters::heading(),
            altitude: PidParameters::altitude(),
            motors: MotorSpec::quad_x(DEFAULT_TORQUE_FACTOR).to_vec(),
            mix_mode: MixMode::Clamped,
            propeller: PropellerConfig::default(),
            hover_throttle: DEFAULT_HOVER_THROTTLE,
        }
    }

    pub fn with_controller(mut self, kind: ControllerKind) -> Self {
        self.controller = kind;
        self
    }

    /// Same gains for pitch and roll.
    pub fn with_attitude_gains(mut self, params: PidParameters) -> Self {
        self.pitch = params;
        self.roll = params;
        self
    }

    pub fn with_yaw_gains(mut self, params: PidParameters) -> Self {
        self.yaw = params;
        self
    }

    pub fn with_altitude_gains(mut self, params: PidParameters) -> Self {
        self.altitude = params;
        self
    }

    pub fn with_motors(mut self, motors: Vec<MotorSpec>) -> Self {
        self.motors = motors;
        self
    }

    pub fn with_mix_mode(mut self, mode: MixMode) -> Self {
        self.mix_mode = mode;
        self
    }

    pub fn with_propeller(mut self, propeller: PropellerConfig) -> Self {
        self.propeller = propeller;
        self
    }

    pub fn with_hover_throttle(mut self, throttle: f32) -> Self {
        self.hover_throttle = throttle;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let ControllerKind::Instrumented { history_len: 0 } = self.controller {
            return Err(ConfigError::ZeroCapacity {
                field: "control.controller.history_len",
            });
        }
        self.pitch.validate()?;
        self.roll.validate()?;
        self.yaw.validate()?;
        self.altitude.validate()?;

        if self.motors.is_empty() {
            return Err(ConfigError::MissingMotors);
        }
        for motor in &self.motors {
            motor.validate()?;
        }
        self.propeller.validate()?;
        check_finite("control.hover_throttle", self.hover_throttle)
    }
}

// ============================================================================
// Wind Configuration
// ============================================================================

/// Distributions and rates driving the wind state machines.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WindConfig {
    /// Calm interval between gusts (s)
    pub pulse_period: Gaussian,
    /// Gust length (s)
    pub pulse_duration: Gaussian,
    /// Gust strength drawn once per gust
    pub base_strength: Gaussian,
    /// Per-tick jitter on the gust target while pulsing
    pub strength_noise: Gaussian,
    /// Strength units per second while ramping toward a target
    pub ramp_rate: f32,
    /// Strength units per second shed while waiting
    pub decay_rate: f32,
    /// Interval between heading changes (s)
    pub motion_period: Gaussian,
    /// Slerp fraction per second toward the new heading
    pub change_speed: Gaussian,
    /// Multiplier from strength to force
    pub strength_scale: f32,
    /// Only bodies with this tag receive impulses; `None` targets all
    pub target_tag: Option<String>,
}

impl Default for WindConfig {
    fn default() -> Self {
        Self {
            pulse_period: Gaussian::constant(DEFAULT_PULSE_PERIOD).with_variance(1.0),
            pulse_duration: Gaussian::constant(DEFAULT_PULSE_DURATION).with_variance(0.5),
            base_strength: Gaussian::constant(DEFAULT_BASE_STRENGTH).with_variance(2.0),
            strength_noise: Gaussian::constant(0.0).with_variance(0.25),
            ramp_rate: DEFAULT_RAMP_RATE,
            decay_rate: DEFAULT_DECAY_RATE,
            motion_period: Gaussian::constant(DEFAULT_MOTION_PERIOD).with_variance(2.0),
            change_speed: Gaussian::constant(DEFAULT_CHANGE_SPEED).with_variance(0.05),
            strength_scale: 1.0,
            target_tag: None,
        }
    }
}

impl WindConfig {
    /// No gusts: every strength distribution is pinned at zero.
    pub fn calm() -> Self {
        Self {
            base_strength: Gaussian::constant(0.0),
            strength_noise: Gaussian::constant(0.0),
            ..Self::default()
        }
    }

    pub fn with_pulse_period(mut self, dist: Gaussian) -> Self {
        self.pulse_period = dist;
        self
    }

    pub fn with_pulse_duration(mut self, dist: Gaussian) -> Self {
        self.pulse_duration = dist;
        self
    }

    pub fn with_base_strength(mut self, dist: Gaussian) -> Self {
        self.base_strength = dist;
        self
    }

    pub fn with_strength_noise(mut self, dist: Gaussian) -> Self {
        self.strength_noise = dist;
        self
    }

    pub fn with_ramp_rate(mut self, rate: f32) -> Self {
        self.ramp_rate = rate;
        self
    }

    pub fn with_decay_rate(mut self, rate: f32) -> Self {
        self.decay_rate = rate;
        self
    }

    pub fn with_motion_period(mut self, dist: Gaussian) -> Self {
        self.motion_period = dist;
        self
    }

    pub fn with_change_speed(mut self, dist: Gaussian) -> Self {
        self.change_speed = dist;
        self
    }

    pub fn with_strength_scale(mut self, scale: f32) -> Self {
        self.strength_scale = scale;
        self
    }

    pub fn with_target_tag(mut self, tag: impl Into<String>) -> Self {
        self.target_tag = Some(tag.into());
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.pulse_period.validate("wind.pulse_period")?;
        self.pulse_duration.validate("wind.pulse_duration")?;
        self.base_strength.validate("wind.base_strength")?;
        self.strength_noise.validate("wind.strength_noise")?;
        self.motion_period.validate("wind.motion_period")?;
        self.change_speed.validate("wind.change_speed")?;
        check_non_negative("wind.ramp_rate", self.ramp_rate)?;
        check_non_negative("wind.decay_rate", self.decay_rate)?;
        check_finite("wind.strength_scale", self.strength_scale)
    }
}

// ============================================================================
// Navigation Configuration
// ============================================================================

/// Waypoint following and the setpoints derived from it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// Wrap to the first waypoint after the last
    pub looping: bool,
    /// Forward tilt cap while flying toward a waypoint (deg)
    pub max_pitch_deg: f32,
    /// Forward tilt per metre of horizontal distance (deg/m)
    pub pitch_gain: f32,
    /// Only tilt forward once the heading error is within this (deg)
    pub align_tolerance_deg: f32,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            looping: false,
            max_pitch_deg: DEFAULT_MAX_PITCH_DEG,
            pitch_gain: DEFAULT_PITCH_GAIN,
            align_tolerance_deg: DEFAULT_ALIGN_TOLERANCE_DEG,
        }
    }
}

impl NavigationConfig {
    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    pub fn with_max_pitch(mut self, degrees: f32) -> Self {
        self.max_pitch_deg = degrees;
        self
    }

    pub fn with_pitch_gain(mut self, gain: f32) -> Self {
        self.pitch_gain = gain;
        self
    }

    pub fn with_align_tolerance(mut self, degrees: f32) -> Self {
        self.align_tolerance_deg = degrees;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_non_negative("navigation.max_pitch_deg", self.max_pitch_deg)?;
        check_non_negative("navigation.pitch_gain", self.pitch_gain)?;
        check_non_negative("navigation.align_tolerance_deg", self.align_tolerance_deg)
    }
}

// ============================================================================
// Flight Configuration
// ============================================================================

/// Complete configuration for a `FlightCore`.
///
/// # Example
/// ```ignore
/// let config = FlightConfig::new()
///     .with_seed(7)
///     .with_wind(WindConfig::default().with_strength_scale(0.5))
///     .with_navigation(NavigationConfig::default().with_looping(true));
/// let core = FlightCore::new(config, path)?;
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlightConfig {
    pub control: ControlConfig,
    pub wind: WindConfig,
    pub navigation: NavigationConfig,
    /// Skip the wind generator entirely
    pub enable_wind: bool,
    /// Seed for the wind random stream
    pub seed: u64,
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self {
            control: ControlConfig::default(),
            wind: WindConfig::default(),
            navigation: NavigationConfig::default(),
            enable_wind: true,
            seed: 0,
        }
    }
}

impl FlightConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_control(mut self, control: ControlConfig) -> Self {
        self.control = control;
        self
    }

    pub fn with_wind(mut self, wind: WindConfig) -> Self {
        self.wind = wind;
        self.enable_wind = true;
        self
    }

    pub fn without_wind(mut self) -> Self {
        self.enable_wind = false;
        self
    }

    pub fn with_navigation(mut self, navigation: NavigationConfig) -> Self {
        self.navigation = navigation;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.control.validate()?;
        self.wind.validate()?;
        self.navigation.validate()
    }
}
