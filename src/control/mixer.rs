//! Motor force mixing.
//!
//! Each motor's lift is the throttle plus the three axis demands weighted by
//! the motor's fixed authority coefficients:
//!
//! lift[m] = throttle + pitch_factor[m]*pitch + roll_factor[m]*roll + yaw_factor[m]*yaw
//!
//! Sign conventions: front motors have `pitch_factor > 0`, left motors
//! `roll_factor > 0`, front-left and rear-right `yaw_factor > 0`.

use serde::{Deserialize, Serialize};

use super::propeller::{PropellerAnimator, PropellerConfig};
use crate::error::{check_non_negative, check_timestep, ConfigError, ControlError};

// ============================================================================
// Static configuration
// ============================================================================

/// Authority coefficients for one rotor, fixed by its placement on the frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MotorSpec {
    pub pitch_factor: i8,
    pub yaw_factor: i8,
    pub roll_factor: i8,
    /// Reaction torque per unit lift about the motor's up axis.
    pub torque_factor: f32,
}

impl MotorSpec {
    pub fn new(
        pitch_factor: i8,
        yaw_factor: i8,
        roll_factor: i8,
        torque_factor: f32,
    ) -> Result<Self, ConfigError> {
        let spec = Self {
            pitch_factor,
            yaw_factor,
            roll_factor,
            torque_factor,
        };
        spec.validate()?;
        Ok(spec)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("motor.pitch_factor", self.pitch_factor),
            ("motor.yaw_factor", self.yaw_factor),
            ("motor.roll_factor", self.roll_factor),
        ] {
            if !(-1..=1).contains(&value) {
                return Err(ConfigError::InvalidFactor { field, value });
            }
        }
        check_non_negative("motor.torque_factor", self.torque_factor)
    }

    /// X-configuration quad: front-left, front-right, rear-left, rear-right.
    pub const fn quad_x(torque_factor: f32) -> [MotorSpec; 4] {
        [
            MotorSpec { pitch_factor: 1, yaw_factor: 1, roll_factor: 1, torque_factor },
            MotorSpec { pitch_factor: 1, yaw_factor: -1, roll_factor: -1, torque_factor },
            MotorSpec { pitch_factor: -1, yaw_factor: -1, roll_factor: 1, torque_factor },
            MotorSpec { pitch_factor: -1, yaw_factor: 1, roll_factor: -1, torque_factor },
        ]
    }
}

/// Whether mixed forces may go negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MixMode {
    /// Motors cannot pull: negative sums become zero.
    #[default]
    Clamped,
    /// Signed forces, for reversible thrust or signed feedback to physics.
    Raw,
}

/// Throttle plus PID-corrected axis demands for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ControlInputs {
    pub throttle: f32,
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
}

impl ControlInputs {
    pub const fn new(throttle: f32, pitch: f32, yaw: f32, roll: f32) -> Self {
        Self {
            throttle,
            pitch,
            yaw,
            roll,
        }
    }

    /// Pure throttle, no attitude correction.
    pub const fn throttle_only(throttle: f32) -> Self {
        Self::new(throttle, 0.0, 0.0, 0.0)
    }
}

/// Mix one motor.
#[inline]
pub fn mix_motor(spec: &MotorSpec, inputs: &ControlInputs, mode: MixMode) -> f32 {
    let lift = inputs.throttle
        + spec.pitch_factor as f32 * inputs.pitch
        + spec.roll_factor as f32 * inputs.roll
        + spec.yaw_factor as f32 * inputs.yaw;
    match mode {
        MixMode::Clamped => lift.max(0.0),
        MixMode::Raw => lift,
    }
}

// ============================================================================
// Runtime output
// ============================================================================

/// Per-motor output, recomputed every tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MotorRuntime {
    /// Force along the motor's up axis.
    pub lift_force: f32,
    /// `lift_force * torque_factor`, about the motor's up axis.
    pub torque: f32,
    /// Propeller angle increment this tick (degrees).
    pub propeller_angle_delta: f32,
    /// Propeller angular speed (deg/s).
    pub propeller_speed: f32,
}

// ============================================================================
// Mixer
// ============================================================================

#[derive(Clone, Debug)]
pub struct MotorMixer {
    specs: Vec<MotorSpec>,
    mode: MixMode,
    runtime: Vec<MotorRuntime>,
    propellers: Vec<PropellerAnimator>,
}

impl MotorMixer {
    pub fn new(specs: Vec<MotorSpec>, mode: MixMode) -> Result<Self, ConfigError> {
        Self::with_propellers(specs, mode, &PropellerConfig::default())
    }

    pub fn with_propellers(
        specs: Vec<MotorSpec>,
        mode: MixMode,
        propeller: &PropellerConfig,
    ) -> Result<Self, ConfigError> {
        if specs.is_empty() {
            return Err(ConfigError::MissingMotors);
        }
        for spec in &specs {
            spec.validate()?;
        }
        let propellers = specs
            .iter()
            .map(|_| PropellerAnimator::new(propeller))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            runtime: vec![MotorRuntime::default(); specs.len()],
            specs,
            mode,
            propellers,
        })
    }

    #[inline]
    pub fn motor_count(&self) -> usize {
        self.specs.len()
    }

    #[inline]
    pub fn specs(&self) -> &[MotorSpec] {
        &self.specs
    }

    #[inline]
    pub fn mode(&self) -> MixMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: MixMode) {
        self.mode = mode;
    }

    /// Latest per-motor output.
    #[inline]
    pub fn runtime(&self) -> &[MotorRuntime] {
        &self.runtime
    }

    #[inline]
    pub fn propellers(&self) -> &[PropellerAnimator] {
        &self.propellers
    }

    #[inline]
    pub fn propellers_mut(&mut self) -> &mut [PropellerAnimator] {
        &mut self.propellers
    }

    /// Compute lift and reaction torque for every motor.
    pub fn mix(&mut self, inputs: &ControlInputs) -> &[MotorRuntime] {
        for (spec, out) in self.specs.iter().zip(self.runtime.iter_mut()) {
            let lift = mix_motor(spec, inputs, self.mode);
            out.lift_force = lift;
            out.torque = lift * spec.torque_factor;
        }
        &self.runtime
    }

    /// Advance propeller spin from the latest lift forces.
    pub fn advance_propellers(&mut self, dt: f32) -> Result<(), ControlError> {
        check_timestep(dt)?;
        for ((spec, prop), out) in self
            .specs
            .iter()
            .zip(self.propellers.iter_mut())
            .zip(self.runtime.iter_mut())
        {
            out.propeller_angle_delta = prop.advance(out.lift_force, spec.yaw_factor, dt);
            out.propeller_speed = prop.speed();
        }
        Ok(())
    }

    /// Sum of lift over all motors.
    pub fn total_lift(&self) -> f32 {
        self.runtime.iter().map(|m| m.lift_force).sum()
    }

    /// Zero outputs and stop propellers.
    pub fn reset(&mut self) {
        self.runtime.iter_mut().for_each(|m| *m = MotorRuntime::default());
        self.propellers.iter_mut().for_each(PropellerAnimator::reset);
    }
}
