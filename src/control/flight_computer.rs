//! Four-axis PID bank feeding the motor mixer.
//!
//! Each tick: attitude and altitude errors from the vehicle state go through
//! one controller per axis, the altitude correction rides on top of the hover
//! throttle, and the four demands are mixed into per-motor lift.

use super::mixer::{ControlInputs, MotorMixer, MotorRuntime};
use super::pid::PidTerms;
use super::{AxisController, Controller};
use crate::config::ControlConfig;
use crate::error::{check_timestep, ConfigError, ControlError};
use crate::kinematics::VehicleState;

/// Controlled axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    Pitch,
    Roll,
    Yaw,
    Altitude,
}

impl Axis {
    pub const ALL: [Axis; 4] = [Axis::Pitch, Axis::Roll, Axis::Yaw, Axis::Altitude];
}

/// Targets for one tick. Angles in degrees, altitude in metres.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AttitudeSetpoint {
    pub pitch: f32,
    pub roll: f32,
    /// Absolute heading; the error is wrapped into [-180, 180).
    pub yaw: f32,
    pub altitude: f32,
}

impl AttitudeSetpoint {
    /// Level hover holding the vehicle's current heading and altitude.
    pub fn hold(state: &VehicleState) -> Self {
        Self {
            pitch: 0.0,
            roll: 0.0,
            yaw: state.attitude_degrees()[2],
            altitude: state.altitude(),
        }
    }
}

/// Wrap an angle in degrees into [-180, 180).
#[inline]
pub fn wrap_degrees(angle: f32) -> f32 {
    (angle + 180.0).rem_euclid(360.0) - 180.0
}

#[derive(Clone, Debug)]
pub struct FlightComputer {
    pitch: AxisController,
    roll: AxisController,
    yaw: AxisController,
    altitude: AxisController,
    mixer: MotorMixer,
    hover_throttle: f32,
    last_inputs: ControlInputs,
}

impl FlightComputer {
    pub fn new(config: &ControlConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            pitch: AxisController::build(config.controller, config.pitch)?,
            roll: AxisController::build(config.controller, config.roll)?,
            yaw: AxisController::build(config.controller, config.yaw)?,
            altitude: AxisController::build(config.controller, config.altitude)?,
            mixer: MotorMixer::with_propellers(
                config.motors.clone(),
                config.mix_mode,
                &config.propeller,
            )?,
            hover_throttle: config.hover_throttle,
            last_inputs: ControlInputs::default(),
        })
    }

    /// Run all four loops and mix the result.
    ///
    /// `dt` is checked before any controller is touched, so a rejected tick
    /// leaves every axis unchanged.
    pub fn compute(
        &mut self,
        setpoint: &AttitudeSetpoint,
        state: &VehicleState,
        dt: f32,
    ) -> Result<&[MotorRuntime], ControlError> {
        check_timestep(dt)?;

        let [roll, pitch, yaw] = state.attitude_degrees();
        let yaw_target = yaw + wrap_degrees(setpoint.yaw - yaw);

        let pitch_out = self.pitch.calc(setpoint.pitch, pitch, dt)?;
        let roll_out = self.roll.calc(setpoint.roll, roll, dt)?;
        let yaw_out = self.yaw.calc(yaw_target, yaw, dt)?;
        let altitude_out = self.altitude.calc(setpoint.altitude, state.altitude(), dt)?;

        // Positive pitch is nose-down in the Z-up frame; front motors
        // (pitch_factor > 0) lift the nose, so the demand is negated.
        self.last_inputs = ControlInputs {
            throttle: self.hover_throttle + altitude_out,
            pitch: -pitch_out,
            yaw: yaw_out,
            roll: roll_out,
        };

        self.mixer.mix(&self.last_inputs);
        self.mixer.advance_propellers(dt)?;
        Ok(self.mixer.runtime())
    }

    pub fn controller(&self, axis: Axis) -> &AxisController {
        match axis {
            Axis::Pitch => &self.pitch,
            Axis::Roll => &self.roll,
            Axis::Yaw => &self.yaw,
            Axis::Altitude => &self.altitude,
        }
    }

    pub fn controller_mut(&mut self, axis: Axis) -> &mut AxisController {
        match axis {
            Axis::Pitch => &mut self.pitch,
            Axis::Roll => &mut self.roll,
            Axis::Yaw => &mut self.yaw,
            Axis::Altitude => &mut self.altitude,
        }
    }

    #[inline]
    pub fn terms(&self, axis: Axis) -> PidTerms {
        self.controller(axis).terms()
    }

    /// Sum of absolute PID outputs over all axes.
    pub fn aggregate_output(&self) -> f32 {
        Axis::ALL.iter().map(|&a| self.terms(a).output.abs()).sum()
    }

    #[inline]
    pub fn last_inputs(&self) -> ControlInputs {
        self.last_inputs
    }

    #[inline]
    pub fn mixer(&self) -> &MotorMixer {
        &self.mixer
    }

    #[inline]
    pub fn mixer_mut(&mut self) -> &mut MotorMixer {
        &mut self.mixer
    }

    #[inline]
    pub fn hover_throttle(&self) -> f32 {
        self.hover_throttle
    }

    pub fn set_hover_throttle(&mut self, throttle: f32) {
        self.hover_throttle = throttle;
    }

    /// Re-arm: clear every controller and stop the motors.
    pub fn reset(&mut self) {
        for axis in Axis::ALL {
            self.controller_mut(axis).reset();
        }
        self.mixer.reset();
        self.last_inputs = ControlInputs::default();
    }
}
