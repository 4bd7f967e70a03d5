//! Closed-loop control: PID strategies, force mixing and the per-tick flight computer.
//!
//! Controller variants are composed, not inherited: every axis holds an
//! `AxisController`, chosen at configuration time from a `ControllerKind`.

pub mod flight_computer;
pub mod instrumented;
pub mod mixer;
pub mod pid;
pub mod propeller;

use serde::{Deserialize, Serialize};

use crate::constants::PID_HISTORY_LEN;
use crate::error::{ConfigError, ControlError};

pub use flight_computer::{AttitudeSetpoint, Axis, FlightComputer};
pub use instrumented::InstrumentedPid;
pub use mixer::{mix_motor, ControlInputs, MixMode, MotorMixer, MotorRuntime, MotorSpec};
pub use pid::{DerivativeSource, IntegralClamp, PidController, PidParameters, PidTerms};
pub use propeller::{PropellerAnimator, PropellerConfig};

/// Numeric feedback controller interface.
pub trait Controller {
    /// Compute a bounded correction from a target/actual pair.
    ///
    /// Fails with `ControlError::InvalidTimestep` if `dt <= 0`; state is left untouched.
    fn calc(&mut self, target: f32, actual: f32, dt: f32) -> Result<f32, ControlError>;

    /// Clear dynamic state (integral, previous sample). Parameters are kept.
    fn reset(&mut self);

    /// Terms of the most recent successful call.
    fn terms(&self) -> PidTerms;
}

/// Controller strategy selected at configuration time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ControllerKind {
    /// Derivative on error.
    #[default]
    Standard,
    /// Derivative on measurement; avoids kicks on setpoint changes.
    ValueDerivative,
    /// Standard math plus a rolling window of terms for plotting.
    Instrumented { history_len: usize },
}

impl ControllerKind {
    pub const fn instrumented() -> Self {
        ControllerKind::Instrumented {
            history_len: PID_HISTORY_LEN,
        }
    }
}

/// A PID strategy owned by one axis.
#[derive(Clone, Debug)]
pub enum AxisController {
    Plain(PidController),
    /// Always differentiates the measurement, whatever gains are swapped in.
    ValueDerivative(PidController),
    Instrumented(InstrumentedPid),
}

impl AxisController {
    /// Build the controller for `kind`.
    ///
    /// `ValueDerivative` overrides the derivative source of `params`; the
    /// other kinds honour it as given.
    pub fn build(kind: ControllerKind, params: PidParameters) -> Result<Self, ConfigError> {
        match kind {
            ControllerKind::Standard => Ok(AxisController::Plain(PidController::new(params)?)),
            ControllerKind::ValueDerivative => Ok(AxisController::ValueDerivative(
                PidController::new(params.with_derivative_source(DerivativeSource::Measurement))?,
            )),
            ControllerKind::Instrumented { history_len } => Ok(AxisController::Instrumented(
                InstrumentedPid::new(params, history_len)?,
            )),
        }
    }

    pub fn parameters(&self) -> &PidParameters {
        match self {
            AxisController::Plain(pid) | AxisController::ValueDerivative(pid) => pid.parameters(),
            AxisController::Instrumented(pid) => pid.controller().parameters(),
        }
    }

    /// Hot-swap gains, keeping dynamic state and the configured strategy.
    pub fn set_parameters(&mut self, params: PidParameters) -> Result<(), ConfigError> {
        match self {
            AxisController::Plain(pid) => pid.set_parameters(params),
            AxisController::ValueDerivative(pid) => {
                pid.set_parameters(params.with_derivative_source(DerivativeSource::Measurement))
            }
            AxisController::Instrumented(pid) => pid.set_parameters(params),
        }
    }

    /// Recorded history, when instrumented.
    pub fn instrumentation(&self) -> Option<&InstrumentedPid> {
        match self {
            AxisController::Plain(_) | AxisController::ValueDerivative(_) => None,
            AxisController::Instrumented(pid) => Some(pid),
        }
    }
}

impl Controller for AxisController {
    #[inline]
    fn calc(&mut self, target: f32, actual: f32, dt: f32) -> Result<f32, ControlError> {
        match self {
            AxisController::Plain(pid) | AxisController::ValueDerivative(pid) => {
                pid.calc(target, actual, dt)
            }
            AxisController::Instrumented(pid) => pid.calc(target, actual, dt),
        }
    }

    fn reset(&mut self) {
        match self {
            AxisController::Plain(pid) | AxisController::ValueDerivative(pid) => pid.reset(),
            AxisController::Instrumented(pid) => pid.reset(),
        }
    }

    #[inline]
    fn terms(&self) -> PidTerms {
        match self {
            AxisController::Plain(pid) | AxisController::ValueDerivative(pid) => pid.terms(),
            AxisController::Instrumented(pid) => pid.terms(),
        }
    }
}
