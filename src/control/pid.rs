//! Clamped PID controller with anti-windup and derivative-kick avoidance.
//!
//! One instance per controlled axis. The controller holds three pieces of
//! dynamic state (integral accumulator, previous sample, first-sample flag)
//! and a swappable, immutable parameter set.
//!
//! ```text
//! error      = target - actual
//! integral   = clamp(integral + error * dt, min_i, max_i)       (Accumulator)
//! derivative = 0 on first sample, else (error - last_error) / dt (Error)
//!                                   or (last_actual - actual) / dt (Measurement)
//! output     = clamp(p * error + i * integral + d * derivative, min_o, max_o)
//! ```

use serde::{Deserialize, Serialize};

use super::Controller;
use crate::error::{check_finite, check_timestep, ConfigError, ControlError};

// ============================================================================
// Parameters
// ============================================================================

/// Where anti-windup clamping is applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IntegralClamp {
    /// Clamp the accumulator itself before it is scaled (pre-clamping).
    #[default]
    Accumulator,
    /// Let the accumulator run and clamp only the scaled i-term (post-clamping).
    Term,
}

/// Signal the derivative term is computed from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DerivativeSource {
    /// Rate of change of the error. Spikes when the setpoint jumps.
    #[default]
    Error,
    /// Negative rate of change of the measured value. Immune to setpoint jumps.
    Measurement,
}

/// Gains and limits for one PID axis.
///
/// Invariant (checked by `validate`): `min_output <= max_output`,
/// `min_integral <= max_integral`, gains finite, bounds not NaN.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PidParameters {
    pub p: f32,
    pub i: f32,
    pub d: f32,
    pub min_output: f32,
    pub max_output: f32,
    pub min_integral: f32,
    pub max_integral: f32,
    #[serde(default)]
    pub integral_clamp: IntegralClamp,
    #[serde(default)]
    pub derivative_source: DerivativeSource,
}

impl Default for PidParameters {
    fn default() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }
}

impl PidParameters {
    /// Gains with unbounded output and integral.
    pub const fn new(p: f32, i: f32, d: f32) -> Self {
        Self {
            p,
            i,
            d,
            min_output: f32::NEG_INFINITY,
            max_output: f32::INFINITY,
            min_integral: f32::NEG_INFINITY,
            max_integral: f32::INFINITY,
            integral_clamp: IntegralClamp::Accumulator,
            derivative_source: DerivativeSource::Error,
        }
    }

    pub fn with_output_limits(mut self, min: f32, max: f32) -> Self {
        self.min_output = min;
        self.max_output = max;
        self
    }

    pub fn with_integral_limits(mut self, min: f32, max: f32) -> Self {
        self.min_integral = min;
        self.max_integral = max;
        self
    }

    pub fn with_integral_clamp(mut self, clamp: IntegralClamp) -> Self {
        self.integral_clamp = clamp;
        self
    }

    pub fn with_derivative_source(mut self, source: DerivativeSource) -> Self {
        self.derivative_source = source;
        self
    }

    /// Typical attitude loop: degrees of error in, torque demand out.
    pub fn attitude() -> Self {
        Self::new(0.08, 0.01, 0.02)
            .with_output_limits(-2.0, 2.0)
            .with_integral_limits(-50.0, 50.0)
            .with_derivative_source(DerivativeSource::Measurement)
    }

    /// Typical heading loop.
    pub fn heading() -> Self {
        Self::new(0.05, 0.0, 0.01)
            .with_output_limits(-1.0, 1.0)
            .with_integral_limits(-20.0, 20.0)
            .with_derivative_source(DerivativeSource::Measurement)
    }

    /// Typical altitude loop: metres of error in, throttle correction out.
    pub fn altitude() -> Self {
        Self::new(1.5, 0.3, 0.8)
            .with_output_limits(-2.0, 4.0)
            .with_integral_limits(-5.0, 5.0)
            .with_derivative_source(DerivativeSource::Measurement)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_finite("pid.p", self.p)?;
        check_finite("pid.i", self.i)?;
        check_finite("pid.d", self.d)?;

        for (field, value) in [
            ("pid.min_output", self.min_output),
            ("pid.max_output", self.max_output),
            ("pid.min_integral", self.min_integral),
            ("pid.max_integral", self.max_integral),
        ] {
            if value.is_nan() {
                return Err(ConfigError::NotFinite { field });
            }
        }

        if self.min_output > self.max_output {
            return Err(ConfigError::InvertedRange {
                field: "pid.output",
                min: self.min_output,
                max: self.max_output,
            });
        }
        if self.min_integral > self.max_integral {
            return Err(ConfigError::InvertedRange {
                field: "pid.integral",
                min: self.min_integral,
                max: self.max_integral,
            });
        }
        Ok(())
    }
}

// ============================================================================
// Terms readout
// ============================================================================

/// Intermediate values of one `calc` call, for telemetry and plotting.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PidTerms {
    pub error: f32,
    /// Proportional contribution `p * error`.
    pub p: f32,
    /// Integral contribution after clamping.
    pub i: f32,
    /// Derivative contribution `d * derivative`.
    pub d: f32,
    /// Raw derivative (before gain).
    pub derivative: f32,
    pub output: f32,
}

// ============================================================================
// Controller
// ============================================================================

/// Standard clamped PID controller.
#[derive(Clone, Debug)]
pub struct PidController {
    params: PidParameters,
    integral: f32,
    last_error: f32,
    last_actual: f32,
    has_prior_sample: bool,
    last_terms: PidTerms,
}

impl PidController {
    pub fn new(params: PidParameters) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self {
            params,
            integral: 0.0,
            last_error: 0.0,
            last_actual: 0.0,
            has_prior_sample: false,
            last_terms: PidTerms::default(),
        })
    }

    /// Swap parameters without touching the accumulator or previous sample.
    pub fn set_parameters(&mut self, params: PidParameters) -> Result<(), ConfigError> {
        params.validate()?;
        self.params = params;
        Ok(())
    }

    #[inline]
    pub fn parameters(&self) -> &PidParameters {
        &self.params
    }

    /// Current integral accumulator (unscaled).
    #[inline]
    pub fn integral(&self) -> f32 {
        self.integral
    }

    #[inline]
    pub fn has_prior_sample(&self) -> bool {
        self.has_prior_sample
    }

    /// Terms of the most recent successful `calc`.
    #[inline]
    pub fn last_terms(&self) -> PidTerms {
        self.last_terms
    }

    /// Run one control step and return the full set of terms.
    pub fn step(&mut self, target: f32, actual: f32, dt: f32) -> Result<PidTerms, ControlError> {
        check_timestep(dt)?;
        let params = &self.params;

        let error = target - actual;

        let i_term = match params.integral_clamp {
            IntegralClamp::Accumulator => {
                self.integral = (self.integral + error * dt)
                    .clamp(params.min_integral, params.max_integral);
                self.integral * params.i
            }
            IntegralClamp::Term => {
                self.integral += error * dt;
                (self.integral * params.i).clamp(params.min_integral, params.max_integral)
            }
        };

        let derivative = if self.has_prior_sample {
            match params.derivative_source {
                DerivativeSource::Error => (error - self.last_error) / dt,
                DerivativeSource::Measurement => (self.last_actual - actual) / dt,
            }
        } else {
            self.has_prior_sample = true;
            0.0
        };

        let p_term = error * params.p;
        let d_term = derivative * params.d;
        let output = (p_term + i_term + d_term).clamp(params.min_output, params.max_output);

        self.last_error = error;
        self.last_actual = actual;

        self.last_terms = PidTerms {
            error,
            p: p_term,
            i: i_term,
            d: d_term,
            derivative,
            output,
        };
        Ok(self.last_terms)
    }
}

impl Controller for PidController {
    #[inline]
    fn calc(&mut self, target: f32, actual: f32, dt: f32) -> Result<f32, ControlError> {
        self.step(target, actual, dt).map(|terms| terms.output)
    }

    fn reset(&mut self) {
        self.integral = 0.0;
        self.last_error = 0.0;
        self.last_actual = 0.0;
        self.has_prior_sample = false;
        self.last_terms = PidTerms::default();
    }

    #[inline]
    fn terms(&self) -> PidTerms {
        self.last_terms
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_validation() {
        assert!(PidParameters::attitude().validate().is_ok());
        assert!(PidParameters::new(1.0, 0.0, 0.0).validate().is_ok());

        let inverted = PidParameters::new(1.0, 0.0, 0.0).with_output_limits(1.0, -1.0);
        assert!(matches!(
            inverted.validate(),
            Err(ConfigError::InvertedRange { field: "pid.output", .. })
        ));

        let inverted_i = PidParameters::new(1.0, 0.0, 0.0).with_integral_limits(3.0, 2.0);
        assert!(matches!(
            inverted_i.validate(),
            Err(ConfigError::InvertedRange { field: "pid.integral", .. })
        ));

        let nan_gain = PidParameters::new(f32::NAN, 0.0, 0.0);
        assert!(nan_gain.validate().is_err());
    }

    #[test]
    fn test_proportional_only() {
        let mut pid = PidController::new(PidParameters::new(2.0, 0.0, 0.0)).unwrap();
        let out = pid.calc(3.0, 1.0, 0.1).unwrap();
        assert!((out - 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_rejects_invalid_dt_without_mutation() {
        let mut pid = PidController::new(PidParameters::new(1.0, 1.0, 1.0)).unwrap();
        assert!(pid.calc(1.0, 0.0, 0.0).is_err());
        assert!(pid.calc(1.0, 0.0, -0.1).is_err());
        assert!(!pid.has_prior_sample());
        assert_eq!(pid.integral(), 0.0);
    }

    #[test]
    fn test_set_parameters_keeps_integral() {
        let mut pid = PidController::new(PidParameters::new(0.0, 1.0, 0.0)).unwrap();
        pid.calc(1.0, 0.0, 0.5).unwrap();
        assert!((pid.integral() - 0.5).abs() < 1e-6);

        pid.set_parameters(PidParameters::new(0.0, 2.0, 0.0)).unwrap();
        assert!((pid.integral() - 0.5).abs() < 1e-6);
        assert!(pid.has_prior_sample());
    }

    #[test]
    fn test_set_parameters_rejects_invalid() {
        let mut pid = PidController::new(PidParameters::new(1.0, 0.0, 0.0)).unwrap();
        let bad = PidParameters::new(1.0, 0.0, 0.0).with_output_limits(5.0, 0.0);
        assert!(pid.set_parameters(bad).is_err());
        assert_eq!(pid.parameters().max_output, f32::INFINITY);
    }

    #[test]
    fn test_term_clamp_bounds_i_contribution() {
        let params = PidParameters::new(0.0, 10.0, 0.0)
            .with_integral_limits(-1.0, 1.0)
            .with_integral_clamp(IntegralClamp::Term);
        let mut pid = PidController::new(params).unwrap();

        for _ in 0..10 {
            pid.calc(1.0, 0.0, 0.1).unwrap();
        }
        // Accumulator is unbounded under term clamping; the contribution is not.
        assert!((pid.integral() - 1.0).abs() < 1e-5);
        assert!((pid.terms().i - 1.0).abs() < 1e-6);
        assert!((pid.terms().output - 1.0).abs() < 1e-6);
    }
}
