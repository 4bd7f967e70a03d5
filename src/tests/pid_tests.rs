//! PID controller behavior.
//!
//! These tests verify:
//! - Zero output at equilibrium
//! - Derivative-kick suppression on the first sample
//! - Integral pre-clamping (anti-windup) and re-parameterization
//! - Error versus measurement derivative strategies
//! - Timestep validation

use crate::control::{
    AxisController, Controller, ControllerKind, DerivativeSource, InstrumentedPid, IntegralClamp,
    PidController, PidParameters,
};
use crate::error::ControlError;

fn full_gains() -> PidParameters {
    PidParameters::new(1.2, 0.4, 0.3)
        .with_output_limits(-10.0, 10.0)
        .with_integral_limits(-5.0, 5.0)
}

// ============================================================================
// Equilibrium and first sample
// ============================================================================

#[test]
fn should_output_zero_when_target_equals_actual() {
    let mut pid = PidController::new(full_gains()).unwrap();
    for _ in 0..100 {
        let out = pid.calc(5.0, 5.0, 0.02).unwrap();
        assert_eq!(out, 0.0);
    }
    assert_eq!(pid.integral(), 0.0);
}

#[test]
fn should_force_zero_derivative_on_first_call() {
    let mut pid = PidController::new(PidParameters::new(0.0, 0.0, 1.0)).unwrap();
    assert!(!pid.has_prior_sample());

    let terms = pid.step(10.0, 0.0, 0.1).unwrap();
    assert_eq!(terms.derivative, 0.0);
    assert_eq!(terms.output, 0.0);
    assert!(pid.has_prior_sample());

    let terms = pid.step(10.0, 5.0, 0.1).unwrap();
    assert!((terms.derivative + 50.0).abs() < 1e-3);
}

#[test]
fn should_force_zero_derivative_after_reset() {
    let mut pid = PidController::new(PidParameters::new(0.0, 1.0, 1.0)).unwrap();
    pid.calc(0.0, 0.0, 0.1).unwrap();
    pid.calc(10.0, 0.0, 0.1).unwrap();
    assert!(pid.terms().derivative.abs() > 1.0);

    pid.reset();
    assert_eq!(pid.integral(), 0.0);
    assert!(!pid.has_prior_sample());

    let terms = pid.step(10.0, 0.0, 0.1).unwrap();
    assert_eq!(terms.derivative, 0.0);
}

#[test]
fn should_keep_parameters_across_reset() {
    let params = full_gains();
    let mut pid = PidController::new(params).unwrap();
    pid.calc(3.0, 1.0, 0.02).unwrap();
    pid.reset();
    assert_eq!(*pid.parameters(), params);
}

// ============================================================================
// Integral handling
// ============================================================================

#[test]
fn should_unwind_immediately_with_pre_clamped_integral() {
    let params = PidParameters::new(0.0, 1.0, 0.0).with_integral_limits(-1.0, 1.0);
    let mut pid = PidController::new(params).unwrap();

    for _ in 0..100 {
        pid.calc(1.0, 0.0, 0.1).unwrap();
    }
    assert_eq!(pid.integral(), 1.0);

    // A windup-free accumulator starts shrinking on the first reversed error.
    pid.calc(-1.0, 0.0, 0.1).unwrap();
    assert!((pid.integral() - 0.9).abs() < 1e-6);
}

#[test]
fn should_clamp_accumulator_after_narrowing_bounds() {
    let mut pid = PidController::new(PidParameters::new(0.0, 1.0, 0.0)).unwrap();
    pid.calc(1.0, 0.0, 0.5).unwrap();
    assert!((pid.integral() - 0.5).abs() < 1e-6);

    pid.set_parameters(PidParameters::new(0.0, 1.0, 0.0).with_integral_limits(-0.2, 0.2))
        .unwrap();
    assert!((pid.integral() - 0.5).abs() < 1e-6);

    pid.calc(0.0, 0.0, 0.1).unwrap();
    assert_eq!(pid.integral(), 0.2);
}

#[test]
fn should_leave_accumulator_unbounded_in_term_mode() {
    let params = PidParameters::new(0.0, 1.0, 0.0)
        .with_integral_limits(-0.5, 0.5)
        .with_integral_clamp(IntegralClamp::Term);
    let mut pid = PidController::new(params).unwrap();
    for _ in 0..20 {
        pid.calc(1.0, 0.0, 0.1).unwrap();
    }
    assert!((pid.integral() - 2.0).abs() < 1e-5);
    assert_eq!(pid.terms().i, 0.5);
}

// ============================================================================
// Derivative strategies
// ============================================================================

#[test]
fn should_spike_error_derivative_on_setpoint_jump() {
    let mut pid = PidController::new(PidParameters::new(0.0, 0.0, 1.0)).unwrap();
    pid.calc(0.0, 0.0, 0.1).unwrap();
    let terms = pid.step(100.0, 0.0, 0.1).unwrap();
    assert!((terms.derivative - 1000.0).abs() < 1e-2);
}

#[test]
fn should_ignore_setpoint_jump_with_measurement_derivative() {
    let params =
        PidParameters::new(0.0, 0.0, 1.0).with_derivative_source(DerivativeSource::Measurement);
    let mut pid = PidController::new(params).unwrap();
    pid.calc(0.0, 0.0, 0.1).unwrap();

    let terms = pid.step(100.0, 0.0, 0.1).unwrap();
    assert_eq!(terms.derivative, 0.0);

    // Rising measurement damps the output.
    let terms = pid.step(100.0, 2.0, 0.1).unwrap();
    assert!((terms.derivative + 20.0).abs() < 1e-3);
}

#[test]
fn should_build_value_derivative_controller_from_kind() {
    let mut axis =
        AxisController::build(ControllerKind::ValueDerivative, PidParameters::new(0.0, 0.0, 1.0))
            .unwrap();
    axis.calc(0.0, 0.0, 0.1).unwrap();
    axis.calc(50.0, 0.0, 0.1).unwrap();
    assert_eq!(axis.terms().derivative, 0.0);
}

#[test]
fn should_keep_value_derivative_after_set_parameters() {
    let mut axis =
        AxisController::build(ControllerKind::ValueDerivative, PidParameters::new(0.0, 0.0, 1.0))
            .unwrap();
    axis.calc(0.0, 0.0, 0.1).unwrap();

    // Fresh gains default to error derivative; the axis must not adopt it.
    axis.set_parameters(PidParameters::new(0.0, 0.0, 2.0)).unwrap();
    assert_eq!(axis.parameters().derivative_source, DerivativeSource::Measurement);
    assert_eq!(axis.parameters().d, 2.0);

    // A setpoint jump leaves the measurement derivative untouched.
    assert_eq!(axis.calc(10.0, 0.0, 0.1).unwrap(), 0.0);
}

// ============================================================================
// Output bounds and timestep
// ============================================================================

#[test]
fn should_clamp_output_to_limits() {
    let params = PidParameters::new(10.0, 0.0, 0.0).with_output_limits(-1.0, 1.0);
    let mut pid = PidController::new(params).unwrap();
    assert_eq!(pid.calc(5.0, 0.0, 0.02).unwrap(), 1.0);
    assert_eq!(pid.calc(-5.0, 0.0, 0.02).unwrap(), -1.0);
    assert!((pid.calc(0.05, 0.0, 0.02).unwrap() - 0.5).abs() < 1e-6);
}

#[test]
fn should_reject_non_positive_timestep() {
    let mut pid = PidController::new(full_gains()).unwrap();
    pid.calc(1.0, 0.0, 0.02).unwrap();
    let before = pid.terms();
    let integral = pid.integral();

    assert_eq!(
        pid.calc(2.0, 0.0, 0.0),
        Err(ControlError::InvalidTimestep { dt: 0.0 })
    );
    assert!(pid.calc(2.0, 0.0, f32::INFINITY).is_err());

    assert_eq!(pid.terms(), before);
    assert_eq!(pid.integral(), integral);
}

#[test]
fn should_record_history_without_changing_math() {
    let mut plain = PidController::new(full_gains()).unwrap();
    let mut recorded = InstrumentedPid::new(full_gains(), 3).unwrap();

    for k in 0..10 {
        let target = k as f32 * 0.5;
        let a = plain.calc(target, 1.0, 0.05).unwrap();
        let b = recorded.calc(target, 1.0, 0.05).unwrap();
        assert_eq!(a, b);
    }
    assert_eq!(recorded.len(), 3);
    assert_eq!(recorded.latest().map(|t| t.output), Some(plain.terms().output));

    // Reset clears the controller but keeps the plot window.
    recorded.reset();
    assert_eq!(recorded.len(), 3);
    assert!(!recorded.controller().has_prior_sample());
}
