//! Force mixing, propeller spin and the four-axis flight computer.

use crate::config::ControlConfig;
use crate::constants::DEFAULT_HOVER_THROTTLE;
use crate::control::{
    mix_motor, AttitudeSetpoint, Axis, ControlInputs, Controller, FlightComputer, MixMode,
    MotorMixer, MotorSpec, PropellerConfig,
};
use crate::kinematics::VehicleState;
use crate::types::{UnitQuaternion, Vec3};

fn quad(mode: MixMode) -> MotorMixer {
    MotorMixer::new(MotorSpec::quad_x(0.1).to_vec(), mode).unwrap()
}

// ============================================================================
// Mixing
// ============================================================================

#[test]
fn should_add_pitch_demand_to_throttle() {
    let spec = MotorSpec::new(1, 0, 0, 0.0).unwrap();
    let inputs = ControlInputs::new(5.0, 2.0, 0.0, 0.0);
    assert_eq!(mix_motor(&spec, &inputs, MixMode::Clamped), 7.0);
    assert_eq!(mix_motor(&spec, &inputs, MixMode::Raw), 7.0);
}

#[test]
fn should_floor_negative_sums_when_clamped() {
    let spec = MotorSpec::new(-1, 0, 0, 0.0).unwrap();
    let inputs = ControlInputs::new(1.0, 3.0, 0.0, 0.0);
    assert_eq!(mix_motor(&spec, &inputs, MixMode::Clamped), 0.0);
    assert_eq!(mix_motor(&spec, &inputs, MixMode::Raw), -2.0);
}

#[test]
fn should_split_demands_across_quad_x() {
    let mut mixer = quad(MixMode::Raw);
    let lifts: Vec<f32> = mixer
        .mix(&ControlInputs::new(2.0, 0.5, 0.0, 0.0))
        .iter()
        .map(|m| m.lift_force)
        .collect();
    // Front motors rise, rear motors drop.
    assert_eq!(lifts, vec![2.5, 2.5, 1.5, 1.5]);

    let lifts: Vec<f32> = mixer
        .mix(&ControlInputs::new(2.0, 0.0, 0.0, 0.5))
        .iter()
        .map(|m| m.lift_force)
        .collect();
    // Left motors rise.
    assert_eq!(lifts, vec![2.5, 1.5, 2.5, 1.5]);

    let lifts: Vec<f32> = mixer
        .mix(&ControlInputs::new(2.0, 0.0, 0.5, 0.0))
        .iter()
        .map(|m| m.lift_force)
        .collect();
    // Front-left and rear-right rise.
    assert_eq!(lifts, vec![2.5, 1.5, 1.5, 2.5]);
}

#[test]
fn should_preserve_total_lift_in_raw_mode() {
    let mut mixer = quad(MixMode::Raw);
    mixer.mix(&ControlInputs::new(3.0, 0.7, -0.4, 1.1));
    assert!((mixer.total_lift() - 12.0).abs() < 1e-5);
}

#[test]
fn should_derive_torque_from_lift() {
    let mut mixer = quad(MixMode::Clamped);
    for motor in mixer.mix(&ControlInputs::throttle_only(4.0)) {
        assert_eq!(motor.lift_force, 4.0);
        assert!((motor.torque - 0.4).abs() < 1e-6);
    }
}

#[test]
fn should_switch_mix_mode_at_runtime() {
    let mut mixer = quad(MixMode::Clamped);
    let inputs = ControlInputs::new(0.0, -1.0, 0.0, 0.0);
    assert!(mixer.mix(&inputs).iter().all(|m| m.lift_force >= 0.0));

    mixer.set_mode(MixMode::Raw);
    assert!(mixer.mix(&inputs).iter().any(|m| m.lift_force < 0.0));
}

// ============================================================================
// Propellers
// ============================================================================

#[test]
fn should_spin_propellers_in_yaw_sense() {
    let config = PropellerConfig::default().with_animation_speed(10.0);
    let mut mixer =
        MotorMixer::with_propellers(MotorSpec::quad_x(0.1).to_vec(), MixMode::Clamped, &config)
            .unwrap();
    mixer.mix(&ControlInputs::throttle_only(4.0));
    mixer.advance_propellers(0.1).unwrap();

    let speeds: Vec<f32> = mixer.runtime().iter().map(|m| m.propeller_speed).collect();
    assert_eq!(speeds, vec![20.0, -20.0, -20.0, 20.0]);
    assert!((mixer.runtime()[0].propeller_angle_delta - 2.0).abs() < 1e-6);
}

#[test]
fn should_spin_down_when_throttle_cut() {
    let mut mixer = quad(MixMode::Clamped);
    mixer.mix(&ControlInputs::throttle_only(4.0));
    mixer.advance_propellers(0.02).unwrap();
    let spinning = mixer.runtime()[0].propeller_speed;

    mixer.mix(&ControlInputs::throttle_only(0.0));
    mixer.advance_propellers(0.02).unwrap();
    let slowing = mixer.runtime()[0].propeller_speed;
    assert!(slowing > 0.0 && slowing < spinning);
}

#[test]
fn should_reject_invalid_propeller_timestep() {
    let mut mixer = quad(MixMode::Clamped);
    assert!(mixer.advance_propellers(0.0).is_err());
}

// ============================================================================
// Flight computer
// ============================================================================

fn hovering_state() -> VehicleState {
    VehicleState::at_rest(Vec3::new(0.0, 0.0, 10.0))
}

#[test]
fn should_output_hover_trim_at_setpoint() {
    let mut fc = FlightComputer::new(&ControlConfig::default()).unwrap();
    let state = hovering_state();
    let setpoint = AttitudeSetpoint::hold(&state);

    let motors = fc.compute(&setpoint, &state, 0.02).unwrap();
    for motor in motors {
        assert_eq!(motor.lift_force, DEFAULT_HOVER_THROTTLE);
    }
    assert_eq!(fc.aggregate_output(), 0.0);
}

#[test]
fn should_raise_throttle_below_target_altitude() {
    let mut fc = FlightComputer::new(&ControlConfig::default()).unwrap();
    let state = hovering_state();
    let setpoint = AttitudeSetpoint {
        altitude: 12.0,
        ..AttitudeSetpoint::hold(&state)
    };
    fc.compute(&setpoint, &state, 0.02).unwrap();

    assert!(fc.terms(Axis::Altitude).output > 0.0);
    assert!(fc.mixer().total_lift() > 4.0 * DEFAULT_HOVER_THROTTLE);
}

#[test]
fn should_drop_front_motors_for_nose_down_demand() {
    let mut fc = FlightComputer::new(&ControlConfig::default()).unwrap();
    let state = hovering_state();
    let setpoint = AttitudeSetpoint {
        pitch: 10.0,
        ..AttitudeSetpoint::hold(&state)
    };
    let motors = fc.compute(&setpoint, &state, 0.02).unwrap();
    assert!(motors[0].lift_force < motors[2].lift_force);
    assert!(motors[1].lift_force < motors[3].lift_force);
}

#[test]
fn should_take_short_way_around_for_yaw() {
    let mut fc = FlightComputer::new(&ControlConfig::default()).unwrap();
    let state = hovering_state().with_orientation(UnitQuaternion::from_yaw_degrees(170.0));
    let setpoint = AttitudeSetpoint {
        yaw: -170.0,
        ..AttitudeSetpoint::hold(&state)
    };
    fc.compute(&setpoint, &state, 0.02).unwrap();
    assert!((fc.terms(Axis::Yaw).error - 20.0).abs() < 1e-2);
}

#[test]
fn should_reject_bad_timestep_before_touching_axes() {
    let mut fc = FlightComputer::new(&ControlConfig::default()).unwrap();
    let state = hovering_state();
    let setpoint = AttitudeSetpoint {
        altitude: 20.0,
        ..AttitudeSetpoint::hold(&state)
    };
    assert!(fc.compute(&setpoint, &state, -0.02).is_err());
    for axis in Axis::ALL {
        assert_eq!(fc.terms(axis).error, 0.0);
    }
    assert!(fc.mixer().runtime().iter().all(|m| m.lift_force == 0.0));
}

#[test]
fn should_rearm_on_reset() {
    let mut fc = FlightComputer::new(&ControlConfig::default()).unwrap();
    let state = hovering_state();
    let setpoint = AttitudeSetpoint {
        altitude: 15.0,
        ..AttitudeSetpoint::hold(&state)
    };
    for _ in 0..10 {
        fc.compute(&setpoint, &state, 0.02).unwrap();
    }
    fc.reset();
    assert_eq!(fc.mixer().total_lift(), 0.0);
    assert_eq!(fc.last_inputs(), ControlInputs::default());
    assert_eq!(fc.controller(Axis::Altitude).terms().output, 0.0);
}
