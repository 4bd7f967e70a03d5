//! Property-based tests for the flight core invariants.

use proptest::prelude::*;

use crate::config::WindConfig;
use crate::control::flight_computer::wrap_degrees;
use crate::control::{
    mix_motor, ControlInputs, Controller, IntegralClamp, MixMode, MotorSpec, PidController,
    PidParameters,
};
use crate::kinematics::Pose;
use crate::navigation::{Waypoint, WaypointNavigator, WaypointPath};
use crate::random::Gaussian;
use crate::types::{UnitQuaternion, Vec3};
use crate::wind::WindGenerator;

/// Ordered `(min, max)` pair.
fn bounds(limit: f32) -> impl Strategy<Value = (f32, f32)> {
    (-limit..limit, -limit..limit).prop_map(|(a, b)| if a <= b { (a, b) } else { (b, a) })
}

fn gain() -> impl Strategy<Value = f32> {
    -10.0f32..10.0
}

fn sample() -> impl Strategy<Value = (f32, f32, f32)> {
    (-100.0f32..100.0, -100.0f32..100.0, 0.001f32..0.1)
}

fn factor() -> impl Strategy<Value = i8> {
    -1i8..=1
}

proptest! {
    /// Property: output and accumulator never leave their configured ranges.
    #[test]
    fn test_pid_stays_within_bounds(
        p in gain(),
        i in gain(),
        d in gain(),
        (min_out, max_out) in bounds(50.0),
        (min_int, max_int) in bounds(20.0),
        samples in prop::collection::vec(sample(), 1..100),
    ) {
        let params = PidParameters::new(p, i, d)
            .with_output_limits(min_out, max_out)
            .with_integral_limits(min_int, max_int);
        let mut pid = PidController::new(params).unwrap();

        for (target, actual, dt) in samples {
            let out = pid.calc(target, actual, dt).unwrap();
            prop_assert!(out >= min_out && out <= max_out, "output {} outside [{}, {}]", out, min_out, max_out);
            prop_assert!(
                pid.integral() >= min_int && pid.integral() <= max_int,
                "integral {} outside [{}, {}]", pid.integral(), min_int, max_int
            );
        }
    }

    /// Property: term clamping bounds the integral contribution instead.
    #[test]
    fn test_pid_term_clamp_bounds_contribution(
        i in gain(),
        (min_int, max_int) in bounds(20.0),
        samples in prop::collection::vec(sample(), 1..100),
    ) {
        let params = PidParameters::new(0.0, i, 0.0)
            .with_integral_limits(min_int, max_int)
            .with_integral_clamp(IntegralClamp::Term);
        let mut pid = PidController::new(params).unwrap();

        for (target, actual, dt) in samples {
            pid.calc(target, actual, dt).unwrap();
            let term = pid.terms().i;
            prop_assert!(term >= min_int && term <= max_int);
        }
    }

    /// Property: equal target and actual produce zero output forever.
    #[test]
    fn test_pid_equilibrium_is_zero(
        p in gain(),
        i in gain(),
        d in gain(),
        value in -100.0f32..100.0,
        steps in 1usize..200,
    ) {
        let mut pid = PidController::new(PidParameters::new(p, i, d)).unwrap();
        for _ in 0..steps {
            prop_assert_eq!(pid.calc(value, value, 0.02).unwrap(), 0.0);
        }
    }

    /// Property: clamped mixing never produces negative lift.
    #[test]
    fn test_clamped_mix_is_non_negative(
        pf in factor(),
        yf in factor(),
        rf in factor(),
        throttle in -10.0f32..10.0,
        pitch in -10.0f32..10.0,
        yaw in -10.0f32..10.0,
        roll in -10.0f32..10.0,
    ) {
        let spec = MotorSpec::new(pf, yf, rf, 0.05).unwrap();
        let inputs = ControlInputs::new(throttle, pitch, yaw, roll);
        let clamped = mix_motor(&spec, &inputs, MixMode::Clamped);
        let raw = mix_motor(&spec, &inputs, MixMode::Raw);
        prop_assert!(clamped >= 0.0);
        prop_assert_eq!(clamped, raw.max(0.0));
    }

    /// Property: wind strength is non-negative and heading stays unit for any seed.
    #[test]
    fn test_wind_invariants_hold_for_any_seed(
        seed in any::<u64>(),
        noise in 0.0f32..25.0,
        dt in 0.005f32..0.1,
    ) {
        let config = WindConfig::default()
            .with_pulse_period(Gaussian::constant(0.3).with_variance(0.2))
            .with_strength_noise(Gaussian::constant(0.0).with_variance(noise));
        let mut wind = WindGenerator::seeded(config, seed).unwrap();

        for _ in 0..300 {
            let force = wind.tick(dt).unwrap();
            prop_assert!(wind.current_strength() >= 0.0);
            prop_assert!((wind.direction().norm_squared() - 1.0).abs() < 1e-4);
            prop_assert!(force.as_array().iter().all(|c| c.is_finite()));
        }
    }

    /// Property: wrapped angles land in [-180, 180].
    #[test]
    fn test_wrap_degrees_range(angle in -10_000.0f32..10_000.0) {
        let wrapped = wrap_degrees(angle);
        prop_assert!((-180.0..=180.0).contains(&wrapped));
    }

    /// Property: normalized headings land in [-1, 1].
    #[test]
    fn test_normalized_heading_range(
        x in -100.0f32..100.0,
        y in -100.0f32..100.0,
        z in -100.0f32..100.0,
        yaw in -180.0f32..180.0,
    ) {
        let path = WaypointPath::new(vec![Waypoint::new("t", Vec3::new(x, y, z), 0.001).unwrap()]);
        let mut nav = WaypointNavigator::new(path, false);
        nav.update(Pose::new(Vec3::new(0.5, -0.5, 0.0), UnitQuaternion::from_yaw_degrees(yaw)));

        if let Some(heading) = nav.heading_to_current() {
            let n = heading.normalized();
            prop_assert!(n.yaw.abs() <= 1.0 && n.pitch.abs() <= 1.0);
        }
    }
}
