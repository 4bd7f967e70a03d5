//! Propeller spin derived from motor lift, for animation and telemetry.
//!
//! Thrust grows with the square of rotor speed and the fourth power of radius
//! (F ∝ ω²R⁴), so speed is back-derived as:
//!
//! ω = sign(F) * spin * sqrt(|F|) * speed_factor,   speed_factor = animation_speed / R²
//!
//! Below `stop_threshold` the rotor spins down by linear interpolation
//! toward zero instead of snapping to rest. Not used by the control loop.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_ANIMATION_SPEED, DEFAULT_SPIN_DOWN_RATE, DEFAULT_STOP_THRESHOLD,
    FALLBACK_PROPELLER_RADIUS,
};
use crate::error::{check_finite, check_non_negative, ConfigError};
use crate::types::PositiveScalar;

/// Static propeller animation settings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PropellerConfig {
    /// Radius from the propeller geometry; `None` falls back to 1.0.
    pub radius: Option<f32>,
    pub animation_speed: f32,
    /// Lift below which the rotor spins down.
    pub stop_threshold: f32,
    /// Fraction of remaining speed shed per second while spinning down.
    pub spin_down_rate: f32,
}

impl Default for PropellerConfig {
    fn default() -> Self {
        Self {
            radius: None,
            animation_speed: DEFAULT_ANIMATION_SPEED,
            stop_threshold: DEFAULT_STOP_THRESHOLD,
            spin_down_rate: DEFAULT_SPIN_DOWN_RATE,
        }
    }
}

impl PropellerConfig {
    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = Some(radius);
        self
    }

    pub fn with_animation_speed(mut self, speed: f32) -> Self {
        self.animation_speed = speed;
        self
    }

    pub fn with_stop_threshold(mut self, threshold: f32) -> Self {
        self.stop_threshold = threshold;
        self
    }

    pub fn with_spin_down_rate(mut self, rate: f32) -> Self {
        self.spin_down_rate = rate;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(radius) = self.radius {
            validate_radius(radius)?;
        }
        check_non_negative("propeller.animation_speed", self.animation_speed)?;
        check_non_negative("propeller.stop_threshold", self.stop_threshold)?;
        check_non_negative("propeller.spin_down_rate", self.spin_down_rate)?;
        Ok(())
    }
}

fn validate_radius(radius: f32) -> Result<PositiveScalar, ConfigError> {
    check_finite("propeller.radius", radius)?;
    PositiveScalar::new(radius).ok_or(ConfigError::NonPositive {
        field: "propeller.radius",
        value: radius,
    })
}

/// Per-motor propeller spin state.
#[derive(Clone, Debug)]
pub struct PropellerAnimator {
    radius: PositiveScalar,
    animation_speed: f32,
    stop_threshold: f32,
    spin_down_rate: f32,
    speed_factor: f32,
    /// Signed angular speed (deg/s).
    speed: f32,
    /// Accumulated angle in [0, 360).
    angle: f32,
}

impl PropellerAnimator {
    pub fn new(config: &PropellerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let radius = match config.radius {
            Some(r) => validate_radius(r)?,
            None => validate_radius(FALLBACK_PROPELLER_RADIUS)?,
        };
        let mut animator = Self {
            radius,
            animation_speed: config.animation_speed,
            stop_threshold: config.stop_threshold,
            spin_down_rate: config.spin_down_rate,
            speed_factor: 0.0,
            speed: 0.0,
            angle: 0.0,
        };
        animator.recompute_speed_factor();
        Ok(animator)
    }

    fn recompute_speed_factor(&mut self) {
        let r = self.radius.value();
        self.speed_factor = self.animation_speed / (r * r);
    }

    pub fn set_radius(&mut self, radius: f32) -> Result<(), ConfigError> {
        self.radius = validate_radius(radius)?;
        self.recompute_speed_factor();
        Ok(())
    }

    pub fn set_animation_speed(&mut self, speed: f32) -> Result<(), ConfigError> {
        check_non_negative("propeller.animation_speed", speed)?;
        self.animation_speed = speed;
        self.recompute_speed_factor();
        Ok(())
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius.value()
    }

    #[inline]
    pub fn speed_factor(&self) -> f32 {
        self.speed_factor
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    #[inline]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Advance by one tick and return the angle increment (degrees).
    ///
    /// `spin` is the motor's yaw factor (rotation sense). The caller
    /// guarantees `dt > 0`.
    pub fn advance(&mut self, lift_force: f32, spin: i8, dt: f32) -> f32 {
        if lift_force.abs() < self.stop_threshold {
            let t = (self.spin_down_rate * dt).clamp(0.0, 1.0);
            self.speed += (0.0 - self.speed) * t;
        } else {
            self.speed =
                lift_force.signum() * spin as f32 * lift_force.abs().sqrt() * self.speed_factor;
        }

        let delta = self.speed * dt;
        // rem_euclid rounds tiny negative sums up to exactly 360.
        let angle = (self.angle + delta).rem_euclid(360.0);
        self.angle = if angle >= 360.0 { 0.0 } else { angle };
        delta
    }

    /// Stop instantly (re-arm).
    pub fn reset(&mut self) {
        self.speed = 0.0;
        self.angle = 0.0;
    }
}
