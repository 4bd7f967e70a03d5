use rand::Rng;

use super::state::{MotionMode, MotionState, PulseMode, PulseState};
use super::targets::{WindImpulse, WindTargets};
use crate::config::WindConfig;
use crate::error::{check_timestep, ConfigError, ControlError};
use crate::random::{seeded_rng, SimRng};
use crate::types::{BodyFrame, UnitQuaternion, Vec3, WorldFrame};

/// Body +X, the direction a zero-yaw wind blows toward.
const FORWARD: Vec3<BodyFrame> = Vec3::new(1.0, 0.0, 0.0);

/// Stochastic wind source owning its random stream.
///
/// Each `tick` advances the pulse machine then the motion machine and
/// recomputes `strength_scale * current_strength * direction.rotate(FORWARD)`.
#[derive(Clone, Debug)]
pub struct WindGenerator<R: Rng = SimRng> {
    config: WindConfig,
    rng: R,
    pulse: PulseState,
    motion: MotionState,
    force: Vec3<WorldFrame>,
    targets: WindTargets,
}

impl WindGenerator<SimRng> {
    /// Generator with a deterministic stream built from `seed`.
    pub fn seeded(config: WindConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::new(config, seeded_rng(seed))
    }
}

impl<R: Rng> WindGenerator<R> {
    pub fn new(config: WindConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let targets = WindTargets::with_filter(config.target_tag.clone());
        Ok(Self {
            config,
            rng,
            pulse: PulseState::default(),
            motion: MotionState::default(),
            force: Vec3::zero(),
            targets,
        })
    }

    /// Advance both machines by `dt` and return the new force.
    pub fn tick(&mut self, dt: f32) -> Result<Vec3<WorldFrame>, ControlError> {
        check_timestep(dt)?;

        self.pulse = self.pulse.step(&self.config, &mut self.rng, dt);
        self.motion = self.motion.step(&self.config, &mut self.rng, dt);

        let strength = self.config.strength_scale * self.pulse.current_strength;
        self.force = self.motion.direction.rotate(FORWARD) * strength;
        Ok(self.force)
    }

    /// Impulses for the registered bodies, using the latest force.
    pub fn impulses(&mut self) -> Vec<WindImpulse> {
        self.targets.apply(self.force)
    }

    #[inline]
    pub fn force(&self) -> Vec3<WorldFrame> {
        self.force
    }

    #[inline]
    pub fn current_strength(&self) -> f32 {
        self.pulse.current_strength
    }

    #[inline]
    pub fn direction(&self) -> UnitQuaternion {
        self.motion.direction
    }

    /// Current wind heading about +Z (degrees).
    pub fn heading_degrees(&self) -> f32 {
        self.motion.direction.to_euler_degrees()[2]
    }

    #[inline]
    pub fn pulse(&self) -> &PulseState {
        &self.pulse
    }

    #[inline]
    pub fn motion(&self) -> &MotionState {
        &self.motion
    }

    #[inline]
    pub fn pulse_mode(&self) -> PulseMode {
        self.pulse.mode()
    }

    #[inline]
    pub fn motion_mode(&self) -> MotionMode {
        self.motion.mode()
    }

    pub fn config(&self) -> &WindConfig {
        &self.config
    }

    pub fn targets(&self) -> &WindTargets {
        &self.targets
    }

    pub fn targets_mut(&mut self) -> &mut WindTargets {
        &mut self.targets
    }

    /// Restart both machines from their init states. The stream is not reseeded.
    pub fn reset(&mut self) {
        self.pulse = PulseState::default();
        self.motion = MotionState::default();
        self.force = Vec3::zero();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::Gaussian;

    #[test]
    fn test_first_tick_leaves_init_states() {
        let mut wind = WindGenerator::seeded(WindConfig::default(), 1).unwrap();
        assert_eq!(wind.pulse_mode(), PulseMode::InitPulsing);
        wind.tick(0.02).unwrap();
        assert_eq!(wind.pulse_mode(), PulseMode::Wait);
        assert_eq!(wind.motion_mode(), MotionMode::Motion);
    }

    #[test]
    fn test_rejects_bad_timestep_without_advancing() {
        let mut wind = WindGenerator::seeded(WindConfig::default(), 1).unwrap();
        assert!(wind.tick(0.0).is_err());
        assert!(wind.tick(f32::NAN).is_err());
        assert_eq!(wind.pulse_mode(), PulseMode::InitPulsing);
        assert_eq!(wind.motion_mode(), MotionMode::InitMotion);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = WindConfig::default().with_pulse_period(Gaussian {
            mean: 1.0,
            variance: -0.5,
        });
        assert!(WindGenerator::seeded(config, 0).is_err());
    }

    #[test]
    fn test_reset_returns_to_init() {
        let mut wind = WindGenerator::seeded(WindConfig::default(), 5).unwrap();
        for _ in 0..10 {
            wind.tick(0.02).unwrap();
        }
        wind.reset();
        assert_eq!(wind.pulse_mode(), PulseMode::InitPulsing);
        assert_eq!(wind.force(), Vec3::zero());
    }
}
