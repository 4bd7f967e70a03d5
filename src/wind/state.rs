//! Wind pulse and motion state machines.
//!
//! Each machine is a tagged phase plus a pure transition function that takes
//! the previous state by value and returns the next one. The two machines
//! never read each other's state.
//!
//! ```text
//! pulse:  InitPulsing -> Wait -> Pulsing -> InitPulsing -> ...
//! motion: InitMotion  -> Motion -> InitMotion -> ...
//! ```
//!
//! Random draws happen only on these transitions (plus one noise draw per
//! pulsing tick), in a fixed order, so a seeded stream replays exactly.

use rand::Rng;

use crate::config::WindConfig;
use crate::constants::{PULSE_SNAP_TOLERANCE, WIND_HEADING_RANGE_DEG};
use crate::random::random_uniform;
use crate::types::UnitQuaternion;

// ============================================================================
// Pulse machine (force magnitude)
// ============================================================================

/// Pulse phase with the data sampled when it was entered.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PulsePhase {
    InitPulsing,
    Wait { period: f32 },
    Pulsing { duration: f32, base_strength: f32 },
}

/// Fieldless view of `PulsePhase` for telemetry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PulseMode {
    InitPulsing,
    Wait,
    Pulsing,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PulseState {
    pub phase: PulsePhase,
    pub timer: f32,
    /// Invariant: >= 0.
    pub current_strength: f32,
}

impl Default for PulseState {
    fn default() -> Self {
        Self {
            phase: PulsePhase::InitPulsing,
            timer: 0.0,
            current_strength: 0.0,
        }
    }
}

impl PulseState {
    pub fn mode(&self) -> PulseMode {
        match self.phase {
            PulsePhase::InitPulsing => PulseMode::InitPulsing,
            PulsePhase::Wait { .. } => PulseMode::Wait,
            PulsePhase::Pulsing { .. } => PulseMode::Pulsing,
        }
    }

    /// Base strength of the active pulse, zero outside `Pulsing`.
    pub fn base_strength(&self) -> f32 {
        match self.phase {
            PulsePhase::Pulsing { base_strength, .. } => base_strength,
            _ => 0.0,
        }
    }

    /// Advance one tick.
    pub fn step<R: Rng + ?Sized>(self, config: &WindConfig, rng: &mut R, dt: f32) -> PulseState {
        match self.phase {
            PulsePhase::InitPulsing => {
                let period = config.pulse_period.sample_positive(rng);
                log::debug!("wind pulse: waiting {:.2}s", period);
                PulseState {
                    phase: PulsePhase::Wait { period },
                    timer: 0.0,
                    ..self
                }
            }
            PulsePhase::Wait { period } => {
                let timer = self.timer + dt;
                let current_strength = (self.current_strength - config.decay_rate * dt).max(0.0);

                if timer >= period {
                    let duration = config.pulse_duration.sample_positive(rng);
                    let base_strength = config.base_strength.sample_positive(rng);
                    log::debug!(
                        "wind pulse: gust {:.2} for {:.2}s",
                        base_strength,
                        duration
                    );
                    PulseState {
                        phase: PulsePhase::Pulsing {
                            duration,
                            base_strength,
                        },
                        timer: 0.0,
                        current_strength,
                    }
                } else {
                    PulseState {
                        timer,
                        current_strength,
                        ..self
                    }
                }
            }
            PulsePhase::Pulsing {
                duration,
                base_strength,
            } => {
                let timer = self.timer + dt;
                let target = (base_strength + config.strength_noise.sample(rng)).max(0.0);
                let current_strength =
                    ramp_toward(self.current_strength, target, config.ramp_rate * dt);

                if timer > duration {
                    log::debug!("wind pulse: gust over");
                    PulseState {
                        phase: PulsePhase::InitPulsing,
                        timer: 0.0,
                        current_strength,
                    }
                } else {
                    PulseState {
                        timer,
                        current_strength,
                        ..self
                    }
                }
            }
        }
    }
}

/// Move `current` toward `target` by at most `max_step`.
///
/// Snaps when already within `PULSE_SNAP_TOLERANCE` relative error of the
/// target; never passes the target.
#[inline]
pub fn ramp_toward(current: f32, target: f32, max_step: f32) -> f32 {
    let gap = target - current;
    if gap.abs() <= PULSE_SNAP_TOLERANCE * target {
        return target;
    }
    let step = max_step.max(0.0).min(gap.abs());
    current + step.copysign(gap)
}

// ============================================================================
// Motion machine (force direction)
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MotionPhase {
    InitMotion,
    Motion {
        period: f32,
        change_speed: f32,
        target: UnitQuaternion,
    },
}

/// Fieldless view of `MotionPhase` for telemetry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotionMode {
    InitMotion,
    Motion,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionState {
    pub phase: MotionPhase,
    pub timer: f32,
    /// Current wind heading. Always unit norm.
    pub direction: UnitQuaternion,
}

impl Default for MotionState {
    fn default() -> Self {
        Self {
            phase: MotionPhase::InitMotion,
            timer: 0.0,
            direction: UnitQuaternion::identity(),
        }
    }
}

impl MotionState {
    pub fn mode(&self) -> MotionMode {
        match self.phase {
            MotionPhase::InitMotion => MotionMode::InitMotion,
            MotionPhase::Motion { .. } => MotionMode::Motion,
        }
    }

    /// Advance one tick.
    pub fn step<R: Rng + ?Sized>(self, config: &WindConfig, rng: &mut R, dt: f32) -> MotionState {
        match self.phase {
            MotionPhase::InitMotion => {
                let period = config.motion_period.sample_positive(rng);
                let change_speed = config.change_speed.sample_positive(rng);
                let heading =
                    random_uniform(rng, -WIND_HEADING_RANGE_DEG, WIND_HEADING_RANGE_DEG);
                log::debug!(
                    "wind motion: turning to {:.1} deg at {:.2}/s for {:.2}s",
                    heading,
                    change_speed,
                    period
                );
                MotionState {
                    phase: MotionPhase::Motion {
                        period,
                        change_speed,
                        target: UnitQuaternion::from_yaw_degrees(heading),
                    },
                    timer: 0.0,
                    ..self
                }
            }
            MotionPhase::Motion {
                period,
                change_speed,
                target,
            } => {
                let timer = self.timer + dt;
                let direction = self.direction.slerp(&target, change_speed * dt);

                if timer > period {
                    MotionState {
                        phase: MotionPhase::InitMotion,
                        timer: 0.0,
                        direction,
                    }
                } else {
                    MotionState {
                        timer,
                        direction,
                        ..self
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ramp_snaps_within_tolerance() {
        assert_eq!(ramp_toward(7.0, 10.0, 0.1), 10.0);
        assert_eq!(ramp_toward(13.0, 10.0, 0.1), 10.0);
    }

    #[test]
    fn test_ramp_accumulates_from_current() {
        let mut s = 0.0;
        for _ in 0..5 {
            s = ramp_toward(s, 100.0, 1.0);
        }
        assert!((s - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_ramp_never_overshoots() {
        assert_eq!(ramp_toward(0.0, 1.0, 50.0), 1.0);
        assert_eq!(ramp_toward(100.0, 0.0, 500.0), 0.0);
        assert!((ramp_toward(100.0, 0.0, 1.0) - 99.0).abs() < 1e-6);
    }

    #[test]
    fn test_pulse_mode_views() {
        let state = PulseState::default();
        assert_eq!(state.mode(), PulseMode::InitPulsing);
        assert_eq!(state.base_strength(), 0.0);
        assert_eq!(MotionState::default().mode(), MotionMode::InitMotion);
    }

    #[test]
    fn test_motion_timer_clears_on_expiry() {
        let mut rng = crate::random::seeded_rng(0);
        let state = MotionState {
            phase: MotionPhase::Motion {
                period: 0.1,
                change_speed: 1.0,
                target: UnitQuaternion::from_yaw_degrees(90.0),
            },
            timer: 0.09,
            direction: UnitQuaternion::identity(),
        };

        let next = state.step(&WindConfig::default(), &mut rng, 0.02);
        assert_eq!(next.mode(), MotionMode::InitMotion);
        assert_eq!(next.timer, 0.0);
        assert_ne!(next.direction, UnitQuaternion::identity());
    }
}
