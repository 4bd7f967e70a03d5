//! Injectable random streams and Gaussian sampling.
//!
//! Every stochastic component owns its stream, so a simulation seeded with
//! the same value and driven with the same timesteps replays bit-for-bit.
//! Gaussian samples use the Box-Muller polar method.

use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{check_finite, ConfigError};

pub use rand_xoshiro::Xoshiro256PlusPlus;

/// Default random stream for the core.
pub type SimRng = Xoshiro256PlusPlus;

/// Create a deterministic stream from a seed.
#[inline]
pub fn seeded_rng(seed: u64) -> SimRng {
    SimRng::seed_from_u64(seed)
}

/// Generate a random float in the range [low, high).
#[inline]
pub fn random_uniform<R: Rng + ?Sized>(rng: &mut R, low: f32, high: f32) -> f32 {
    rng.gen::<f32>() * (high - low) + low
}

/// Draw one N(0, 1) sample with the polar method.
///
/// Uniform pairs in [-1, 1] are rejected until they fall strictly inside the
/// unit circle (and off the origin, where `ln(s)` diverges).
pub fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    loop {
        let u = random_uniform(rng, -1.0, 1.0);
        let v = random_uniform(rng, -1.0, 1.0);
        let s = u * u + v * v;
        if s >= 1.0 || s == 0.0 {
            continue;
        }
        return u * (-2.0 * s.ln() / s).sqrt();
    }
}

// ============================================================================
// Gaussian distribution
// ============================================================================

/// Normal distribution parameterized by mean and variance.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Gaussian {
    pub mean: f32,
    pub variance: f32,
}

impl Gaussian {
    /// Create a distribution, rejecting negative or non-finite parameters.
    pub fn new(mean: f32, variance: f32) -> Result<Self, ConfigError> {
        let g = Self { mean, variance };
        g.validate("gaussian")?;
        Ok(g)
    }

    /// Degenerate distribution that always returns `value`.
    pub const fn constant(value: f32) -> Self {
        Self {
            mean: value,
            variance: 0.0,
        }
    }

    pub fn with_variance(mut self, variance: f32) -> Self {
        self.variance = variance;
        self
    }

    pub fn validate(&self, field: &'static str) -> Result<(), ConfigError> {
        check_finite(field, self.mean)?;
        check_finite(field, self.variance)?;
        if self.variance < 0.0 {
            return Err(ConfigError::NegativeVariance {
                field,
                value: self.variance,
            });
        }
        Ok(())
    }

    #[inline]
    pub fn std_dev(&self) -> f32 {
        self.variance.sqrt()
    }

    /// Draw a sample: `mean + sqrt(variance) * N(0, 1)`.
    #[inline]
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        self.mean + self.std_dev() * standard_normal(rng)
    }

    /// Draw a sample folded onto [0, inf) for periods, durations and strengths.
    #[inline]
    pub fn sample_positive<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        self.sample(rng).abs()
    }
}

// ============================================================================
// Tests
// ============================================================================
