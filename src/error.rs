//! Error types for the flight core.
//!
//! Configuration problems are reported when a component is built; the only
//! runtime failure is an invalid timestep handed to a tick function.

use std::fmt;

/// Returned when static configuration is invalid or inconsistent.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A parameter must be strictly positive (radius, capacity-like values).
    NonPositive { field: &'static str, value: f32 },
    /// A parameter must be zero or greater.
    Negative { field: &'static str, value: f32 },
    /// A `[min, max]` pair has `min > max`.
    InvertedRange {
        field: &'static str,
        min: f32,
        max: f32,
    },
    /// A distribution was given a negative variance.
    NegativeVariance { field: &'static str, value: f32 },
    /// A motor authority coefficient outside {-1, 0, 1}.
    InvalidFactor { field: &'static str, value: i8 },
    /// A parameter is NaN or infinite.
    NotFinite { field: &'static str },
    /// A ring buffer or history was given zero capacity.
    ZeroCapacity { field: &'static str },
    /// A mixer was built with no motor specs.
    MissingMotors,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonPositive { field, value } => {
                write!(f, "{} must be > 0, got {}", field, value)
            }
            ConfigError::Negative { field, value } => {
                write!(f, "{} must be >= 0, got {}", field, value)
            }
            ConfigError::InvertedRange { field, min, max } => {
                write!(f, "{} range is inverted: min {} > max {}", field, min, max)
            }
            ConfigError::NegativeVariance { field, value } => {
                write!(f, "{} variance must be >= 0, got {}", field, value)
            }
            ConfigError::InvalidFactor { field, value } => {
                write!(f, "{} must be one of -1, 0, 1, got {}", field, value)
            }
            ConfigError::NotFinite { field } => write!(f, "{} must be finite", field),
            ConfigError::ZeroCapacity { field } => write!(f, "{} must be at least 1", field),
            ConfigError::MissingMotors => write!(f, "mixer requires at least one motor spec"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Returned when a tick function receives input it cannot integrate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlError {
    /// `dt` was zero, negative, NaN or infinite.
    InvalidTimestep { dt: f32 },
}

impl fmt::Display for ControlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlError::InvalidTimestep { dt } => {
                write!(f, "timestep must be finite and > 0, got {}", dt)
            }
        }
    }
}

impl std::error::Error for ControlError {}

/// Reject non-positive or non-finite timesteps.
#[inline]
pub(crate) fn check_timestep(dt: f32) -> Result<(), ControlError> {
    if dt > 0.0 && dt.is_finite() {
        Ok(())
    } else {
        log::warn!("Rejected timestep {}", dt);
        Err(ControlError::InvalidTimestep { dt })
    }
}

/// Reject NaN/infinite config values.
#[inline]
pub(crate) fn check_finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { field })
    }
}

/// Reject NaN/infinite or negative config values.
pub(crate) fn check_non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    check_finite(field, value)?;
    if value < 0.0 {
        return Err(ConfigError::Negative { field, value });
    }
    Ok(())
}
