//! PID wrapper that records every step for external plotting.
//!
//! The wrapped controller does all the math; this type only keeps a rolling
//! window of the last `capacity` `PidTerms`.

use std::collections::VecDeque;

use super::pid::{PidController, PidParameters, PidTerms};
use super::Controller;
use crate::error::{ConfigError, ControlError};

#[derive(Clone, Debug)]
pub struct InstrumentedPid {
    inner: PidController,
    history: VecDeque<PidTerms>,
    capacity: usize,
}

impl InstrumentedPid {
    pub fn new(params: PidParameters, capacity: usize) -> Result<Self, ConfigError> {
        Self::wrap(PidController::new(params)?, capacity)
    }

    /// Instrument an existing controller, keeping its dynamic state.
    pub fn wrap(inner: PidController, capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::ZeroCapacity {
                field: "pid.history_len",
            });
        }
        Ok(Self {
            inner,
            history: VecDeque::with_capacity(capacity),
            capacity,
        })
    }

    #[inline]
    pub fn controller(&self) -> &PidController {
        &self.inner
    }

    pub fn set_parameters(&mut self, params: PidParameters) -> Result<(), ConfigError> {
        self.inner.set_parameters(params)
    }

    /// Most recent sample, if any step has run since the last reset.
    #[inline]
    pub fn latest(&self) -> Option<&PidTerms> {
        self.history.back()
    }

    /// Iterate samples from oldest to newest.
    pub fn history(&self) -> impl Iterator<Item = &PidTerms> {
        self.history.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.history.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop recorded samples without touching the controller.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    fn record(&mut self, terms: PidTerms) {
        if self.history.len() >= self.capacity {
            self.history.pop_front();
        }
        self.history.push_back(terms);
    }
}

impl Controller for InstrumentedPid {
    fn calc(&mut self, target: f32, actual: f32, dt: f32) -> Result<f32, ControlError> {
        let terms = self.inner.step(target, actual, dt)?;
        self.record(terms);
        Ok(terms.output)
    }

    /// Resets the controller. Recorded samples are kept for plotting.
    fn reset(&mut self) {
        self.inner.reset();
    }

    #[inline]
    fn terms(&self) -> PidTerms {
        self.inner.last_terms()
    }
}
