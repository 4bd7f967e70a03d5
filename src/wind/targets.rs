//! Registry of bodies that receive the wind force.

use crate::types::{Vec3, WorldFrame};

/// Opaque handle the physics collaborator uses for a rigid body.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub u64);

#[derive(Clone, Debug, PartialEq)]
struct WindBody {
    id: BodyId,
    tag: String,
}

/// Force to apply to one body this tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WindImpulse {
    pub body: BodyId,
    pub force: Vec3<WorldFrame>,
}

/// Registered bodies plus an optional tag filter.
///
/// The filtered list is cached and rebuilt only after the registry or the
/// filter changes.
#[derive(Clone, Debug, Default)]
pub struct WindTargets {
    bodies: Vec<WindBody>,
    filter: Option<String>,
    resolved: Vec<BodyId>,
    dirty: bool,
    resolutions: u64,
}

impl WindTargets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(filter: Option<String>) -> Self {
        Self {
            filter,
            dirty: true,
            ..Self::default()
        }
    }

    /// Register `id`, replacing its tag if already present.
    pub fn register(&mut self, id: BodyId, tag: impl Into<String>) {
        let tag = tag.into();
        match self.bodies.iter_mut().find(|b| b.id == id) {
            Some(body) => body.tag = tag,
            None => self.bodies.push(WindBody { id, tag }),
        }
        self.dirty = true;
    }

    /// Returns `false` if `id` was not registered.
    pub fn unregister(&mut self, id: BodyId) -> bool {
        let before = self.bodies.len();
        self.bodies.retain(|b| b.id != id);
        let removed = self.bodies.len() != before;
        self.dirty |= removed;
        removed
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    /// Change the tag filter. Setting the same filter keeps the cache.
    pub fn set_filter(&mut self, filter: Option<String>) {
        if self.filter != filter {
            self.filter = filter;
            self.dirty = true;
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Number of times the filtered list has been rebuilt.
    #[inline]
    pub fn resolutions(&self) -> u64 {
        self.resolutions
    }

    /// Bodies matching the filter, in registration order.
    pub fn resolved(&mut self) -> &[BodyId] {
        if self.dirty {
            self.resolved = self
                .bodies
                .iter()
                .filter(|b| self.filter.as_deref().map_or(true, |tag| b.tag == tag))
                .map(|b| b.id)
                .collect();
            self.dirty = false;
            self.resolutions += 1;
            log::debug!("wind targets: {} of {} bodies", self.resolved.len(), self.bodies.len());
        }
        &self.resolved
    }

    /// One impulse per resolved body.
    pub fn apply(&mut self, force: Vec3<WorldFrame>) -> Vec<WindImpulse> {
        self.resolved()
            .iter()
            .map(|&body| WindImpulse { body, force })
            .collect()
    }
}
