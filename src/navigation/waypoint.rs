use std::ops::Index;
use std::sync::Arc;

use crate::error::{check_finite, ConfigError};
use crate::types::{PositiveScalar, Vec3, WorldFrame};

/// A named target position with an arrival radius.
#[derive(Clone, Debug, PartialEq)]
pub struct Waypoint {
    name: String,
    position: Vec3<WorldFrame>,
    radius: PositiveScalar,
}

impl Waypoint {
    /// Fails if `radius` is not a finite positive number.
    pub fn new(
        name: impl Into<String>,
        position: Vec3<WorldFrame>,
        radius: f32,
    ) -> Result<Self, ConfigError> {
        check_finite("waypoint.radius", radius)?;
        for value in position.as_array() {
            check_finite("waypoint.position", value)?;
        }
        let radius = PositiveScalar::new(radius).ok_or(ConfigError::NonPositive {
            field: "waypoint.radius",
            value: radius,
        })?;
        Ok(Self {
            name: name.into(),
            position,
            radius,
        })
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn position(&self) -> Vec3<WorldFrame> {
        self.position
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius.value()
    }

    /// Whether `point` lies inside the arrival sphere (boundary included).
    #[inline]
    pub fn contains(&self, point: Vec3<WorldFrame>) -> bool {
        self.position.distance(&point) <= self.radius.value()
    }
}

/// Ordered, immutable waypoint list. Clones share storage.
#[derive(Clone, Debug, PartialEq)]
pub struct WaypointPath(Arc<[Waypoint]>);

impl WaypointPath {
    pub fn new(waypoints: Vec<Waypoint>) -> Self {
        Self(waypoints.into())
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Waypoint> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Waypoint> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Waypoint] {
        &self.0
    }

    /// True when both handles point at the same storage.
    pub fn shares_storage(&self, other: &WaypointPath) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Default for WaypointPath {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Vec<Waypoint>> for WaypointPath {
    fn from(waypoints: Vec<Waypoint>) -> Self {
        Self::new(waypoints)
    }
}

impl FromIterator<Waypoint> for WaypointPath {
    fn from_iter<I: IntoIterator<Item = Waypoint>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Index<usize> for WaypointPath {
    type Output = Waypoint;

    fn index(&self, index: usize) -> &Waypoint {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a WaypointPath {
    type Item = &'a Waypoint;
    type IntoIter = std::slice::Iter<'a, Waypoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
