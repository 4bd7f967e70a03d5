use super::waypoint::{Waypoint, WaypointPath};
use crate::constants::{HEADING_NORMALIZER_DEG, NO_WAYPOINT_DISTANCE};
use crate::kinematics::Pose;

/// Progress reported by `WaypointNavigator::update`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigationEvent {
    /// Moved from one waypoint index to the next.
    Advanced { from: usize, to: usize },
    /// Reached the last waypoint of a looping path and restarted at 0.
    Wrapped { from: usize },
    /// Reached the last waypoint of a non-looping path.
    Finished { last: usize },
}

/// Direction to a target as seen from the tracked body (degrees).
///
/// `yaw` is about body +Z from body +X, positive to the left. `pitch` is the
/// elevation above the body's horizontal plane.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HeadingAngles {
    pub yaw: f32,
    pub pitch: f32,
}

impl HeadingAngles {
    /// Both angles divided by 180, giving [-1, 1].
    #[inline]
    pub fn normalized(&self) -> HeadingAngles {
        HeadingAngles {
            yaw: self.yaw / HEADING_NORMALIZER_DEG,
            pitch: self.pitch / HEADING_NORMALIZER_DEG,
        }
    }
}

/// Tracks progress of one body along a `WaypointPath`.
///
/// `current_index == path.len()` means finished; an empty path starts
/// finished. At most one waypoint is consumed per `update`, even when the
/// body already sits inside the next arrival radius.
#[derive(Clone, Debug)]
pub struct WaypointNavigator {
    path: WaypointPath,
    current_index: usize,
    looping: bool,
    tracked: Pose,
}

impl WaypointNavigator {
    pub fn new(path: WaypointPath, looping: bool) -> Self {
        Self {
            path,
            current_index: 0,
            looping,
            tracked: Pose::default(),
        }
    }

    #[inline]
    pub fn path(&self) -> &WaypointPath {
        &self.path
    }

    #[inline]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[inline]
    pub fn is_looping(&self) -> bool {
        self.looping
    }

    pub fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.current_index >= self.path.len()
    }

    #[inline]
    pub fn tracked(&self) -> &Pose {
        &self.tracked
    }

    pub fn current_waypoint(&self) -> Option<&Waypoint> {
        self.path.get(self.current_index)
    }

    /// Record the tracked pose and advance if it reached the current waypoint.
    pub fn update(&mut self, pose: Pose) -> Option<NavigationEvent> {
        self.tracked = pose;
        let reached = self.current_waypoint()?.contains(pose.position);
        if reached {
            self.advance()
        } else {
            None
        }
    }

    /// Move to the next waypoint.
    ///
    /// Returns `false` when this finishes a non-looping path, or when the
    /// navigator was already finished.
    pub fn next_waypoint(&mut self) -> bool {
        matches!(
            self.advance(),
            Some(NavigationEvent::Advanced { .. } | NavigationEvent::Wrapped { .. })
        )
    }

    fn advance(&mut self) -> Option<NavigationEvent> {
        if self.is_finished() {
            return None;
        }
        let from = self.current_index;
        let last = self.path.len() - 1;

        let event = if from < last {
            self.current_index += 1;
            NavigationEvent::Advanced {
                from,
                to: self.current_index,
            }
        } else if self.looping {
            self.current_index = 0;
            NavigationEvent::Wrapped { from }
        } else {
            self.current_index = self.path.len();
            NavigationEvent::Finished { last: from }
        };

        log::debug!("navigation: {:?} at '{}'", event, self.path[from].name());
        Some(event)
    }

    /// Restart at the first waypoint.
    pub fn reset_waypoint(&mut self) {
        self.current_index = 0;
    }

    /// Swap in a new path and restart at its first waypoint.
    pub fn reset_path(&mut self, path: WaypointPath) {
        self.path = path;
        self.reset_waypoint();
    }

    /// Distance from the tracked pose to the current waypoint, or `-1.0`
    /// when there is none.
    pub fn current_distance(&self) -> f32 {
        self.distance_to_current().unwrap_or(NO_WAYPOINT_DISTANCE)
    }

    pub fn distance_to_current(&self) -> Option<f32> {
        self.current_waypoint()
            .map(|wp| wp.position().distance(&self.tracked.position))
    }

    /// Direction to the current waypoint from the tracked pose.
    pub fn heading_to_current(&self) -> Option<HeadingAngles> {
        let target = self.current_waypoint()?.position();
        let local = self.tracked.to_local(target);
        let horizontal = (local.x() * local.x() + local.y() * local.y()).sqrt();
        Some(HeadingAngles {
            yaw: local.y().atan2(local.x()).to_degrees(),
            pitch: local.z().atan2(horizontal).to_degrees(),
        })
    }
}
