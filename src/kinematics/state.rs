//! Vehicle kinematic state handed to the core by the physics collaborator.

use crate::types::{BodyFrame, UnitQuaternion, Vec3, WorldFrame};

/// Position and orientation of a tracked body.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pose {
    pub position: Vec3<WorldFrame>,
    pub orientation: UnitQuaternion,
}

impl Pose {
    pub fn new(position: Vec3<WorldFrame>, orientation: UnitQuaternion) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Pose at `position` with identity orientation.
    pub fn at(position: Vec3<WorldFrame>) -> Self {
        Self::new(position, UnitQuaternion::identity())
    }

    /// Express a world-frame point relative to this pose, in body coordinates.
    #[inline]
    pub fn to_local(&self, point: Vec3<WorldFrame>) -> Vec3<BodyFrame> {
        self.orientation.inverse_rotate(point - self.position)
    }
}

/// Per-tick rigid body state.
///
/// The core only reads this; integrating it forward is the physics
/// collaborator's job.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VehicleState {
    pub pose: Pose,
    /// Linear velocity in world frame (m/s)
    pub linear_velocity: Vec3<WorldFrame>,
    /// Angular velocity in body frame (rad/s)
    pub angular_velocity: Vec3<BodyFrame>,
    /// Mass (kg)
    pub mass: f32,
    /// Diagonal inertia [Ixx, Iyy, Izz] (kg*m^2)
    pub inertia: [f32; 3],
}

impl VehicleState {
    /// Body at rest at `position`, level, with unit mass and inertia.
    pub fn at_rest(position: Vec3<WorldFrame>) -> Self {
        Self {
            pose: Pose::at(position),
            linear_velocity: Vec3::zero(),
            angular_velocity: Vec3::zero(),
            mass: 1.0,
            inertia: [1.0, 1.0, 1.0],
        }
    }

    pub fn with_orientation(mut self, orientation: UnitQuaternion) -> Self {
        self.pose.orientation = orientation;
        self
    }

    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    #[inline]
    pub fn position(&self) -> Vec3<WorldFrame> {
        self.pose.position
    }

    #[inline]
    pub fn altitude(&self) -> f32 {
        self.pose.position.z()
    }

    /// Attitude as [roll, pitch, yaw] in degrees.
    #[inline]
    pub fn attitude_degrees(&self) -> [f32; 3] {
        self.pose.orientation.to_euler_degrees()
    }
}

impl Default for VehicleState {
    fn default() -> Self {
        Self::at_rest(Vec3::zero())
    }
}
