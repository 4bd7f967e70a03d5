//! Type-level encoding of geometric invariants used at the core's API boundaries.
//!
//! - `Vec3<Frame>`: a 3D vector tagged with the coordinate frame it lives in
//! - `UnitQuaternion`: ||q|| = 1 (orientation / heading representation)
//! - `PositiveScalar`: x > 0 (radii, periods, timesteps)
//!
//! Hot paths extract raw values via `.as_array()` / `.value()` and operate on
//! plain arrays (see `kinematics::quaternion`).

use std::marker::PhantomData;

use crate::kinematics::quaternion::{
    euler_to_quat, quat_conjugate, quat_rotate_vector, quat_slerp, quat_to_euler,
};

// ============================================================================
// Coordinate Frame Markers (Zero-Size Types)
// ============================================================================

/// Marker type for world frame coordinates.
/// World frame is inertial, with Z pointing up (against gravity).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct WorldFrame;

/// Marker type for body frame coordinates.
/// Body frame is attached to the vehicle: +X forward, +Y left, +Z up (thrust axis).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct BodyFrame;

// ============================================================================
// Frame-Typed 3D Vector
// ============================================================================

/// A 3D vector with compile-time coordinate frame tracking.
///
/// `PhantomData<Frame>` has no runtime cost; the type system prevents
/// adding a body-frame vector to a world-frame position.
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(C)]
pub struct Vec3<Frame> {
    data: [f32; 3],
    _frame: PhantomData<Frame>,
}

impl<F> Vec3<F> {
    #[inline(always)]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            data: [x, y, z],
            _frame: PhantomData,
        }
    }

    #[inline(always)]
    pub const fn from_array(arr: [f32; 3]) -> Self {
        Self {
            data: arr,
            _frame: PhantomData,
        }
    }

    #[inline(always)]
    pub const fn as_array(&self) -> [f32; 3] {
        self.data
    }

    #[inline(always)]
    pub const fn x(&self) -> f32 {
        self.data[0]
    }

    #[inline(always)]
    pub const fn y(&self) -> f32 {
        self.data[1]
    }

    #[inline(always)]
    pub const fn z(&self) -> f32 {
        self.data[2]
    }

    #[inline(always)]
    pub fn norm_squared(&self) -> f32 {
        self.data[0] * self.data[0] + self.data[1] * self.data[1] + self.data[2] * self.data[2]
    }

    #[inline]
    pub fn norm(&self) -> f32 {
        self.norm_squared().sqrt()
    }

    /// Euclidean distance to another point in the same frame.
    #[inline]
    pub fn distance(&self, other: &Vec3<F>) -> f32 {
        let dx = self.data[0] - other.data[0];
        let dy = self.data[1] - other.data[1];
        let dz = self.data[2] - other.data[2];
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    #[inline(always)]
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

impl<F> std::ops::Add for Vec3<F> {
    type Output = Vec3<F>;
    #[inline(always)]
    fn add(self, other: Vec3<F>) -> Vec3<F> {
        Vec3::new(
            self.data[0] + other.data[0],
            self.data[1] + other.data[1],
            self.data[2] + other.data[2],
        )
    }
}

impl<F> std::ops::Sub for Vec3<F> {
    type Output = Vec3<F>;
    #[inline(always)]
    fn sub(self, other: Vec3<F>) -> Vec3<F> {
        Vec3::new(
            self.data[0] - other.data[0],
            self.data[1] - other.data[1],
            self.data[2] - other.data[2],
        )
    }
}

impl<F> std::ops::Mul<f32> for Vec3<F> {
    type Output = Vec3<F>;
    #[inline(always)]
    fn mul(self, scalar: f32) -> Vec3<F> {
        Vec3::new(
            self.data[0] * scalar,
            self.data[1] * scalar,
            self.data[2] * scalar,
        )
    }
}

impl<F> Default for Vec3<F> {
    fn default() -> Self {
        Self::zero()
    }
}

// ============================================================================
// Unit Quaternion
// ============================================================================

/// A quaternion with unit norm (||q|| = 1), representing a rotation from the
/// body frame into the world frame.
///
/// Invariant: w^2 + x^2 + y^2 + z^2 = 1
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UnitQuaternion {
    w: f32,
    x: f32,
    y: f32,
    z: f32,
}

impl UnitQuaternion {
    /// Create a unit quaternion, normalizing the input.
    ///
    /// Returns identity if the input has zero norm.
    #[inline]
    pub fn new(w: f32, x: f32, y: f32, z: f32) -> Self {
        let norm_sq = w * w + x * x + y * y + z * z;
        if norm_sq < 1e-10 || !norm_sq.is_finite() {
            return Self::identity();
        }
        let inv_norm = 1.0 / norm_sq.sqrt();
        Self {
            w: w * inv_norm,
            x: x * inv_norm,
            y: y * inv_norm,
            z: z * inv_norm,
        }
    }

    /// Create from array [w, x, y, z], normalizing.
    #[inline]
    pub fn from_array(arr: [f32; 4]) -> Self {
        Self::new(arr[0], arr[1], arr[2], arr[3])
    }

    #[inline]
    pub const fn identity() -> Self {
        Self {
            w: 1.0,
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Orientation from roll, pitch, yaw in radians (ZYX convention).
    #[inline]
    pub fn from_euler(roll: f32, pitch: f32, yaw: f32) -> Self {
        Self::from_array(euler_to_quat([roll, pitch, yaw]))
    }

    /// Pure heading rotation about world +Z, in degrees.
    #[inline]
    pub fn from_yaw_degrees(yaw_deg: f32) -> Self {
        Self::from_euler(0.0, 0.0, yaw_deg.to_radians())
    }

    /// Roll, pitch, yaw in radians (ZYX convention).
    #[inline]
    pub fn to_euler(&self) -> [f32; 3] {
        quat_to_euler(self.as_array())
    }

    /// Roll, pitch, yaw in degrees.
    #[inline]
    pub fn to_euler_degrees(&self) -> [f32; 3] {
        let [r, p, y] = self.to_euler();
        [r.to_degrees(), p.to_degrees(), y.to_degrees()]
    }

    #[inline(always)]
    pub fn as_array(&self) -> [f32; 4] {
        [self.w, self.x, self.y, self.z]
    }

    /// Compute squared norm (should always be ~1.0).
    #[inline]
    pub fn norm_squared(&self) -> f32 {
        self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Rotate a body-frame vector into the world frame.
    #[inline]
    pub fn rotate(&self, v: Vec3<BodyFrame>) -> Vec3<WorldFrame> {
        Vec3::from_array(quat_rotate_vector(self.as_array(), v.as_array()))
    }

    /// Express a world-frame vector in the body frame.
    #[inline]
    pub fn inverse_rotate(&self, v: Vec3<WorldFrame>) -> Vec3<BodyFrame> {
        Vec3::from_array(quat_rotate_vector(quat_conjugate(self.as_array()), v.as_array()))
    }

    /// Spherical interpolation toward `target`; `t` is clamped to [0, 1].
    #[inline]
    pub fn slerp(&self, target: &UnitQuaternion, t: f32) -> Self {
        Self::from_array(quat_slerp(self.as_array(), target.as_array(), t.clamp(0.0, 1.0)))
    }

    /// Smallest rotation angle (radians) between two orientations.
    #[inline]
    pub fn angle_to(&self, other: &UnitQuaternion) -> f32 {
        let dot = (self.w * other.w + self.x * other.x + self.y * other.y + self.z * other.z)
            .abs()
            .min(1.0);
        2.0 * dot.acos()
    }
}

impl Default for UnitQuaternion {
    fn default() -> Self {
        Self::identity()
    }
}

// ============================================================================
// Positive Scalar
// ============================================================================

/// A finite scalar value that must be positive (x > 0).
///
/// Used for waypoint radii, propeller radii and timesteps.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct PositiveScalar(f32);

impl PositiveScalar {
    /// Try to create, returning None if value <= 0 or not finite.
    #[inline]
    pub fn new(value: f32) -> Option<Self> {
        if value > 0.0 && value.is_finite() {
            Some(Self(value))
        } else {
            None
        }
    }

    #[inline(always)]
    pub fn value(&self) -> f32 {
        self.0
    }
}

// ============================================================================
// Tests
// ============================================================================
