//! Quaternion operations on raw `[w, x, y, z]` arrays.
//!
//! Provides:
//! - Conjugation and normalization
//! - Vector rotation
//! - Quaternion to/from Euler angle conversion
//! - Spherical linear interpolation (used by the wind direction machine)

use std::f32::consts::PI;

/// Normalize a quaternion to unit length.
#[inline(always)]
pub fn quat_normalize(q: [f32; 4]) -> [f32; 4] {
    let norm = (q[0] * q[0] + q[1] * q[1] + q[2] * q[2] + q[3] * q[3]).sqrt();
    if norm < 1e-10 {
        return [1.0, 0.0, 0.0, 0.0];
    }
    let inv_norm = 1.0 / norm;
    [
        q[0] * inv_norm,
        q[1] * inv_norm,
        q[2] * inv_norm,
        q[3] * inv_norm,
    ]
}

#[inline(always)]
pub fn quat_conjugate(q: [f32; 4]) -> [f32; 4] {
    [q[0], -q[1], -q[2], -q[3]]
}

/// Rotate vector `v` by unit quaternion `q`.
///
/// v' = v + 2w(u x v) + 2u x (u x v), with u = (x, y, z)
#[inline(always)]
pub fn quat_rotate_vector(q: [f32; 4], v: [f32; 3]) -> [f32; 3] {
    let (w, ux, uy, uz) = (q[0], q[1], q[2], q[3]);

    let tx = 2.0 * (uy * v[2] - uz * v[1]);
    let ty = 2.0 * (uz * v[0] - ux * v[2]);
    let tz = 2.0 * (ux * v[1] - uy * v[0]);

    [
        v[0] + w * tx + (uy * tz - uz * ty),
        v[1] + w * ty + (uz * tx - ux * tz),
        v[2] + w * tz + (ux * ty - uy * tx),
    ]
}

/// Convert quaternion to Euler angles (roll, pitch, yaw).
/// Uses ZYX convention (yaw-pitch-roll).
#[inline(always)]
pub fn quat_to_euler(q: [f32; 4]) -> [f32; 3] {
    let (w, x, y, z) = (q[0], q[1], q[2], q[3]);

    let sinr_cosp = 2.0 * (w * x + y * z);
    let cosr_cosp = 1.0 - 2.0 * (x * x + y * y);
    let roll = sinr_cosp.atan2(cosr_cosp);

    let sinp = 2.0 * (w * y - z * x);
    let pitch = if sinp.abs() >= 1.0 {
        (PI / 2.0).copysign(sinp) // Gimbal lock
    } else {
        sinp.asin()
    };

    let siny_cosp = 2.0 * (w * z + x * y);
    let cosy_cosp = 1.0 - 2.0 * (y * y + z * z);
    let yaw = siny_cosp.atan2(cosy_cosp);

    [roll, pitch, yaw]
}

/// Convert Euler angles (roll, pitch, yaw) to quaternion.
/// Uses ZYX convention (yaw-pitch-roll).
#[inline(always)]
pub fn euler_to_quat(rpy: [f32; 3]) -> [f32; 4] {
    let (roll, pitch, yaw) = (rpy[0], rpy[1], rpy[2]);

    let cr = (roll * 0.5).cos();
    let sr = (roll * 0.5).sin();
    let cp = (pitch * 0.5).cos();
    let sp = (pitch * 0.5).sin();
    let cy = (yaw * 0.5).cos();
    let sy = (yaw * 0.5).sin();

    [
        cr * cp * cy + sr * sp * sy,
        sr * cp * cy - cr * sp * sy,
        cr * sp * cy + sr * cp * sy,
        cr * cp * sy - sr * sp * cy,
    ]
}

/// Spherical linear interpolation between two unit quaternions.
///
/// Takes the short arc. Falls back to normalized linear interpolation when
/// the inputs are nearly parallel, where `sin(theta)` is ill-conditioned.
#[inline]
pub fn quat_slerp(from: [f32; 4], to: [f32; 4], t: f32) -> [f32; 4] {
    let mut to = to;
    let mut dot = from[0] * to[0] + from[1] * to[1] + from[2] * to[2] + from[3] * to[3];

    if dot < 0.0 {
        to = [-to[0], -to[1], -to[2], -to[3]];
        dot = -dot;
    }

    if dot > 0.9995 {
        return quat_normalize([
            from[0] + t * (to[0] - from[0]),
            from[1] + t * (to[1] - from[1]),
            from[2] + t * (to[2] - from[2]),
            from[3] + t * (to[3] - from[3]),
        ]);
    }

    let theta_0 = dot.min(1.0).acos();
    let theta = theta_0 * t;
    let sin_theta_0 = theta_0.sin();
    let s0 = theta.cos() - dot * theta.sin() / sin_theta_0;
    let s1 = theta.sin() / sin_theta_0;

    quat_normalize([
        s0 * from[0] + s1 * to[0],
        s0 * from[1] + s1 * to[1],
        s0 * from[2] + s1 * to[2],
        s0 * from[3] + s1 * to[3],
    ])
}

// ============================================================================
// Tests
// ============================================================================
