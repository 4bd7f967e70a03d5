//! Default tuning constants for the flight core.

// ============================================================================
// Control
// ============================================================================

/// Number of PID samples retained by the instrumented controller.
pub const PID_HISTORY_LEN: usize = 50;

/// Default physics step (s), 50 Hz.
pub const DEFAULT_DT: f32 = 0.02;

/// Default throttle that balances gravity when split across four motors.
pub const DEFAULT_HOVER_THROTTLE: f32 = 2.45;

/// Reaction torque per unit lift for the stock quad layout.
pub const DEFAULT_TORQUE_FACTOR: f32 = 0.05;

// ============================================================================
// Propeller animation
// ============================================================================

/// Radius used when the propeller geometry does not provide one.
pub const FALLBACK_PROPELLER_RADIUS: f32 = 1.0;

/// Lift force below which the propeller spins down instead of tracking force.
pub const DEFAULT_STOP_THRESHOLD: f32 = 0.05;

/// Rate (1/s) of the linear spin-down toward zero.
pub const DEFAULT_SPIN_DOWN_RATE: f32 = 2.0;

/// Default animation speed multiplier (deg/s per sqrt(N)).
pub const DEFAULT_ANIMATION_SPEED: f32 = 360.0;

// ============================================================================
// Wind
// ============================================================================

/// Relative error within which the current strength snaps onto the target.
pub const PULSE_SNAP_TOLERANCE: f32 = 0.4;

/// Heading range for new wind directions, degrees either side of zero.
pub const WIND_HEADING_RANGE_DEG: f32 = 180.0;

/// Mean calm interval between gusts (s).
pub const DEFAULT_PULSE_PERIOD: f32 = 4.0;

/// Mean gust length (s).
pub const DEFAULT_PULSE_DURATION: f32 = 2.0;

/// Mean gust strength.
pub const DEFAULT_BASE_STRENGTH: f32 = 5.0;

/// Strength gained per second while a gust builds.
pub const DEFAULT_RAMP_RATE: f32 = 4.0;

/// Strength lost per second between gusts.
pub const DEFAULT_DECAY_RATE: f32 = 2.0;

/// Mean interval between heading changes (s).
pub const DEFAULT_MOTION_PERIOD: f32 = 6.0;

/// Mean slerp fraction per second toward a new heading.
pub const DEFAULT_CHANGE_SPEED: f32 = 0.5;

// ============================================================================
// Navigation
// ============================================================================

/// Distance reported when there is no current waypoint.
pub const NO_WAYPOINT_DISTANCE: f32 = -1.0;

/// Angle used to normalize heading queries into [-1, 1].
pub const HEADING_NORMALIZER_DEG: f32 = 180.0;

/// Forward tilt cap while flying to a waypoint (deg).
pub const DEFAULT_MAX_PITCH_DEG: f32 = 15.0;

/// Forward tilt per metre of horizontal distance (deg/m).
pub const DEFAULT_PITCH_GAIN: f32 = 3.0;

/// Heading error below which the planner starts tilting forward (deg).
pub const DEFAULT_ALIGN_TOLERANCE_DEG: f32 = 30.0;
