//! Simulation constants shared across the world loop and entity variants.
//!
//! World-level values can be overridden through
//! [`WorldConfig`](crate::config::WorldConfig); these are the defaults.

/// Height below which characters are killed regardless of their life.
pub const MIN_HEIGHT: f32 = -350.0;
/// Gravity acceleration applied by gravity movers, in units per second squared.
pub const GRAVITY_PULL: f32 = -400.0;
/// Frame duration the damage time-weighting is normalised against.
pub const NOMINAL_FRAME_SECONDS: f32 = 1.0 / 60.0;
/// Largest frame delta fed into a single tick.
pub const MAX_FRAME_SECONDS: f32 = 0.25;
/// Distance traces back off from an impact so movers never rest inside a
/// surface.
pub const TRACE_EPSILON: f32 = 0.031_25;
/// Maximum clip planes considered by a sliding motion in one tick.
pub const MAX_SLIDE_ITERATIONS: usize = 4;
/// Squared displacement under which a motion does not bother tracing.
pub const MIN_MOVE_SQUARED: f32 = 1e-8;
/// Minimum `normal · up` for a surface to count as floor.
pub const FLOOR_NORMAL_MIN: f32 = 0.7;
/// Seconds a blood decal stays in the world before expiring.
pub const DECAL_LIFETIME_SECONDS: f32 = 4.0;
/// Seconds an explosion effect stays in the world before expiring.
pub const EXPLOSION_LIFETIME_SECONDS: f32 = 1.0;
/// Pitch limit in degrees.
pub const PITCH_LIMIT: f32 = 90.0;
/// Yaw wrap bound in degrees.
pub const YAW_LIMIT: f32 = 360.0;
