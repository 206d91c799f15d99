//! Vault Pets - autonomous desktop-pet simulation engine
//!
//! Core modules:
//! - `sim`: Creature state machines, ball physics, the per-frame scheduler
//! - `effects`: Ambient particle overlays (snow, stars, leaves)
//! - `persistence`: Snapshot save/restore with per-entry tolerance
//! - `assets`: Sprite handle resolution boundary
//! - `theme`: Theme registry and floor tables
//!
//! The host UI (panels, dialogs, sprite drawing) lives outside this crate;
//! it drives the engine through [`sim::Scheduler`] and reads entity state
//! back each frame.

pub mod assets;
pub mod effects;
pub mod persistence;
pub mod settings;
pub mod sim;
pub mod theme;

pub use settings::Settings;
pub use sim::{Scheduler, TickContext};

/// Engine configuration constants
pub mod consts {
    /// Maximum number of pets in one view; spawns past this are rejected
    pub const MAX_PETS: usize = 20;
    /// Maximum number of balls in one view; the oldest is evicted to make room
    pub const MAX_BALLS: usize = 10;
    /// Ball lifetime in milliseconds before automatic cleanup
    pub const BALL_MAX_LIFETIME_MS: f64 = 60_000.0;

    /// Ball diameter in pixels
    pub const BALL_SIZE: f32 = 20.0;
    /// Downward acceleration applied to a ball every tick (px/tick²)
    pub const BALL_GRAVITY: f32 = 0.5;
    /// Vertical velocity retained (and inverted) on a floor bounce
    pub const BALL_BOUNCE_DAMPING: f32 = 0.7;
    /// Upward launch speed of a thrown ball (px/tick)
    pub const BALL_THROW_UP_SPEED: f32 = 10.0;
    /// Horizontal launch spread of a thrown ball, uniform in [-x, x)
    pub const BALL_THROW_SIDE_SPREAD: f32 = 5.0;

    /// A ball within this many pixels above the floor line counts as resting
    pub const FLOOR_CATCH_BAND: f32 = 30.0;
    /// Horizontal catch radius for a floor-resting ball
    pub const FLOOR_CATCH_RADIUS: f32 = 40.0;
    /// Horizontal catch radius for an airborne ball
    pub const AIR_CATCH_RADIUS: f32 = 35.0;
    /// Vertical tolerance around head height for an airborne catch
    pub const AIR_CATCH_HEAD_TOLERANCE: f32 = 20.0;
    /// Horizontal dead-zone that suppresses jitter while chasing
    pub const CHASE_DEADZONE: f32 = 10.0;

    /// Per-instance speed jitter applied at spawn (±30%)
    pub const SPEED_JITTER: f32 = 0.3;
    /// Speed multiplier for run states relative to walk
    pub const RUN_SPEED_FACTOR: f32 = 1.6;
    /// How long a greeting speech bubble stays up, in ticks
    pub const GREETING_TICKS: u32 = 180;
    /// How long the swipe visual cue stays up, in ticks
    pub const SWIPE_CUE_TICKS: u32 = 40;

    /// Maximum wall-clock step an effect may advance in one frame (seconds)
    pub const EFFECT_MAX_TIME_DELTA: f64 = 0.1;
}

/// Clamp a horizontal position to the creature's allowed span.
///
/// Returns the clamped value and whether either edge was touched.
#[inline]
pub fn clamp_to_span(x: f32, view_width: f32, entity_width: f32) -> (f32, bool) {
    let max = (view_width - entity_width).max(0.0);
    if x <= 0.0 {
        (0.0, true)
    } else if x >= max {
        (max, true)
    } else {
        (x, false)
    }
}

/// Floor line in pixels from the top of the viewport, given the
/// theme-dependent floor percentage (0-100).
#[inline]
pub fn floor_line(view_height: f32, floor_percent: f32) -> f32 {
    view_height * (1.0 - floor_percent / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_to_span() {
        assert_eq!(clamp_to_span(50.0, 200.0, 30.0), (50.0, false));
        assert_eq!(clamp_to_span(-5.0, 200.0, 30.0), (0.0, true));
        assert_eq!(clamp_to_span(180.0, 200.0, 30.0), (170.0, true));
    }

    #[test]
    fn test_floor_line() {
        assert_eq!(floor_line(600.0, 0.0), 600.0);
        assert_eq!(floor_line(600.0, 10.0), 540.0);
    }
}
