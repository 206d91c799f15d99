//! Thrown-ball physics
//!
//! A ball is launched upward with a random sideways kick, integrates
//! gravity each tick, bounces off the floor with damping and off the side
//! walls elastically, and is retired by the scheduler once caught,
//! off-screen, or past its maximum lifetime.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::consts::*;

/// A thrown ball entity
#[derive(Debug, Clone)]
pub struct Ball {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Wall-clock spawn time in milliseconds, for lifetime expiry
    spawned_at_ms: f64,
    caught: bool,
}

impl Ball {
    /// Launch a ball from the given point: upward, with a uniform random
    /// horizontal kick
    pub fn thrown(id: u32, start: Vec2, now_ms: f64, rng: &mut Pcg32) -> Self {
        let kick = rng.random_range(-BALL_THROW_SIDE_SPREAD..BALL_THROW_SIDE_SPREAD);
        Self {
            id,
            pos: start,
            vel: Vec2::new(kick, -BALL_THROW_UP_SPEED),
            spawned_at_ms: now_ms,
            caught: false,
        }
    }

    /// Advance one tick of physics.
    ///
    /// Returns whether the ball is still within vertical bounds; a `false`
    /// return means the caller must discard it.
    pub fn advance(&mut self, view_height: f32, view_width: f32, floor_y: f32) -> bool {
        self.vel.y += BALL_GRAVITY;

        self.pos += self.vel;

        // Bounce off the floor, losing energy
        if self.pos.y > floor_y - BALL_SIZE {
            self.pos.y = floor_y - BALL_SIZE;
            self.vel.y *= -BALL_BOUNCE_DAMPING;
        }

        // Bounce off walls, elastic
        if self.pos.x < 0.0 {
            self.pos.x = 0.0;
            self.vel.x = -self.vel.x;
        } else if self.pos.x > view_width - BALL_SIZE {
            self.pos.x = view_width - BALL_SIZE;
            self.vel.x = -self.vel.x;
        }

        self.pos.y < view_height + BALL_SIZE
    }

    /// Whether the ball has outlived its maximum lifetime
    pub fn is_expired(&self, now_ms: f64) -> bool {
        now_ms - self.spawned_at_ms > BALL_MAX_LIFETIME_MS
    }

    /// Whether the ball is resting on (or within the catch band above) the
    /// floor line
    pub fn on_floor(&self, floor_y: f32) -> bool {
        self.pos.y >= floor_y - FLOOR_CATCH_BAND
    }

    /// Horizontal center of the ball
    pub fn center_x(&self) -> f32 {
        self.pos.x + BALL_SIZE / 2.0
    }

    /// Claim the ball for a catching creature so nothing else catches it
    pub fn claim(&mut self) {
        self.caught = true;
    }

    pub fn is_caught(&self) -> bool {
        self.caught
    }
}
