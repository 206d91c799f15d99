//! Creature animation states and the state-transition resolver
//!
//! Every state a pet can be in maps to a behavior object: a sprite label,
//! a horizontal-facing intent, and a frame counter that reports when the
//! state has played out. Transition choice itself lives on the species
//! graph ([`super::species::TransitionGraph`]).

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::species::SpeciesDescriptor;

/// All animation states across every species
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum States {
    SitIdle,
    Lie,
    StandLeft,
    StandRight,
    WalkLeft,
    WalkRight,
    RunLeft,
    RunRight,
    ClimbWallLeft,
    WallDigLeft,
    WallNap,
    WallHangLeft,
    JumpDownLeft,
    Land,
    Chase,
    Swipe,
    IdleWithBall,
}

/// Horizontal-facing intent of a state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalDirection {
    Left,
    Right,
    None,
}

impl States {
    /// Sprite/animation label for asset lookup
    pub fn label(self) -> &'static str {
        match self {
            States::SitIdle => "idle",
            States::Lie => "lie",
            States::StandLeft | States::StandRight => "stand",
            States::WalkLeft | States::WalkRight => "walk",
            States::RunLeft | States::RunRight | States::Chase => "run",
            States::ClimbWallLeft => "climb",
            States::WallDigLeft => "dig",
            States::WallNap => "nap",
            States::WallHangLeft => "hang",
            States::JumpDownLeft => "fall",
            States::Land => "land",
            States::Swipe => "swipe",
            States::IdleWithBall => "with_ball",
        }
    }

    /// Facing intent baked into the state itself. Chase faces the ball, so
    /// it reports `None` here and the creature supplies the direction.
    pub fn direction(self) -> HorizontalDirection {
        match self {
            States::StandLeft
            | States::WalkLeft
            | States::RunLeft
            | States::ClimbWallLeft
            | States::WallDigLeft
            | States::WallHangLeft
            | States::JumpDownLeft => HorizontalDirection::Left,
            States::StandRight | States::WalkRight | States::RunRight => {
                HorizontalDirection::Right
            }
            _ => HorizontalDirection::None,
        }
    }

    /// Whether the state translates the creature horizontally
    pub fn is_walking(self) -> bool {
        matches!(
            self,
            States::WalkLeft | States::WalkRight | States::RunLeft | States::RunRight
        )
    }

    /// Whether the state keeps the creature up on the wall. Anything else
    /// descends back to the floor if it still has altitude (a chase or
    /// swipe can interrupt the wall chain partway).
    pub fn holds_wall(self) -> bool {
        matches!(
            self,
            States::ClimbWallLeft | States::WallDigLeft | States::WallNap | States::WallHangLeft
        )
    }

    /// Mirror a directional state for a boundary bounce
    pub fn mirrored(self) -> States {
        match self {
            States::WalkLeft => States::WalkRight,
            States::WalkRight => States::WalkLeft,
            States::RunLeft => States::RunRight,
            States::RunRight => States::RunLeft,
            States::StandLeft => States::StandRight,
            States::StandRight => States::StandLeft,
            other => other,
        }
    }
}

/// What `next_frame` reports each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameResult {
    Continue,
    Complete,
}

/// Vertical motion attached to a behavior (wall climbing / dropping)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VerticalMotion {
    None,
    /// Raise the creature by `speed` px/tick up to `limit` px above the floor
    Climb { speed: f32, limit: f32 },
    /// Lower the creature by `speed` px/tick back to the floor
    Fall { speed: f32 },
}

/// A resolved, in-flight state: sprite label, facing, and a frame budget
/// sampled when the state was entered.
#[derive(Debug, Clone)]
pub struct StateBehavior {
    state: States,
    /// `None` means the state never completes on its own (chase)
    frames_remaining: Option<u32>,
    speed_factor: f32,
    vertical: VerticalMotion,
}

impl StateBehavior {
    pub fn state(&self) -> States {
        self.state
    }

    pub fn label(&self) -> &'static str {
        self.state.label()
    }

    pub fn direction(&self) -> HorizontalDirection {
        self.state.direction()
    }

    /// Multiplier on the creature's per-instance speed while in this state
    pub fn speed_factor(&self) -> f32 {
        self.speed_factor
    }

    pub fn vertical(&self) -> VerticalMotion {
        self.vertical
    }

    /// Advance the internal counter by one frame
    pub fn next_frame(&mut self) -> FrameResult {
        match self.frames_remaining {
            None => FrameResult::Continue,
            Some(0) => FrameResult::Complete,
            Some(ref mut n) => {
                *n -= 1;
                if *n == 0 {
                    FrameResult::Complete
                } else {
                    FrameResult::Continue
                }
            }
        }
    }
}

/// Build the behavior object for a state on the given species.
///
/// `bottom` is the creature's current height above the floor line; drop
/// states size their frame budget from it so the landing lines up.
pub fn resolve(
    state: States,
    species: &SpeciesDescriptor,
    bottom: f32,
    rng: &mut Pcg32,
) -> StateBehavior {
    let frames_remaining = match state {
        States::Chase => None,
        States::SitIdle | States::Lie | States::StandLeft | States::StandRight => {
            Some(rng.random_range(60..240))
        }
        States::IdleWithBall => Some(rng.random_range(60..240)),
        States::WallNap => Some(rng.random_range(240..600)),
        States::WalkLeft | States::WalkRight | States::RunLeft | States::RunRight => {
            Some(rng.random_range(80..320))
        }
        States::Swipe => Some(40),
        States::Land => Some(30),
        States::WallDigLeft => Some(60),
        States::WallHangLeft => Some(rng.random_range(90..180)),
        States::ClimbWallLeft => {
            let speed = species.climb_speed.max(0.1);
            Some(((species.climb_height - bottom).max(0.0) / speed).ceil() as u32 + 1)
        }
        States::JumpDownLeft => {
            let speed = species.fall_speed.max(0.1);
            Some((bottom / speed).ceil() as u32 + 1)
        }
    };

    let speed_factor = match state {
        States::RunLeft | States::RunRight => crate::consts::RUN_SPEED_FACTOR,
        _ => 1.0,
    };

    let vertical = match state {
        States::ClimbWallLeft => VerticalMotion::Climb {
            speed: species.climb_speed,
            limit: species.climb_height,
        },
        States::JumpDownLeft => VerticalMotion::Fall {
            speed: species.fall_speed,
        },
        _ => VerticalMotion::None,
    };

    StateBehavior {
        state,
        frames_remaining,
        speed_factor,
        vertical,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::species::{self, SpeciesKind};
    use rand::SeedableRng;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(7)
    }

    #[test]
    fn test_behavior_counts_down_to_complete() {
        let dog = species::descriptor(SpeciesKind::Dog);
        let mut behavior = resolve(States::Swipe, dog, 0.0, &mut rng());
        let mut frames = 0;
        while behavior.next_frame() == FrameResult::Continue {
            frames += 1;
            assert!(frames < 10_000, "swipe never completed");
        }
        assert_eq!(frames + 1, 40);
    }

    #[test]
    fn test_chase_never_self_completes() {
        let dog = species::descriptor(SpeciesKind::Dog);
        let mut behavior = resolve(States::Chase, dog, 0.0, &mut rng());
        for _ in 0..1000 {
            assert_eq!(behavior.next_frame(), FrameResult::Continue);
        }
    }

    #[test]
    fn test_mirrored_flips_walk_and_run() {
        assert_eq!(States::WalkLeft.mirrored(), States::WalkRight);
        assert_eq!(States::RunRight.mirrored(), States::RunLeft);
        assert_eq!(States::SitIdle.mirrored(), States::SitIdle);
    }

    #[test]
    fn test_drop_budget_scales_with_height() {
        let squirrel = species::descriptor(SpeciesKind::Squirrel);
        let low = resolve(States::JumpDownLeft, squirrel, 15.0, &mut rng());
        let high = resolve(States::JumpDownLeft, squirrel, 150.0, &mut rng());
        assert!(high.frames_remaining.unwrap() > low.frames_remaining.unwrap());
    }

    #[test]
    fn test_run_states_are_faster() {
        let dog = species::descriptor(SpeciesKind::Dog);
        let walk = resolve(States::WalkLeft, dog, 0.0, &mut rng());
        let run = resolve(States::RunLeft, dog, 0.0, &mut rng());
        assert!(run.speed_factor() > walk.speed_factor());
    }
}
