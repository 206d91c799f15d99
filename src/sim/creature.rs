//! The creature engine: one pet's position, state, and reactions
//!
//! Each tick a creature scans the live balls (catch or chase), otherwise
//! steps its state machine, translating horizontally in walk/run states and
//! vertically in the wall-climb chain. Friendships are stored as creature
//! ids and resolved through the scheduler table, so removing a pet can
//! never leave a dangling reference behind.

use rand::Rng;
use rand_pcg::Pcg32;

use crate::assets::{AssetResolver, SpriteHandle};
use crate::consts::*;

use super::ball::Ball;
use super::species::{self, PetColor, PetSize, SpeciesDescriptor, SpeciesKind};
use super::states::{self, FrameResult, HorizontalDirection, StateBehavior, States, VerticalMotion};

pub type CreatureId = u32;

/// A bounded-duration speech bubble over a creature's head
#[derive(Debug, Clone)]
pub struct Speech {
    pub text: String,
    pub ticks_left: u32,
}

/// A spawned pet
#[derive(Debug)]
pub struct Creature {
    id: CreatureId,
    name: String,
    species: &'static SpeciesDescriptor,
    size: PetSize,
    color: PetColor,
    behavior: StateBehavior,
    /// Left edge of the sprite in viewport pixels
    x: f32,
    /// Height of the sprite's bottom edge above the floor line
    bottom: f32,
    facing: HorizontalDirection,
    /// Fixed per-instance speed: species base x size multiplier x spawn jitter
    speed: f32,
    friend: Option<CreatureId>,
    /// Cached viewport width, refreshed by the scheduler every tick
    container_width: f32,
    sprite: Option<SpriteHandle>,
    sprite_dirty: bool,
    speech: Option<Speech>,
    swipe_cue_ticks: u32,
}

impl Creature {
    pub fn new(
        id: CreatureId,
        kind: SpeciesKind,
        color: PetColor,
        size: PetSize,
        name: String,
        start_x: f32,
        rng: &mut Pcg32,
    ) -> Self {
        let species = species::descriptor(kind);
        let jitter = rng.random_range(1.0 - SPEED_JITTER..1.0 + SPEED_JITTER);
        let behavior = states::resolve(species.graph.starting_state, species, 0.0, rng);
        Self {
            id,
            name,
            species,
            size,
            color,
            behavior,
            x: start_x,
            bottom: 0.0,
            facing: HorizontalDirection::Right,
            speed: species.base_speed * size.speed_multiplier() * jitter,
            friend: None,
            container_width: f32::MAX,
            sprite: None,
            sprite_dirty: true,
            speech: None,
            swipe_cue_ticks: 0,
        }
    }

    // --- identity & geometry -------------------------------------------------

    pub fn id(&self) -> CreatureId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn species(&self) -> &'static SpeciesDescriptor {
        self.species
    }

    pub fn kind(&self) -> SpeciesKind {
        self.species.kind
    }

    pub fn color(&self) -> PetColor {
        self.color
    }

    pub fn size(&self) -> PetSize {
        self.size
    }

    pub fn state(&self) -> States {
        self.behavior.state()
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    /// Height above the floor line (0 when grounded)
    pub fn bottom(&self) -> f32 {
        self.bottom
    }

    pub fn width(&self) -> f32 {
        self.size.width()
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width() / 2.0
    }

    pub fn facing(&self) -> HorizontalDirection {
        self.facing
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn speech(&self) -> Option<&Speech> {
        self.speech.as_ref()
    }

    pub fn swipe_cue_active(&self) -> bool {
        self.swipe_cue_ticks > 0
    }

    /// Whether the creature's horizontal span contains the given anchor x
    pub fn span_contains(&self, anchor_x: f32) -> bool {
        anchor_x >= self.x && anchor_x < self.x + self.width()
    }

    // --- friendship ----------------------------------------------------------

    pub fn friend(&self) -> Option<CreatureId> {
        self.friend
    }

    /// Link this creature to another. Overwrites any existing link; the
    /// friend-seeking pass is responsible for making the relation mutual.
    pub fn make_friends_with(&mut self, other: CreatureId) {
        self.friend = Some(other);
    }

    pub fn clear_friend(&mut self) {
        self.friend = None;
    }

    /// Available for pairing: not mid-chase and not holding a ball
    pub fn is_available(&self) -> bool {
        !matches!(self.state(), States::Chase | States::IdleWithBall)
    }

    // --- host hooks ----------------------------------------------------------

    pub fn set_container_width(&mut self, width: f32) {
        self.container_width = width;
    }

    /// Show a speech bubble for a bounded number of ticks
    pub fn say(&mut self, text: impl Into<String>, ticks: u32) {
        self.speech = Some(Speech {
            text: text.into(),
            ticks_left: ticks,
        });
    }

    /// Show the species greeting line
    pub fn greet(&mut self) {
        self.say(self.species.hello, GREETING_TICKS);
    }

    /// Re-resolve the sprite handle if the state changed since the last
    /// call. Returns the new handle only when it actually differs, so the
    /// host can skip reassignment (avoids animation restart flicker).
    pub fn refresh_sprite(&mut self, resolver: &dyn AssetResolver) -> Option<SpriteHandle> {
        if !self.sprite_dirty {
            return None;
        }
        self.sprite_dirty = false;
        let handle = resolver.resolve(self.species.kind, self.color, self.behavior.label());
        if self.sprite.as_ref() == Some(&handle) {
            return None;
        }
        self.sprite = Some(handle.clone());
        Some(handle)
    }

    pub fn sprite(&self) -> Option<&SpriteHandle> {
        self.sprite.as_ref()
    }

    // --- actions -------------------------------------------------------------

    /// One-shot swipe, gated on the species ability. Exit is graph-driven
    /// from the swipe state's own candidate list.
    pub fn swipe(&mut self, rng: &mut Pcg32) -> bool {
        if !self.species.can_swipe || self.state() == States::Swipe {
            return false;
        }
        self.transition(States::Swipe, rng);
        self.swipe_cue_ticks = SWIPE_CUE_TICKS;
        true
    }

    /// Per-tick entry point. `balls` is the scheduler's live list; on a
    /// catch the ball is claimed in place and its id returned so the
    /// scheduler can retire it.
    pub fn advance(&mut self, floor_y: f32, balls: &mut [Ball], rng: &mut Pcg32) -> Option<u32> {
        self.tick_timers();

        if self.species.can_chase {
            let mut any_unclaimed = false;
            let mut floor_target = None;
            let mut air_target = None;
            for ball in balls.iter_mut() {
                if ball.is_caught() {
                    continue;
                }
                any_unclaimed = true;
                if let Some(caught) = self.try_catch(ball, floor_y, rng) {
                    return Some(caught);
                }
                if floor_target.is_none() && ball.on_floor(floor_y) {
                    floor_target = Some(ball.center_x());
                }
                if air_target.is_none() {
                    air_target = Some(ball.center_x());
                }
            }

            if let Some(target) = floor_target {
                if self.is_available() {
                    self.transition(States::Chase, rng);
                }
                if self.state() == States::Chase {
                    self.chase_toward(target);
                    return None;
                }
            } else if any_unclaimed {
                // Still airborne: an ongoing chase keeps tracking it
                if self.state() == States::Chase {
                    if let Some(target) = air_target {
                        self.chase_toward(target);
                    }
                    return None;
                }
            } else if !self.is_available() {
                // Chase/hold never persists without an active target
                self.transition(self.species.graph.starting_state, rng);
            }
        }

        self.step_state_machine(rng);
        None
    }

    /// Place the creature directly (snapshot restoration)
    pub(crate) fn restore_position(&mut self, x: f32, bottom: f32) {
        self.x = x.max(0.0);
        self.bottom = bottom.max(0.0);
    }

    fn tick_timers(&mut self) {
        if let Some(speech) = &mut self.speech {
            speech.ticks_left = speech.ticks_left.saturating_sub(1);
            if speech.ticks_left == 0 {
                self.speech = None;
            }
        }
        self.swipe_cue_ticks = self.swipe_cue_ticks.saturating_sub(1);
    }

    /// Catch check against one unclaimed ball
    fn try_catch(&mut self, ball: &mut Ball, floor_y: f32, rng: &mut Pcg32) -> Option<u32> {
        let distance = (ball.center_x() - self.center_x()).abs();
        let head_y = floor_y - self.bottom - self.size.height();
        let head_offset = (ball.pos.y + BALL_SIZE / 2.0 - head_y).abs();

        let floor_catch = ball.on_floor(floor_y) && distance < FLOOR_CATCH_RADIUS;
        let air_catch =
            !ball.on_floor(floor_y) && distance < AIR_CATCH_RADIUS && head_offset < AIR_CATCH_HEAD_TOLERANCE;

        if floor_catch || air_catch {
            ball.claim();
            self.transition(States::IdleWithBall, rng);
            return Some(ball.id);
        }
        None
    }

    /// Drop a creature that left the wall chain with altitude remaining
    fn settle_toward_floor(&mut self) {
        if self.bottom > 0.0 && !self.behavior.state().holds_wall() {
            self.bottom = (self.bottom - self.species.fall_speed.max(0.1)).max(0.0);
        }
    }

    /// Move toward the ball's horizontal position at the fixed speed; a
    /// small dead-zone suppresses jitter once aligned
    fn chase_toward(&mut self, target_x: f32) {
        self.settle_toward_floor();
        let dx = target_x - self.center_x();
        if dx.abs() <= CHASE_DEADZONE {
            return;
        }
        if dx < 0.0 {
            self.facing = HorizontalDirection::Left;
            self.x -= self.speed;
        } else {
            self.facing = HorizontalDirection::Right;
            self.x += self.speed;
        }
        let (clamped, _) = crate::clamp_to_span(self.x, self.container_width, self.width());
        self.x = clamped;
    }

    /// Ordinary graph-driven stepping: vertical motion, horizontal
    /// translation with edge mirroring, then the frame counter
    fn step_state_machine(&mut self, rng: &mut Pcg32) {
        let mut landed = false;
        match self.behavior.vertical() {
            VerticalMotion::Climb { speed, limit } => {
                self.bottom = (self.bottom + speed).min(limit);
            }
            VerticalMotion::Fall { speed } => {
                self.bottom = (self.bottom - speed).max(0.0);
                landed = self.bottom == 0.0;
            }
            VerticalMotion::None => self.settle_toward_floor(),
        }

        if self.behavior.state().is_walking() {
            let dir = match self.behavior.direction() {
                HorizontalDirection::Left => -1.0,
                HorizontalDirection::Right => 1.0,
                HorizontalDirection::None => 0.0,
            };
            self.facing = self.behavior.direction();
            self.x += self.speed * self.behavior.speed_factor() * dir;
            let (clamped, hit_edge) = crate::clamp_to_span(self.x, self.container_width, self.width());
            self.x = clamped;
            if hit_edge {
                // Reverse direction exactly once and re-enter the resolver
                self.transition(self.behavior.state().mirrored(), rng);
                return;
            }
        } else if self.behavior.direction() != HorizontalDirection::None {
            self.facing = self.behavior.direction();
        }

        if landed || self.behavior.next_frame() == FrameResult::Complete {
            let next = self.species.graph.next_state(self.behavior.state(), rng);
            self.transition(next, rng);
        }
    }

    fn transition(&mut self, state: States, rng: &mut Pcg32) {
        self.behavior = states::resolve(state, self.species, self.bottom, rng);
        self.sprite_dirty = true;
    }
}
