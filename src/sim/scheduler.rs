//! The per-view simulation scheduler
//!
//! Owns the authoritative creature and ball lists for one view and runs
//! the per-frame tick: width-cache refresh, floor computation, catch
//! scan, ball physics and filtering, then the friend-seeking pass. All
//! configuration that can change at runtime (viewport, theme, size,
//! clock) arrives in the [`TickContext`] each tick; nothing is read from
//! ambient globals.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use thiserror::Error;

use crate::assets::{AssetResolver, MediaPathResolver};
use crate::consts::*;
use crate::persistence::PetSnapshotEntry;
use crate::theme::Theme;

use super::ball::Ball;
use super::creature::{Creature, CreatureId};
use super::species::{self, PetColor, PetSize, SpeciesKind};

/// Host-supplied configuration for one tick
#[derive(Debug, Clone)]
pub struct TickContext {
    pub view_width: f32,
    pub view_height: f32,
    pub theme: Theme,
    pub size: PetSize,
    /// Wall-clock time in milliseconds (ball lifetimes)
    pub now_ms: f64,
}

impl TickContext {
    /// Floor line in viewport pixels for this tick's theme and size
    pub fn floor_y(&self) -> f32 {
        crate::floor_line(self.view_height, self.theme.floor_percent(self.size))
    }
}

/// Why a spawn request was rejected
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpawnError {
    #[error("pet capacity ({0}) reached")]
    CapacityReached(usize),
}

/// A request to spawn one pet. `color`/`name` default to the first palette
/// entry and a random pool name.
#[derive(Debug, Clone)]
pub struct SpawnRequest {
    pub species: SpeciesKind,
    pub color: Option<PetColor>,
    pub size: PetSize,
    pub name: Option<String>,
    pub start_x: f32,
}

/// Per-view owner of the simulation loop
pub struct Scheduler {
    creatures: Vec<Creature>,
    balls: Vec<Ball>,
    rng: Pcg32,
    resolver: Box<dyn AssetResolver>,
    next_creature_id: CreatureId,
    next_ball_id: u32,
    paused: bool,
    running: bool,
}

impl Scheduler {
    pub fn new(seed: u64) -> Self {
        Self::with_resolver(seed, Box::new(MediaPathResolver::default()))
    }

    pub fn with_resolver(seed: u64, resolver: Box<dyn AssetResolver>) -> Self {
        Self {
            creatures: Vec::new(),
            balls: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            resolver,
            next_creature_id: 1,
            next_ball_id: 1,
            paused: false,
            running: true,
        }
    }

    // --- lifecycle -----------------------------------------------------------

    /// Spawn a pet. The newest request is rejected once the cap is hit;
    /// an out-of-palette color is substituted with the first available one.
    pub fn spawn(&mut self, req: SpawnRequest) -> Result<CreatureId, SpawnError> {
        if self.creatures.len() >= MAX_PETS {
            log::warn!("pet capacity ({MAX_PETS}) reached, spawn rejected");
            return Err(SpawnError::CapacityReached(MAX_PETS));
        }

        let color = match req.color {
            Some(want) => species::resolve_color(req.species, want),
            None => species::available_colors(req.species)[0],
        };
        let name = req
            .name
            .unwrap_or_else(|| species::random_name(req.species, &mut self.rng).to_string());

        let id = self.next_creature_id;
        self.next_creature_id += 1;
        let creature = Creature::new(id, req.species, color, req.size, name, req.start_x, &mut self.rng);
        log::info!(
            "spawned {} \"{}\" (id {id})",
            creature.species().label,
            creature.name()
        );
        self.creatures.push(creature);
        Ok(id)
    }

    /// Remove a pet, clearing any friend links that point at it
    pub fn remove(&mut self, id: CreatureId) -> bool {
        let before = self.creatures.len();
        self.creatures.retain(|c| c.id() != id);
        if self.creatures.len() == before {
            return false;
        }
        for c in &mut self.creatures {
            if c.friend() == Some(id) {
                c.clear_friend();
            }
        }
        true
    }

    /// Remove every pet and ball
    pub fn clear(&mut self) {
        self.creatures.clear();
        self.balls.clear();
    }

    /// Throw a ball from the given point. At the cap the oldest ball is
    /// evicted to make room - unlike pets, where the newest request loses.
    pub fn throw_ball(&mut self, start: Vec2, now_ms: f64) -> u32 {
        if self.balls.len() >= MAX_BALLS {
            let evicted = self.balls.remove(0);
            log::debug!("ball capacity ({MAX_BALLS}) reached, evicting ball {}", evicted.id);
        }
        let id = self.next_ball_id;
        self.next_ball_id += 1;
        self.balls.push(Ball::thrown(id, start, now_ms, &mut self.rng));
        id
    }

    /// Show the species greeting over a pet's head
    pub fn greet(&mut self, id: CreatureId) -> bool {
        match self.creature_mut(id) {
            Some(c) => {
                c.greet();
                true
            }
            None => false,
        }
    }

    /// Trigger a swipe if the species can
    pub fn swipe(&mut self, id: CreatureId) -> bool {
        let rng = &mut self.rng;
        match self.creatures.iter_mut().find(|c| c.id() == id) {
            Some(c) => c.swipe(rng),
            None => false,
        }
    }

    // --- loop control --------------------------------------------------------

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// One-way stop flag, checked by the host before each reschedule
    pub fn shutdown(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    // --- the tick ------------------------------------------------------------

    /// Advance one frame. Returns whether the host should schedule the
    /// next frame; pausing short-circuits the work but keeps the loop
    /// alive so resuming is seamless.
    pub fn tick(&mut self, ctx: &TickContext) -> bool {
        if !self.running {
            return false;
        }
        if self.paused {
            return true;
        }

        let floor_y = ctx.floor_y();

        // Viewport may have resized since last frame
        for c in &mut self.creatures {
            c.set_container_width(ctx.view_width);
        }

        // Creatures react to balls first; a catch claims the ball in place
        for c in &mut self.creatures {
            c.advance(floor_y, &mut self.balls, &mut self.rng);
        }

        // Retire caught balls, then advance and filter the rest
        self.balls.retain(|b| !b.is_caught());
        self.balls
            .retain_mut(|b| b.advance(ctx.view_height, ctx.view_width, floor_y) && !b.is_expired(ctx.now_ms));

        self.friend_seeking_pass();

        // One resolver call per state change, skipped when the handle is
        // unchanged
        for c in &mut self.creatures {
            c.refresh_sprite(&*self.resolver);
        }

        true
    }

    /// Pair up nearby friendless pets. Greedy and order-dependent on
    /// purpose: the feature is decorative, not a matching algorithm.
    fn friend_seeking_pass(&mut self) {
        let friendless = self.creatures.iter().filter(|c| c.friend().is_none()).count();
        if friendless < 2 {
            return;
        }

        let mut pairs: Vec<(usize, usize)> = Vec::new();
        for (i, a) in self.creatures.iter().enumerate() {
            if a.friend().is_some() {
                continue;
            }
            for (j, b) in self.creatures.iter().enumerate() {
                if i == j || b.friend().is_some() || !b.is_available() {
                    continue;
                }
                if b.span_contains(a.x()) {
                    pairs.push((i, j));
                    break;
                }
            }
        }

        for (i, j) in pairs {
            let a_id = self.creatures[i].id();
            let b_id = self.creatures[j].id();
            self.creatures[i].make_friends_with(b_id);
            self.creatures[j].make_friends_with(a_id);
            self.creatures[i].greet();
            self.creatures[j].greet();
            log::info!(
                "{} and {} are friends now",
                self.creatures[i].name(),
                self.creatures[j].name()
            );
        }
    }

    // --- queries -------------------------------------------------------------

    pub fn creatures(&self) -> &[Creature] {
        &self.creatures
    }

    pub fn creature(&self, id: CreatureId) -> Option<&Creature> {
        self.creatures.iter().find(|c| c.id() == id)
    }

    fn creature_mut(&mut self, id: CreatureId) -> Option<&mut Creature> {
        self.creatures.iter_mut().find(|c| c.id() == id)
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    // --- persistence ---------------------------------------------------------

    /// Capture the current pets (and their friendships, by name) for the
    /// persistence store
    pub fn snapshot(&self) -> Vec<PetSnapshotEntry> {
        self.creatures
            .iter()
            .map(|c| PetSnapshotEntry {
                species: c.kind(),
                color: c.color(),
                size: c.size(),
                name: c.name().to_string(),
                friend_name: c
                    .friend()
                    .and_then(|id| self.creature(id))
                    .map(|f| f.name().to_string()),
                x: c.x(),
                bottom: c.bottom(),
            })
            .collect()
    }

    /// Restore pets from a snapshot in two passes: instantiate everything
    /// first, then re-link friends by name (the referenced pet may not
    /// exist yet during the first pass). A failed entry is skipped; it
    /// never aborts the rest.
    pub fn restore(&mut self, entries: &[PetSnapshotEntry]) {
        let mut links: Vec<(CreatureId, String)> = Vec::new();

        for entry in entries {
            let req = SpawnRequest {
                species: entry.species,
                color: Some(entry.color),
                size: entry.size,
                name: Some(entry.name.clone()),
                start_x: entry.x,
            };
            match self.spawn(req) {
                Ok(id) => {
                    if let Some(c) = self.creature_mut(id) {
                        c.restore_position(entry.x, entry.bottom);
                    }
                    if let Some(friend) = &entry.friend_name {
                        links.push((id, friend.clone()));
                    }
                }
                Err(err) => {
                    log::warn!("skipping snapshot entry \"{}\": {err}", entry.name);
                }
            }
        }

        for (id, friend_name) in links {
            let friend_id = self
                .creatures
                .iter()
                .find(|c| c.name() == friend_name && c.id() != id)
                .map(|c| c.id());
            match friend_id {
                Some(friend_id) => {
                    if let Some(c) = self.creature_mut(id) {
                        c.make_friends_with(friend_id);
                    }
                }
                None => {
                    log::warn!("snapshot friend \"{friend_name}\" not found, dropping link");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::states::States;

    fn ctx(now_ms: f64) -> TickContext {
        TickContext {
            view_width: 800.0,
            view_height: 600.0,
            theme: Theme::None,
            size: PetSize::Small,
            now_ms,
        }
    }

    fn dog_at(x: f32) -> SpawnRequest {
        SpawnRequest {
            species: SpeciesKind::Dog,
            color: Some(PetColor::Brown),
            size: PetSize::Small,
            name: None,
            start_x: x,
        }
    }

    #[test]
    fn test_pet_cap_rejects_newest() {
        let mut s = Scheduler::new(1);
        for _ in 0..MAX_PETS {
            s.spawn(dog_at(100.0)).unwrap();
        }
        assert_eq!(
            s.spawn(dog_at(100.0)),
            Err(SpawnError::CapacityReached(MAX_PETS))
        );
        assert_eq!(s.creatures().len(), MAX_PETS);
    }

    #[test]
    fn test_ball_cap_evicts_oldest() {
        let mut s = Scheduler::new(1);
        let first = s.throw_ball(Vec2::new(100.0, 100.0), 0.0);
        for _ in 0..MAX_BALLS - 1 {
            s.throw_ball(Vec2::new(100.0, 100.0), 0.0);
        }
        assert_eq!(s.balls().len(), MAX_BALLS);
        let newest = s.throw_ball(Vec2::new(100.0, 100.0), 0.0);
        assert_eq!(s.balls().len(), MAX_BALLS);
        assert!(s.balls().iter().all(|b| b.id != first));
        assert!(s.balls().iter().any(|b| b.id == newest));
    }

    #[test]
    fn test_at_most_one_catch_per_ball() {
        let mut s = Scheduler::new(1);
        // Two dogs standing on the same spot as the ball
        s.spawn(dog_at(100.0)).unwrap();
        s.spawn(dog_at(100.0)).unwrap();
        s.throw_ball(Vec2::new(115.0, 595.0), 0.0);
        // Drop the ball onto the floor so it's catchable immediately
        s.balls[0].pos.y = 585.0;
        s.balls[0].vel = Vec2::ZERO;

        s.tick(&ctx(16.0));

        let holders = s
            .creatures()
            .iter()
            .filter(|c| c.state() == States::IdleWithBall)
            .count();
        assert_eq!(holders, 1);
        assert!(s.balls().is_empty(), "caught ball must be retired");
    }

    #[test]
    fn test_expired_ball_removed_on_next_pass() {
        let mut s = Scheduler::new(1);
        s.throw_ball(Vec2::new(400.0, 100.0), 0.0);
        s.tick(&ctx(16.0));
        assert_eq!(s.balls().len(), 1);
        s.tick(&ctx(BALL_MAX_LIFETIME_MS + 1.0));
        assert!(s.balls().is_empty());
    }

    #[test]
    fn test_overlapping_friendless_pets_pair_up() {
        let mut s = Scheduler::new(1);
        let a = s.spawn(dog_at(100.0)).unwrap();
        let b = s.spawn(dog_at(110.0)).unwrap();
        s.tick(&ctx(16.0));
        assert_eq!(s.creature(a).unwrap().friend(), Some(b));
        assert_eq!(s.creature(b).unwrap().friend(), Some(a));
        assert!(s.creature(a).unwrap().speech().is_some());
        assert!(s.creature(b).unwrap().speech().is_some());
    }

    #[test]
    fn test_distant_pets_stay_friendless() {
        let mut s = Scheduler::new(1);
        let a = s.spawn(dog_at(0.0)).unwrap();
        let b = s.spawn(dog_at(700.0)).unwrap();
        s.tick(&ctx(16.0));
        assert_eq!(s.creature(a).unwrap().friend(), None);
        assert_eq!(s.creature(b).unwrap().friend(), None);
    }

    #[test]
    fn test_removal_clears_friend_links() {
        let mut s = Scheduler::new(1);
        let a = s.spawn(dog_at(100.0)).unwrap();
        let b = s.spawn(dog_at(110.0)).unwrap();
        s.tick(&ctx(16.0));
        assert_eq!(s.creature(a).unwrap().friend(), Some(b));
        assert!(s.remove(b));
        assert_eq!(s.creature(a).unwrap().friend(), None);
    }

    #[test]
    fn test_pause_short_circuits_but_reschedules() {
        let mut s = Scheduler::new(1);
        let id = s.spawn(dog_at(100.0)).unwrap();
        s.pause();
        let state = s.creature(id).unwrap().state();
        let x = s.creature(id).unwrap().x();
        for i in 0..500 {
            assert!(s.tick(&ctx(i as f64 * 16.0)));
        }
        assert_eq!(s.creature(id).unwrap().state(), state);
        assert_eq!(s.creature(id).unwrap().x(), x);
        s.resume();
        assert!(s.tick(&ctx(0.0)));
    }

    #[test]
    fn test_shutdown_is_one_way() {
        let mut s = Scheduler::new(1);
        s.shutdown();
        assert!(!s.tick(&ctx(0.0)));
        assert!(!s.is_running());
    }

    #[test]
    fn test_color_fallback_on_spawn() {
        let mut s = Scheduler::new(1);
        let id = s
            .spawn(SpawnRequest {
                species: SpeciesKind::Crab,
                color: Some(PetColor::Purple),
                size: PetSize::Small,
                name: None,
                start_x: 10.0,
            })
            .unwrap();
        assert_eq!(s.creature(id).unwrap().color(), PetColor::Red);
    }

    #[test]
    fn test_snapshot_restore_relinks_friends() {
        let mut s = Scheduler::new(1);
        let a = s.spawn(dog_at(100.0)).unwrap();
        let b = s.spawn(dog_at(110.0)).unwrap();
        s.tick(&ctx(16.0));
        assert!(s.creature(a).unwrap().friend().is_some());
        let entries = s.snapshot();

        let mut restored = Scheduler::new(2);
        restored.restore(&entries);
        assert_eq!(restored.creatures().len(), 2);
        let ra = &restored.creatures()[0];
        let rb = &restored.creatures()[1];
        assert_eq!(ra.friend(), Some(rb.id()));
        assert_eq!(rb.friend(), Some(ra.id()));
    }

    #[test]
    fn test_restore_with_missing_friend_name() {
        let mut entries = vec![PetSnapshotEntry {
            species: SpeciesKind::Fox,
            color: PetColor::Red,
            size: PetSize::Small,
            name: "Foxy".into(),
            friend_name: Some("Ghost".into()),
            x: 50.0,
            bottom: 0.0,
        }];
        let mut s = Scheduler::new(3);
        s.restore(&entries);
        assert_eq!(s.creatures().len(), 1);
        assert_eq!(s.creatures()[0].friend(), None);

        // And a resolvable link restores exactly one relation
        entries.push(PetSnapshotEntry {
            species: SpeciesKind::Fox,
            color: PetColor::Red,
            size: PetSize::Small,
            name: "Ghost".into(),
            friend_name: Some("Foxy".into()),
            x: 60.0,
            bottom: 0.0,
        });
        let mut s = Scheduler::new(3);
        s.restore(&entries);
        assert_eq!(s.creatures().len(), 2);
        assert!(s.creatures()[1].friend().is_some());
    }

    #[test]
    fn test_restore_positions_carry_over() {
        let entries = vec![PetSnapshotEntry {
            species: SpeciesKind::Squirrel,
            color: PetColor::Gray,
            size: PetSize::Small,
            name: "Twiggy".into(),
            friend_name: None,
            x: 321.0,
            bottom: 40.0,
        }];
        let mut s = Scheduler::new(4);
        s.restore(&entries);
        assert_eq!(s.creatures()[0].x(), 321.0);
        assert_eq!(s.creatures()[0].bottom(), 40.0);
    }
}
