//! Falling autumn leaves
//!
//! Leaves fall while oscillating around their origin column and rotating.
//! A leaf reaching the floor settles for a randomized 4-7 second rest,
//! then recycles to a random origin above the canvas and falls again -
//! a fixed-size pool that reads as a continuous, non-repeating flow.

use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::EFFECT_MAX_TIME_DELTA;
use crate::sim::species::PetSize;

use super::{Effect, ParticleView, Viewport};

/// Autumn palette the host paints leaves with
pub const LEAF_COLORS: [&str; 4] = ["#D7A50F", "#704910", "#A22D16", "#BB8144"];

#[derive(Debug)]
struct Leaf {
    origin: Vec2,
    position: Vec2,
    velocity: Vec2,
    size: f32,
    amplitude: f32,
    dx: f32,
    rotation: f32,
    rotation_speed: f32,
    color: &'static str,
    settled: bool,
    settle_time: f32,
    settle_duration: f32,
}

impl Leaf {
    fn update(&mut self, dt: f32) {
        if self.settled {
            self.settle_time += dt;
            return;
        }

        self.position.y += self.velocity.y * dt;

        // Oscillate x between -amplitude and +amplitude around the origin
        self.dx += self.velocity.x * dt;
        self.position.x = self.origin.x + self.amplitude * self.dx.sin();

        self.rotation += self.rotation_speed * dt;
    }
}

pub struct LeavesEffect {
    rng: Pcg32,
    particles: Vec<Leaf>,
    running: bool,
    frame_time: f64,
    viewport: Viewport,
    floor: f32,
    p_amount: usize,
    p_size: [f32; 2],
    p_swing: [f32; 2],
    p_speed: [f32; 2],
    p_amplitude: [f32; 2],
    p_rotation_speed: [f32; 2],
    tree_line_height: f32,
}

impl LeavesEffect {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            particles: Vec::new(),
            running: false,
            frame_time: 0.0,
            viewport: Viewport {
                width: 0.0,
                height: 0.0,
            },
            floor: 0.0,
            p_amount: 50,
            p_size: [10.0, 15.0],
            p_swing: [0.1, 1.0],
            p_speed: [10.0, 30.0],
            p_amplitude: [5.0, 20.0],
            p_rotation_speed: [0.5, 2.0],
            tree_line_height: 120.0,
        }
    }

    fn init_particles(&mut self) {
        self.particles.clear();
        for _ in 0..self.p_amount {
            let origin = Vec2::new(
                self.rng.random_range(0.0..self.viewport.width.max(1.0)),
                self.rng
                    .random_range(-self.viewport.height.max(1.0)..self.tree_line_height),
            );
            let velocity = Vec2::new(
                self.rng.random_range(self.p_swing[0]..self.p_swing[1]),
                self.rng.random_range(self.p_speed[0]..self.p_speed[1]),
            );
            let settle_duration = self.rng.random_range(4.0..7.0);
            let leaf = Leaf {
                origin,
                position: origin,
                velocity,
                size: self.rng.random_range(self.p_size[0]..self.p_size[1]),
                amplitude: self
                    .rng
                    .random_range(self.p_amplitude[0]..self.p_amplitude[1]),
                dx: self.rng.random_range(0.0..100.0),
                rotation: self.rng.random_range(0.0..std::f32::consts::TAU),
                rotation_speed: self
                    .rng
                    .random_range(self.p_rotation_speed[0]..self.p_rotation_speed[1]),
                color: LEAF_COLORS[self.rng.random_range(0..LEAF_COLORS.len())],
                settled: false,
                settle_time: 0.0,
                settle_duration,
            };
            self.particles.push(leaf);
        }
    }
}

impl Effect for LeavesEffect {
    fn name(&self) -> &'static str {
        "Leaves"
    }

    fn init(&mut self, viewport: Viewport, size: PetSize, floor: f32, _dark_theme: bool) {
        self.viewport = viewport;
        self.floor = floor;

        match size {
            PetSize::Nano => {
                self.p_size = [7.0, 10.0];
                self.p_amount = 100;
                self.tree_line_height = 93.5;
            }
            PetSize::Small => {
                self.p_size = [10.0, 15.0];
                self.p_amount = 50;
                self.tree_line_height = 120.0;
            }
            PetSize::Medium => {
                self.p_size = [13.0, 18.0];
                self.p_amount = 25;
                self.tree_line_height = 187.5;
            }
            PetSize::Large => {
                self.p_size = [17.0, 24.0];
                self.p_amount = 15;
                self.tree_line_height = 250.0;
            }
        }
        self.init_particles();
    }

    fn enable(&mut self, now: f64) {
        self.running = true;
        self.frame_time = now;
    }

    fn disable(&mut self) {
        self.running = false;
    }

    fn is_enabled(&self) -> bool {
        self.running
    }

    fn frame(&mut self, now: f64) {
        if !self.running {
            return;
        }
        let dt = (now - self.frame_time).min(EFFECT_MAX_TIME_DELTA) as f32;
        let floor_line = self.viewport.height - self.floor;

        for leaf in &mut self.particles {
            leaf.update(dt);

            // Reached the floor: start the rest period
            if !leaf.settled && leaf.position.y + leaf.size >= floor_line {
                leaf.settled = true;
                leaf.settle_time = 0.0;
            }

            // Rested long enough: recycle above the canvas
            if leaf.settled && leaf.settle_time >= leaf.settle_duration {
                leaf.settled = false;
                leaf.position.y = -leaf.size;
                let new_x = self.rng.random_range(0.0..self.viewport.width.max(1.0));
                leaf.position.x = new_x;
                leaf.origin.x = new_x;
                leaf.dx = self.rng.random_range(0.0..100.0);
                leaf.rotation = self.rng.random_range(0.0..std::f32::consts::TAU);
                leaf.settle_duration = self.rng.random_range(4.0..7.0);
            }
        }

        self.frame_time = now;
    }

    fn handle_resize(&mut self, _viewport: Viewport) {}

    fn for_each_particle(&self, f: &mut dyn FnMut(ParticleView)) {
        for leaf in &self.particles {
            f(ParticleView {
                pos: leaf.position,
                size: leaf.size,
                rotation: leaf.rotation,
                opacity: 1.0,
                color: leaf.color,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport {
            width: 400.0,
            height: 300.0,
        }
    }

    fn effect() -> LeavesEffect {
        let mut e = LeavesEffect::new(5);
        e.init(viewport(), PetSize::Small, 0.0, false);
        e.enable(0.0);
        e
    }

    #[test]
    fn test_per_size_particle_tables() {
        let mut e = LeavesEffect::new(1);
        e.init(viewport(), PetSize::Nano, 0.0, false);
        assert_eq!(e.particles.len(), 100);
        e.init(viewport(), PetSize::Large, 0.0, false);
        assert_eq!(e.particles.len(), 15);
    }

    #[test]
    fn test_leaves_fall_and_stay_near_origin_column() {
        let mut e = effect();
        let origins: Vec<f32> = e.particles.iter().map(|l| l.origin.x).collect();
        let mut now = 0.0;
        for _ in 0..20 {
            now += 0.05;
            e.frame(now);
        }
        for (leaf, origin_x) in e.particles.iter().zip(origins) {
            assert!((leaf.position.x - origin_x).abs() <= leaf.amplitude + 0.01);
        }
        assert!(e.particles.iter().any(|l| l.velocity.y > 0.0));
    }

    #[test]
    fn test_settle_then_recycle() {
        let mut e = effect();
        // Park the first leaf just above the floor line
        e.particles[0].position.y = 300.0 - e.particles[0].size - 0.5;
        let mut now = 0.0;
        now += 0.1;
        e.frame(now);
        assert!(e.particles[0].settled, "leaf should settle at the floor");

        // Rest duration is at most 7 seconds; step until the recycle fires
        let mut recycled = false;
        for _ in 0..80 {
            now += 0.1;
            e.frame(now);
            if !e.particles[0].settled {
                recycled = true;
                break;
            }
        }
        assert!(recycled, "leaf should recycle after its rest");
        let leaf = &e.particles[0];
        assert!(leaf.position.y <= 0.0, "recycled leaf starts above the canvas");
        assert!((4.0..7.0).contains(&leaf.settle_duration));
    }

    #[test]
    fn test_stall_delta_is_capped() {
        let mut e = effect();
        let y_before: Vec<f32> = e.particles.iter().map(|l| l.position.y).collect();
        // A 10 second stall must advance at most one capped step
        e.frame(10.0);
        for (leaf, before) in e.particles.iter().zip(y_before) {
            assert!(leaf.position.y - before <= leaf.velocity.y * 0.1 + 0.001);
        }
    }

    #[test]
    fn test_disable_freezes_particles() {
        let mut e = effect();
        e.frame(0.05);
        e.disable();
        let positions: Vec<Vec2> = e.particles.iter().map(|l| l.position).collect();
        e.frame(1.0);
        for (leaf, pos) in e.particles.iter().zip(positions) {
            assert_eq!(leaf.position, pos);
        }
    }
}
