//! Snowfall
//!
//! Flakes drift down with a sideways sway and respawn at the top once
//! they cross the floor line. Unlike leaves there is no rest period -
//! snow just keeps coming. Resizing repositions the pool so a widened
//! viewport fills immediately instead of waiting a full fall cycle.

use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::EFFECT_MAX_TIME_DELTA;
use crate::sim::species::PetSize;

use super::{Effect, ParticleView, Viewport};

/// Flake color against a dark host theme
const SNOW_DARK: &str = "#FFFFFF";
/// Flake color against a light host theme
const SNOW_LIGHT: &str = "#B8C4D9";

#[derive(Debug)]
struct Snowflake {
    origin_x: f32,
    position: Vec2,
    fall_speed: f32,
    sway: f32,
    amplitude: f32,
    phase: f32,
    size: f32,
}

impl Snowflake {
    fn update(&mut self, dt: f32) {
        self.position.y += self.fall_speed * dt;
        self.phase += self.sway * dt;
        self.position.x = self.origin_x + self.amplitude * self.phase.sin();
    }
}

pub struct SnowEffect {
    rng: Pcg32,
    particles: Vec<Snowflake>,
    running: bool,
    frame_time: f64,
    viewport: Viewport,
    floor: f32,
    color: &'static str,
    p_amount: usize,
    p_size: [f32; 2],
    p_speed: [f32; 2],
}

impl SnowEffect {
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
            color: SNOW_DARK,
            p_amount: 100,
            p_size: [2.0, 4.0],
            p_speed: [20.0, 60.0],
        }
    }

    fn spawn_flake(&mut self, anywhere: bool) -> Snowflake {
        let origin_x = self.rng.random_range(0.0..self.viewport.width.max(1.0));
        let y = if anywhere {
            self.rng.random_range(-self.viewport.height.max(1.0)..self.viewport.height.max(1.0))
        } else {
            -self.rng.random_range(self.p_size[0]..self.p_size[1])
        };
        Snowflake {
            origin_x,
            position: Vec2::new(origin_x, y),
            fall_speed: self.rng.random_range(self.p_speed[0]..self.p_speed[1]),
            sway: self.rng.random_range(0.3..1.5),
            amplitude: self.rng.random_range(2.0..12.0),
            phase: self.rng.random_range(0.0..std::f32::consts::TAU),
            size: self.rng.random_range(self.p_size[0]..self.p_size[1]),
        }
    }

    fn init_particles(&mut self) {
        self.particles.clear();
        for _ in 0..self.p_amount {
            let flake = self.spawn_flake(true);
            self.particles.push(flake);
        }
    }
}

impl Effect for SnowEffect {
    fn name(&self) -> &'static str {
        "Snow"
    }

    fn init(&mut self, viewport: Viewport, size: PetSize, floor: f32, dark_theme: bool) {
        self.viewport = viewport;
        self.floor = floor;
        self.color = if dark_theme { SNOW_DARK } else { SNOW_LIGHT };

        match size {
            PetSize::Nano => {
                self.p_amount = 150;
                self.p_size = [1.0, 3.0];
            }
            PetSize::Small => {
                self.p_amount = 100;
                self.p_size = [2.0, 4.0];
            }
            PetSize::Medium => {
                self.p_amount = 60;
                self.p_size = [3.0, 6.0];
            }
            PetSize::Large => {
                self.p_amount = 40;
                self.p_size = [4.0, 8.0];
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

        for i in 0..self.particles.len() {
            self.particles[i].update(dt);
            if self.particles[i].position.y - self.particles[i].size > floor_line {
                let flake = self.spawn_flake(false);
                self.particles[i] = flake;
            }
        }

        self.frame_time = now;
    }

    /// Snow repositions so a resized viewport fills immediately
    fn handle_resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.init_particles();
    }

    fn for_each_particle(&self, f: &mut dyn FnMut(ParticleView)) {
        for flake in &self.particles {
            f(ParticleView {
                pos: flake.position,
                size: flake.size,
                rotation: 0.0,
                opacity: 1.0,
                color: self.color,
            });
        }
    }
}
