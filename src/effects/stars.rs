//! Starfield
//!
//! Stars hold fixed positions in the upper part of the viewport and
//! twinkle by oscillating opacity, each on its own phase. The field
//! ignores resizes; stars outside a shrunken viewport are simply
//! clipped by the host.

use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::EFFECT_MAX_TIME_DELTA;
use crate::sim::species::PetSize;

use super::{Effect, ParticleView, Viewport};

const STAR_DARK: &str = "#FFF7C9";
const STAR_LIGHT: &str = "#8A8FA8";

#[derive(Debug)]
struct Star {
    position: Vec2,
    size: f32,
    phase: f32,
    twinkle_speed: f32,
}

pub struct StarsEffect {
    rng: Pcg32,
    particles: Vec<Star>,
    running: bool,
    frame_time: f64,
    time: f32,
    color: &'static str,
    p_amount: usize,
    p_size: [f32; 2],
}

impl StarsEffect {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            particles: Vec::new(),
            running: false,
            frame_time: 0.0,
            time: 0.0,
            color: STAR_DARK,
            p_amount: 60,
            p_size: [1.0, 3.0],
        }
    }

    fn opacity(&self, star: &Star) -> f32 {
        0.35 + 0.65 * (0.5 + 0.5 * (star.phase + self.time * star.twinkle_speed).sin())
    }
}

impl Effect for StarsEffect {
    fn name(&self) -> &'static str {
        "Stars"
    }

    fn init(&mut self, viewport: Viewport, size: PetSize, _floor: f32, dark_theme: bool) {
        self.color = if dark_theme { STAR_DARK } else { STAR_LIGHT };
        match size {
            PetSize::Nano => {
                self.p_amount = 80;
                self.p_size = [1.0, 2.0];
            }
            PetSize::Small => {
                self.p_amount = 60;
                self.p_size = [1.0, 3.0];
            }
            PetSize::Medium => {
                self.p_amount = 40;
                self.p_size = [2.0, 4.0];
            }
            PetSize::Large => {
                self.p_amount = 24;
                self.p_size = [3.0, 5.0];
            }
        }

        self.particles.clear();
        // Keep stars in the sky: top two thirds of the viewport
        let sky = viewport.height * (2.0 / 3.0);
        for _ in 0..self.p_amount {
            let star = Star {
                position: Vec2::new(
                    self.rng.random_range(0.0..viewport.width.max(1.0)),
                    self.rng.random_range(0.0..sky.max(1.0)),
                ),
                size: self.rng.random_range(self.p_size[0]..self.p_size[1]),
                phase: self.rng.random_range(0.0..std::f32::consts::TAU),
                twinkle_speed: self.rng.random_range(0.5..2.5),
            };
            self.particles.push(star);
        }
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
        self.time += dt;
        self.frame_time = now;
    }

    fn handle_resize(&mut self, _viewport: Viewport) {}

    fn for_each_particle(&self, f: &mut dyn FnMut(ParticleView)) {
        for star in &self.particles {
            f(ParticleView {
                pos: star.position,
                size: star.size,
                rotation: 0.0,
                opacity: self.opacity(star),
                color: self.color,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn effect() -> StarsEffect {
        let mut e = StarsEffect::new(4);
        e.init(
            Viewport {
                width: 600.0,
                height: 300.0,
            },
            PetSize::Small,
            0.0,
            true,
        );
        e.enable(0.0);
        e
    }

    #[test]
    fn test_stars_stay_in_the_sky() {
        let e = effect();
        assert_eq!(e.particles.len(), 60);
        assert!(e.particles.iter().all(|s| s.position.y <= 200.0));
    }

    #[test]
    fn test_twinkle_changes_opacity_over_time() {
        let mut e = effect();
        let star = &e.particles[0];
        let before = e.opacity(star);
        let mut now = 0.0;
        for _ in 0..10 {
            now += 0.1;
            e.frame(now);
        }
        let after = e.opacity(&e.particles[0]);
        assert_ne!(before, after);
        assert!((0.0..=1.0).contains(&after));
    }

    #[test]
    fn test_positions_are_static() {
        let mut e = effect();
        let positions: Vec<Vec2> = e.particles.iter().map(|s| s.position).collect();
        e.frame(0.5);
        e.handle_resize(Viewport {
            width: 100.0,
            height: 100.0,
        });
        for (star, pos) in e.particles.iter().zip(positions) {
            assert_eq!(star.position, pos);
        }
    }
}
