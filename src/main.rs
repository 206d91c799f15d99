//! Headless demo driver
//!
//! Spawns a handful of pets, throws a ball partway through, and runs the
//! simulation for one simulated minute at 60 FPS, logging what happens.
//! Useful for eyeballing engine behavior without a host UI.

use glam::Vec2;

use vault_pets::effects::{DrawSurface, EffectController, EffectKind, Viewport};
use vault_pets::sim::{Scheduler, SpawnRequest, SpeciesKind, TickContext};
use vault_pets::{Settings, persistence};

/// The demo has nothing to paint on; clearing is a no-op
struct NullSurface;

impl DrawSurface for NullSurface {
    fn clear(&mut self) {}
}

fn main() {
    env_logger::init();

    let settings = Settings::default();
    let view = Viewport {
        width: 800.0,
        height: 600.0,
    };

    let mut scheduler = Scheduler::new(0x5EED);
    for species in [SpeciesKind::Dog, SpeciesKind::Squirrel, SpeciesKind::Crab] {
        let request = SpawnRequest {
            species,
            color: None,
            size: settings.pet_size,
            name: None,
            start_x: view.width / 2.0,
        };
        if let Err(err) = scheduler.spawn(request) {
            log::error!("spawn failed: {err}");
        }
    }

    let mut effects = EffectController::new(1);
    let (mut fg, mut bg) = (NullSurface, NullSurface);
    effects.set_effect(
        Some(EffectKind::Leaves),
        &mut fg,
        &mut bg,
        view,
        settings.pet_size,
        0.0,
        settings.dark_theme,
        0.0,
    );

    let frame_ms = 1000.0 / 60.0;
    for frame in 0u64..3600 {
        let now_ms = frame as f64 * frame_ms;
        let ctx = TickContext {
            view_width: view.width,
            view_height: view.height,
            theme: settings.theme,
            size: settings.pet_size,
            now_ms,
        };

        if frame == 300 {
            scheduler.throw_ball(Vec2::new(view.width / 2.0, 100.0), now_ms);
            log::info!("ball thrown");
        }

        if !scheduler.tick(&ctx) {
            break;
        }
        effects.frame(now_ms / 1000.0);
    }

    for pet in scheduler.creatures() {
        println!(
            "{} {:10} {:12} x={:6.1} state={:?}",
            pet.species().emoji,
            pet.species().label,
            pet.name(),
            pet.x(),
            pet.state()
        );
    }
    println!(
        "{} leaves in the air, snapshot: {}",
        effects.particle_count(),
        persistence::encode(&scheduler.snapshot())
    );
}
