//! Ambient particle-effect engine
//!
//! Three interchangeable overlays (snow, stars, leaves) share one
//! contract. Each runs on its own frame callback keyed to wall-clock
//! deltas - not frame counts - so the animation stays stable under
//! frame-rate variation, with each step capped to avoid jumps after a
//! stall. Effects are purely decorative: they read viewport/size/theme
//! to size themselves and never touch simulation state.

pub mod leaves;
pub mod snow;
pub mod stars;

pub use leaves::LeavesEffect;
pub use snow::SnowEffect;
pub use stars::StarsEffect;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::species::PetSize;

/// Viewport dimensions, as the host reports them
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

/// A host-owned drawing surface. The engine only ever clears it; all
/// actual painting happens host-side from [`ParticleView`]s.
pub trait DrawSurface {
    fn clear(&mut self);
}

/// The selectable effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    Snow,
    Stars,
    Leaves,
}

impl EffectKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EffectKind::Snow => "snow",
            EffectKind::Stars => "stars",
            EffectKind::Leaves => "leaves",
        }
    }
}

/// Renderer-facing view of one particle
#[derive(Debug, Clone, Copy)]
pub struct ParticleView {
    pub pos: Vec2,
    pub size: f32,
    pub rotation: f32,
    pub opacity: f32,
    /// CSS color the host paints with
    pub color: &'static str,
}

/// Shared contract for all ambient effects
pub trait Effect {
    fn name(&self) -> &'static str;

    /// Configure per-size particle tables and pre-populate the pool
    fn init(&mut self, viewport: Viewport, size: PetSize, floor: f32, dark_theme: bool);

    /// Start the animation loop at the given wall-clock time (seconds)
    fn enable(&mut self, now: f64);

    /// Stop the loop; the pool is discarded wholesale on the next switch
    fn disable(&mut self);

    fn is_enabled(&self) -> bool;

    /// Advance by the wall-clock delta since the previous frame, capped
    /// at [`crate::consts::EFFECT_MAX_TIME_DELTA`]
    fn frame(&mut self, now: f64);

    /// React to a viewport change (most effects ignore it)
    fn handle_resize(&mut self, viewport: Viewport);

    /// Visit every live particle, in draw order
    fn for_each_particle(&self, f: &mut dyn FnMut(ParticleView));
}

/// Owns the active effect for one view and the clearing of both drawing
/// surfaces whenever the effect is swapped (including to "none"), so no
/// residual artifacts survive a switch.
pub struct EffectController {
    active: Option<(EffectKind, Box<dyn Effect>)>,
    seed: u64,
}

impl EffectController {
    pub fn new(seed: u64) -> Self {
        Self { active: None, seed }
    }

    pub fn active_kind(&self) -> Option<EffectKind> {
        self.active.as_ref().map(|(kind, _)| *kind)
    }

    /// Swap the active effect. Both surfaces are cleared before the new
    /// effect (or "none") takes over.
    #[allow(clippy::too_many_arguments)]
    pub fn set_effect(
        &mut self,
        kind: Option<EffectKind>,
        foreground: &mut dyn DrawSurface,
        background: &mut dyn DrawSurface,
        viewport: Viewport,
        size: PetSize,
        floor: f32,
        dark_theme: bool,
        now: f64,
    ) {
        if let Some((_, mut old)) = self.active.take() {
            old.disable();
        }
        foreground.clear();
        background.clear();

        if let Some(kind) = kind {
            self.seed = self.seed.wrapping_add(1);
            let mut effect = create(kind, self.seed);
            effect.init(viewport, size, floor, dark_theme);
            effect.enable(now);
            log::info!("effect enabled: {}", effect.name());
            self.active = Some((kind, effect));
        }
    }

    /// The active effect's frame callback; a no-op with no effect set
    pub fn frame(&mut self, now: f64) {
        if let Some((_, effect)) = &mut self.active {
            effect.frame(now);
        }
    }

    pub fn handle_resize(&mut self, viewport: Viewport) {
        if let Some((_, effect)) = &mut self.active {
            effect.handle_resize(viewport);
        }
    }

    pub fn particle_count(&self) -> usize {
        let mut count = 0;
        self.for_each_particle(&mut |_| count += 1);
        count
    }

    pub fn for_each_particle(&self, f: &mut dyn FnMut(ParticleView)) {
        if let Some((_, effect)) = &self.active {
            effect.for_each_particle(f);
        }
    }
}

/// Build a fresh effect instance of the given kind
pub fn create(kind: EffectKind, seed: u64) -> Box<dyn Effect> {
    match kind {
        EffectKind::Snow => Box::new(SnowEffect::new(seed)),
        EffectKind::Stars => Box::new(StarsEffect::new(seed)),
        EffectKind::Leaves => Box::new(LeavesEffect::new(seed)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingSurface {
        clears: u32,
    }

    impl DrawSurface for CountingSurface {
        fn clear(&mut self) {
            self.clears += 1;
        }
    }

    fn viewport() -> Viewport {
        Viewport {
            width: 800.0,
            height: 600.0,
        }
    }

    #[test]
    fn test_switch_clears_both_surfaces_and_drops_old_particles() {
        let mut controller = EffectController::new(9);
        let mut fg = CountingSurface { clears: 0 };
        let mut bg = CountingSurface { clears: 0 };

        controller.set_effect(
            Some(EffectKind::Snow),
            &mut fg,
            &mut bg,
            viewport(),
            PetSize::Small,
            0.0,
            true,
            0.0,
        );
        assert!(controller.particle_count() > 0);
        assert_eq!(controller.active_kind(), Some(EffectKind::Snow));
        assert_eq!((fg.clears, bg.clears), (1, 1));

        controller.set_effect(
            Some(EffectKind::Leaves),
            &mut fg,
            &mut bg,
            viewport(),
            PetSize::Small,
            0.0,
            false,
            1.0,
        );
        assert_eq!(controller.active_kind(), Some(EffectKind::Leaves));
        assert_eq!((fg.clears, bg.clears), (2, 2));
        // The snow pool is gone wholesale; everything visible is a leaf
        let mut leaf_colors_only = true;
        controller.for_each_particle(&mut |p| {
            if !leaves::LEAF_COLORS.contains(&p.color) {
                leaf_colors_only = false;
            }
        });
        assert!(leaf_colors_only);
    }

    #[test]
    fn test_switch_to_none_clears_and_stops() {
        let mut controller = EffectController::new(9);
        let mut fg = CountingSurface { clears: 0 };
        let mut bg = CountingSurface { clears: 0 };
        controller.set_effect(
            Some(EffectKind::Stars),
            &mut fg,
            &mut bg,
            viewport(),
            PetSize::Nano,
            0.0,
            true,
            0.0,
        );
        controller.set_effect(None, &mut fg, &mut bg, viewport(), PetSize::Nano, 0.0, true, 1.0);
        assert_eq!(controller.active_kind(), None);
        assert_eq!(controller.particle_count(), 0);
        assert_eq!((fg.clears, bg.clears), (2, 2));
    }
}
