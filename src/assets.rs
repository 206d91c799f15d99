//! Sprite asset resolution boundary
//!
//! The engine never touches image data; it asks a resolver for an opaque
//! handle once per state change and hands the handle to the host. Handle
//! equality lets callers skip reassignment (and the animation restart
//! flicker that would come with it).

use crate::sim::species::{PetColor, SpeciesKind};

/// Opaque sprite reference produced by an [`AssetResolver`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteHandle(pub String);

/// Maps (species, color, animation label) to a sprite handle
pub trait AssetResolver {
    fn resolve(&self, species: SpeciesKind, color: PetColor, label: &str) -> SpriteHandle;
}

/// Default resolver producing media paths in the shipped asset layout:
/// `{base}/{species}/{color}_{label}_8fps.gif`
#[derive(Debug, Clone)]
pub struct MediaPathResolver {
    pub base: String,
}

impl Default for MediaPathResolver {
    fn default() -> Self {
        Self {
            base: "media".to_string(),
        }
    }
}

impl AssetResolver for MediaPathResolver {
    fn resolve(&self, species: SpeciesKind, color: PetColor, label: &str) -> SpriteHandle {
        let species = crate::sim::species::descriptor(species).label;
        SpriteHandle(format!(
            "{}/{}/{}_{}_8fps.gif",
            self.base,
            species,
            color.as_str(),
            label
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_path_layout() {
        let resolver = MediaPathResolver::default();
        let handle = resolver.resolve(SpeciesKind::Dog, PetColor::Brown, "walk");
        assert_eq!(handle.0, "media/dog/brown_walk_8fps.gif");
    }

    #[test]
    fn test_handles_compare_by_value() {
        let resolver = MediaPathResolver::default();
        let a = resolver.resolve(SpeciesKind::Fox, PetColor::Red, "idle");
        let b = resolver.resolve(SpeciesKind::Fox, PetColor::Red, "idle");
        assert_eq!(a, b);
    }
}
