//! User preferences
//!
//! What the host persists between sessions: the default pet to spawn,
//! the theme, and the ambient effect. Storage itself is the host's
//! concern; settings round-trip through JSON strings.

use serde::{Deserialize, Serialize};

use crate::effects::EffectKind;
use crate::sim::species::{PetColor, PetSize, SpeciesKind};
use crate::theme::Theme;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Species spawned when the view opens with no snapshot
    pub default_species: SpeciesKind,
    pub default_color: PetColor,
    pub pet_size: PetSize,
    pub theme: Theme,
    /// Active ambient effect, if any
    pub effect: Option<EffectKind>,
    /// Whether the host runs a dark color scheme (effects read this)
    pub dark_theme: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_species: SpeciesKind::Dog,
            default_color: PetColor::Brown,
            pet_size: PetSize::Nano,
            theme: Theme::None,
            effect: None,
            dark_theme: true,
        }
    }
}

impl Settings {
    pub fn to_json(&self) -> String {
        match serde_json::to_string(self) {
            Ok(json) => json,
            Err(err) => {
                log::error!("settings encode failed: {err}");
                String::new()
            }
        }
    }

    /// Parse stored settings, falling back to defaults on any corruption
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!("stored settings unreadable ({err}), using defaults");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let mut settings = Settings::default();
        settings.theme = Theme::Winter;
        settings.effect = Some(EffectKind::Snow);
        let restored = Settings::from_json(&settings.to_json());
        assert_eq!(restored, settings);
    }

    #[test]
    fn test_corrupt_settings_fall_back_to_defaults() {
        assert_eq!(Settings::from_json("{oops"), Settings::default());
    }
}
