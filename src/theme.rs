//! Background themes and their floor tables
//!
//! A theme shifts the walkable floor line up from the bottom edge by a
//! percentage of the viewport height, scaled per pet size so larger
//! sprites stand on the same painted ground.

use serde::{Deserialize, Serialize};

use crate::sim::species::PetSize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    None,
    Castle,
    Forest,
    Beach,
    Winter,
    Autumn,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::None => "none",
            Theme::Castle => "castle",
            Theme::Forest => "forest",
            Theme::Beach => "beach",
            Theme::Winter => "winter",
            Theme::Autumn => "autumn",
        }
    }

    /// Floor height as a percentage (0-100) of the viewport height
    pub fn floor_percent(self, size: PetSize) -> f32 {
        match self {
            Theme::None | Theme::Beach => 0.0,
            Theme::Castle => 10.0,
            Theme::Forest => match size {
                PetSize::Nano => 14.0,
                PetSize::Small => 15.0,
                PetSize::Medium => 16.0,
                PetSize::Large => 17.0,
            },
            Theme::Winter => match size {
                PetSize::Nano => 4.0,
                PetSize::Small => 5.0,
                PetSize::Medium => 6.0,
                PetSize::Large => 8.0,
            },
            Theme::Autumn => 8.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme_floor_is_bottom_edge() {
        assert_eq!(Theme::None.floor_percent(PetSize::Nano), 0.0);
        assert_eq!(
            crate::floor_line(600.0, Theme::None.floor_percent(PetSize::Nano)),
            600.0
        );
    }

    #[test]
    fn test_scenic_floors_scale_with_size() {
        assert!(
            Theme::Winter.floor_percent(PetSize::Large) > Theme::Winter.floor_percent(PetSize::Nano)
        );
    }
}
