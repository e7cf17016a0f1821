//! Classic/modern theme switching.
//!
//! The preference lives under one `localStorage` key. Applying a theme
//! toggles the `modern-theme` class on `<body>`, enables or disables the
//! `#modern-style` stylesheet, and refreshes the toggle button.

use std::fmt;
use std::str::FromStr;

use crate::error::UnknownTheme;

pub mod controller;
pub mod store;
pub mod toggle;

pub use controller::ThemeController;
pub use store::{BrowserStore, ThemePreference, ThemeStore};
pub use toggle::ThemeToggle;

pub const BODY_CLASS: &str = "modern-theme";
pub const MODERN_STYLESHEET_ID: &str = "modern-style";
pub const TOGGLE_BUTTON_ID: &str = "theme-toggle-btn";

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Theme {
    #[default]
    Classic,
    Modern,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Classic => "classic",
            Theme::Modern => "modern",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Classic => Theme::Modern,
            Theme::Modern => Theme::Classic,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "classic" => Ok(Theme::Classic),
            "modern" => Ok(Theme::Modern),
            other => Err(UnknownTheme(other.to_string())),
        }
    }
}

/// Icon and tooltip for the toggle button. The icon advertises the theme the
/// next click switches to, not the one currently shown.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ToggleFace {
    pub icon: &'static str,
    pub title: &'static str,
}

impl ToggleFace {
    pub fn for_theme(current: Theme) -> Self {
        match current {
            Theme::Modern => ToggleFace {
                icon: "🎨",
                title: "Switch to Classic Theme",
            },
            Theme::Classic => ToggleFace {
                icon: "✨",
                title: "Switch to Modern Theme",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_names_only() {
        assert_eq!("classic".parse::<Theme>(), Ok(Theme::Classic));
        assert_eq!("modern".parse::<Theme>(), Ok(Theme::Modern));
        assert_eq!(
            "Modern".parse::<Theme>(),
            Err(UnknownTheme("Modern".to_string()))
        );
    }

    #[test]
    fn toggling_twice_is_identity() {
        assert_eq!(Theme::default().toggled().toggled(), Theme::Classic);
        assert_eq!(Theme::Classic.toggled(), Theme::Modern);
    }

    #[test]
    fn face_points_at_the_other_theme() {
        let classic = ToggleFace::for_theme(Theme::Classic);
        assert_eq!(classic.icon, "✨");
        assert_eq!(classic.title, "Switch to Modern Theme");

        let modern = ToggleFace::for_theme(Theme::Modern);
        assert_eq!(modern.icon, "🎨");
        assert_eq!(modern.title, "Switch to Classic Theme");
    }
}
