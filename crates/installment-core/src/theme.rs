//! Theme preference model and ports.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::Result;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }
}

/// Durable storage for the theme preference.
pub trait ThemeStore: Send + Sync {
    /// `None` when nothing valid is stored.
    fn load(&self) -> Option<Theme>;

    fn save(&self, theme: Theme) -> Result<()>;
}

/// The operating environment's preferred color scheme.
pub trait ColorSchemeProbe: Send + Sync {
    fn preferred(&self) -> Theme;
}

/// A probe that always answers the same scheme.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedColorScheme(pub Theme);

impl ColorSchemeProbe for FixedColorScheme {
    fn preferred(&self) -> Theme {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_toggle() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!(Theme::from_str("dark").unwrap(), Theme::Dark);
        assert_eq!(Theme::from_str("LIGHT").unwrap(), Theme::Light);
        assert!(Theme::from_str("sepia").is_err());
        assert_eq!(Theme::Dark.to_string(), "dark");
        assert_eq!(serde_json::to_string(&Theme::Light).unwrap(), "\"light\"");
    }
}
