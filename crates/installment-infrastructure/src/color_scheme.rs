//! Environment color-scheme detection.

use installment_core::theme::{ColorSchemeProbe, Theme};

pub const COLOR_SCHEME_ENV: &str = "INSTALLMENT_COLOR_SCHEME";

/// Reads the preferred scheme from the process environment.
///
/// `INSTALLMENT_COLOR_SCHEME=light|dark` wins. Otherwise the terminal's
/// `COLORFGBG` (`"fg;bg"`) is consulted: background colors 0-6 and 8 are
/// dark. Anything else is light.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvColorScheme;

impl ColorSchemeProbe for EnvColorScheme {
    fn preferred(&self) -> Theme {
        preferred_from(|name| std::env::var(name).ok())
    }
}

pub fn preferred_from(env: impl Fn(&str) -> Option<String>) -> Theme {
    if let Some(theme) = env(COLOR_SCHEME_ENV).and_then(|v| v.trim().parse::<Theme>().ok()) {
        return theme;
    }

    let background = env("COLORFGBG").and_then(|value| {
        value
            .rsplit(';')
            .next()
            .and_then(|bg| bg.trim().parse::<u8>().ok())
    });
    match background {
        Some(0..=6 | 8) => Theme::Dark,
        _ => Theme::Light,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_of<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |name| {
            pairs
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_explicit_override() {
        assert_eq!(preferred_from(env_of(&[(COLOR_SCHEME_ENV, "dark")])), Theme::Dark);
        assert_eq!(
            preferred_from(env_of(&[(COLOR_SCHEME_ENV, "Light"), ("COLORFGBG", "15;0")])),
            Theme::Light
        );
    }

    #[test]
    fn test_colorfgbg() {
        assert_eq!(preferred_from(env_of(&[("COLORFGBG", "15;0")])), Theme::Dark);
        assert_eq!(preferred_from(env_of(&[("COLORFGBG", "15;default;8")])), Theme::Dark);
        assert_eq!(preferred_from(env_of(&[("COLORFGBG", "0;15")])), Theme::Light);
        assert_eq!(preferred_from(env_of(&[("COLORFGBG", "garbage")])), Theme::Light);
    }

    #[test]
    fn test_default_is_light() {
        assert_eq!(preferred_from(env_of(&[])), Theme::Light);
        assert_eq!(preferred_from(env_of(&[(COLOR_SCHEME_ENV, "sepia")])), Theme::Light);
    }
}
