//! Theme Source Implementation

use bridge_traits::theme::ThemeSource;
use std::env;
use tracing::trace;

/// Explicit override: `dark` or `light`.
pub const COLOR_SCHEME_VAR: &str = "WEBSHELL_COLOR_SCHEME";

/// Reads the light/dark preference from the environment.
///
/// Resolution order:
/// 1. `WEBSHELL_COLOR_SCHEME` (`dark`/`light`, case-insensitive)
/// 2. `GTK_THEME` with a `:dark` variant suffix
/// 3. light
///
/// Evaluated on every call so a changed environment is picked up on the
/// next configuration change.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvThemeSource;

impl EnvThemeSource {
    pub fn new() -> Self {
        Self
    }
}

impl ThemeSource for EnvThemeSource {
    fn is_dark_mode(&self) -> bool {
        let dark = prefers_dark(|key| env::var(key).ok());
        trace!(dark, "Resolved desktop colour scheme");
        dark
    }
}

fn prefers_dark<F>(lookup: F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(scheme) = lookup(COLOR_SCHEME_VAR) {
        match scheme.trim().to_ascii_lowercase().as_str() {
            "dark" => return true,
            "light" => return false,
            _ => {}
        }
    }

    lookup("GTK_THEME")
        .map(|theme| theme.to_ascii_lowercase().ends_with(":dark"))
        .unwrap_or(false)
}
