//! Theme Propagation
//!
//! The page follows the OS theme, not its own media query: on every
//! configuration change and every finished page load the shell injects a
//! script that sets `data-theme`, notifies the optional `window.themeChange`
//! hook and forces `prefers-color-scheme: dark` to agree.

use crate::script::{guarded_hook_call, js_string_literal, Script};
use bridge_traits::{SystemBarStyle, ThemeSource};
use core_runtime::SystemBarPalette;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Page hook notified of theme changes.
pub const THEME_HOOK: &str = "themeChange";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
}

impl ThemeMode {
    pub fn from_dark(dark: bool) -> Self {
        if dark {
            Self::Dark
        } else {
            Self::Light
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Self::Dark)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct ThemeSynchronizer {
    source: Arc<dyn ThemeSource>,
    palette: SystemBarPalette,
}

impl ThemeSynchronizer {
    pub fn new(source: Arc<dyn ThemeSource>, palette: SystemBarPalette) -> Self {
        Self { source, palette }
    }

    /// Reads the OS preference. Never cached.
    pub fn current_mode(&self) -> ThemeMode {
        ThemeMode::from_dark(self.source.is_dark_mode())
    }

    /// Script that brings the page's DOM in line with `mode`.
    pub fn build_injection_script(mode: ThemeMode) -> Script {
        let token = js_string_literal(mode.as_str());
        let hook = guarded_hook_call(THEME_HOOK, &[token.clone()]);

        Script::new(format!(
            "document.documentElement.setAttribute('data-theme', {token});\n\
             {hook}\n\
             const mql = window.matchMedia('(prefers-color-scheme: dark)');\n\
             Object.defineProperty(mql, 'matches', {{ value: {dark}, configurable: true }});\n\
             if (typeof mql.dispatchEvent === 'function') {{ mql.dispatchEvent(new Event('change')); }}\n\
             window.dispatchEvent(new Event('change'));",
            dark = mode.is_dark(),
        ))
        .guarded("Theme event injection failed!")
    }

    /// Status/navigation bar appearance for `mode`.
    pub fn system_bar_style(&self, mode: ThemeMode) -> SystemBarStyle {
        self.palette.style(mode.is_dark())
    }
}

impl fmt::Debug for ThemeSynchronizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeSynchronizer")
            .field("palette", &self.palette)
            .finish_non_exhaustive()
    }
}
