//! OS Appearance Abstraction

/// Source of the OS-level light/dark preference.
///
/// - **Android**: `Configuration.uiMode & UI_MODE_NIGHT_MASK`
/// - **iOS**: `UITraitCollection.userInterfaceStyle`
/// - **Desktop**: desktop portal / environment hints
///
/// Read synchronously from the UI thread on every configuration change and
/// every page load.
pub trait ThemeSource: Send + Sync {
    fn is_dark_mode(&self) -> bool;
}
