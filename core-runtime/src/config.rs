//! # Shell Configuration Module
//!
//! Provides configuration management for the web shell host.
//!
//! ## Overview
//!
//! The configuration system uses a builder pattern to construct a `ShellConfig`
//! instance holding the settings and device bridges the shell needs. It
//! enforces fail-fast validation so a misconfigured host is rejected before
//! the splash is ever shown.
//!
//! ## Required Settings
//!
//! - `origin_url` - The single remote origin the shell hosts
//! - `sign_in_client_id` - OS-registered server client ID for the identity flow
//!
//! ## Device Bridges (with platform defaults)
//!
//! - `NetworkMonitor` - Connectivity detection
//! - `ThemeSource` - OS light/dark preference
//!
//! When the `desktop-shims` feature is enabled, desktop defaults from
//! `bridge-desktop` are injected automatically if not provided. Mobile hosts
//! always inject their own.
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::config::ShellConfig;
//! use std::time::Duration;
//!
//! let config = ShellConfig::builder()
//!     .origin_url("https://app.example.com")
//!     .sign_in_client_id("1234-abc.apps.googleusercontent.com")
//!     .launch_delay(Duration::from_secs(3))
//!     .network_monitor(Arc::new(MyNetworkMonitor))
//!     .theme_source(Arc::new(MyThemeSource))
//!     .build()
//!     .expect("Failed to build config");
//! ```

use crate::error::{Error, Result};
use bridge_traits::{NetworkMonitor, SystemBarStyle, ThemeSource, WebViewSettings};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Delay between launch and the first connectivity check.
pub const DEFAULT_LAUNCH_DELAY: Duration = Duration::from_millis(5000);

/// Duration of the splash fade-out animation.
pub const DEFAULT_SPLASH_FADE: Duration = Duration::from_millis(500);

/// Name of the object exposed to the page's script context.
pub const DEFAULT_BRIDGE_OBJECT: &str = "AndroidApp";

const MAX_LAUNCH_DELAY: Duration = Duration::from_secs(60);
const MAX_SPLASH_FADE: Duration = Duration::from_secs(10);

/// Status/navigation bar colours per theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemBarPalette {
    /// Bar colour in light mode (`#RRGGBB`)
    pub light: String,
    /// Bar colour in dark mode (`#RRGGBB`)
    pub dark: String,
}

impl Default for SystemBarPalette {
    fn default() -> Self {
        Self {
            light: "#98FB98".to_string(),
            dark: "#1c8a09".to_string(),
        }
    }
}

impl SystemBarPalette {
    /// Bar appearance for the given OS theme. Light backgrounds get dark icons.
    pub fn style(&self, dark: bool) -> SystemBarStyle {
        if dark {
            SystemBarStyle {
                background: self.dark.clone(),
                light_bars: false,
            }
        } else {
            SystemBarStyle {
                background: self.light.clone(),
                light_bars: true,
            }
        }
    }

    fn validate(&self) -> Result<()> {
        for (name, value) in [("light", &self.light), ("dark", &self.dark)] {
            if !is_hex_color(value) {
                return Err(Error::Config(format!(
                    "System bar {} colour must be '#RRGGBB', got '{}'",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// Configuration for the web shell host.
///
/// Use [`ShellConfigBuilder`] to construct instances.
#[derive(Clone)]
pub struct ShellConfig {
    /// The single remote origin loaded into the page
    pub origin_url: Url,

    /// Delay from launch until the splash is dismissed
    pub launch_delay: Duration,

    /// Splash fade-out duration
    pub splash_fade: Duration,

    /// Server client ID passed to the identity provider
    pub sign_in_client_id: String,

    /// Global name of the page-callable bridge object
    pub bridge_object_name: String,

    /// Embedded browser settings
    pub webview: WebViewSettings,

    /// System bar colours
    pub system_bars: SystemBarPalette,

    /// Event bus buffer size
    pub event_buffer_size: usize,

    /// Network connectivity monitor
    pub network_monitor: Arc<dyn NetworkMonitor>,

    /// OS theme source
    pub theme_source: Arc<dyn ThemeSource>,
}

impl std::fmt::Debug for ShellConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShellConfig")
            .field("origin_url", &self.origin_url.as_str())
            .field("launch_delay", &self.launch_delay)
            .field("splash_fade", &self.splash_fade)
            .field("sign_in_client_id", &self.sign_in_client_id)
            .field("bridge_object_name", &self.bridge_object_name)
            .field("webview", &self.webview)
            .field("system_bars", &self.system_bars)
            .field("event_buffer_size", &self.event_buffer_size)
            .field("network_monitor", &"NetworkMonitor { ... }")
            .field("theme_source", &"ThemeSource { ... }")
            .finish()
    }
}

impl ShellConfig {
    /// Creates a new builder for constructing a `ShellConfig`.
    pub fn builder() -> ShellConfigBuilder {
        ShellConfigBuilder::default()
    }

    /// Validates the configuration and returns an error if invalid.
    ///
    /// This checks:
    /// - The origin is an absolute http(s) URL with a host
    /// - Launch delay is > 0 and at most 60 seconds
    /// - Splash fade is at most 10 seconds
    /// - The sign-in client ID is not empty
    /// - The bridge object name is a valid script identifier
    /// - System bar colours are `#RRGGBB`
    pub fn validate(&self) -> Result<()> {
        validate_origin(&self.origin_url)?;

        if self.launch_delay.is_zero() {
            return Err(Error::Config(
                "Launch delay must be greater than 0ms".to_string(),
            ));
        }

        if self.launch_delay > MAX_LAUNCH_DELAY {
            return Err(Error::Config(
                "Launch delay exceeds maximum of 60 seconds (60,000ms)".to_string(),
            ));
        }

        if self.splash_fade > MAX_SPLASH_FADE {
            return Err(Error::Config(
                "Splash fade exceeds maximum of 10 seconds (10,000ms)".to_string(),
            ));
        }

        if self.sign_in_client_id.trim().is_empty() {
            return Err(Error::Config(
                "Sign-in client ID cannot be empty".to_string(),
            ));
        }

        if !is_script_identifier(&self.bridge_object_name) {
            return Err(Error::Config(format!(
                "Bridge object name '{}' is not a valid script identifier",
                self.bridge_object_name
            )));
        }

        if self.event_buffer_size == 0 {
            return Err(Error::Config(
                "Event buffer size must be greater than 0".to_string(),
            ));
        }

        self.system_bars.validate()
    }
}

fn validate_origin(url: &Url) -> Result<()> {
    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::InvalidOrigin {
            url: url.to_string(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(Error::InvalidOrigin {
            url: url.to_string(),
            reason: "missing host".to_string(),
        });
    }

    Ok(())
}

fn is_script_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(not(feature = "desktop-shims"))]
fn network_monitor_missing_error() -> Error {
    Error::CapabilityMissing {
        capability: "NetworkMonitor".to_string(),
        message: "NetworkMonitor implementation is required for the offline indicator. \
                 Desktop: ensure the 'desktop-shims' feature is enabled to use the default DesktopNetworkMonitor. \
                 Mobile: inject the platform connectivity manager adapter."
            .to_string(),
    }
}

#[cfg(not(feature = "desktop-shims"))]
fn theme_source_missing_error() -> Error {
    Error::CapabilityMissing {
        capability: "ThemeSource".to_string(),
        message: "ThemeSource implementation is required for theme propagation. \
                 Desktop: ensure the 'desktop-shims' feature is enabled to use the default EnvThemeSource. \
                 Mobile: inject an adapter reading the OS night mode."
            .to_string(),
    }
}

#[cfg(feature = "desktop-shims")]
fn provide_default_network_monitor() -> Result<Arc<dyn NetworkMonitor>> {
    use bridge_desktop::DesktopNetworkMonitor;

    let monitor: Arc<dyn NetworkMonitor> = Arc::new(DesktopNetworkMonitor::new());
    Ok(monitor)
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_network_monitor() -> Result<Arc<dyn NetworkMonitor>> {
    Err(network_monitor_missing_error())
}

#[cfg(feature = "desktop-shims")]
fn provide_default_theme_source() -> Result<Arc<dyn ThemeSource>> {
    use bridge_desktop::EnvThemeSource;

    let source: Arc<dyn ThemeSource> = Arc::new(EnvThemeSource::new());
    Ok(source)
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_theme_source() -> Result<Arc<dyn ThemeSource>> {
    Err(theme_source_missing_error())
}

/// Builder for constructing [`ShellConfig`] instances.
#[derive(Default)]
pub struct ShellConfigBuilder {
    origin_url: Option<String>,
    launch_delay: Option<Duration>,
    splash_fade: Option<Duration>,
    sign_in_client_id: Option<String>,
    bridge_object_name: Option<String>,
    webview: Option<WebViewSettings>,
    system_bars: Option<SystemBarPalette>,
    event_buffer_size: Option<usize>,
    network_monitor: Option<Arc<dyn NetworkMonitor>>,
    theme_source: Option<Arc<dyn ThemeSource>>,
}

impl ShellConfigBuilder {
    /// Sets the remote origin to host.
    ///
    /// # Examples
    ///
    /// ```
    /// use core_runtime::config::ShellConfig;
    ///
    /// let builder = ShellConfig::builder()
    ///     .origin_url("https://app.example.com");
    /// ```
    pub fn origin_url(mut self, url: impl Into<String>) -> Self {
        self.origin_url = Some(url.into());
        self
    }

    /// Sets the launch delay.
    ///
    /// Default: 5000 ms
    pub fn launch_delay(mut self, delay: Duration) -> Self {
        self.launch_delay = Some(delay);
        self
    }

    /// Sets the splash fade-out duration.
    ///
    /// Default: 500 ms
    pub fn splash_fade(mut self, duration: Duration) -> Self {
        self.splash_fade = Some(duration);
        self
    }

    /// Sets the server client ID used by the identity flow (required).
    pub fn sign_in_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.sign_in_client_id = Some(client_id.into());
        self
    }

    /// Sets the global name of the page-callable bridge object.
    ///
    /// Default: `AndroidApp`
    pub fn bridge_object_name(mut self, name: impl Into<String>) -> Self {
        self.bridge_object_name = Some(name.into());
        self
    }

    /// Sets the embedded browser settings.
    pub fn webview_settings(mut self, settings: WebViewSettings) -> Self {
        self.webview = Some(settings);
        self
    }

    /// Sets the system bar colours.
    pub fn system_bars(mut self, palette: SystemBarPalette) -> Self {
        self.system_bars = Some(palette);
        self
    }

    /// Sets the event bus buffer size.
    ///
    /// Default: [`DEFAULT_EVENT_BUFFER_SIZE`](crate::events::DEFAULT_EVENT_BUFFER_SIZE)
    pub fn event_buffer_size(mut self, size: usize) -> Self {
        self.event_buffer_size = Some(size);
        self
    }

    /// Sets the network monitor implementation.
    ///
    /// If not provided, the desktop default will be used when the
    /// `desktop-shims` feature is enabled.
    pub fn network_monitor(mut self, monitor: Arc<dyn NetworkMonitor>) -> Self {
        self.network_monitor = Some(monitor);
        self
    }

    /// Sets the theme source implementation.
    ///
    /// If not provided, the desktop default will be used when the
    /// `desktop-shims` feature is enabled.
    pub fn theme_source(mut self, source: Arc<dyn ThemeSource>) -> Self {
        self.theme_source = Some(source);
        self
    }

    /// Builds the final `ShellConfig`, validating all settings.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required settings (`origin_url`, `sign_in_client_id`) are missing
    /// - A device bridge is missing and no platform default exists
    /// - Validation fails (see [`ShellConfig::validate`])
    pub fn build(self) -> Result<ShellConfig> {
        let origin = self.origin_url.ok_or_else(|| {
            Error::Config(
                "Origin URL is required. Use .origin_url() to set it.".to_string(),
            )
        })?;

        let origin_url = Url::parse(&origin).map_err(|e| Error::InvalidOrigin {
            url: origin.clone(),
            reason: e.to_string(),
        })?;

        let sign_in_client_id = self.sign_in_client_id.ok_or_else(|| {
            Error::Config(
                "Sign-in client ID is required. Use .sign_in_client_id() to set it."
                    .to_string(),
            )
        })?;

        let network_monitor = match self.network_monitor {
            Some(monitor) => monitor,
            None => provide_default_network_monitor()?,
        };

        let theme_source = match self.theme_source {
            Some(source) => source,
            None => provide_default_theme_source()?,
        };

        let config = ShellConfig {
            origin_url,
            launch_delay: self.launch_delay.unwrap_or(DEFAULT_LAUNCH_DELAY),
            splash_fade: self.splash_fade.unwrap_or(DEFAULT_SPLASH_FADE),
            sign_in_client_id,
            bridge_object_name: self
                .bridge_object_name
                .unwrap_or_else(|| DEFAULT_BRIDGE_OBJECT.to_string()),
            webview: self.webview.unwrap_or_default(),
            system_bars: self.system_bars.unwrap_or_default(),
            event_buffer_size: self
                .event_buffer_size
                .unwrap_or(crate::events::DEFAULT_EVENT_BUFFER_SIZE),
            network_monitor,
            theme_source,
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_traits::error::Result as BridgeResult;
    use bridge_traits::{NetworkCallbacks, NetworkInfo, RegistrationId};

    struct OfflineMonitor;

    impl NetworkMonitor for OfflineMonitor {
        fn default_network(&self) -> Option<NetworkInfo> {
            None
        }

        fn register_default_network_callback(
            &self,
            _callbacks: NetworkCallbacks,
        ) -> BridgeResult<RegistrationId> {
            Ok(RegistrationId(1))
        }

        fn unregister_network_callback(&self, _id: RegistrationId) -> BridgeResult<()> {
            Ok(())
        }
    }

    struct LightTheme;

    impl ThemeSource for LightTheme {
        fn is_dark_mode(&self) -> bool {
            false
        }
    }

    fn base_builder() -> ShellConfigBuilder {
        ShellConfig::builder()
            .origin_url("https://app.example.com")
            .sign_in_client_id("client-123")
            .network_monitor(Arc::new(OfflineMonitor))
            .theme_source(Arc::new(LightTheme))
    }

    #[test]
    fn test_builder_with_all_required_fields() {
        let config = base_builder().build().unwrap();

        assert_eq!(config.origin_url.as_str(), "https://app.example.com/");
        assert_eq!(config.launch_delay, DEFAULT_LAUNCH_DELAY);
        assert_eq!(config.splash_fade, DEFAULT_SPLASH_FADE);
        assert_eq!(config.bridge_object_name, DEFAULT_BRIDGE_OBJECT);
        assert_eq!(config.webview, WebViewSettings::default());
    }

    #[test]
    fn test_builder_requires_origin_url() {
        let result = ShellConfig::builder()
            .sign_in_client_id("client-123")
            .network_monitor(Arc::new(OfflineMonitor))
            .theme_source(Arc::new(LightTheme))
            .build();

        assert!(matches!(result, Err(Error::Config(msg)) if msg.contains("Origin URL")));
    }

    #[test]
    fn test_builder_requires_client_id() {
        let result = ShellConfig::builder()
            .origin_url("https://app.example.com")
            .network_monitor(Arc::new(OfflineMonitor))
            .theme_source(Arc::new(LightTheme))
            .build();

        assert!(matches!(result, Err(Error::Config(msg)) if msg.contains("client ID")));
    }

    #[cfg(not(feature = "desktop-shims"))]
    #[test]
    fn test_builder_requires_network_monitor() {
        let result = ShellConfig::builder()
            .origin_url("https://app.example.com")
            .sign_in_client_id("client-123")
            .theme_source(Arc::new(LightTheme))
            .build();

        match result {
            Err(Error::CapabilityMissing { capability, .. }) => {
                assert_eq!(capability, "NetworkMonitor")
            }
            other => panic!("expected CapabilityMissing, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_rejects_unparsable_origin() {
        let result = base_builder().origin_url("not a url").build();
        assert!(matches!(result, Err(Error::InvalidOrigin { .. })));
    }

    #[test]
    fn test_rejects_non_http_origin() {
        let result = base_builder().origin_url("file:///sdcard/index.html").build();
        match result {
            Err(Error::InvalidOrigin { reason, .. }) => assert!(reason.contains("file")),
            other => panic!("expected InvalidOrigin, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_validate_rejects_zero_launch_delay() {
        let result = base_builder().launch_delay(Duration::ZERO).build();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_validate_rejects_excessive_launch_delay() {
        let result = base_builder()
            .launch_delay(Duration::from_secs(61))
            .build();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_zero_splash_fade_is_allowed() {
        let config = base_builder().splash_fade(Duration::ZERO).build().unwrap();
        assert!(config.splash_fade.is_zero());
    }

    #[test]
    fn test_validate_rejects_bad_bridge_name() {
        for name in ["", "1App", "my-app", "has space"] {
            let result = base_builder().bridge_object_name(name).build();
            assert!(result.is_err(), "accepted bridge name {:?}", name);
        }

        assert!(base_builder().bridge_object_name("$shell_1").build().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_bar_colour() {
        let palette = SystemBarPalette {
            light: "white".to_string(),
            ..Default::default()
        };
        let result = base_builder().system_bars(palette).build();
        assert!(matches!(result, Err(Error::Config(msg)) if msg.contains("light")));
    }

    #[test]
    fn test_system_bar_style() {
        let palette = SystemBarPalette::default();

        let light = palette.style(false);
        assert_eq!(light.background, "#98FB98");
        assert!(light.light_bars);

        let dark = palette.style(true);
        assert_eq!(dark.background, "#1c8a09");
        assert!(!dark.light_bars);
    }

    #[test]
    fn test_config_is_cloneable() {
        let config = base_builder().build().unwrap();
        let cloned = config.clone();
        assert_eq!(cloned.origin_url, config.origin_url);
        assert!(format!("{:?}", cloned).contains("NetworkMonitor { ... }"));
    }
}
