//! Embedded Browser Abstraction
//!
//! The browser engine itself (loading, JS execution, storage) is provided by
//! the host. The shell only needs to navigate the single configured origin,
//! push scripts into the page, and query its history.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default user agent presented to the hosted page.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Linux; Android 13; Pixel 7) \
     AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/120.0.0.0 Mobile Safari/537.36";

/// Engine-side dark rendering policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForceDark {
    /// Never darken page content
    Off,
    /// Let the engine darken pages that do not declare their own dark theme
    #[default]
    Auto,
    /// Always darken page content
    On,
}

/// Settings applied to the embedded browser before the first load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebViewSettings {
    pub javascript_enabled: bool,
    pub dom_storage_enabled: bool,
    pub allow_file_access: bool,
    pub allow_content_access: bool,
    pub user_agent: String,
    pub force_dark: ForceDark,
    /// Expose the page to remote devtools
    pub contents_debugging: bool,
}

impl Default for WebViewSettings {
    fn default() -> Self {
        Self {
            javascript_enabled: true,
            dom_storage_enabled: true,
            allow_file_access: true,
            allow_content_access: true,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            force_dark: ForceDark::Auto,
            contents_debugging: cfg!(debug_assertions),
        }
    }
}

/// Handle to the single hosted page.
///
/// All methods are called from the UI-affinity thread. Script evaluation is
/// fire-and-forget: the shell never consumes a return value.
pub trait WebPage: Send + Sync {
    /// Apply engine settings; called once before any navigation.
    fn apply_settings(&self, settings: &WebViewSettings) -> Result<()>;

    /// Register a script the engine runs at the start of every document.
    fn add_init_script(&self, script: &str) -> Result<()>;

    fn load_url(&self, url: &str) -> Result<()>;

    fn evaluate_script(&self, script: &str) -> Result<()>;

    /// URL of the current document, `None` before the first navigation.
    fn current_url(&self) -> Option<String>;

    fn can_go_back(&self) -> bool;

    fn go_back(&self) -> Result<()>;

    fn reload(&self) -> Result<()>;
}
