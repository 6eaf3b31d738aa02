//! # Page Bridge
//!
//! The page reaches the shell through a single global object (by default
//! `window.AndroidApp`) installed before any page script runs. Each method
//! posts a JSON command over the embedded browser's IPC channel:
//!
//! ```text
//! AndroidApp.triggerGoogleSignIn()
//!     -> window.ipc.postMessage('{"command":"triggerGoogleSignIn"}')
//!     -> ShellMessage::PageMessage(..) -> PageCommand::TriggerSignIn
//! ```
//!
//! The other direction is a [`NativeDelivery`] rendered as a script and
//! evaluated in the page. Sign-in tokens take their own route through
//! `core_auth::IdentityBridge`.

use crate::error::Result;
use core_view::script::{js_string_literal, Script};
use core_view::{ThemeMode, ThemeSynchronizer};
use serde::{Deserialize, Serialize};

/// Commands the page can send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command")]
pub enum PageCommand {
    #[serde(rename = "triggerGoogleSignIn")]
    TriggerSignIn,
}

impl PageCommand {
    pub const ALL: [PageCommand; 1] = [PageCommand::TriggerSignIn];

    pub fn decode(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Method name on the page-side bridge object.
    pub fn method_name(&self) -> &'static str {
        match self {
            PageCommand::TriggerSignIn => "triggerGoogleSignIn",
        }
    }
}

/// Values the shell pushes into the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NativeDelivery {
    /// `data-theme`, `prefers-color-scheme` and `window.themeChange`.
    Theme(ThemeMode),
}

impl NativeDelivery {
    pub fn script(&self) -> Script {
        match self {
            NativeDelivery::Theme(mode) => ThemeSynchronizer::build_injection_script(*mode),
        }
    }
}

/// Init script defining `window.<bridge_object>`.
///
/// `bridge_object` must be a plain identifier; the config builder rejects
/// anything else.
pub fn bootstrap_script(bridge_object: &str) -> Script {
    let methods = PageCommand::ALL
        .iter()
        .map(|command| {
            format!(
                "  {}: function () {{ post({}); }}",
                command.method_name(),
                js_string_literal(command.method_name())
            )
        })
        .collect::<Vec<_>>()
        .join(",\n");

    Script::new(format!(
        r#"(function () {{
  if (window.{name}) {{ return; }}
  function post(command) {{
    var message = JSON.stringify({{ command: command }});
    if (window.ipc && window.ipc.postMessage) {{
      window.ipc.postMessage(message);
    }} else {{
      console.log("{name} bridge unavailable: " + command);
    }}
  }}
  window.{name} = Object.freeze({{
{methods}
  }});
}})();"#,
        name = bridge_object,
        methods = methods
    ))
}
