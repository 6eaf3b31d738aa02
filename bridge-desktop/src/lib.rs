//! # Desktop Bridge Implementations
//!
//! Default implementations of device bridges for desktop hosts
//! (macOS, Windows, Linux), used when the `desktop-shims` feature is on.
//!
//! - [`DesktopNetworkMonitor`] - TCP reachability check plus a polling
//!   tokio watcher task per registration
//! - [`EnvThemeSource`] - light/dark preference from environment hints
//!
//! The page, surfaces, identity provider and file picker are always
//! supplied by the embedding host; there is no meaningful desktop default.
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_desktop::{DesktopNetworkMonitor, EnvThemeSource};
//! use core_runtime::ShellConfig;
//! use std::sync::Arc;
//!
//! let config = ShellConfig::builder()
//!     .origin_url("https://app.example.com")
//!     .sign_in_client_id("client")
//!     .network_monitor(Arc::new(DesktopNetworkMonitor::new()))
//!     .theme_source(Arc::new(EnvThemeSource::new()))
//!     .build()?;
//! ```

mod network;
mod theme;

pub use network::DesktopNetworkMonitor;
pub use theme::EnvThemeSource;
