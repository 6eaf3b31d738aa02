//! # Host Bridge Traits
//!
//! Platform abstraction traits that must be implemented by each host platform.
//!
//! ## Overview
//!
//! This crate defines the contract between the shell core and the platform
//! that embeds it. Each trait represents a capability the shell needs but
//! cannot provide itself: the browser engine, the native surfaces around it,
//! network reachability, the OS theme, the identity SDK and the file picker.
//!
//! ## Traits
//!
//! ### Page & Surfaces
//! - [`WebPage`](webview::WebPage) - Navigation, script injection, history
//! - [`ViewSurfaces`](surfaces::ViewSurfaces) - Splash, offline indicator, refresh chrome, system bars
//!
//! ### Device Integration
//! - [`NetworkMonitor`](network::NetworkMonitor) - Default network capabilities and transitions
//! - [`ThemeSource`](theme::ThemeSource) - OS light/dark preference
//!
//! ### External Flows
//! - [`IdentityProvider`](identity::IdentityProvider) - Credential flow and payload decoding
//! - [`FilePicker`](picker::FilePicker) - Native file selection
//!
//! ### Utilities
//! - [`LoggerSink`](logging::LoggerSink) - Forward structured logs to host logging
//!
//! External flows report back through one entry point carrying a
//! [`RequestCode`](activity::RequestCode), a
//! [`ResultCode`](activity::ResultCode) and an opaque
//! [`ResultPayload`](activity::ResultPayload).
//!
//! ## Platform Requirements
//!
//! | Platform | Implementation Crate | Status |
//! |----------|---------------------|--------|
//! | Desktop  | `bridge-desktop`    | ✅ Network + theme |
//! | Android  | host app            | 📋 Injected at startup |
//! | iOS      | host app            | 📋 Planned |
//!
//! ## Error Handling
//!
//! All bridge traits use [`BridgeError`](error::BridgeError). Implementations
//! should convert platform exceptions into it with enough context to be
//! logged; the shell never surfaces these errors to the page.
//!
//! ## Thread Safety
//!
//! All bridge traits require `Send + Sync`. Callbacks handed to a bridge may
//! be invoked on any thread; the shell redispatches them onto its UI task
//! before touching state.

pub mod activity;
pub mod error;
pub mod identity;
pub mod logging;
pub mod network;
pub mod picker;
pub mod surfaces;
pub mod theme;
pub mod webview;

pub use error::BridgeError;

// Re-export commonly used types
pub use activity::{RequestCode, ResultCode, ResultPayload};
pub use identity::{IdentityProvider, SignInCredential, SignInRequest};
pub use logging::{ConsoleLogger, LogEntry, LogLevel, LoggerSink};
pub use network::{
    NetworkCallbacks, NetworkInfo, NetworkMonitor, NetworkType, RegistrationId,
};
pub use picker::{FileChooserSpec, FilePicker};
pub use surfaces::{Surface, SystemBarStyle, ViewSurfaces};
pub use theme::ThemeSource;
pub use webview::{ForceDark, WebPage, WebViewSettings};
