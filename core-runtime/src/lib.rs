//! # Core Runtime Module
//!
//! Foundational infrastructure shared by every shell crate:
//! - Configuration (`ShellConfig` builder with fail-fast validation)
//! - Logging and tracing setup, including host log forwarding
//! - The `ShellEvent` broadcast bus
//! - UI-affinity dispatch for callbacks arriving on foreign threads

pub mod config;
pub mod dispatch;
pub mod error;
pub mod events;
pub mod logging;

pub use config::{ShellConfig, ShellConfigBuilder, SystemBarPalette};
pub use dispatch::{ui_channel, UiDispatcher, UiQueue};
pub use error::{Error, Result};
pub use events::{EventBus, ShellEvent};
