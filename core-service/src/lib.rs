//! Web shell composition root.
//!
//! [`HostShell`] owns every piece of shell state and is driven by
//! [`ShellMessage`]s on a single UI task. Host integrations provide the
//! [`ShellBridges`] (page, native surfaces, identity provider, file picker)
//! and forward OS callbacks into the shell's [`UiDispatcher`]. Desktop hosts
//! enable the `desktop-shims` feature to get default network and theme
//! sources from `bridge-desktop`.
//!
//! ```no_run
//! # async fn example(bridges: core_service::ShellBridges) -> core_service::Result<()> {
//! use core_runtime::{ui_channel, ShellConfig};
//! use core_service::HostShell;
//!
//! let config = ShellConfig::builder()
//!     .origin_url("https://app.example.com")
//!     .sign_in_client_id("web-client-id.apps.example.com")
//!     .build()?;
//!
//! let (dispatcher, queue) = ui_channel();
//! let mut shell = HostShell::new(config, bridges, dispatcher)?;
//! shell.launch();
//! shell.run(queue).await;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod message;
pub mod page_bridge;
pub mod shell;

pub use core_runtime::UiDispatcher;
pub use error::{Result, ShellError};
pub use message::{BackOutcome, ExternalResult, LifecycleEvent, RequestKind, ShellMessage};
pub use page_bridge::{bootstrap_script, NativeDelivery, PageCommand};
pub use shell::{HostShell, ShellBridges};
