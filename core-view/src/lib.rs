//! # View Module
//!
//! Everything that decides what the user sees around the hosted page.
//!
//! ## Overview
//!
//! - [`ViewStateController`] - the launch/connectivity state machine. Pure:
//!   it returns [`ViewAction`]s and never calls a bridge itself.
//! - [`ConnectivityMonitor`] - synchronous probe plus default-network
//!   transition subscription.
//! - [`ThemeSynchronizer`] - OS light/dark mode, the DOM injection script and
//!   the matching system bar style.
//! - [`script`] - helpers for building scripts that are safe to inject.

pub mod connectivity;
pub mod controller;
pub mod error;
pub mod script;
pub mod state;
pub mod theme;

pub use connectivity::{ConnectivityMonitor, ConnectivityStatus, SubscriptionHandle};
pub use controller::{ViewAction, ViewStateController};
pub use error::{Result, ViewError};
pub use script::Script;
pub use state::{SplashPhase, ViewState};
pub use theme::{ThemeMode, ThemeSynchronizer};
