//! # Identity Module
//!
//! Native sign-in bridge for the hosted page.
//!
//! ## Overview
//!
//! The page calls `AndroidApp.triggerGoogleSignIn()`; the shell asks the OS
//! identity provider for an ID token and hands it to the page's
//! `window.onGoogleSignIn` hook. This crate holds the state machine and the
//! delivery script; the provider itself is a bridge trait.
//!
//! ## Features
//!
//! - One outstanding attempt at a time, correlated by request code
//! - Stale attempts abandoned when the page retries after a lost result
//! - Tokens JSON-escaped into the page and redacted in logs
//! - Identity events on the shell event bus

pub mod bridge;
pub mod error;
pub mod types;

pub use bridge::{token_delivery_script, IdentityBridge, LaunchOutcome, SIGN_IN_HOOK};
pub use error::{AuthError, Result};
pub use types::{AttemptId, IdentityState, PendingSignIn, SignInAttempt};
