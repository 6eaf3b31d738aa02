//! # File Selection Module
//!
//! Native file chooser bridge for `<input type="file">` elements in the
//! hosted page.
//!
//! The page's engine hands the shell a single-use callback per chooser
//! request. [`FileSelectionBridge`] launches the OS picker, parks the
//! callback in the shell's [`FileRequestSlot`] and resolves it when the
//! picker returns. Every callback is resolved exactly once: with the
//! selection, with nothing when cancelled or superseded, or with nothing
//! when dropped unresolved.

pub mod bridge;
pub mod error;
pub mod types;

pub use bridge::{build_selection, FileSelectionBridge};
pub use error::{FileSelectionError, Result};
pub use types::{FileChooserCallback, FileRequestSlot, FileSelection, PendingFileRequest};
