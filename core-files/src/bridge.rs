//! # File Selection Bridge
//!
//! At most one chooser request is pending at a time. A new request
//! resolves the previous one with nothing before launching the picker, and
//! the picker's result resolves whatever is pending when it arrives.

use crate::error::FileSelectionError;
use crate::types::{FileChooserCallback, FileRequestSlot, FileSelection, PendingFileRequest};
use bridge_traits::{FileChooserSpec, FilePicker, RequestCode, ResultCode, ResultPayload};
use core_runtime::events::{EventBus, FileEvent, ShellEvent};
use core_runtime::logging::strip_path;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

pub struct FileSelectionBridge {
    picker: Arc<dyn FilePicker>,
    event_bus: EventBus,
}

impl FileSelectionBridge {
    pub fn new(picker: Arc<dyn FilePicker>, event_bus: EventBus) -> Self {
        Self { picker, event_bus }
    }

    /// The page opened a file chooser.
    ///
    /// Returns `true` when the picker was launched and `callback` is now
    /// pending. On launch failure `callback` is resolved with nothing, the
    /// slot is left empty and `false` is returned.
    #[instrument(skip(self, slot, callback), fields(multiple = spec.allow_multiple))]
    pub fn on_page_requests_file(
        &self,
        slot: &mut FileRequestSlot,
        spec: FileChooserSpec,
        callback: FileChooserCallback,
    ) -> bool {
        if slot.clear() {
            debug!("Superseded pending file request");
            self.emit(FileEvent::Superseded);
        }

        if let Err(e) = self.picker.launch(&spec, RequestCode::FILE_CHOOSER) {
            let e = FileSelectionError::LaunchFailed(e);
            warn!(error = %e, "File chooser could not start");
            callback.resolve(FileSelection::Empty);
            self.emit(FileEvent::LaunchFailed {
                message: e.to_string(),
            });
            return false;
        }

        debug!(accept = ?spec.accept_types, "File chooser launched");
        self.emit(FileEvent::ChooserOpened {
            allow_multiple: spec.allow_multiple,
            accept_types: spec.accept_types.clone(),
        });
        slot.pending = Some(PendingFileRequest { spec, callback });
        true
    }

    /// An external result arrived.
    ///
    /// Returns `false` when `request_code` is not the chooser code. A
    /// chooser result with nothing pending is logged and dropped.
    #[instrument(skip(self, slot, payload), fields(pending = slot.is_pending()))]
    pub fn on_result(
        &self,
        slot: &mut FileRequestSlot,
        request_code: RequestCode,
        result_code: ResultCode,
        payload: &ResultPayload,
    ) -> bool {
        if request_code != RequestCode::FILE_CHOOSER {
            return false;
        }

        let Some(pending) = slot.pending.take() else {
            warn!(?result_code, "File chooser result without a pending request");
            self.emit(FileEvent::OrphanResult);
            return true;
        };

        let selection = build_selection(result_code, payload);
        let count = selection.len();
        info!(
            count,
            files = ?selection.uris().iter().map(|uri| strip_path(uri)).collect::<Vec<_>>(),
            "Resolving file request"
        );
        pending.callback.resolve(selection);
        self.emit(FileEvent::Resolved { count });
        true
    }

    fn emit(&self, event: FileEvent) {
        let _ = self.event_bus.emit(ShellEvent::Files(event));
    }
}

impl fmt::Debug for FileSelectionBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileSelectionBridge").finish_non_exhaustive()
    }
}

/// Maps a picker result to what the page receives.
///
/// Only an OK result selects anything. A single data URI wins over clip
/// items; clip items keep their order.
pub fn build_selection(result_code: ResultCode, payload: &ResultPayload) -> FileSelection {
    if !result_code.is_ok() {
        return FileSelection::Empty;
    }

    match &payload.data_uri {
        Some(uri) => FileSelection::Selected(vec![uri.clone()]),
        None => FileSelection::from_uris(payload.clip_items.clone()),
    }
}
