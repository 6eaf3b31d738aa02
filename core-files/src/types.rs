use bridge_traits::FileChooserSpec;
use serde::Serialize;
use std::fmt;

/// What the page's chooser callback receives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "uris", rename_all = "snake_case")]
pub enum FileSelection {
    /// Cancelled, superseded or failed: the page sees `null`.
    Empty,
    /// Content URIs in the order the picker reported them.
    Selected(Vec<String>),
}

impl FileSelection {
    /// `Empty` for an empty list.
    pub fn from_uris(uris: Vec<String>) -> Self {
        if uris.is_empty() {
            Self::Empty
        } else {
            Self::Selected(uris)
        }
    }

    pub fn uris(&self) -> &[String] {
        match self {
            Self::Empty => &[],
            Self::Selected(uris) => uris,
        }
    }

    pub fn len(&self) -> usize {
        self.uris().len()
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

type Resolver = Box<dyn FnOnce(FileSelection) + Send>;

/// Single-use chooser callback.
///
/// [`resolve`](Self::resolve) consumes the callback, so it cannot run
/// twice. Dropping it unresolved resolves it with [`FileSelection::Empty`],
/// so it cannot run zero times either.
pub struct FileChooserCallback {
    resolver: Option<Resolver>,
}

impl FileChooserCallback {
    pub fn new<F>(resolver: F) -> Self
    where
        F: FnOnce(FileSelection) + Send + 'static,
    {
        Self {
            resolver: Some(Box::new(resolver)),
        }
    }

    pub fn resolve(mut self, selection: FileSelection) {
        if let Some(resolver) = self.resolver.take() {
            resolver(selection);
        }
    }
}

impl Drop for FileChooserCallback {
    fn drop(&mut self) {
        if let Some(resolver) = self.resolver.take() {
            resolver(FileSelection::Empty);
        }
    }
}

impl fmt::Debug for FileChooserCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileChooserCallback")
            .field("resolved", &self.resolver.is_none())
            .finish()
    }
}

/// An in-flight chooser request.
#[derive(Debug)]
pub struct PendingFileRequest {
    pub spec: FileChooserSpec,
    pub(crate) callback: FileChooserCallback,
}

/// The shell's single pending-request slot.
#[derive(Debug, Default)]
pub struct FileRequestSlot {
    pub(crate) pending: Option<PendingFileRequest>,
}

impl FileRequestSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending_spec(&self) -> Option<&FileChooserSpec> {
        self.pending.as_ref().map(|request| &request.spec)
    }

    /// Resolves any pending request with nothing. Returns whether one was
    /// pending.
    pub fn clear(&mut self) -> bool {
        match self.pending.take() {
            Some(request) => {
                request.callback.resolve(FileSelection::Empty);
                true
            }
            None => false,
        }
    }
}
