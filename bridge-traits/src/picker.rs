//! File Picker Abstraction

use serde::{Deserialize, Serialize};

use crate::activity::RequestCode;
use crate::error::Result;

/// What the page asked for through an `<input type="file">` element
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChooserSpec {
    /// MIME types or extensions from the `accept` attribute
    #[serde(default)]
    pub accept_types: Vec<String>,
    /// `multiple` attribute present
    #[serde(default)]
    pub allow_multiple: bool,
    /// `capture` attribute present
    #[serde(default)]
    pub capture: bool,
}

/// Native file picker
///
/// `launch` only starts the picker; the selection arrives later as an
/// external result tagged with `request_code`.
pub trait FilePicker: Send + Sync {
    fn launch(&self, spec: &FileChooserSpec, request_code: RequestCode) -> Result<()>;
}
