use bridge_traits::BridgeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShellError {
    #[error("Configuration error: {0}")]
    Config(#[from] core_runtime::Error),

    #[error("Host bridge error: {0}")]
    Bridge(#[from] BridgeError),

    #[error("View error: {0}")]
    View(#[from] core_view::ViewError),

    #[error("Identity error: {0}")]
    Auth(#[from] core_auth::AuthError),

    #[error("File selection error: {0}")]
    Files(#[from] core_files::FileSelectionError),

    #[error("Malformed page command: {0}")]
    PageCommand(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ShellError>;
