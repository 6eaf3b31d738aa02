use bridge_traits::BridgeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FileSelectionError {
    #[error("File picker could not be launched: {0}")]
    LaunchFailed(#[source] BridgeError),
}

pub type Result<T> = std::result::Result<T, FileSelectionError>;
