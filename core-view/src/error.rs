use bridge_traits::BridgeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViewError {
    #[error("Connectivity subscription failed: {0}")]
    Subscription(#[source] BridgeError),
}

pub type Result<T> = std::result::Result<T, ViewError>;
