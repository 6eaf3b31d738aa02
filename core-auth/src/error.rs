use bridge_traits::BridgeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Identity provider could not start sign-in: {0}")]
    LaunchFailed(#[source] BridgeError),

    #[error("Sign-in was cancelled or declined")]
    Cancelled,

    #[error("Sign-in result could not be decoded: {0}")]
    Decode(#[source] BridgeError),

    #[error("Sign-in result carried no ID token")]
    MissingToken,

    #[error("Token delivery to page failed: {0}")]
    Delivery(#[source] BridgeError),
}

pub type Result<T> = std::result::Result<T, AuthError>;
