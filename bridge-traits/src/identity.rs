//! Identity Provider Abstraction
//!
//! Token issuance and consent UI belong to the OS identity SDK. The shell
//! asks it to start a flow, then hands the correlated result payload back to
//! it for decoding.

use serde::{Deserialize, Serialize};

use crate::activity::{RequestCode, ResultPayload};
use crate::error::Result;

/// Options for a credential flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInRequest {
    /// OAuth client ID of the backend that will verify the ID token
    pub server_client_id: String,
    /// Request a Google ID token
    pub id_token_supported: bool,
    /// Only offer accounts that already authorized the app
    pub filter_by_authorized_accounts: bool,
    /// Sign in without interaction when a single account matches
    pub auto_select_enabled: bool,
}

impl SignInRequest {
    pub fn new(server_client_id: impl Into<String>) -> Self {
        Self {
            server_client_id: server_client_id.into(),
            id_token_supported: true,
            filter_by_authorized_accounts: false,
            auto_select_enabled: false,
        }
    }
}

/// Credential decoded from a sign-in result
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInCredential {
    /// Account identifier (usually the email)
    pub id: Option<String>,
    pub display_name: Option<String>,
    pub id_token: Option<String>,
}

/// Identity provider trait
///
/// # Platform Support
///
/// - **Android**: Identity Services `SignInClient` (One Tap)
/// - **iOS**: `ASAuthorizationController`
/// - **Desktop/Web**: not available
#[async_trait::async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Ask the OS to start the credential flow.
    ///
    /// Resolves once the flow has been launched (or failed to launch). The
    /// user's answer arrives later as an external result tagged with
    /// `request_code`.
    async fn begin_sign_in(&self, request: &SignInRequest, request_code: RequestCode)
        -> Result<()>;

    /// Decode the credential carried by a sign-in result payload.
    fn credential_from_payload(&self, payload: &ResultPayload) -> Result<SignInCredential>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_in_request_defaults() {
        let request = SignInRequest::new("client-123.apps.googleusercontent.com");
        assert!(request.id_token_supported);
        assert!(!request.filter_by_authorized_accounts);
        assert!(!request.auto_select_enabled);
    }
}
