use bridge_traits::SignInRequest;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifies one sign-in attempt across its launch and result callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttemptId(Uuid);

impl AttemptId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AttemptId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AttemptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where the single sign-in slot stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdentityState {
    #[default]
    Idle,
    /// The provider is being asked to show its UI.
    Requesting(AttemptId),
    /// The provider UI is up; the answer arrives as an external result.
    AwaitingResult(AttemptId),
}

impl IdentityState {
    pub fn attempt(&self) -> Option<AttemptId> {
        match self {
            IdentityState::Idle => None,
            IdentityState::Requesting(id) | IdentityState::AwaitingResult(id) => Some(*id),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IdentityState::Idle => "idle",
            IdentityState::Requesting(_) => "requesting",
            IdentityState::AwaitingResult(_) => "awaiting_result",
        }
    }
}

/// The shell's single sign-in slot. Owned by the shell and lent to
/// [`IdentityBridge`](crate::IdentityBridge) for each operation.
#[derive(Debug, Default)]
pub struct SignInAttempt {
    pub(crate) state: IdentityState,
}

impl SignInAttempt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> IdentityState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == IdentityState::Idle
    }
}

/// A sign-in the shell must launch off the UI task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSignIn {
    pub attempt: AttemptId,
    pub request: SignInRequest,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attempt_ids_are_unique() {
        assert_ne!(AttemptId::new(), AttemptId::new());
    }

    #[test]
    fn test_attempt_id_serializes_as_uuid_string() {
        let id = AttemptId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id));
    }

    #[test]
    fn test_state_attempt() {
        let id = AttemptId::new();
        assert_eq!(IdentityState::Idle.attempt(), None);
        assert_eq!(IdentityState::Requesting(id).attempt(), Some(id));
        assert_eq!(IdentityState::AwaitingResult(id).as_str(), "awaiting_result");
    }

    #[test]
    fn test_new_slot_is_idle() {
        assert!(SignInAttempt::new().is_idle());
    }
}
