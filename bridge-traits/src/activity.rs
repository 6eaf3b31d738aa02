//! External Flow Results
//!
//! Types shared by every bridge that launches an OS flow and later receives
//! its result through the host's single "result arrived" entry point.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Correlation token distinguishing which in-flight external flow a result
/// belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestCode(pub i32);

impl RequestCode {
    /// Reserved for the file chooser flow.
    pub const FILE_CHOOSER: RequestCode = RequestCode(1);
    /// Reserved for the identity (sign-in) flow.
    pub const SIGN_IN: RequestCode = RequestCode(100);
}

impl fmt::Display for RequestCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome reported by the OS for an external flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultCode {
    /// The user completed the flow
    Ok,
    /// The user backed out or the flow was dismissed
    Canceled,
    /// Any other host-specific code
    Other(i32),
}

impl ResultCode {
    /// Android encodes `RESULT_OK` as -1 and `RESULT_CANCELED` as 0.
    pub fn from_raw(code: i32) -> Self {
        match code {
            -1 => Self::Ok,
            0 => Self::Canceled,
            other => Self::Other(other),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }
}

/// Opaque data returned by an external flow
///
/// Mirrors what an OS result intent can carry: a single data URI, a
/// multi-item clip selection, and string extras (e.g. a serialized
/// credential for the identity provider to decode).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultPayload {
    /// Single data URI, when the flow returned exactly one item
    pub data_uri: Option<String>,
    /// Multi-item selection, in the order the host reported it
    #[serde(default)]
    pub clip_items: Vec<String>,
    /// Additional string extras
    #[serde(default)]
    pub extras: HashMap<String, String>,
}

impl ResultPayload {
    pub fn with_data_uri(uri: impl Into<String>) -> Self {
        Self {
            data_uri: Some(uri.into()),
            ..Default::default()
        }
    }

    pub fn with_clip_items<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            clip_items: items.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extras.insert(key.into(), value.into());
        self
    }

    pub fn extra(&self, key: &str) -> Option<&str> {
        self.extras.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_codes_are_distinct() {
        assert_ne!(RequestCode::SIGN_IN, RequestCode::FILE_CHOOSER);
    }

    #[test]
    fn test_result_code_from_raw() {
        assert_eq!(ResultCode::from_raw(-1), ResultCode::Ok);
        assert_eq!(ResultCode::from_raw(0), ResultCode::Canceled);
        assert_eq!(ResultCode::from_raw(7), ResultCode::Other(7));
        assert!(ResultCode::Ok.is_ok());
        assert!(!ResultCode::Canceled.is_ok());
    }

    #[test]
    fn test_payload_builders() {
        let payload = ResultPayload::with_data_uri("content://media/1").with_extra("k", "v");
        assert_eq!(payload.data_uri.as_deref(), Some("content://media/1"));
        assert_eq!(payload.extra("k"), Some("v"));
        assert_eq!(payload.extra("missing"), None);

        let clip = ResultPayload::with_clip_items(["a", "b"]);
        assert_eq!(clip.clip_items, vec!["a".to_string(), "b".to_string()]);
        assert!(clip.data_uri.is_none());
    }

    #[test]
    fn test_payload_deserializes_without_optional_fields() {
        let payload: ResultPayload = serde_json::from_str(r#"{"data_uri":null}"#).unwrap();
        assert_eq!(payload, ResultPayload::default());
    }
}
