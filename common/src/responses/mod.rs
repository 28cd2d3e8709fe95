use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The uniform response body of every action.
///
/// Transport status is always 200; clients branch on `status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Envelope {
    Success {
        data: Value,
    },
    Error {
        message: String,
        /// Stable machine-readable error kind, e.g. `authentication_error`.
        kind: String,
    },
}

impl Envelope {
    pub fn success(data: Value) -> Self {
        Envelope::Success { data }
    }

    pub fn error(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Envelope::Error {
            message: message.into(),
            kind: kind.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Envelope::Success { .. })
    }
}
