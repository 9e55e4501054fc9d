//! High-level error types

use natsume_types::{ErrorEnvelope, ValidationError};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request never produced an HTTP status
    #[error("Transport error: {0}")]
    Transport(#[from] natsume_transport::Error),

    #[error("Session or config error: {0}")]
    Core(#[from] natsume_core::Error),

    #[error("Not logged in - run `natsume-panel login <token>` first")]
    NotAuthenticated,

    #[error("Invalid MAC address: {0:?}")]
    InvalidMac(String),

    /// The service answered and said no
    #[error("Request rejected (HTTP {status})")]
    Rejected {
        status: u16,
        envelope: Option<ErrorEnvelope>,
    },

    /// The service answered with a body matching no known shape
    #[error("Malformed response (HTTP {status}): {source}")]
    Malformed {
        status: u16,
        source: ValidationError,
    },
}

impl Error {
    /// Message suitable for showing to the operator
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected {
                envelope: Some(envelope),
                ..
            } => {
                if envelope.msg.trim().is_empty() {
                    envelope.error.clone()
                } else {
                    envelope.msg.clone()
                }
            }
            Self::Rejected {
                status: status @ (401 | 403),
                envelope: None,
            } => format!(
                "request rejected by server (HTTP {}), check the panel token",
                status
            ),
            Self::Rejected {
                status,
                envelope: None,
            } => format!("request rejected by server (HTTP {})", status),
            Self::Malformed { source, .. } => {
                format!("malformed response from server: {}", source)
            }
            Self::Transport(err) if err.is_unreachable() => {
                format!("{} (check --server or server_addr in the config)", err)
            }
            other => other.to_string(),
        }
    }

    /// Server said no
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }

    /// Server said something we do not understand
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed { .. })
    }

    /// HTTP status, when the service answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } | Self::Malformed { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use natsume_types::validate_status;

    #[test]
    fn test_envelope_message_wins() {
        let err = Error::Rejected {
            status: 403,
            envelope: Some(ErrorEnvelope {
                error: "forbidden".into(),
                msg: "bad token".into(),
            }),
        };
        assert_eq!(err.user_message(), "bad token");
        assert_eq!(err.status(), Some(403));
        assert!(err.is_rejection());
    }

    #[test]
    fn test_blank_msg_falls_back_to_error() {
        let err = Error::Rejected {
            status: 500,
            envelope: Some(ErrorEnvelope {
                error: "database".into(),
                msg: String::new(),
            }),
        };
        assert_eq!(err.user_message(), "database");
    }

    #[test]
    fn test_generic_rejection() {
        let err = Error::Rejected {
            status: 403,
            envelope: None,
        };
        assert!(err.user_message().contains("HTTP 403"));
        assert!(err.user_message().contains("token"));

        let err = Error::Rejected {
            status: 500,
            envelope: None,
        };
        assert_eq!(err.user_message(), "request rejected by server (HTTP 500)");
    }

    #[test]
    fn test_unreachable_hints_at_server() {
        let err = Error::from(natsume_transport::Error::Connect("refused".into()));
        assert!(err.user_message().starts_with("Connection failed: refused"));
        assert!(err.user_message().contains("--server"));

        let err = Error::from(natsume_transport::Error::InvalidCredential);
        assert!(!err.user_message().contains("--server"));
    }

    #[test]
    fn test_malformed_message() {
        let source = validate_status(&serde_json::json!({})).unwrap_err();
        let err = Error::Malformed { status: 200, source };

        assert!(err.is_malformed());
        assert!(err.user_message().starts_with("malformed response from server"));
        assert!(err.user_message().contains("bind_count"));
    }
}
