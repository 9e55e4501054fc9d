//! Transport errors
//!
//! Only failures that leave no HTTP status to inspect end up here.
//! A 4xx/5xx answer is a successful transport round trip.

use std::time::Duration;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Credential cannot be sent as a header value")]
    InvalidCredential,

    #[error("Request timed out after {}", format_timeout(.timeout))]
    Timeout { timeout: Duration },

    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// Check if the request might not have reached the service
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::Connect(_) | Self::InvalidAddress(_))
    }
}

fn format_timeout(timeout: &Duration) -> String {
    if timeout.subsec_nanos() == 0 {
        format!("{}s", timeout.as_secs())
    } else {
        format!("{}ms", timeout.as_millis())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_message() {
        let whole = Error::Timeout {
            timeout: Duration::from_secs(10),
        };
        assert_eq!(whole.to_string(), "Request timed out after 10s");

        let short = Error::Timeout {
            timeout: Duration::from_millis(200),
        };
        assert_eq!(short.to_string(), "Request timed out after 200ms");

        let mixed = Error::Timeout {
            timeout: Duration::from_millis(1500),
        };
        assert_eq!(mixed.to_string(), "Request timed out after 1500ms");
    }

    #[test]
    fn test_unreachable() {
        assert!(Error::Connect("refused".into()).is_unreachable());
        assert!(Error::InvalidAddress("nope".into()).is_unreachable());
        assert!(!Error::InvalidCredential.is_unreachable());

        let timeout = Error::Timeout {
            timeout: Duration::from_secs(1),
        };
        assert!(!timeout.is_unreachable());
    }
}
