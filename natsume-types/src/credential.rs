//! Operator credential

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque token granting access to the status and bind endpoints.
///
/// The value is never interpreted. `Debug` is redacted so the token
/// cannot leak through logs or error reports.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Raw token, for attaching to a request header
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Check the token can be carried in an HTTP header
    ///
    /// Accepts tab and every byte from 0x20 up except DEL, the same set
    /// `http::HeaderValue::from_str` allows. A pasted trailing newline
    /// fails this check.
    pub fn is_header_safe(&self) -> bool {
        self.0
            .bytes()
            .all(|b| b == b'\t' || (b >= 0x20 && b != 0x7f))
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

impl From<String> for Credential {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl From<&str> for Credential {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_is_redacted() {
        let credential = Credential::new("tok123");
        let rendered = format!("{:?}", credential);
        assert!(!rendered.contains("tok123"));
        assert_eq!(credential.expose(), "tok123");
    }

    #[test]
    fn test_blank_token_is_empty() {
        assert!(Credential::new("   ").is_empty());
        assert!(!Credential::new("x").is_empty());
    }

    #[test]
    fn test_header_safe() {
        assert!(Credential::new("tok123").is_header_safe());
        assert!(Credential::new("with space\tand tab").is_header_safe());
        assert!(Credential::new("jeton-é").is_header_safe());

        assert!(!Credential::new("tok123\n").is_header_safe());
        assert!(!Credential::new("tok\r\n123").is_header_safe());
        assert!(!Credential::new("tok\u{7f}").is_header_safe());
        assert!(!Credential::new("\0").is_header_safe());
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let json = serde_json::to_string(&Credential::new("abc")).unwrap();
        assert_eq!(json, "\"abc\"");
    }
}
