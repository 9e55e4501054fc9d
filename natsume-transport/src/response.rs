//! Raw response material

use bytes::Bytes;
use serde_json::Value;

/// Status code and body of a completed request, uninterpreted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Bytes,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body is absent or whitespace only
    pub fn is_empty(&self) -> bool {
        self.body.iter().all(u8::is_ascii_whitespace)
    }

    /// Decode the body as JSON
    pub fn json(&self) -> serde_json::Result<Value> {
        serde_json::from_slice(&self.body)
    }

    /// Body as text, lossy, for logs and messages
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_range() {
        assert!(RawResponse::new(200, "").is_success());
        assert!(RawResponse::new(204, "").is_success());
        assert!(!RawResponse::new(199, "").is_success());
        assert!(!RawResponse::new(301, "").is_success());
        assert!(!RawResponse::new(403, "").is_success());
    }

    #[test]
    fn test_empty_body() {
        assert!(RawResponse::new(200, "").is_empty());
        assert!(RawResponse::new(200, " \n").is_empty());
        assert!(!RawResponse::new(200, "{}").is_empty());
    }

    #[test]
    fn test_json_body() {
        let response = RawResponse::new(403, r#"{"error":"forbidden","msg":"bad token"}"#);
        assert_eq!(response.json().unwrap()["msg"], "bad token");
        assert!(RawResponse::new(500, "oops").json().is_err());
    }
}
