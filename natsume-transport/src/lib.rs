//! Transport layer for the Natsume service
//!
//! Issues the status and unbind requests and hands back the raw
//! status code and body. Status codes are never turned into errors.

pub mod error;
pub mod http;
pub mod response;

pub use error::{Error, Result};
pub use http::HttpTransport;
pub use response::RawResponse;

use async_trait::async_trait;

use natsume_types::Credential;

/// Header carrying the operator credential
pub const TOKEN_HEADER: &str = "token";

/// Transport trait for the two panel operations
#[async_trait]
pub trait Transport: Send + Sync {
    /// `GET /status`
    async fn fetch_status(&self, credential: &Credential) -> Result<RawResponse>;

    /// `POST /bind` with `{"mac": ...}`
    async fn remove_binding(&self, mac: &str, credential: &Credential) -> Result<RawResponse>;

    /// Base address requests are sent to
    fn base_url(&self) -> &str;
}
