//! High-level panel interface

use tracing::{debug, info, warn};

use natsume_core::{ClientConfig, FileBackend, Session};
use natsume_transport::{HttpTransport, RawResponse, Transport};
use natsume_types::{Credential, StatusSnapshot, Validator};

use crate::error::{Error, Result};

/// Operator panel
///
/// Ties the transport, the session store and the response validator
/// together. Raw responses are classified as follows:
///
/// | Response                                   | Result                  |
/// |--------------------------------------------|-------------------------|
/// | status 2xx, body matches StatusResponse    | `Ok(snapshot)`          |
/// | status 2xx, body matches ErrorResponse     | `Err(Rejected)`         |
/// | status 2xx, body matches neither           | `Err(Malformed)`        |
/// | unbind 2xx, any body                       | `Ok(())`                |
/// | any non-2xx                                | `Err(Rejected)`         |
///
/// Overlapping calls are not coordinated; whichever response arrives
/// last is what the caller sees last.
///
/// # Examples
///
/// ```no_run
/// use natsume::Panel;
/// use natsume_core::Session;
/// use natsume_transport::HttpTransport;
///
/// #[tokio::main]
/// async fn main() -> natsume::Result<()> {
///     let transport = HttpTransport::new("http://127.0.0.1:2333")?;
///     let panel = Panel::new(transport, Session::in_memory());
///
///     panel.login("tok123")?;
///     let status = panel.status().await?;
///     println!("{} devices bound", status.bind_count);
///
///     Ok(())
/// }
/// ```
pub struct Panel {
    transport: Box<dyn Transport>,
    session: Session,
    validator: Validator,
}

impl Panel {
    /// Create a panel over any transport, validating strictly
    pub fn new(transport: impl Transport + 'static, session: Session) -> Self {
        Self {
            transport: Box::new(transport),
            session,
            validator: Validator::strict(),
        }
    }

    /// Build the HTTP transport and file-backed session described by
    /// `config`
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config.server_addr)?.with_timeout(config.timeout());
        let session = Session::open(FileBackend::in_dir(config.session_dir()))?;

        Ok(Self::new(transport, session).with_validator(Validator::new(config.unknown_fields())))
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = validator;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn server(&self) -> &str {
        self.transport.base_url()
    }

    /// Store the operator token
    pub fn login(&self, token: impl Into<String>) -> Result<()> {
        self.session.set(token)?;
        Ok(())
    }

    /// Forget the operator token
    pub fn logout(&self) -> Result<()> {
        self.session.clear()?;
        Ok(())
    }

    /// Fetch and validate the binding status
    pub async fn status(&self) -> Result<StatusSnapshot> {
        let credential = self.credential()?;

        debug!("Fetching status from {}...", self.server());
        let raw = self.transport.fetch_status(&credential).await?;

        let status = self.interpret_status(&raw)?;
        debug!(
            "Status: {} bound, {} infos, {} synced, {} not synced",
            status.bind_count, status.info_count, status.sync_count, status.not_sync_count
        );

        Ok(status)
    }

    /// Remove the binding of the device with the given MAC
    pub async fn remove_binding(&self, mac: &str) -> Result<()> {
        let mac = mac.trim();
        if mac.is_empty() {
            return Err(Error::InvalidMac(mac.to_string()));
        }

        let credential = self.credential()?;

        info!("Removing binding of {}...", mac);
        let raw = self.transport.remove_binding(mac, &credential).await?;

        self.interpret_removal(&raw)?;
        info!("Binding of {} removed", mac);

        Ok(())
    }

    /// Classify a raw status response
    pub fn interpret_status(&self, raw: &RawResponse) -> Result<StatusSnapshot> {
        if !raw.is_success() {
            return Err(self.rejection(raw));
        }

        match self.validator.status_from_slice(&raw.body) {
            Ok(status) => Ok(status),
            Err(invalid) => match self.validator.error_from_slice(&raw.body) {
                Ok(envelope) => {
                    warn!(
                        "Status endpoint answered HTTP {} with an error: {}",
                        raw.status, envelope.msg
                    );
                    Err(Error::Rejected {
                        status: raw.status,
                        envelope: Some(envelope),
                    })
                }
                Err(_) => {
                    warn!("Malformed status response: {}", invalid);
                    Err(Error::Malformed {
                        status: raw.status,
                        source: invalid,
                    })
                }
            },
        }
    }

    /// Classify a raw unbind response.
    ///
    /// Any 2xx counts as success, including an empty body.
    pub fn interpret_removal(&self, raw: &RawResponse) -> Result<()> {
        if raw.is_success() {
            Ok(())
        } else {
            Err(self.rejection(raw))
        }
    }

    // Helper methods

    fn credential(&self) -> Result<Credential> {
        self.session.get().ok_or(Error::NotAuthenticated)
    }

    fn rejection(&self, raw: &RawResponse) -> Error {
        let envelope = if raw.is_empty() {
            None
        } else {
            match self.validator.error_from_slice(&raw.body) {
                Ok(envelope) => Some(envelope),
                Err(e) => {
                    debug!("Error body is not an envelope: {}", e);
                    None
                }
            }
        };

        warn!("Request rejected with HTTP {}", raw.status);

        Error::Rejected {
            status: raw.status,
            envelope,
        }
    }
}
