//! # natsume
//!
//! Operator client for the Natsume device binding service.
//!
//! ## Features
//!
//! - Schema-checked status responses, no partially valid data
//! - Transport that never turns HTTP statuses into errors
//! - Persistent operator session
//! - Distinct errors for "server said no" and "server said something
//!   we do not understand"
//!
//! ## Quick Start
//!
//! ```no_run
//! use natsume::Panel;
//! use natsume_core::ClientConfig;
//!
//! #[tokio::main]
//! async fn main() -> natsume::Result<()> {
//!     let config = ClientConfig::load(&ClientConfig::default_path())?;
//!     let panel = Panel::from_config(&config)?;
//!
//!     // Show unsynced devices
//!     let status = panel.status().await?;
//!     for info in status.unsynced() {
//!         println!("{}", info);
//!     }
//!
//!     // Unbind one
//!     panel.remove_binding("AA:BB:CC:DD:EE:FF").await?;
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod panel;
pub mod render;

// Re-exports
pub use error::{Error, Result};
pub use panel::Panel;

// Re-export types
pub use natsume_core::{ClientConfig, Session};
pub use natsume_transport::{HttpTransport, RawResponse, Transport};
pub use natsume_types::{Credential, DeviceInfo, ErrorEnvelope, StatusSnapshot, ValidationError};
