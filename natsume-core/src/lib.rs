//! # natsume-core
//!
//! Client-side state for the Natsume panel.
//!
//! This crate provides:
//! - The session store holding the operator credential
//! - Persistence backends for that credential
//! - Client configuration loaded from TOML

pub mod config;
pub mod error;
pub mod session;

pub use config::ClientConfig;
pub use error::{Error, Result};
pub use session::{FileBackend, MemoryBackend, Session, SessionBackend};

/// Namespace of the persisted session document
pub const SESSION_NAMESPACE: &str = "main";

/// Default service address
pub const DEFAULT_SERVER_ADDR: &str = "http://127.0.0.1:2333";

/// Default request timeout (seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
