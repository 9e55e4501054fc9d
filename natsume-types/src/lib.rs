//! Type definitions for natsume
//!
//! Holds the wire model of the binding service together with the
//! schema tables used to validate untrusted response bodies before
//! they are turned into typed values.

pub mod credential;
pub mod device_info;
pub mod error;
pub mod schema;
pub mod status;
pub mod validate;

pub use credential::Credential;
pub use device_info::{DeviceInfo, SyncState};
pub use error::{Mismatch, Result, ValidationError};
pub use schema::{FieldRule, Kind, Schema, UnknownFields};
pub use status::{ErrorEnvelope, StatusSnapshot};
pub use validate::{validate_error, validate_status, Validator};
