//! Typed validation of response bodies
//!
//! Typed values are only built once the structural check has passed,
//! so a caller never sees a partially populated snapshot.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Mismatch, Result, ValidationError};
use crate::schema::{Schema, UnknownFields, ERROR_RESPONSE, ROOT, STATUS_RESPONSE};
use crate::status::{ErrorEnvelope, StatusSnapshot};

/// Validator with a fixed unknown-field policy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Validator {
    unknown: UnknownFields,
}

impl Validator {
    pub fn new(unknown: UnknownFields) -> Self {
        Self { unknown }
    }

    /// Reject keys no schema declares
    pub fn strict() -> Self {
        Self::new(UnknownFields::Reject)
    }

    /// Discard keys no schema declares
    pub fn lenient() -> Self {
        Self::new(UnknownFields::Ignore)
    }

    pub fn unknown_fields(&self) -> UnknownFields {
        self.unknown
    }

    pub fn status(&self, value: &Value) -> Result<StatusSnapshot> {
        self.typed(&STATUS_RESPONSE, value)
    }

    pub fn error(&self, value: &Value) -> Result<ErrorEnvelope> {
        self.typed(&ERROR_RESPONSE, value)
    }

    /// Decode a raw body and validate it as a status response
    pub fn status_from_slice(&self, body: &[u8]) -> Result<StatusSnapshot> {
        self.status(&decode(&STATUS_RESPONSE, body)?)
    }

    /// Decode a raw body and validate it as an error envelope
    pub fn error_from_slice(&self, body: &[u8]) -> Result<ErrorEnvelope> {
        self.error(&decode(&ERROR_RESPONSE, body)?)
    }

    fn typed<'a, T>(&self, schema: &'static Schema, value: &'a Value) -> Result<T>
    where
        T: Deserialize<'a>,
    {
        schema.check(value, self.unknown)?;

        // The walk above already proved the shape; a failure here means
        // the schema table and the struct definition disagree.
        T::deserialize(value)
            .map_err(|e| ValidationError::new(schema.name, ROOT, Mismatch::Decode(e.to_string())))
    }
}

/// Validate a status response with the strict policy
pub fn validate_status(value: &Value) -> Result<StatusSnapshot> {
    Validator::strict().status(value)
}

/// Validate an error envelope with the strict policy
pub fn validate_error(value: &Value) -> Result<ErrorEnvelope> {
    Validator::strict().error(value)
}

fn decode(schema: &'static Schema, body: &[u8]) -> Result<Value> {
    serde_json::from_slice(body)
        .map_err(|e| ValidationError::new(schema.name, ROOT, Mismatch::NotJson(e.to_string())))
}
