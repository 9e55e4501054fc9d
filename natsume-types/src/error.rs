//! Validation errors

pub type Result<T> = std::result::Result<T, ValidationError>;

/// Kind of structural mismatch found at a field path
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Mismatch {
    /// Required key is absent from the object
    #[error("required field is missing")]
    Missing,

    /// Value has the wrong JSON type
    #[error("expected {expected}, found {found}")]
    WrongType {
        expected: &'static str,
        found: &'static str,
    },

    /// Key is not declared by the schema
    #[error("field is not part of the schema")]
    UnknownField,

    /// Body could not be decoded as JSON at all
    #[error("body is not valid JSON: {0}")]
    NotJson(String),

    /// Shape matched but the typed model refused the value
    #[error("value does not fit the model: {0}")]
    Decode(String),
}

/// A response body did not match the expected shape.
///
/// `path` names the offending field, e.g. `bind_count` or
/// `infos[3].id`. The document root is `$`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{schema} mismatch at `{path}`: {mismatch}")]
pub struct ValidationError {
    pub schema: &'static str,
    pub path: String,
    pub mismatch: Mismatch,
}

impl ValidationError {
    pub fn new(schema: &'static str, path: impl Into<String>, mismatch: Mismatch) -> Self {
        Self {
            schema,
            path: path.into(),
            mismatch,
        }
    }

    /// Check whether the failure points at the given field path
    pub fn is_at(&self, path: &str) -> bool {
        self.path == path
    }
}
