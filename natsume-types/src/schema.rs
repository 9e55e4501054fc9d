//! Response shapes as data
//!
//! Each shape the service can return is a static table of field
//! rules. [`Schema::check`] walks a table against a decoded JSON value
//! and reports the first mismatch together with its field path.
//!
//! ```text
//! StatusResponse
//! ├── bind_count      count
//! ├── info_count      count
//! ├── sync_count      count
//! ├── notsync_count   count
//! └── infos           [Info]
//!     ├── mac         string | null
//!     ├── id          string
//!     ├── ip          string | null
//!     ├── last_seen   string | null
//!     ├── username    string | null
//!     ├── password    string | null
//!     └── synced      boolean | null
//! ```

use serde_json::{Map, Value};

use crate::error::{Mismatch, Result, ValidationError};

/// Path of the document root
pub const ROOT: &str = "$";

/// Accepted JSON type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    String,
    Boolean,
    /// Non-negative integer
    Count,
    /// Array whose elements all match the nested schema
    Array(&'static Schema),
}

impl Kind {
    fn describe(&self) -> &'static str {
        match self {
            Kind::String => "string",
            Kind::Boolean => "boolean",
            Kind::Count => "non-negative integer",
            Kind::Array(_) => "array",
        }
    }
}

/// Acceptance rule for one object key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub name: &'static str,
    pub kind: Kind,
    /// Whether an explicit `null` is accepted. The key itself must
    /// be present either way.
    pub nullable: bool,
}

impl FieldRule {
    pub const fn required(name: &'static str, kind: Kind) -> Self {
        Self {
            name,
            kind,
            nullable: false,
        }
    }

    pub const fn nullable(name: &'static str, kind: Kind) -> Self {
        Self {
            name,
            kind,
            nullable: true,
        }
    }
}

/// How keys that no rule declares are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownFields {
    /// Fail validation on the first undeclared key
    #[default]
    Reject,
    /// Accept and discard undeclared keys
    Ignore,
}

/// Object shape
#[derive(Debug, PartialEq, Eq)]
pub struct Schema {
    pub name: &'static str,
    pub fields: &'static [FieldRule],
}

pub static DEVICE_INFO: Schema = Schema {
    name: "Info",
    fields: &[
        FieldRule::nullable("mac", Kind::String),
        FieldRule::required("id", Kind::String),
        FieldRule::nullable("ip", Kind::String),
        FieldRule::nullable("last_seen", Kind::String),
        FieldRule::nullable("username", Kind::String),
        FieldRule::nullable("password", Kind::String),
        FieldRule::nullable("synced", Kind::Boolean),
    ],
};

pub static STATUS_RESPONSE: Schema = Schema {
    name: "StatusResponse",
    fields: &[
        FieldRule::required("bind_count", Kind::Count),
        FieldRule::required("info_count", Kind::Count),
        FieldRule::required("sync_count", Kind::Count),
        FieldRule::required("notsync_count", Kind::Count),
        FieldRule {
            name: "infos",
            kind: Kind::Array(&DEVICE_INFO),
            nullable: false,
        },
    ],
};

pub static ERROR_RESPONSE: Schema = Schema {
    name: "ErrorResponse",
    fields: &[
        FieldRule::required("error", Kind::String),
        FieldRule::required("msg", Kind::String),
    ],
};

impl Schema {
    /// Check `value` against this shape.
    ///
    /// Rules are evaluated in declaration order, so the reported path
    /// is deterministic for a given input.
    pub fn check(&self, value: &Value, unknown: UnknownFields) -> Result<()> {
        self.check_at(value, unknown, ROOT)
    }

    pub fn rule(&self, name: &str) -> Option<&FieldRule> {
        self.fields.iter().find(|rule| rule.name == name)
    }

    fn check_at(&self, value: &Value, unknown: UnknownFields, path: &str) -> Result<()> {
        let object = value
            .as_object()
            .ok_or_else(|| self.wrong_type(path, "object", value))?;

        for rule in self.fields {
            let field_path = join(path, rule.name);
            match object.get(rule.name) {
                None => {
                    return Err(ValidationError::new(self.name, field_path, Mismatch::Missing));
                }
                Some(Value::Null) if rule.nullable => {}
                Some(field) => self.check_kind(rule, field, unknown, &field_path)?,
            }
        }

        if unknown == UnknownFields::Reject {
            self.reject_unknown(object, path)?;
        }

        Ok(())
    }

    fn check_kind(
        &self,
        rule: &FieldRule,
        value: &Value,
        unknown: UnknownFields,
        path: &str,
    ) -> Result<()> {
        let accepted = match rule.kind {
            Kind::String => value.is_string(),
            Kind::Boolean => value.is_boolean(),
            Kind::Count => value.as_u64().is_some(),
            Kind::Array(nested) => {
                let items = value.as_array().ok_or_else(|| {
                    self.wrong_type(path, rule.kind.describe(), value)
                })?;
                for (index, item) in items.iter().enumerate() {
                    nested.check_at(item, unknown, &format!("{}[{}]", path, index))?;
                }
                true
            }
        };

        if accepted {
            Ok(())
        } else {
            Err(self.wrong_type(path, rule.kind.describe(), value))
        }
    }

    fn reject_unknown(&self, object: &Map<String, Value>, path: &str) -> Result<()> {
        match object.keys().find(|key| self.rule(key).is_none()) {
            Some(key) => Err(ValidationError::new(
                self.name,
                join(path, key),
                Mismatch::UnknownField,
            )),
            None => Ok(()),
        }
    }

    fn wrong_type(&self, path: &str, expected: &'static str, found: &Value) -> ValidationError {
        ValidationError::new(
            self.name,
            path,
            Mismatch::WrongType {
                expected,
                found: type_name(found),
            },
        )
    }
}

fn join(parent: &str, name: &str) -> String {
    if parent == ROOT {
        name.to_string()
    } else {
        format!("{}.{}", parent, name)
    }
}

/// JSON type name used in error messages
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn info() -> Value {
        json!({
            "mac": null,
            "id": "dev1",
            "ip": null,
            "last_seen": null,
            "username": null,
            "password": null,
            "synced": null
        })
    }

    #[test]
    fn test_all_nullable_fields_null() {
        assert!(DEVICE_INFO.check(&info(), UnknownFields::Reject).is_ok());
    }

    #[test]
    fn test_id_must_be_string() {
        let mut value = info();
        value["id"] = Value::Null;

        let err = DEVICE_INFO.check(&value, UnknownFields::Reject).unwrap_err();
        assert_eq!(err.path, "id");
        assert_eq!(
            err.mismatch,
            Mismatch::WrongType {
                expected: "string",
                found: "null"
            }
        );
    }

    #[test]
    fn test_nullable_key_must_be_present() {
        let mut value = info();
        value.as_object_mut().unwrap().remove("synced");

        let err = DEVICE_INFO.check(&value, UnknownFields::Reject).unwrap_err();
        assert_eq!(err.path, "synced");
        assert_eq!(err.mismatch, Mismatch::Missing);
    }

    #[test]
    fn test_synced_rejects_string() {
        let mut value = info();
        value["synced"] = json!("true");

        let err = DEVICE_INFO.check(&value, UnknownFields::Reject).unwrap_err();
        assert_eq!(err.path, "synced");
    }

    #[test]
    fn test_count_rejects_negative_and_fraction() {
        for bad in [json!(-1), json!(1.5), json!("3")] {
            let value = json!({
                "bind_count": bad,
                "info_count": 0,
                "sync_count": 0,
                "notsync_count": 0,
                "infos": []
            });
            let err = STATUS_RESPONSE.check(&value, UnknownFields::Reject).unwrap_err();
            assert_eq!(err.path, "bind_count");
        }
    }

    #[test]
    fn test_nested_path() {
        let mut broken = info();
        broken.as_object_mut().unwrap().remove("id");

        let value = json!({
            "bind_count": 2,
            "info_count": 2,
            "sync_count": 0,
            "notsync_count": 0,
            "infos": [info(), broken]
        });

        let err = STATUS_RESPONSE.check(&value, UnknownFields::Reject).unwrap_err();
        assert_eq!(err.schema, "Info");
        assert_eq!(err.path, "infos[1].id");
        assert_eq!(err.mismatch, Mismatch::Missing);
    }

    #[test]
    fn test_unknown_field_policy() {
        let mut value = info();
        value["client_version"] = json!("1.2.0");

        let err = DEVICE_INFO.check(&value, UnknownFields::Reject).unwrap_err();
        assert_eq!(err.path, "client_version");
        assert_eq!(err.mismatch, Mismatch::UnknownField);

        assert!(DEVICE_INFO.check(&value, UnknownFields::Ignore).is_ok());
    }

    #[test]
    fn test_root_must_be_object() {
        let err = ERROR_RESPONSE.check(&json!([]), UnknownFields::Reject).unwrap_err();
        assert_eq!(err.path, ROOT);
        assert_eq!(err.to_string(), "ErrorResponse mismatch at `$`: expected object, found array");
    }
}
