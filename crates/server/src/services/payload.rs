use chrono::NaiveDate;
use serde_json::{Map, Value};
use validator::{Validate, ValidationError};

use crate::error::{FieldErrors, NON_FIELD_ERRORS, NOT_BLANK, NOT_NULL, REQUIRED};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    Create,
    /// `PUT`: every writable field must be present.
    Replace,
    /// `PATCH`: any subset of writable fields.
    Patch,
}

impl WriteMode {
    pub fn is_partial(self) -> bool {
        matches!(self, WriteMode::Patch)
    }
}

/// Writable fields of one resource, every one optional so the same type
/// serves full and partial writes.
pub trait Payload: Validate + Sized + Send + Sync + 'static {
    const FIELDS: &'static [&'static str];

    fn read(reader: &mut FieldReader<'_>) -> Self;

    /// Parses a JSON body, collecting type errors per field. Unknown members
    /// (including read-only `id` and `created_at`) are ignored.
    fn from_json(body: &Value, mode: WriteMode) -> Result<Self, FieldErrors> {
        let Value::Object(object) = body else {
            return Err(FieldErrors::single(
                NON_FIELD_ERRORS,
                format!(
                    "Invalid data. Expected a dictionary, but got {}.",
                    json_kind(body)
                ),
            ));
        };

        let mut reader = FieldReader::new(object);
        let payload = Self::read(&mut reader);
        let mut errors = reader.finish();

        if !mode.is_partial() {
            for field in Self::FIELDS {
                if !object.contains_key(*field) {
                    errors.add(*field, REQUIRED);
                }
            }
        }

        if let Err(validation) = payload.validate() {
            errors.merge(validation.into());
        }

        if errors.is_empty() {
            Ok(payload)
        } else {
            Err(errors)
        }
    }
}

pub struct FieldReader<'a> {
    object: &'a Map<String, Value>,
    errors: FieldErrors,
}

impl<'a> FieldReader<'a> {
    pub fn new(object: &'a Map<String, Value>) -> Self {
        Self {
            object,
            errors: FieldErrors::new(),
        }
    }

    fn present(&mut self, field: &str) -> Option<&'a Value> {
        match self.object.get(field) {
            None => None,
            Some(Value::Null) => {
                self.errors.add(field, NOT_NULL);
                None
            }
            Some(value) => Some(value),
        }
    }

    /// Strings are trimmed; numbers are accepted and stringified.
    pub fn string(&mut self, field: &str) -> Option<String> {
        match self.present(field)? {
            Value::String(value) => Some(value.trim().to_string()),
            Value::Number(value) => Some(value.to_string()),
            _ => {
                self.errors.add(field, "Not a valid string.");
                None
            }
        }
    }

    pub fn date(&mut self, field: &str) -> Option<NaiveDate> {
        let parsed = match self.present(field)? {
            Value::String(value) => NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok(),
            _ => None,
        };
        if parsed.is_none() {
            self.errors.add(
                field,
                "Date has wrong format. Use one of these formats instead: YYYY-MM-DD.",
            );
        }
        parsed
    }

    /// A reference to another row by primary key, as an integer or a numeric
    /// string.
    pub fn pk(&mut self, field: &str) -> Option<i32> {
        let value = self.present(field)?;
        let parsed = match value {
            Value::Number(number) => number.as_i64().and_then(|pk| i32::try_from(pk).ok()),
            Value::String(raw) => raw.trim().parse::<i32>().ok(),
            _ => None,
        };
        if parsed.is_none() {
            self.errors.add(
                field,
                format!("Incorrect type. Expected pk value, received {}.", json_kind(value)),
            );
        }
        parsed
    }

    pub fn finish(self) -> FieldErrors {
        self.errors
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(number) if number.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

/// Char fields must carry at least one non-whitespace character.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(NOT_BLANK.into()));
    }
    Ok(())
}

pub fn missing_pk_message(pk: i32) -> String {
    format!("Invalid pk \"{pk}\" - object does not exist.")
}
