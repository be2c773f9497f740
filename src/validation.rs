//! Field validators run by the entity setters before anything reaches the
//! database. Each returns the value it was given when the check passes.

use std::{fmt, sync::LazyLock};

use regex::Regex;
use serde_json::Value;

use crate::error::{AppError, AppResult};

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@]+@[^@]+\.[^@]+").expect("Invalid regex"));

/// Rejects `None`, empty and whitespace-only strings.
pub fn validate_not_blank<S: AsRef<str>>(value: Option<S>, key: &str) -> AppResult<S> {
    match value {
        Some(v) if !v.as_ref().trim().is_empty() => Ok(v),
        _ => Err(AppError::invalid(key, format!("{key} must not be blank."))),
    }
}

pub fn validate_required<T>(value: Option<T>, key: &str) -> AppResult<T> {
    value.ok_or_else(|| AppError::invalid(key, format!("{key} must not be null.")))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    String,
    Boolean,
}

impl FieldKind {
    fn matches(self, value: &Value) -> bool {
        match self {
            FieldKind::Integer => value.is_i64() || value.is_u64(),
            FieldKind::String => value.is_string(),
            FieldKind::Boolean => value.is_boolean(),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::Integer => "integer",
            FieldKind::String => "string",
            FieldKind::Boolean => "boolean",
        };
        f.write_str(name)
    }
}

/// Checks an untyped payload value against the expected kind. Null never passes.
pub fn validate_type<'a>(value: &'a Value, key: &str, kind: FieldKind) -> AppResult<&'a Value> {
    if value.is_null() {
        return Err(AppError::invalid(key, format!("{key} must not be null.")));
    }
    if !kind.matches(value) {
        return Err(AppError::invalid(key, format!("{key} must be of type {kind}.")));
    }
    Ok(value)
}

/// Format check only; uniqueness needs the database and lives on the user setter.
pub fn validate_email(value: &str) -> AppResult<&str> {
    if !EMAIL_RE.is_match(value) {
        return Err(AppError::invalid("email", "Invalid email address."));
    }
    Ok(value)
}
