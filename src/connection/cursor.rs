//! Relay global ids used as pagination cursors.
//!
//! A cursor is the base64 encoding of `<Type>:<key>`. It is a pure function of the
//! entity type and key, so cursors survive restarts and carry no server side state.

use base64::{Engine, engine::general_purpose::STANDARD};
use thiserror::Error;

use crate::error::ErrorKind;

/// Entity types that cursors can point at.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EntityType {
    Organization,
    Domain,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Organization => "Organization",
            EntityType::Domain => "Domain",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CursorError {
    #[error("Cursor: `{0}` is not a valid global id.")]
    Malformed(String),
    #[error("Cursor of type `{found}` can not be used on a `{expected}` connection.")]
    WrongType {
        expected: &'static str,
        found: String,
    },
}

impl CursorError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidCursor
    }
}

/// Encodes the key of an entity into an opaque cursor.
pub fn encode(entity_type: EntityType, key: &str) -> String {
    STANDARD.encode(format!("{}:{}", entity_type.as_str(), key))
}

/// Decodes a cursor into the key it was built from.
///
/// Fails when the cursor is not a global id or belongs to another entity type.
pub fn decode(expected: EntityType, cursor: &str) -> Result<String, CursorError> {
    let malformed = || CursorError::Malformed(cursor.to_string());
    let bytes = STANDARD.decode(cursor).map_err(|_| malformed())?;
    let global_id = String::from_utf8(bytes).map_err(|_| malformed())?;
    let (entity_type, key) = global_id.split_once(':').ok_or_else(malformed)?;
    if entity_type != expected.as_str() {
        return Err(CursorError::WrongType {
            expected: expected.as_str(),
            found: entity_type.to_string(),
        });
    }
    if key.is_empty() {
        return Err(malformed());
    }
    Ok(key.to_string())
}
