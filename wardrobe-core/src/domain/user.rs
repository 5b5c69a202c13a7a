//! Session record domain model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use super::null_as_default;
use super::result::{Error, Result};

/// The logged-in user as returned by the sign-in endpoint
///
/// Only `id` is load-bearing. Anything the backend sends that we don't model
/// is kept in `profile` so that persisting the record is lossless.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Bearer token issued by the backend
    #[serde(default, alias = "accessToken", skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub roles: Vec<String>,
    /// Set locally when the record is persisted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logged_in_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub profile: Map<String, JsonValue>,
}

impl SessionRecord {
    pub fn new(id: i64, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            email: None,
            token: None,
            roles: Vec::new(),
            logged_in_at: None,
            profile: Map::new(),
        }
    }

    /// Attach a bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Build a record from an untrusted JSON value
    ///
    /// Fails unless `id` is a non-zero integer.
    pub fn from_value(value: JsonValue) -> Result<Self> {
        if !has_valid_id(&value) {
            return Err(Error::InvalidSession(
                "record has no numeric identifier".to_string(),
            ));
        }
        serde_json::from_value(value).map_err(|e| Error::InvalidSession(e.to_string()))
    }

    /// Parse a stored record, returning `None` for anything malformed
    pub fn parse(text: &str) -> Option<Self> {
        let value: JsonValue = serde_json::from_str(text).ok()?;
        Self::from_value(value).ok()
    }

    /// Copy safe to print: the bearer token is dropped
    pub fn redacted(&self) -> Self {
        Self {
            token: None,
            ..self.clone()
        }
    }

    /// Whether this record is still well-formed
    pub fn is_valid(&self) -> bool {
        self.id != 0
    }

    /// Name to show in the interface
    pub fn display_name(&self) -> &str {
        if self.username.is_empty() {
            self.email.as_deref().unwrap_or("unknown")
        } else {
            &self.username
        }
    }
}

/// Check the shape of a raw record: `id` must be a non-zero JSON integer
pub fn has_valid_id(value: &JsonValue) -> bool {
    match value.get("id") {
        Some(JsonValue::Number(n)) => match (n.as_i64(), n.as_u64()) {
            (Some(id), _) => id != 0,
            (None, Some(_)) => false, // larger than i64
            _ => false,               // float
        },
        _ => false,
    }
}
