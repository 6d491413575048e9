use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::error::{Error, Result};
use crate::models::pagination::Pagination;

/// The `{success, data, message, ...}` wrapper every backend endpoint returns.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub error: Option<JsonValue>,
    pub pagination: Option<Pagination>,
    pub counts: Option<HashMap<String, u64>>,
}

impl<T> Envelope<T> {
    fn failure_message(&self) -> Option<String> {
        self.message
            .clone()
            .filter(|m| !m.trim().is_empty())
            .or_else(|| self.error.as_ref().and_then(value_message))
    }

    /// Collapses the envelope into `Ok(self)` or a server-reported failure.
    pub fn into_result(self) -> Result<Self> {
        if self.success {
            Ok(self)
        } else {
            Err(Error::api(None, self.failure_message()))
        }
    }

    pub fn require_data(self) -> Result<T> {
        self.data
            .ok_or_else(|| Error::api(None, Some("Response did not include data".to_string())))
    }
}

fn value_message(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) if !s.trim().is_empty() => Some(s.clone()),
        JsonValue::Object(map) => map
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string),
        _ => None,
    }
}

/// Interprets a raw HTTP status and body as a typed envelope.
pub fn parse_envelope<T: DeserializeOwned>(status: u16, body: &str) -> Result<Envelope<T>> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<JsonValue>(body).ok().and_then(|v| {
            v.get("message")
                .and_then(value_message)
                .or_else(|| v.get("error").and_then(value_message))
        });
        return Err(Error::api(Some(status), message));
    }

    let envelope: Envelope<T> = serde_json::from_str(body)?;
    envelope.into_result()
}
