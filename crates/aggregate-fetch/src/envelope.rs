//! # Response Envelopes
//!
//! The backend wraps payloads inconsistently. Nothing here tries to make sense
//! of the nesting; that is the job of [`crate::normalize`]. These types only
//! carry what came off the wire.

use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// A settled HTTP exchange: where it went, what status came back, and the
/// decoded JSON body (`Value::Null` for an empty body).
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub url: String,
    pub status: u16,
    pub body: Value,
}

impl HttpResponse {
    pub fn new(url: impl Into<String>, status: u16, body: Value) -> Self {
        Self {
            url: url.into(),
            status,
            body,
        }
    }
}

/// The `{ success, data, message, errors? }` wrapper returned by the resource
/// CRUD routes.
///
/// Every field is optional on the wire; a missing `success` is read as `true`
/// so endpoints that return a bare payload still work.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ApiResponse {
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Option<BTreeMap<String, FieldErrors>>,
}

fn default_success() -> bool {
    true
}

/// Validation messages for one field. Backends send either a single string or
/// a list of them.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldErrors {
    One(String),
    Many(Vec<String>),
}

impl FieldErrors {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            FieldErrors::One(message) => vec![message],
            FieldErrors::Many(messages) => messages,
        }
    }
}

impl ApiResponse {
    /// Reads the CRUD wrapper out of a raw body. Bodies that carry neither
    /// `success` nor `data` are treated as a bare successful payload.
    pub fn from_body(body: &Value) -> Self {
        match body {
            Value::Object(map) if map.contains_key("success") || map.contains_key("data") => {
                serde_json::from_value(body.clone()).unwrap_or_else(|_| Self::bare(body))
            }
            _ => Self::bare(body),
        }
    }

    fn bare(body: &Value) -> Self {
        Self {
            success: true,
            data: body.clone(),
            message: None,
            errors: None,
        }
    }

    /// Flattened field errors, sorted by field name.
    pub fn field_errors(&self) -> BTreeMap<String, Vec<String>> {
        self.errors
            .clone()
            .unwrap_or_default()
            .into_iter()
            .map(|(field, errors)| (field, errors.into_vec()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rejection_with_mixed_field_errors() {
        let body = json!({
            "success": false,
            "message": "Validation failed",
            "errors": { "name": "required", "rate": ["must be numeric", "must be positive"] }
        });

        let response = ApiResponse::from_body(&body);
        assert!(!response.success);
        assert_eq!(response.message.as_deref(), Some("Validation failed"));

        let errors = response.field_errors();
        assert_eq!(errors["name"], vec!["required".to_string()]);
        assert_eq!(errors["rate"].len(), 2);
    }

    #[test]
    fn test_bare_array_body_is_successful_payload() {
        let response = ApiResponse::from_body(&json!([{ "id": 1 }]));
        assert!(response.success);
        assert_eq!(response.data, json!([{ "id": 1 }]));
    }
}
