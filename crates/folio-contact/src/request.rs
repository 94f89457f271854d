//! Request and response shapes
//!
//! Requests arrive as serverless function events: an HTTP method and a raw
//! JSON body. Responses carry a status code and a JSON body string.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};

use crate::error::ContactError;
use crate::sanitize::sanitize;

/// Incoming function event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    pub http_method: String,
    #[serde(default)]
    pub body: Option<String>,
}

impl ContactRequest {
    pub fn post(body: impl Into<String>) -> Self {
        Self {
            http_method: "POST".to_string(),
            body: Some(body.into()),
        }
    }
}

/// Outgoing function result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponse {
    pub status_code: u16,
    pub body: String,
}

impl ContactResponse {
    pub fn success() -> Self {
        Self::json(200, json!({ "success": true, "message": "Message sent successfully!" }))
    }

    pub fn error(status_code: u16, message: &str) -> Self {
        Self::json(status_code, json!({ "error": message }))
    }

    fn json(status_code: u16, body: Value) -> Self {
        Self {
            status_code,
            body: body.to_string(),
        }
    }

    /// Parsed body, for callers that want to inspect it
    pub fn body_json(&self) -> serde_json::Result<Value> {
        serde_json::from_str(&self.body)
    }
}

impl From<&ContactError> for ContactResponse {
    fn from(err: &ContactError) -> Self {
        Self::error(err.status(), &err.public_message())
    }
}

/// Form fields as posted by the page
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSubmission {
    #[serde(default, deserialize_with = "lenient_text")]
    name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    email: String,
    #[serde(default, deserialize_with = "lenient_text")]
    subject: String,
    #[serde(default, deserialize_with = "lenient_text")]
    message: String,
    #[serde(default, alias = "recaptchaToken", deserialize_with = "token_text")]
    captcha_token: String,
}

/// Non-string values read as empty, so they fail the presence check rather
/// than the parse
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

/// Any truthy value is a token and is forwarded in its text form
fn token_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null | Value::Bool(false) => String::new(),
        Value::Number(n) if n.as_f64() == Some(0.0) => String::new(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    })
}

/// A sanitized, complete submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
    pub captcha_token: String,
}

impl ContactSubmission {
    /// Parse and sanitize a JSON body.
    ///
    /// Malformed JSON and `null` are a [`ContactError::Parse`]; missing
    /// fields are a [`ContactError::Validation`]. Scalar and array bodies
    /// carry no fields at all.
    pub fn parse(body: &str) -> Result<Self, ContactError> {
        let raw = match serde_json::from_str::<Value>(body)? {
            value @ (Value::Object(_) | Value::Null) => RawSubmission::deserialize(value)?,
            _ => RawSubmission::default(),
        };

        let submission = Self {
            name: sanitize(&raw.name),
            email: sanitize(&raw.email),
            subject: Some(sanitize(&raw.subject)).filter(|s| !s.is_empty()),
            message: sanitize(&raw.message),
            captcha_token: raw.captcha_token,
        };

        let required = [&submission.name, &submission.email, &submission.message, &submission.captcha_token];
        if required.iter().any(|field| field.is_empty()) {
            return Err(ContactError::Validation("Missing required fields".to_string()));
        }
        Ok(submission)
    }
}
