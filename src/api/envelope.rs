//! Response envelope shared by every route.

use super::ApiError;
use serde::Serialize;
use serde_json::{Value, json};

/// Outcome marker of an envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiStatus {
    /// The request succeeded.
    Success,
    /// The request failed.
    Error,
}

/// `{status, message?, data?}` envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponse<T> {
    /// Outcome marker.
    pub status: ApiStatus,
    /// Optional human-readable message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Optional payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Creates a success envelope carrying `data`.
    #[must_use]
    pub const fn success(data: T) -> Self {
        Self {
            status: ApiStatus::Success,
            message: None,
            data: Some(data),
        }
    }

    /// Adds a message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl ApiResponse<Value> {
    /// Creates an error envelope without payload.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ApiStatus::Error,
            message: Some(message.into()),
            data: None,
        }
    }
}

/// Status code and rendered envelope handed back to the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiReply {
    /// HTTP-style status code.
    pub status_code: u16,
    /// Rendered `{status, message?, data?}` envelope.
    pub body: Value,
}

impl ApiReply {
    /// Renders an envelope with the given status code.
    #[must_use]
    pub fn new<T: Serialize>(status_code: u16, response: &ApiResponse<T>) -> Self {
        match serde_json::to_value(response) {
            Ok(body) => Self { status_code, body },
            Err(err) => Self::render_failure(&err),
        }
    }

    /// Renders a 200 success envelope.
    #[must_use]
    pub fn ok<T: Serialize>(data: T) -> Self {
        Self::new(200, &ApiResponse::success(data))
    }

    /// Renders a 201 success envelope with a message.
    #[must_use]
    pub fn created<T: Serialize>(data: T, message: &str) -> Self {
        Self::new(201, &ApiResponse::success(data).with_message(message))
    }

    /// Returns `true` for 2xx status codes.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Returns the `data` member of the envelope, if present.
    #[must_use]
    pub fn data(&self) -> Option<&Value> {
        self.body.get("data")
    }

    /// Returns the `message` member of the envelope, if present.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.body.get("message").and_then(Value::as_str)
    }

    fn render_failure(err: &serde_json::Error) -> Self {
        Self {
            status_code: 500,
            body: json!({
                "status": "error",
                "message": format!("failed to render response: {err}"),
            }),
        }
    }
}

impl From<ApiError> for ApiReply {
    fn from(err: ApiError) -> Self {
        Self::new(err.status_code(), &ApiResponse::error(err.message()))
    }
}
