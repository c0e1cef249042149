//! # Application Error Types
//!
//! Errors raised by the form store, configuration loading and the event
//! loop.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Order Form                         │
//! │                                                                         │
//! │  User input problem?                                                    │
//! │    → NOT an error here. Lands in the ErrorMap and is rendered.          │
//! │                                                                         │
//! │  Rendering layer sent something the form does not have?                 │
//! │    → FormError ──► EventError { code, message } ──► stdout, loop goes on│
//! │                                                                         │
//! │  Startup problem (bad config file, bad schema)?                         │
//! │    → AppError ──► logged, process exits non-zero                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use pizza_core::SchemaError;
use serde::Serialize;
use thiserror::Error;

// =============================================================================
// Form Error
// =============================================================================

/// Misuse of the form store by its caller.
///
/// These never come from what the user typed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FormError {
    /// Field name the form does not render.
    #[error("unknown field '{field}'")]
    UnknownField { field: String },

    /// Field exists but is not a text input (toppings are toggled).
    #[error("field '{field}' cannot be set from text; use a topping change")]
    NotATextField { field: String },

    /// A submission is already running.
    #[error("a submission is already in progress")]
    SubmitInProgress,
}

// =============================================================================
// App Error
// =============================================================================

/// Startup and I/O failures of the order-form application.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid schema: {0}")]
    Schema(#[from] SchemaError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

// =============================================================================
// Event Error (wire format)
// =============================================================================

/// Error line written back to the rendering layer.
///
/// ```json
/// { "error": { "code": "UNKNOWN_FIELD", "message": "unknown field 'crust'" } }
/// ```
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EventError {
    pub code: ErrorCode,
    pub message: String,
}

/// Machine-readable error codes.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Event names a field the form does not have.
    UnknownField,

    /// Event sets text on a field that only takes topping changes.
    NotATextField,

    /// Event is not valid JSON or not a known event.
    InvalidEvent,

    /// Submit while another submit is running.
    SubmitInProgress,
}

impl EventError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        EventError {
            code,
            message: message.into(),
        }
    }
}

impl From<FormError> for EventError {
    fn from(err: FormError) -> Self {
        let code = match err {
            FormError::UnknownField { .. } => ErrorCode::UnknownField,
            FormError::NotATextField { .. } => ErrorCode::NotATextField,
            FormError::SubmitInProgress => ErrorCode::SubmitInProgress,
        };
        EventError::new(code, err.to_string())
    }
}

impl From<serde_json::Error> for EventError {
    fn from(err: serde_json::Error) -> Self {
        EventError::new(ErrorCode::InvalidEvent, err.to_string())
    }
}

impl std::fmt::Display for EventError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for EventError {}
