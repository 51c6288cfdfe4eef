//! # Shell Error Types
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Shell                              │
//! │                                                                         │
//! │  stdin line                                                             │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  Malformed JSON? ──── serde_json::Error ─────────┐                     │
//! │      │                                           │                     │
//! │      ▼                                           ▼                     │
//! │  Session::dispatch ── IntentError ─────────► ApiError ──► response     │
//! │      │                                       (code + message,          │
//! │      ▼                                        session keeps going)     │
//! │  Success ──────────────────────────────────────────────► response      │
//! │                                                                         │
//! │  Config / stdout failures ── ShellError ──► process exits              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use storefront_core::{IntentError, NavigationError};
use thiserror::Error;

// =============================================================================
// API Error (sent to the renderer)
// =============================================================================

/// Error attached to a response when an intent is rejected.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NAVIGATION_ERROR",
///   "message": "Cannot go back from Home: it is the root screen"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("[{code:?}] {message}")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for rejected intents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// The line was not a valid intent
    BadRequest,

    /// Category or product id not found
    NotFound,

    /// Params or a field value failed validation
    ValidationError,

    /// The navigation stack refused the operation
    NavigationError,

    /// The active screen doesn't accept the intent
    Unsupported,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: u32) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }
}

impl From<IntentError> for ApiError {
    fn from(err: IntentError) -> Self {
        match err {
            IntentError::Navigation(e @ NavigationError::InvalidParams { .. }) => {
                ApiError::validation(e.to_string())
            }
            IntentError::Navigation(e) => ApiError::new(ErrorCode::NavigationError, e.to_string()),
            e @ IntentError::Unsupported { .. } => {
                ApiError::new(ErrorCode::Unsupported, e.to_string())
            }
            IntentError::UnknownCategory(id) => ApiError::not_found("Category", id),
            IntentError::UnknownProduct(id) => ApiError::not_found("Product", id),
            IntentError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        tracing::debug!("Malformed intent: {}", err);
        ApiError::new(ErrorCode::BadRequest, format!("Malformed intent: {}", err))
    }
}

// =============================================================================
// Shell Error (fatal)
// =============================================================================

/// Errors that stop the shell.
#[derive(Debug, Error)]
pub enum ShellError {
    /// Configuration file could not be read or parsed
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Reading intents or writing responses failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A response could not be encoded
    #[error("Failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),
}

impl From<toml::de::Error> for ShellError {
    fn from(err: toml::de::Error) -> Self {
        ShellError::ConfigLoadFailed(err.to_string())
    }
}

pub type ShellResult<T> = Result<T, ShellError>;
