//! Typed error handling for the One Barn checkout core
//!
//! Every failure the core can produce is a variant of [`BarnError`], split by
//! category so HTTP clients and library callers can match on the cause.
//!
//! # Error Categories
//!
//! - [`ValidationError`]: user input rejected by the field rule table
//! - [`PricingError`]: order parameters that cannot be priced
//! - [`ConfigError`]: configuration loading and coherence checks
//! - [`AuthError`]: login failures
//! - [`RequestError`]: malformed HTTP requests
//!
//! # Example
//!
//! ```rust,ignore
//! use onebarn::prelude::*;
//!
//! match checkout.set_zip("1234") {
//!     Ok(()) => {}
//!     Err(BarnError::Pricing(PricingError::InvalidZip { zip })) => {
//!         println!("'{}' is not a zip code", zip);
//!     }
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The main error type for the checkout core
#[derive(Debug, thiserror::Error)]
pub enum BarnError {
    /// Input validation errors
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Pricing and shipping errors
    #[error("{0}")]
    Pricing(#[from] PricingError),

    /// Configuration errors
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// Authentication errors
    #[error("{0}")]
    Auth(#[from] AuthError),

    /// HTTP/Request errors
    #[error("{0}")]
    Request(#[from] RequestError),

    /// Internal errors (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl BarnError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            BarnError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            BarnError::Pricing(e) => e.status_code(),
            BarnError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            BarnError::Auth(e) => e.status_code(),
            BarnError::Request(e) => e.status_code(),
            BarnError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            BarnError::Validation(_) => "VALIDATION_ERROR",
            BarnError::Pricing(e) => e.error_code(),
            BarnError::Config(_) => "CONFIG_ERROR",
            BarnError::Auth(e) => e.error_code(),
            BarnError::Request(e) => e.error_code(),
            BarnError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            BarnError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            BarnError::Validation(ValidationError::FieldError(error)) => {
                Some(serde_json::json!({ "fields": [error] }))
            }
            BarnError::Pricing(PricingError::InvalidZip { zip }) => {
                Some(serde_json::json!({ "zip": zip, "kind": FieldErrorKind::InvalidZip }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for BarnError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), "{}", self);
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Why a single field was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldErrorKind {
    Required,
    PatternMismatch,
    GarbageText,
    TooShort,
    TooLong,
    OutOfRange,
    InvalidZip,
    InvalidCardNumber,
    InvalidExpiry,
    InvalidCvv,
    InvalidRoutingNumber,
}

impl FieldErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldErrorKind::Required => "required",
            FieldErrorKind::PatternMismatch => "pattern-mismatch",
            FieldErrorKind::GarbageText => "garbage-text",
            FieldErrorKind::TooShort => "too-short",
            FieldErrorKind::TooLong => "too-long",
            FieldErrorKind::OutOfRange => "out-of-range",
            FieldErrorKind::InvalidZip => "invalid-zip",
            FieldErrorKind::InvalidCardNumber => "invalid-card-number",
            FieldErrorKind::InvalidExpiry => "invalid-expiry",
            FieldErrorKind::InvalidCvv => "invalid-cvv",
            FieldErrorKind::InvalidRoutingNumber => "invalid-routing-number",
        }
    }
}

impl fmt::Display for FieldErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single field validation failure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldValidationError {
    pub field: String,
    pub kind: FieldErrorKind,
    pub message: String,
}

/// Errors related to input validation
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// Single field validation error
    #[error("Validation failed for '{}': {}", .0.field, .0.message)]
    FieldError(FieldValidationError),

    /// Multiple field validation errors, in form order
    #[error("Validation failed for fields: {}", field_list(.0))]
    FieldErrors(Vec<FieldValidationError>),

    /// Request body was not valid JSON or not a JSON object
    #[error("Invalid JSON: {message}")]
    InvalidJson { message: String },
}

fn field_list(errors: &[FieldValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.field.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationError {
    /// Field errors carried by this error, if any
    pub fn field_errors(&self) -> &[FieldValidationError] {
        match self {
            ValidationError::FieldError(error) => std::slice::from_ref(error),
            ValidationError::FieldErrors(errors) => errors,
            ValidationError::InvalidJson { .. } => &[],
        }
    }
}

impl From<serde_json::Error> for BarnError {
    fn from(err: serde_json::Error) -> Self {
        BarnError::Validation(ValidationError::InvalidJson {
            message: err.to_string(),
        })
    }
}

// =============================================================================
// Pricing Errors
// =============================================================================

/// Errors raised while pricing an order
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PricingError {
    #[error("'{zip}' is not a valid zip code")]
    InvalidZip { zip: String },

    #[error("A plan needs at least one horse")]
    NoHorses,

    #[error("{count} horses exceeds the largest self-serve plan; contact sales for herd pricing")]
    TooManyHorses { count: u32 },

    #[error("Plan '{plan}' does not cover {count} horse(s)")]
    PlanMismatch { plan: String, count: u32 },

    #[error("Unknown plan '{plan}'")]
    UnknownPlan { plan: String },

    #[error("Shipping method '{method}' is not offered")]
    UnknownShippingMethod { method: String },
}

impl PricingError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            PricingError::UnknownPlan { .. } | PricingError::UnknownShippingMethod { .. } => {
                StatusCode::NOT_FOUND
            }
            _ => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            PricingError::InvalidZip { .. } => "INVALID_ZIP",
            PricingError::NoHorses => "NO_HORSES",
            PricingError::TooManyHorses { .. } => "TOO_MANY_HORSES",
            PricingError::PlanMismatch { .. } => "PLAN_MISMATCH",
            PricingError::UnknownPlan { .. } => "UNKNOWN_PLAN",
            PricingError::UnknownShippingMethod { .. } => "UNKNOWN_SHIPPING_METHOD",
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to parse configuration file
    #[error("Failed to parse config{}: {message}", in_file(.file))]
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Invalid value in configuration
    #[error("Invalid value '{value}' for field '{field}': {message}")]
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },
}

fn in_file(file: &Option<String>) -> String {
    file.as_ref()
        .map(|file| format!(" file '{}'", file))
        .unwrap_or_default()
}

// =============================================================================
// Auth Errors
// =============================================================================

/// Errors raised by an auth provider
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("{mode} authentication is not available")]
    ModeUnavailable { mode: String },
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::ModeUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::ModeUnavailable { .. } => "AUTH_MODE_UNAVAILABLE",
        }
    }
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors related to HTTP requests
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// Path segment does not name a known resource
    #[error("Invalid path '{path}': {message}")]
    InvalidPath { path: String, message: String },

    /// Query parameter missing or malformed
    #[error("Invalid query parameter '{param}': {message}")]
    InvalidQuery { param: String, message: String },
}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestError::InvalidPath { .. } => StatusCode::NOT_FOUND,
            RequestError::InvalidQuery { .. } => StatusCode::BAD_REQUEST,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::InvalidPath { .. } => "INVALID_PATH",
            RequestError::InvalidQuery { .. } => "INVALID_QUERY",
        }
    }
}

/// Result type alias for checkout operations
pub type BarnResult<T> = Result<T, BarnError>;
