//! Domain-level error types.
//!
//! These errors are transport agnostic. Inbound adapters map them to HTTP
//! responses or any other protocol-specific envelope. Constructors capture the
//! ambient [`TraceId`](crate::domain::TraceId) so failures raised inside a
//! request stay correlated with its logs.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::TraceId;

/// Failure category shared by every adapter.
///
/// Serialised in `snake_case`; inbound adapters choose the status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Input failed validation: blank credentials, bad bounds, malformed body.
    InvalidRequest,
    /// Credentials or a token were rejected.
    Unauthorized,
    /// No record has the requested identifier.
    NotFound,
    /// A port failed; the message is never shown to clients.
    InternalError,
}

impl ErrorCode {
    /// Wire name, as used in JSON payloads and log fields.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidRequest => "invalid_request",
            Self::Unauthorized => "unauthorized",
            Self::NotFound => "not_found",
            Self::InternalError => "internal_error",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error crossing the domain boundary.
///
/// The message is never blank. A trace id, when present, is never blank
/// either; constructors fill it from the ambient [`TraceId`] so adapters can
/// correlate the failure with request logs.
///
/// # Examples
/// ```
/// use bookshelf::domain::{DomainError, ErrorCode};
///
/// let err = DomainError::not_found("book 42 not found");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(err.to_string(), "not_found: book 42 not found");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(try_from = "WireError", into = "WireError")]
pub struct DomainError {
    #[schema(example = "not_found")]
    code: ErrorCode,
    #[schema(example = "book 42 not found")]
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

/// Why a [`DomainError`] could not be built.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainErrorValidationError {
    /// The message was blank.
    #[error("error message must not be empty")]
    EmptyMessage,
    /// The trace identifier was blank.
    #[error("trace identifier must not be empty")]
    EmptyTraceId,
}

fn non_blank(
    value: String,
    rejection: DomainErrorValidationError,
) -> Result<String, DomainErrorValidationError> {
    if value.trim().is_empty() {
        Err(rejection)
    } else {
        Ok(value)
    }
}

impl DomainError {
    /// Build an error from a known-good message.
    ///
    /// Use [`DomainError::try_new`] when the text comes from a caller.
    ///
    /// # Panics
    /// Panics when `message` is blank.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::try_new(code, message)
            .unwrap_or_else(|err| panic!("{code} error built with invalid message: {err}"))
    }

    /// Build an error, rejecting a blank message.
    pub fn try_new(
        code: ErrorCode,
        message: impl Into<String>,
    ) -> Result<Self, DomainErrorValidationError> {
        let message = non_blank(message.into(), DomainErrorValidationError::EmptyMessage)?;
        Ok(Self {
            code,
            message,
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        })
    }

    /// Failure category.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Whether the failure came from infrastructure rather than the caller.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        self.code == ErrorCode::InternalError
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Trace id of the request that raised the error, if any.
    #[must_use]
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Structured details, e.g. `{"code": "missing_filter"}`.
    #[must_use]
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Replace the trace id.
    ///
    /// # Panics
    /// Panics when `trace_id` is blank.
    #[must_use]
    pub fn with_trace_id(self, trace_id: impl Into<String>) -> Self {
        self.try_with_trace_id(trace_id)
            .unwrap_or_else(|err| panic!("invalid trace identifier: {err}"))
    }

    /// Replace the trace id, rejecting a blank one.
    pub fn try_with_trace_id(
        mut self,
        trace_id: impl Into<String>,
    ) -> Result<Self, DomainErrorValidationError> {
        let trace_id = non_blank(trace_id.into(), DomainErrorValidationError::EmptyTraceId)?;
        self.trace_id = Some(trace_id);
        Ok(self)
    }

    /// Attach structured details.
    ///
    /// # Examples
    /// ```
    /// use bookshelf::domain::DomainError;
    /// use serde_json::json;
    ///
    /// let err = DomainError::invalid_request("min must not exceed max")
    ///     .with_details(json!({ "min": 30.0, "max": 10.0 }));
    /// assert_eq!(err.details().and_then(|d| d.get("min")), Some(&json!(30.0)));
    /// ```
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// [`ErrorCode::InvalidRequest`] error.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// [`ErrorCode::Unauthorized`] error.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// [`ErrorCode::NotFound`] error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// [`ErrorCode::InternalError`] error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for DomainError {}

/// Unvalidated JSON shape used for (de)serialisation.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct WireError {
    code: ErrorCode,
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl From<DomainError> for WireError {
    fn from(error: DomainError) -> Self {
        let DomainError {
            code,
            message,
            trace_id,
            details,
        } = error;
        Self {
            code,
            message,
            trace_id,
            details,
        }
    }
}

impl TryFrom<WireError> for DomainError {
    type Error = DomainErrorValidationError;

    fn try_from(wire: WireError) -> Result<Self, Self::Error> {
        let message = non_blank(wire.message, DomainErrorValidationError::EmptyMessage)?;
        // A decoded payload keeps its own trace id and never picks up the ambient one.
        let trace_id = wire
            .trace_id
            .map(|id| non_blank(id, DomainErrorValidationError::EmptyTraceId))
            .transpose()?;
        Ok(Self {
            code: wire.code,
            message,
            trace_id,
            details: wire.details,
        })
    }
}

#[cfg(test)]
mod tests;
