//! Shared validation helpers for inbound HTTP adapters.
//!
//! Actix rejects undecodable bodies, query strings and path segments before a
//! handler runs. The extractor configs here turn those rejections into the
//! same JSON error envelope handlers use.

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{HttpRequest, web};
use serde_json::json;

use crate::domain::DomainError;

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    MalformedBody,
    MalformedQuery,
    MalformedPath,
    EmptyToken,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MalformedBody => "malformed_body",
            Self::MalformedQuery => "malformed_query",
            Self::MalformedPath => "malformed_path",
            Self::EmptyToken => "empty_token",
        }
    }
}

fn rejection(message: impl Into<String>, code: ValidationCode) -> DomainError {
    DomainError::invalid_request(message).with_details(json!({ "code": code.as_str() }))
}

pub(crate) fn field_error(
    field: &'static str,
    message: impl Into<String>,
    code: ValidationCode,
) -> DomainError {
    DomainError::invalid_request(message).with_details(json!({
        "field": field,
        "code": code.as_str(),
    }))
}

/// Reject blank refresh tokens before they reach the lifecycle service.
pub(crate) fn require_token(field: &'static str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(field_error(
            field,
            format!("{field} must not be empty"),
            ValidationCode::EmptyToken,
        ));
    }
    Ok(())
}

/// JSON body extractor config producing domain errors.
#[must_use]
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
        rejection(
            format!("request body is invalid: {err}"),
            ValidationCode::MalformedBody,
        )
        .into()
    })
}

/// Query string extractor config producing domain errors.
#[must_use]
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err: QueryPayloadError, _req: &HttpRequest| {
        rejection(
            format!("query string is invalid: {err}"),
            ValidationCode::MalformedQuery,
        )
        .into()
    })
}

/// Path extractor config producing domain errors.
#[must_use]
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err: PathError, _req: &HttpRequest| {
        rejection(
            format!("path is invalid: {err}"),
            ValidationCode::MalformedPath,
        )
        .into()
    })
}
