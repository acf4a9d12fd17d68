//! Tests for domain error construction and serialisation.

use super::*;
use crate::domain::TraceId;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[fixture]
fn base_error() -> DomainError {
    DomainError::invalid_request("bad")
}

#[rstest]
#[case(DomainError::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(DomainError::unauthorized("nope"), ErrorCode::Unauthorized)]
#[case(DomainError::not_found("missing"), ErrorCode::NotFound)]
#[case(DomainError::internal("boom"), ErrorCode::InternalError)]
fn convenience_constructors_set_code(#[case] error: DomainError, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = DomainError::try_new(ErrorCode::InvalidRequest, "   ");
    assert!(matches!(result, Err(DomainErrorValidationError::EmptyMessage)));
}

#[rstest]
fn try_with_trace_id_rejects_empty_values(base_error: DomainError) {
    let result = base_error.try_with_trace_id("   ");
    assert!(matches!(result, Err(DomainErrorValidationError::EmptyTraceId)));
}

#[rstest]
fn new_returns_none_when_trace_id_out_of_scope() {
    let error = DomainError::internal("boom");
    assert!(error.trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn new_captures_trace_id_in_scope(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id
        .parse()
        .expect("fixtures provide a valid UUID");
    let error = TraceId::scope(trace_id, async move {
        DomainError::try_new(ErrorCode::InternalError, "boom")
            .expect("validation accepts non-empty message")
    })
    .await;

    assert_eq!(error.trace_id(), Some(expected_trace_id.as_str()));
}

#[rstest]
#[tokio::test]
async fn deserialising_does_not_inherit_ambient_trace(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id
        .parse()
        .expect("fixtures provide a valid UUID");
    let payload = json!({ "code": "not_found", "message": "missing" });

    let error: DomainError = TraceId::scope(trace_id, async move {
        serde_json::from_value(payload).expect("payload deserialises")
    })
    .await;

    assert!(error.trace_id().is_none());
}

#[rstest]
fn serialises_camel_case_and_skips_empty_fields() {
    let error = DomainError::invalid_request("bad")
        .with_trace_id("abc")
        .with_details(json!({ "field": "min" }));

    let value = serde_json::to_value(&error).expect("error serialises");
    assert_eq!(
        value,
        json!({
            "code": "invalid_request",
            "message": "bad",
            "traceId": "abc",
            "details": { "field": "min" }
        })
    );

    let bare = serde_json::to_value(DomainError::not_found("missing")).expect("error serialises");
    assert!(bare.get("traceId").is_none());
    assert!(bare.get("details").is_none());
}

#[rstest]
fn deserialising_rejects_blank_messages() {
    let result: Result<DomainError, _> =
        serde_json::from_value(json!({ "code": "internal_error", "message": " " }));
    assert!(result.is_err());
}

#[rstest]
fn deserialising_rejects_unknown_fields() {
    let result: Result<DomainError, _> = serde_json::from_value(
        json!({ "code": "not_found", "message": "missing", "status": 404 }),
    );
    assert!(result.is_err());
}

#[rstest]
#[case(ErrorCode::InvalidRequest, "invalid_request")]
#[case(ErrorCode::Unauthorized, "unauthorized")]
#[case(ErrorCode::NotFound, "not_found")]
#[case(ErrorCode::InternalError, "internal_error")]
fn code_names_match_the_wire(#[case] code: ErrorCode, #[case] name: &str) {
    assert_eq!(code.as_str(), name);
    assert_eq!(serde_json::to_value(code).expect("code serialises"), json!(name));
}

#[rstest]
fn display_prefixes_the_code() {
    let error = DomainError::unauthorized("token expired");
    assert_eq!(error.to_string(), "unauthorized: token expired");
    assert!(!error.is_internal());
    assert!(DomainError::internal("disk gone").is_internal());
}
