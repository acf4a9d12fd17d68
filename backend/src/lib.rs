//! Book catalogue API.
//!
//! Serves a read-only catalogue loaded from a scraped CSV snapshot, guarded
//! by short-lived JWT access tokens and rotating refresh tokens.
//!
//! - [`domain`]: records, statistics, token lifecycle and ports.
//! - [`outbound`]: CSV, JWT and in-memory adapters behind those ports.
//! - [`inbound`]: Actix handlers, extractors and the error envelope.
//! - [`config`]: startup settings.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
