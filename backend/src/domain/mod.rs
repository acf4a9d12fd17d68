//! Domain types, services and ports.
//!
//! Purpose: hold the catalogue and token lifecycle rules independent of HTTP,
//! CSV parsing or JWT encoding. Adapters reach the domain through the traits
//! in [`ports`].
//!
//! Public surface:
//! - [`DomainError`] and [`ErrorCode`]: transport-agnostic failures.
//! - [`TraceId`]: request correlation identifier.
//! - [`TokenLifecycleService`]: login, verify, refresh and revoke.
//! - [`CatalogueService`]: queries, statistics and insights over the records.

pub mod account;
pub mod auth;
pub mod book;
pub mod catalogue_service;
pub mod error;
pub mod insights;
pub mod ports;
pub mod stats;
pub mod token_lifecycle;
pub mod trace_id;

pub use self::account::{Account, PasswordDigest};
pub use self::auth::{
    BEARER, LoginCredentials, TokenClaims, TokenKind, TokenLifetimes,
    TokenPair,
};
pub use self::book::{Book, BookId, Rating, RatingOutOfRange, availability_in_stock};
pub use self::catalogue_service::CatalogueService;
pub use self::error::{DomainError, DomainErrorValidationError, ErrorCode};
pub use self::insights::{
    BookFeatures, NEUTRAL_RATING, PredictionInput, RatingPrediction, TrainingExample,
};
pub use self::stats::{
    CatalogueOverview, CategoryBreakdown, CategoryStats, DataHealth, DataHealthStatus,
    PriceSummary, RatingHistogram,
};
pub use self::token_lifecycle::TokenLifecycleService;
pub use self::trace_id::TraceId;
