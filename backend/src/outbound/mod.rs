//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **catalogue**: CSV snapshot loader backing `BookRepository`
//! - **jwt**: HMAC JSON Web Token codec backing `TokenCodec`
//! - **token_store**: in-process live set backing `RefreshTokenStore`
//!
//! Adapters are thin translators between domain types and external
//! representations. They contain no business logic.

pub mod catalogue;
pub mod jwt;
pub mod token_store;
