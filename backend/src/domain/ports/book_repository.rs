//! Driven port for reading the catalogue snapshot.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::Book;

use super::define_port_error;

define_port_error! {
    /// Errors raised when reading the catalogue.
    pub enum BookRepositoryError {
        /// Snapshot could not be produced.
        Unavailable { message: String } => "book repository unavailable: {message}",
    }
}

/// Records loaded from the source together with whether the source existed.
///
/// Records keep source order. The slice is shared, so cloning a snapshot is
/// cheap.
#[derive(Debug, Clone)]
pub struct CatalogueSnapshot {
    /// Records in file order.
    pub books: Arc<[Book]>,
    /// Whether the source file existed at load time.
    pub source_found: bool,
}

impl CatalogueSnapshot {
    /// Snapshot of a missing source.
    #[must_use]
    pub fn missing() -> Self {
        Self {
            books: Arc::from(Vec::new()),
            source_found: false,
        }
    }
}

/// Read access to the loaded catalogue.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Current snapshot of every well-formed record.
    async fn snapshot(&self) -> Result<CatalogueSnapshot, BookRepositoryError>;
}

/// Repository serving a fixed list of books.
#[derive(Debug, Clone)]
pub struct FixtureBookRepository {
    snapshot: CatalogueSnapshot,
}

impl FixtureBookRepository {
    /// Serve `books` as if they were loaded from an existing source.
    #[must_use]
    pub fn new(books: Vec<Book>) -> Self {
        Self {
            snapshot: CatalogueSnapshot {
                books: Arc::from(books),
                source_found: true,
            },
        }
    }
}

impl Default for FixtureBookRepository {
    fn default() -> Self {
        Self {
            snapshot: CatalogueSnapshot::missing(),
        }
    }
}

#[async_trait]
impl BookRepository for FixtureBookRepository {
    async fn snapshot(&self) -> Result<CatalogueSnapshot, BookRepositoryError> {
        Ok(self.snapshot.clone())
    }
}
