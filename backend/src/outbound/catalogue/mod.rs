//! CSV-backed catalogue repository.
//!
//! The scraper writes a UTF-8 CSV with the header
//! `titulo,preco,rating,disponibilidade,categoria,imagem_url`. The file is read
//! once at startup; every record that parses becomes a [`Book`] whose id is its
//! 1-based data row number. Rows that fail to parse are skipped with a warning
//! and still consume their number.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use cap_std::{ambient_authority, fs::Dir};
use serde::Deserialize;
use tracing::{info, warn};

use crate::domain::ports::{BookRepository, BookRepositoryError, CatalogueSnapshot};
use crate::domain::{Book, BookId, Rating};

/// Raw row as written by the scraper.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "titulo")]
    title: String,
    #[serde(rename = "preco")]
    price: String,
    rating: String,
    #[serde(rename = "disponibilidade")]
    availability: String,
    #[serde(rename = "categoria")]
    category: String,
    #[serde(rename = "imagem_url")]
    image_url: String,
}

/// Why a row was skipped.
#[derive(Debug, thiserror::Error)]
enum RowError {
    #[error("unreadable row: {0}")]
    Shape(#[from] csv::Error),
    #[error("price {0:?} is not a non-negative number")]
    Price(String),
    #[error("rating {0:?} is not an integer between 1 and 5")]
    Rating(String),
    #[error("row number exceeds the identifier range")]
    Position,
}

impl CsvRow {
    fn into_book(self, position: usize) -> Result<Book, RowError> {
        let id = u32::try_from(position).map_err(|_| RowError::Position)?;
        let price = self
            .price
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|price| price.is_finite() && *price >= 0.0)
            .ok_or_else(|| RowError::Price(self.price.clone()))?;
        let rating = self
            .rating
            .trim()
            .parse::<i64>()
            .ok()
            .and_then(|stars| Rating::try_from(stars).ok())
            .ok_or_else(|| RowError::Rating(self.rating.clone()))?;
        Ok(Book {
            id: BookId::new(id),
            title: self.title,
            price,
            rating,
            availability: self.availability,
            category: self.category,
            image_url: self.image_url,
        })
    }
}

/// Parse CSV text into books, skipping malformed rows.
#[must_use]
pub fn parse_books(contents: &str) -> Vec<Book> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(contents.as_bytes());
    let headers = match reader.headers() {
        Ok(headers) => headers.clone(),
        Err(error) => {
            warn!(%error, "catalogue header unreadable; treating file as empty");
            return Vec::new();
        }
    };

    let mut books = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let position = index + 1;
        let parsed = record
            .and_then(|record| record.deserialize::<CsvRow>(Some(&headers)))
            .map_err(RowError::from)
            .and_then(|row| row.into_book(position));
        match parsed {
            Ok(book) => books.push(book),
            Err(error) => warn!(row = position, %error, "skipping malformed catalogue row"),
        }
    }
    books
}

/// Repository serving a snapshot loaded from a CSV file.
#[derive(Debug, Clone)]
pub struct CsvBookRepository {
    path: PathBuf,
    snapshot: CatalogueSnapshot,
}

impl CsvBookRepository {
    /// Read and parse `path`. A missing file yields an empty snapshot.
    ///
    /// # Errors
    /// Returns [`BookRepositoryError::Unavailable`] when the file exists but
    /// cannot be read as UTF-8 text.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, BookRepositoryError> {
        let path = path.into();
        let snapshot = match read_to_string(&path) {
            Ok(contents) => {
                let books = parse_books(&contents);
                info!(path = %path.display(), books = books.len(), "catalogue loaded");
                CatalogueSnapshot {
                    books: Arc::from(books),
                    source_found: true,
                }
            }
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "catalogue file not found; serving no books");
                CatalogueSnapshot::missing()
            }
            Err(error) => {
                return Err(BookRepositoryError::unavailable(format!(
                    "failed to read {}: {error}",
                    path.display()
                )));
            }
        };
        Ok(Self { path, snapshot })
    }

    /// Source path this repository was loaded from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn read_to_string(path: &Path) -> io::Result<String> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"))?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority())?;
    dir.read_to_string(file_name)
}

#[async_trait]
impl BookRepository for CsvBookRepository {
    async fn snapshot(&self) -> Result<CatalogueSnapshot, BookRepositoryError> {
        Ok(self.snapshot.clone())
    }
}
