//! Catalogue read endpoints.
//!
//! ```text
//! GET /api/v1/books
//! GET /api/v1/books/search?title=light&category=poetry
//! GET /api/v1/books/top-rated?limit=5
//! GET /api/v1/books/price-range?min=10&max=30
//! GET /api/v1/books/{id}
//! GET /api/v1/categories
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{BookSearch, PriceRangeMatch};
use crate::domain::{Book, BookId, DomainError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// One catalogue record.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookResponse {
    /// Row position in the loaded snapshot.
    #[schema(example = 1)]
    pub id: u32,
    /// Title as scraped.
    #[schema(example = "A Light in the Attic")]
    pub title: String,
    /// Price in pounds.
    #[schema(example = 51.77)]
    pub price: f64,
    /// Star rating, 1 to 5.
    #[schema(example = 3)]
    pub rating: u8,
    /// Availability text, e.g. `In stock`.
    #[schema(example = "In stock")]
    pub availability: String,
    /// Category name.
    #[schema(example = "Poetry")]
    pub category: String,
    /// Cover image URL.
    pub image_url: String,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            id: book.id.get(),
            title: book.title,
            price: book.price,
            rating: book.rating.get(),
            availability: book.availability,
            category: book.category,
            image_url: book.image_url,
        }
    }
}

fn to_responses(books: Vec<Book>) -> Vec<BookResponse> {
    books.into_iter().map(BookResponse::from).collect()
}

/// Query string for `GET /api/v1/books/search`.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    /// Case-insensitive title substring.
    pub title: Option<String>,
    /// Case-insensitive category name.
    pub category: Option<String>,
}

/// Matches for a search.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    /// Matching records.
    pub books: Vec<BookResponse>,
    /// Number of matches.
    pub total: usize,
}

/// Query string for `GET /api/v1/books/top-rated`.
#[derive(Debug, Default, Deserialize)]
pub struct TopRatedQuery {
    /// Maximum number of results.
    pub limit: Option<usize>,
}

/// Query string for `GET /api/v1/books/price-range`.
#[derive(Debug, Default, Deserialize)]
pub struct PriceRangeQuery {
    /// Inclusive lower price bound.
    pub min: Option<f64>,
    /// Inclusive upper price bound.
    pub max: Option<f64>,
}

/// Records priced within an inclusive range.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PriceRangeResponse {
    /// Records priced within the bounds.
    pub books: Vec<BookResponse>,
    /// Number of matches.
    pub total: usize,
    /// Lower bound applied.
    #[schema(example = 10.0)]
    pub min_price: f64,
    /// Upper bound applied.
    #[schema(example = 30.0)]
    pub max_price: f64,
}

impl From<PriceRangeMatch> for PriceRangeResponse {
    fn from(matched: PriceRangeMatch) -> Self {
        let books = to_responses(matched.books);
        Self {
            total: books.len(),
            books,
            min_price: matched.min,
            max_price: matched.max,
        }
    }
}

/// List every loaded record in source order.
#[utoipa::path(
    get,
    path = "/api/v1/books",
    responses(
        (status = 200, description = "All records", body = [BookResponse]),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["books"],
    operation_id = "listBooks",
    security([])
)]
#[get("/books")]
pub async fn list_books(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<BookResponse>>> {
    let books = state.catalogue.list_books().await?;
    Ok(web::Json(to_responses(books)))
}

/// Fetch one record by its positional id.
#[utoipa::path(
    get,
    path = "/api/v1/books/{id}",
    params(
        ("id" = u32, Path, description = "Row position of the record")
    ),
    responses(
        (status = 200, description = "Record", body = BookResponse),
        (status = 400, description = "Invalid request", body = DomainError),
        (status = 404, description = "Not found", body = DomainError)
    ),
    tags = ["books"],
    operation_id = "getBook",
    security([])
)]
#[get("/books/{id}")]
pub async fn get_book(
    state: web::Data<HttpState>,
    path: web::Path<u32>,
) -> ApiResult<web::Json<BookResponse>> {
    let book = state
        .catalogue
        .get_book(BookId::new(path.into_inner()))
        .await?;
    Ok(web::Json(book.into()))
}

/// Case-insensitive substring search on title and/or category.
#[utoipa::path(
    get,
    path = "/api/v1/books/search",
    params(
        ("title" = Option<String>, Query, description = "Substring of the title"),
        ("category" = Option<String>, Query, description = "Substring of the category")
    ),
    responses(
        (status = 200, description = "Matching records", body = SearchResponse),
        (status = 400, description = "No filter supplied", body = DomainError)
    ),
    tags = ["books"],
    operation_id = "searchBooks",
    security([])
)]
#[get("/books/search")]
pub async fn search_books(
    state: web::Data<HttpState>,
    query: web::Query<SearchQuery>,
) -> ApiResult<web::Json<SearchResponse>> {
    let SearchQuery { title, category } = query.into_inner();
    let books = state
        .catalogue
        .search(&BookSearch { title, category })
        .await?;
    let books = to_responses(books);
    Ok(web::Json(SearchResponse {
        total: books.len(),
        books,
    }))
}

/// Highest-rated records, ties at the cut-off included.
#[utoipa::path(
    get,
    path = "/api/v1/books/top-rated",
    params(
        ("limit" = Option<usize>, Query, description = "Maximum records before ties are added")
    ),
    responses(
        (status = 200, description = "Top-rated records", body = [BookResponse]),
        (status = 400, description = "Invalid limit", body = DomainError)
    ),
    tags = ["books"],
    operation_id = "topRatedBooks",
    security([])
)]
#[get("/books/top-rated")]
pub async fn top_rated_books(
    state: web::Data<HttpState>,
    query: web::Query<TopRatedQuery>,
) -> ApiResult<web::Json<Vec<BookResponse>>> {
    let books = state.catalogue.top_rated(query.limit).await?;
    Ok(web::Json(to_responses(books)))
}

/// Records priced between `min` and `max`, inclusive.
#[utoipa::path(
    get,
    path = "/api/v1/books/price-range",
    params(
        ("min" = f64, Query, description = "Lower bound, inclusive"),
        ("max" = f64, Query, description = "Upper bound, inclusive")
    ),
    responses(
        (status = 200, description = "Records in range", body = PriceRangeResponse),
        (status = 400, description = "Invalid bounds", body = DomainError)
    ),
    tags = ["books"],
    operation_id = "booksByPrice",
    security([])
)]
#[get("/books/price-range")]
pub async fn books_by_price(
    state: web::Data<HttpState>,
    query: web::Query<PriceRangeQuery>,
) -> ApiResult<web::Json<PriceRangeResponse>> {
    let matched = state.catalogue.price_range(query.min, query.max).await?;
    Ok(web::Json(matched.into()))
}

/// Sorted, de-duplicated category labels.
#[utoipa::path(
    get,
    path = "/api/v1/categories",
    responses(
        (status = 200, description = "Category labels", body = [String]),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["books"],
    operation_id = "listCategories",
    security([])
)]
#[get("/categories")]
pub async fn list_categories(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<String>>> {
    Ok(web::Json(state.catalogue.categories().await?))
}
