//! Tests for the catalogue service.

use super::*;
use crate::domain::ports::{FixtureBookRepository, MockBookRepository};
use crate::domain::{DataHealthStatus, ErrorCode, Rating};
use rstest::{fixture, rstest};

fn book(id: u32, title: &str, category: &str, price: f64, stars: i64) -> Book {
    Book {
        id: BookId::new(id),
        title: title.to_owned(),
        price,
        rating: Rating::try_from(stars).expect("valid rating"),
        availability: "In stock".to_owned(),
        category: category.to_owned(),
        image_url: format!("https://example.test/{id}.jpg"),
    }
}

#[fixture]
fn service() -> CatalogueService<FixtureBookRepository> {
    // Id 4 is missing on purpose: a skipped source row leaves a gap.
    CatalogueService::new(Arc::new(FixtureBookRepository::new(vec![
        book(1, "A Light in the Attic", "Poetry", 51.77, 3),
        book(2, "Tipping the Velvet", "Historical Fiction", 53.74, 5),
        book(3, "Soumission", "Fiction", 50.10, 1),
        book(5, "Sharp Objects", "Mystery", 47.82, 5),
        book(6, "The Black Maria", "Poetry", 52.15, 4),
        book(7, "Olio", "Poetry", 23.88, 5),
    ])))
}

fn ids(books: &[Book]) -> Vec<u32> {
    books.iter().map(|b| b.id.get()).collect()
}

#[rstest]
#[tokio::test]
async fn list_books_keeps_source_order(service: CatalogueService<FixtureBookRepository>) {
    let books = service.list_books().await.expect("list");
    assert_eq!(ids(&books), vec![1, 2, 3, 5, 6, 7]);
}

#[rstest]
#[case(5, Some(5))]
#[case(4, None)]
#[case(99, None)]
#[tokio::test]
async fn get_book_looks_up_positional_ids(
    service: CatalogueService<FixtureBookRepository>,
    #[case] id: u32,
    #[case] expected: Option<u32>,
) {
    match (service.get_book(BookId::new(id)).await, expected) {
        (Ok(book), Some(want)) => assert_eq!(book.id.get(), want),
        (Err(err), None) => assert_eq!(err.code(), ErrorCode::NotFound),
        (other, _) => panic!("unexpected result for id {id}: {other:?}"),
    }
}

#[rstest]
#[case(Some("the"), None, vec![1, 2, 6])]
#[case(None, Some("POETRY"), vec![1, 6, 7])]
#[case(Some("the"), Some("poetry"), vec![1, 6])]
#[case(Some("  olio  "), Some("   "), vec![7])]
#[case(Some("missing"), None, vec![])]
#[tokio::test]
async fn search_matches_case_insensitive_substrings(
    service: CatalogueService<FixtureBookRepository>,
    #[case] title: Option<&str>,
    #[case] category: Option<&str>,
    #[case] expected: Vec<u32>,
) {
    let criteria = BookSearch {
        title: title.map(str::to_owned),
        category: category.map(str::to_owned),
    };
    let books = service.search(&criteria).await.expect("search");
    assert_eq!(ids(&books), expected);
}

#[rstest]
#[case(None, None)]
#[case(Some(""), Some("  "))]
#[tokio::test]
async fn search_requires_a_filter(
    service: CatalogueService<FixtureBookRepository>,
    #[case] title: Option<&str>,
    #[case] category: Option<&str>,
) {
    let criteria = BookSearch {
        title: title.map(str::to_owned),
        category: category.map(str::to_owned),
    };
    let err = service.search(&criteria).await.expect_err("no filter");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[case(None, vec![2, 5, 7])]
#[case(Some(1), vec![2, 5, 7])]
#[case(Some(3), vec![2, 5, 7])]
#[case(Some(4), vec![2, 5, 7, 6])]
#[case(Some(5), vec![2, 5, 7, 6, 1])]
#[case(Some(50), vec![2, 5, 7, 6, 1, 3])]
#[tokio::test]
async fn top_rated_extends_limit_to_ties(
    service: CatalogueService<FixtureBookRepository>,
    #[case] limit: Option<usize>,
    #[case] expected: Vec<u32>,
) {
    let books = service.top_rated(limit).await.expect("top rated");
    assert_eq!(ids(&books), expected);
}

#[rstest]
#[tokio::test]
async fn top_rated_rejects_zero_limit(service: CatalogueService<FixtureBookRepository>) {
    let err = service.top_rated(Some(0)).await.expect_err("zero limit");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn top_rated_on_empty_store_is_empty() {
    let service = CatalogueService::new(Arc::new(FixtureBookRepository::default()));
    assert!(service.top_rated(None).await.expect("top rated").is_empty());
}

#[rstest]
#[tokio::test]
async fn price_range_is_inclusive(service: CatalogueService<FixtureBookRepository>) {
    let found = service
        .price_range(Some(47.82), Some(51.77))
        .await
        .expect("range");
    assert_eq!(ids(&found.books), vec![1, 3, 5]);
    assert!((found.min - 47.82).abs() < f64::EPSILON);
    assert!((found.max - 51.77).abs() < f64::EPSILON);
}

#[rstest]
#[case(None, Some(10.0), "min")]
#[case(Some(10.0), None, "max")]
#[case(Some(-1.0), Some(10.0), "min")]
#[case(Some(1.0), Some(f64::NAN), "max")]
#[case(Some(1.0), Some(f64::INFINITY), "max")]
#[case(Some(20.0), Some(10.0), "min")]
#[tokio::test]
async fn price_range_rejects_bad_bounds(
    service: CatalogueService<FixtureBookRepository>,
    #[case] min: Option<f64>,
    #[case] max: Option<f64>,
    #[case] field: &str,
) {
    let err = service.price_range(min, max).await.expect_err("bad bounds");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    let details = err.details().expect("field details");
    assert_eq!(details["field"], field);
}

#[rstest]
#[tokio::test]
async fn categories_are_sorted_and_distinct(service: CatalogueService<FixtureBookRepository>) {
    let categories = service.categories().await.expect("categories");
    assert_eq!(
        categories,
        vec!["Fiction", "Historical Fiction", "Mystery", "Poetry"]
    );
}

#[rstest]
#[tokio::test]
async fn health_reflects_snapshot(service: CatalogueService<FixtureBookRepository>) {
    let health = service.health().await.expect("health");
    assert_eq!(health.status, DataHealthStatus::Healthy);
    assert_eq!(health.total_books, 6);

    let missing = CatalogueService::new(Arc::new(FixtureBookRepository::default()));
    let health = missing.health().await.expect("health");
    assert_eq!(health.status, DataHealthStatus::Error);
    assert!(!health.source_found);
}

#[rstest]
#[tokio::test]
async fn stats_cover_every_category(service: CatalogueService<FixtureBookRepository>) {
    let overview = service.overview().await.expect("overview");
    assert_eq!(overview.total_books, 6);
    assert_eq!(overview.rating_distribution.count(5), 3);

    let breakdown = service.category_stats().await.expect("breakdown");
    assert_eq!(breakdown.total_categories(), 4);
    let poetry = breakdown
        .categories
        .iter()
        .find(|c| c.category == "Poetry")
        .expect("poetry stats");
    assert_eq!(poetry.total_books, 3);
    assert!((poetry.mean_rating - 4.0).abs() < 1e-9);
}

#[rstest]
#[tokio::test]
async fn features_use_sorted_category_positions(
    service: CatalogueService<FixtureBookRepository>,
) {
    let features = service.features().await.expect("features");
    let indices: Vec<usize> = features.iter().map(|f| f.category_index).collect();
    assert_eq!(indices, vec![3, 1, 0, 2, 3, 3]);

    let training = service.training_data().await.expect("training data");
    let targets: Vec<u8> = training.iter().map(|t| t.target).collect();
    assert_eq!(targets, vec![3, 5, 1, 5, 4, 5]);
}

#[rstest]
#[case(-1.0, "Poetry", "price")]
#[case(f64::NAN, "Poetry", "price")]
#[case(10.0, "  ", "category")]
#[tokio::test]
async fn predict_validates_input(
    service: CatalogueService<FixtureBookRepository>,
    #[case] price: f64,
    #[case] category: &str,
    #[case] field: &str,
) {
    let input = PredictionInput {
        price,
        category: category.to_owned(),
        in_stock: true,
    };
    let err = service.predict(&input).await.expect_err("invalid input");
    assert_eq!(err.details().expect("details")["field"], field);
}

#[rstest]
#[tokio::test]
async fn repository_failures_are_internal() {
    let mut repo = MockBookRepository::new();
    repo.expect_snapshot()
        .times(1)
        .return_once(|| Err(BookRepositoryError::unavailable("disk gone")));
    let service = CatalogueService::new(Arc::new(repo));

    let err = service.list_books().await.expect_err("repository failure");
    assert_eq!(err.code(), ErrorCode::InternalError);
}
