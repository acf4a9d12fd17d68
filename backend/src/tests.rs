//! Tests for the backend application bootstrap, covering catalogue loading,
//! readiness signalling and route assembly.

use super::server::{AppDependencies, ServerConfig, build_app, build_http_state, create_server};
use actix_web::http::StatusCode;
use actix_web::{test as actix_test, web};
use bookshelf::config::{SigningAlgorithm, TokenSettings};
use bookshelf::domain::TokenLifetimes;
use bookshelf::inbound::http::health::HealthState;
use bookshelf::test_support::csv_fixture::{CsvFixture, SAMPLE_ROWS};
use rstest::{fixture, rstest};
use serde_json::Value;
use zeroize::Zeroizing;

#[fixture]
fn health_state() -> web::Data<HealthState> {
    web::Data::new(HealthState::new())
}

#[fixture]
fn token_settings() -> TokenSettings {
    TokenSettings {
        secret: Zeroizing::new(b"bootstrap-test-secret-0123456789".to_vec()),
        algorithm: SigningAlgorithm::Hs256,
        lifetimes: TokenLifetimes::default(),
    }
}

fn config_for(fixture: &CsvFixture, tokens: TokenSettings) -> ServerConfig {
    let bind_addr = "127.0.0.1:0".parse().expect("loopback address");
    ServerConfig::new(bind_addr, fixture.path(), tokens)
}

#[rstest]
#[actix_rt::test]
async fn create_server_marks_ready(
    health_state: web::Data<HealthState>,
    token_settings: TokenSettings,
) {
    let fixture = CsvFixture::with_rows(SAMPLE_ROWS).expect("fixture written");
    let config = config_for(&fixture, token_settings);
    assert_eq!(config.bind_addr().port(), 0);
    assert!(!health_state.is_ready(), "state should start unready");

    let _server = create_server(health_state.clone(), config).expect("server should build");

    assert!(
        health_state.is_ready(),
        "server creation should mark readiness"
    );
}

#[rstest]
#[actix_rt::test]
async fn missing_data_file_still_starts(
    health_state: web::Data<HealthState>,
    token_settings: TokenSettings,
) {
    let fixture = CsvFixture::empty_dir().expect("temp dir");
    let config = config_for(&fixture, token_settings);

    let _server = create_server(health_state.clone(), config).expect("server should build");

    assert!(health_state.is_ready());
}

#[rstest]
#[actix_rt::test]
async fn unreadable_data_file_aborts_startup(
    health_state: web::Data<HealthState>,
    token_settings: TokenSettings,
) {
    let fixture = CsvFixture::empty_dir().expect("temp dir");
    let bind_addr = "127.0.0.1:0".parse().expect("loopback address");
    let config = ServerConfig::new(bind_addr, fixture.dir().to_path_buf(), token_settings);

    let result = create_server(health_state.clone(), config);

    assert!(result.is_err(), "a directory is not a readable catalogue");
    assert!(!health_state.is_ready());
}

#[rstest]
#[actix_rt::test]
async fn app_serves_api_and_probes(token_settings: TokenSettings) {
    let fixture = CsvFixture::with_rows(SAMPLE_ROWS).expect("fixture written");
    let config = config_for(&fixture, token_settings);
    let http_state = build_http_state(&config).expect("state should build");
    let health_state = web::Data::new(HealthState::new());
    let app = actix_test::init_service(build_app(AppDependencies {
        health_state: health_state.clone(),
        http_state,
    }))
    .await;

    let request = actix_test::TestRequest::get().uri("/health/ready").to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    health_state.mark_ready();
    let request = actix_test::TestRequest::get().uri("/health/ready").to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let request = actix_test::TestRequest::get().uri("/api/v1/health").to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, request).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(
        body["totalBooks"].as_u64(),
        u64::try_from(SAMPLE_ROWS.len()).ok()
    );

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/books/1")
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("trace-id"));
}
