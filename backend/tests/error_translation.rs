//! Error payloads rendered by the running app.

#[path = "support/users_app.rs"]
mod users_app;

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test::TestRequest;
use chrono::DateTime;
use rstest::rstest;
use serde_json::json;
use async_trait::async_trait;
use users_api::domain::ports::{UserPersistenceError, UserRepository};
use users_api::domain::{User, UserId};
use users_api::middleware::ErrorVerbosity;
use users_api::test_support::{http_state_with, seeded_http_state};
use users_app::{init_app, send};

#[rstest]
#[actix_web::test]
async fn verbose_errors_describe_the_request() {
    let app = init_app(seeded_http_state(), ErrorVerbosity::Verbose).await;

    let reply = send(&app, TestRequest::get().uri("/v3/users/9?x=1")).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    let trace = reply.header("trace-id").expect("trace header").to_owned();
    let body = reply.json();
    assert_eq!(body["message"], "404 NOT_FOUND \"User with id 9 not found\"");
    assert_eq!(
        body["details"],
        format!("uri=/v3/users/9?x=1;method=GET;client=unknown;trace={trace}")
    );
    let timestamp = body["timestamp"].as_str().expect("timestamp");
    assert!(DateTime::parse_from_rfc3339(timestamp).is_ok());
}

#[rstest]
#[actix_web::test]
async fn terse_errors_carry_reason_and_path() {
    let app = init_app(seeded_http_state(), ErrorVerbosity::Terse).await;

    let reply = send(&app, TestRequest::get().uri("/v3/users/9?x=1")).await;
    let body = reply.json();
    assert_eq!(body["message"], "User with id 9 not found");
    assert_eq!(body["details"], "uri=/v3/users/9");
}

#[rstest]
#[case("fr", "Utilisateur avec l'identifiant 9 introuvable")]
#[case("nl", "Gebruiker met id 9 niet gevonden")]
#[case("de", "User with id 9 not found")]
#[case("fr-CA,en;q=0.5", "Utilisateur avec l'identifiant 9 introuvable")]
#[actix_web::test]
async fn messages_follow_accept_language(#[case] language: &str, #[case] expected: &str) {
    let app = init_app(seeded_http_state(), ErrorVerbosity::Terse).await;

    let reply = send(
        &app,
        TestRequest::delete()
            .uri("/users/9")
            .insert_header(("Accept-Language", language)),
    )
    .await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(reply.json()["message"], expected);
}

#[rstest]
#[case(TestRequest::get().uri("/users/1"))]
#[case(TestRequest::get().uri("/v3/users/99"))]
#[case(TestRequest::post().uri("/v1/users").set_json(json!({"name": "A"})))]
#[case(TestRequest::get().uri("/missing"))]
#[actix_web::test]
async fn every_response_carries_a_trace_id(#[case] request: TestRequest) {
    let app = init_app(seeded_http_state(), ErrorVerbosity::Terse).await;
    let reply = send(&app, request).await;
    let trace = reply.header("trace-id").expect("trace header");
    assert!(uuid::Uuid::parse_str(trace).is_ok());
}

#[rstest]
#[actix_web::test]
async fn unknown_routes_name_method_and_path() {
    let app = init_app(seeded_http_state(), ErrorVerbosity::Terse).await;
    let reply = send(&app, TestRequest::get().uri("/v4/users")).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(reply.json()["message"], "No handler found for GET /v4/users");
}

/// Store whose every call fails.
struct UnavailableStore;

#[async_trait]
impl UserRepository for UnavailableStore {
    async fn find_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        Err(UserPersistenceError::unavailable("disk gone"))
    }

    async fn find_one(&self, _id: UserId) -> Result<Option<User>, UserPersistenceError> {
        Err(UserPersistenceError::unavailable("disk gone"))
    }

    async fn save(&self, _user: User) -> Result<User, UserPersistenceError> {
        Err(UserPersistenceError::unavailable("disk gone"))
    }

    async fn delete(&self, _id: UserId) -> Result<(), UserPersistenceError> {
        Err(UserPersistenceError::unavailable("disk gone"))
    }
}

#[rstest]
#[case(ErrorVerbosity::Terse, "An unexpected error occurred. Please contact support.")]
#[case(ErrorVerbosity::Verbose, "user store unavailable: disk gone")]
#[actix_web::test]
async fn store_failures_respect_verbosity(
    #[case] verbosity: ErrorVerbosity,
    #[case] expected: &str,
) {
    let app = init_app(http_state_with(Arc::new(UnavailableStore)), verbosity).await;

    let reply = send(&app, TestRequest::get().uri("/v1/users/1")).await;
    assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(reply.json()["message"], expected);
}
