//! HTTP Tests: Resume feeds
//!
//! Exercises `/api/v1/resumes` and `/api/v1/resumes/hot` through actix-web
//! with the handlers wired to an in-memory store.

mod common;

use actix_web::{test, web, App};
use common::memory_store::MemoryStore;
use common::{many_resumes, resume};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use resume_service::config::{AuthConfig, PresentationConfig};
use resume_service::handlers::{self, ResumeFeedState};
use resume_service::middleware::{Claims, JwtAuthMiddleware, TokenValidator};
use resume_service::services::{HotRankingService, ListingService};
use serde_json::Value;
use std::sync::Arc;

fn feed_state(store: Arc<MemoryStore>) -> ResumeFeedState {
    ResumeFeedState {
        hot_ranking: Arc::new(HotRankingService::new(store.clone(), 1000)),
        listing: Arc::new(ListingService::new(store)),
    }
}

async fn get_json(store: Arc<MemoryStore>, uri: &str) -> (u16, Value) {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(feed_state(store)))
            .app_data(web::Data::new(PresentationConfig::default()))
            .service(web::scope("/api/v1").configure(handlers::configure_feed_routes)),
    )
    .await;

    let req = test::TestRequest::get().uri(uri).to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status().as_u16();
    let body: Value = test::read_body_json(resp).await;
    (status, body)
}

fn names(body: &Value) -> Vec<String> {
    body["resumes"]
        .as_array()
        .expect("resumes array")
        .iter()
        .map(|r| r["name"].as_str().unwrap_or_default().to_string())
        .collect()
}

#[actix_web::test]
async fn first_page_defaults_to_nine() {
    let store = Arc::new(MemoryStore::new(many_resumes(20)));
    let (status, body) = get_json(store, "/api/v1/resumes").await;

    assert_eq!(status, 200);
    assert_eq!(body["total"], 20);
    assert_eq!(body["resumes"].as_array().unwrap().len(), 9);
    // Newest first: many_resumes ages increase with the index.
    assert_eq!(names(&body)[0], "Resume 0");
}

#[actix_web::test]
async fn third_page_holds_the_remainder() {
    let store = Arc::new(MemoryStore::new(many_resumes(20)));
    let (_, body) = get_json(store, "/api/v1/resumes?page=3&pageSize=9").await;

    assert_eq!(body["total"], 20);
    assert_eq!(names(&body), vec!["Resume 18", "Resume 19"]);
}

#[actix_web::test]
async fn page_past_the_end_is_empty_not_an_error() {
    let store = Arc::new(MemoryStore::new(many_resumes(5)));
    let (status, body) = get_json(store, "/api/v1/resumes?page=40").await;

    assert_eq!(status, 200);
    assert_eq!(body["total"], 5);
    assert!(body["resumes"].as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn malformed_paging_falls_back_to_defaults() {
    let store = Arc::new(MemoryStore::new(many_resumes(60)));
    let (status, body) = get_json(store.clone(), "/api/v1/resumes?page=abc&pageSize=oops").await;
    assert_eq!(status, 200);
    assert_eq!(body["resumes"].as_array().unwrap().len(), 9);

    let (_, body) = get_json(store, "/api/v1/resumes?pageSize=500").await;
    assert_eq!(body["resumes"].as_array().unwrap().len(), 50);
}

#[actix_web::test]
async fn query_filters_name_or_blurb_and_total() {
    let store = Arc::new(MemoryStore::new(vec![
        resume("Ali Khan", None, 0, 0, 1),
        resume("Resume", Some("say ali-gator"), 0, 0, 2),
        resume("Bob", None, 0, 0, 3),
        resume("Other", Some("no match here"), 0, 0, 4),
    ]));
    let (_, body) = get_json(store, "/api/v1/resumes?q=ALI").await;

    assert_eq!(body["total"], 2);
    assert_eq!(names(&body), vec!["Ali Khan", "Resume"]);
}

#[actix_web::test]
async fn listing_failure_is_masked() {
    let store = Arc::new(MemoryStore::new(many_resumes(3)).failing_listing());
    let (status, body) = get_json(store, "/api/v1/resumes").await;

    assert_eq!(status, 500);
    assert_eq!(body["error"], "Failed to fetch resumes");
}

#[actix_web::test]
async fn hot_defaults_to_three() {
    let store = Arc::new(MemoryStore::new(many_resumes(30)));
    let (status, body) = get_json(store, "/api/v1/resumes/hot").await;

    assert_eq!(status, 200);
    assert_eq!(body["resumes"].as_array().unwrap().len(), 3);
}

#[actix_web::test]
async fn hot_limit_is_clamped() {
    let store = Arc::new(MemoryStore::new(many_resumes(30)));

    let (_, body) = get_json(store.clone(), "/api/v1/resumes/hot?limit=0").await;
    assert_eq!(body["resumes"].as_array().unwrap().len(), 1);

    let (_, body) = get_json(store.clone(), "/api/v1/resumes/hot?limit=11").await;
    assert_eq!(body["resumes"].as_array().unwrap().len(), 10);

    let (_, body) = get_json(store, "/api/v1/resumes/hot?limit=abc").await;
    assert_eq!(body["resumes"].as_array().unwrap().len(), 3);
}

#[actix_web::test]
async fn hot_payload_shape() {
    let store = Arc::new(MemoryStore::new(vec![
        resume("A", None, 5, 2, 30),
        resume("B", None, 3, 3, 20),
        resume("C", None, 1, 9, 10),
    ]));
    let (_, body) = get_json(store, "/api/v1/resumes/hot?limit=3").await;

    assert_eq!(names(&body), vec!["C", "A", "B"]);

    let top = &body["resumes"][0];
    assert_eq!(top["likes"], 1);
    assert_eq!(top["commentsCount"], 9);
    assert_eq!(top["comments"], serde_json::json!([]));
    assert_eq!(top["avatar"], "/cartoon-avatar-user.png");
    assert_eq!(top["fileType"], "pdf");
    assert!(top["createdAt"].is_i64());
    assert!(top["ownerId"].is_string());
}

#[actix_web::test]
async fn hot_failure_is_masked() {
    let store = Arc::new(MemoryStore::new(many_resumes(2500)).failing_on_chunk(2));
    let (status, body) = get_json(store, "/api/v1/resumes/hot").await;

    assert_eq!(status, 500);
    assert_eq!(body["error"], "Failed to fetch hot resumes");
}

fn expired_bearer(secret: &str) -> String {
    let claims = Claims {
        sub: "user-9".into(),
        email: Some("nine@example.com".into()),
        name: None,
        picture: None,
        exp: (chrono::Utc::now().timestamp() - 3600) as usize,
        iss: None,
    };
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap();
    format!("Bearer {}", token)
}

#[actix_web::test]
async fn stale_token_still_reads_public_feeds() {
    let store = Arc::new(MemoryStore::new(many_resumes(12)));
    let validator = Arc::new(TokenValidator::new(&AuthConfig {
        jwt_secret: "feed-secret".into(),
        jwt_issuer: None,
    }));
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(feed_state(store)))
            .app_data(web::Data::new(PresentationConfig::default()))
            .service(
                web::scope("/api/v1")
                    .wrap(JwtAuthMiddleware::new(validator))
                    .configure(handlers::configure_feed_routes),
            ),
    )
    .await;

    for (uri, header) in [
        ("/api/v1/resumes/hot", expired_bearer("feed-secret")),
        ("/api/v1/resumes", expired_bearer("feed-secret")),
        ("/api/v1/resumes/hot", "Basic Zm9vOmJhcg==".to_string()),
    ] {
        let req = test::TestRequest::get()
            .uri(uri)
            .insert_header(("Authorization", header))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 200, "{}", uri);
    }
}
