//! Integration tests for the superhero registry.
//!
//! These drive the public router through the documented scenarios against
//! a hero document in a temporary directory.

use std::path::PathBuf;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

use superhero_registry::api::{create_router, AppState, StaticPages};
use superhero_registry::config::Config;
use superhero_registry::store::HeroStore;

/// Build a router over a fresh temporary directory.
fn test_app() -> (tempfile::TempDir, PathBuf, Router) {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        data_path: dir.path().join("data").join("heroes.json"),
        client_dir: dir.path().join("client"),
        public_dir: dir.path().join("public"),
        ..Config::default()
    };
    config.validate().unwrap();

    let pages = StaticPages::from_config(&config);
    let app = create_router(AppState::new(HeroStore::new(&config.data_path)), &pages);
    (dir, config.data_path, app)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

fn submit(name: &str, universe: &str, power: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/submit-form")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({"superHeroName": name, "universe": universe, "superPowers": power}).to_string(),
        ))
        .unwrap()
}

fn stored(path: &PathBuf) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[tokio::test]
async fn scenarios_run_end_to_end() {
    let (_dir, data_path, app) = test_app();

    // A: empty store, first submission creates the hero.
    let (status, _) = send(&app, submit("Nova", "Marvel", "flight")).await;
    assert_eq!(status, StatusCode::FOUND);
    assert_eq!(
        stored(&data_path),
        json!([{"superHeroName": "Nova", "universe": "Marvel", "superPowers": ["flight"]}])
    );

    // B: second submission appends in order.
    let (status, _) = send(&app, submit("Nova", "Marvel", "strength")).await;
    assert_eq!(status, StatusCode::FOUND);
    assert_eq!(
        stored(&data_path),
        json!([{"superHeroName": "Nova", "universe": "Marvel", "superPowers": ["flight", "strength"]}])
    );

    // C: rename keeps powers.
    let rename = Request::builder()
        .method(Method::PUT)
        .uri("/update-hero/Nova/Marvel")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("newSuperHeroName=Nova+Prime&newUniverse=Marvel"))
        .unwrap();
    let (status, body) = send(&app, rename).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"superPowers":"You sent Nova Prime and Marvel"}"#);
    assert_eq!(
        stored(&data_path),
        json!([{"superHeroName": "Nova Prime", "universe": "Marvel", "superPowers": ["flight", "strength"]}])
    );

    // The old key is gone.
    let delete_old = Request::builder()
        .method(Method::DELETE)
        .uri("/hero/Nova/Marvel")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, delete_old).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // D: delete leaves an empty array.
    let delete = Request::builder()
        .method(Method::DELETE)
        .uri("/hero/Nova%20Prime/Marvel")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, delete).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "successfully deleted hero");
    assert_eq!(stored(&data_path), json!([]));

    let list = Request::builder().uri("/heroes").body(Body::empty()).unwrap();
    let (status, body) = send(&app, list).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "[]");
}

#[tokio::test]
async fn deleting_unknown_hero_on_empty_store_is_404() {
    let (_dir, data_path, app) = test_app();

    // E: nothing stored yet.
    let request = Request::builder()
        .method(Method::DELETE)
        .uri("/hero/Unknown/Nowhere")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "Hero not found");
    assert!(!data_path.exists());
}

#[tokio::test]
async fn concurrent_submissions_are_all_kept() {
    let (_dir, data_path, app) = test_app();

    let requests = (0..10).map(|i| {
        let app = app.clone();
        tokio::spawn(async move { send(&app, submit("Nova", "Marvel", &format!("power-{i}"))).await })
    });
    for handle in requests.collect::<Vec<_>>() {
        let (status, _) = handle.await.unwrap();
        assert_eq!(status, StatusCode::FOUND);
    }

    let heroes = stored(&data_path);
    assert_eq!(heroes.as_array().unwrap().len(), 1);
    assert_eq!(heroes[0]["superPowers"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn missing_static_pages_answer_404() {
    let (_dir, _data_path, app) = test_app();

    let request = Request::builder().uri("/form").body(Body::empty()).unwrap();
    let (status, _) = send(&app, request).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
