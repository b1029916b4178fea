use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use movies_test::{resolve_path, TestApp};
use serde_json::{json, Value};
use std::collections::HashMap;

#[test]
fn test_resolve_simple_field() {
    let v = json!({"title": "Heat"});
    assert_eq!(resolve_path(&v, "title"), json!("Heat"));
}

#[test]
fn test_resolve_top_level_array() {
    let v = json!([{"firstName": "Tom"}, {"firstName": "Meg"}]);
    assert_eq!(resolve_path(&v, "[1].firstName"), json!("Meg"));
    assert_eq!(resolve_path(&v, "len()"), json!(2));
}

#[test]
fn test_resolve_nested_index() {
    let v = json!({"details": [{"field": "title", "codes": ["a", "b"]}]});
    assert_eq!(resolve_path(&v, "details[0].field"), json!("title"));
    assert_eq!(resolve_path(&v, "details[0].codes[1]"), json!("b"));
}

#[test]
fn test_resolve_missing_field() {
    let v = json!({"title": "Heat"});
    assert_eq!(resolve_path(&v, "genre"), Value::Null);
    assert_eq!(resolve_path(&v, "title[3]"), Value::Null);
}

fn echo_router() -> Router {
    Router::new()
        .route("/echo", post(|Json(v): Json<Value>| async move { Json(v) }))
        .route(
            "/form",
            post(|Form(f): Form<HashMap<String, String>>| async move {
                let mut keys: Vec<_> = f.into_iter().map(|(k, v)| format!("{k}={v}")).collect();
                keys.sort();
                keys.join("&")
            }),
        )
        .route(
            "/moved",
            get(|| async { axum::response::Redirect::to("/target") }),
        )
        .route("/teapot", get(|| async { StatusCode::IM_A_TEAPOT }))
}

#[tokio::test]
async fn test_json_round_trip_through_router() {
    let app = TestApp::new(echo_router());
    app.post("/echo")
        .json(&json!({"title": "Ronin", "genres": ["crime"]}))
        .send()
        .await
        .assert_ok()
        .assert_json_path("title", "Ronin")
        .assert_json_path("genres.len()", 1);
}

#[tokio::test]
async fn test_form_body_is_urlencoded() {
    let app = TestApp::new(echo_router());
    app.post("/form")
        .form(&[("title", "Blade Runner"), ("genre", "sci-fi & noir")])
        .send()
        .await
        .assert_ok()
        .assert_contains("genre=sci-fi & noir")
        .assert_contains("title=Blade Runner");
}

#[tokio::test]
async fn test_redirect_assertion() {
    let app = TestApp::new(echo_router());
    app.get("/moved").send().await.assert_redirect("/target");
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = TestApp::new(echo_router());
    app.get("/nowhere").send().await.assert_not_found();
    app.get("/teapot")
        .send()
        .await
        .assert_status(StatusCode::IM_A_TEAPOT);
}
