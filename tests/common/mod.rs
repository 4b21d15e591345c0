use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, Response, header::CONTENT_TYPE};
use http_body_util::BodyExt;
use mediolist::db::Database;
use mediolist::handler::AppState;
use mediolist::router;
use serde_json::Value;
use tower::ServiceExt;

/// Full application router over a fresh in-memory database.
pub async fn build_test_app() -> Router {
    let db = Database::in_memory().await.expect("in-memory database");
    router::app(AppState { db: Arc::new(db) })
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Creates a list and returns its id.
pub async fn create_list(app: &Router, name: &str, user_id: &str) -> String {
    let response = post_json(
        app,
        "/lists",
        serde_json::json!({ "name": name, "userId": user_id }),
    )
    .await;
    let json = body_json(response).await;
    json["data"]["id"].as_str().unwrap().to_string()
}
