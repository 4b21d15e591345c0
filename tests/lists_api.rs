//! Integration tests for the `/lists` endpoints, driven through the full
//! router against an in-memory database.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, build_test_app, create_list, get, post_json, send};
use serde_json::json;

// ---------------------------------------------------------------------------
// Health and envelope
// ---------------------------------------------------------------------------

#[tokio::test]
async fn healthcheck_returns_envelope() {
    let app = build_test_app().await;
    let response = get(&app, "/").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json, json!({ "statusCode": 200, "message": "ok" }));
}

#[tokio::test]
async fn malformed_json_is_a_validation_error() {
    let app = build_test_app().await;
    let response = send(&app, Method::POST, "/lists", None).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["statusCode"], 400);
}

// ---------------------------------------------------------------------------
// List CRUD
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_then_fetch_by_owner() {
    let app = build_test_app().await;

    let response = post_json(
        &app,
        "/lists",
        json!({ "name": "Watchlist", "userId": "u1", "isPin": true }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["statusCode"], 201);
    assert_eq!(created["message"], "List created successfully");
    assert_eq!(created["data"]["isPinned"], true);
    assert_eq!(created["data"]["items"], json!([]));

    let response = get(&app, "/lists/u1").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["name"], "Watchlist");
}

#[tokio::test]
async fn duplicate_name_is_conflict() {
    let app = build_test_app().await;
    create_list(&app, "Favorites", "u1").await;

    let response = post_json(&app, "/lists", json!({ "name": "Favorites", "userId": "u1" })).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["message"], "List name already exists for this user");

    let json = body_json(get(&app, "/lists/u1").await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn missing_name_is_bad_request() {
    let app = build_test_app().await;
    let response = post_json(&app, "/lists", json!({ "userId": "u1" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn rename_and_pin() {
    let app = build_test_app().await;
    let id = create_list(&app, "Later", "u1").await;

    let response = send(
        &app,
        Method::PUT,
        &format!("/lists/{id}"),
        Some(json!({ "name": "Tonight", "isPinned": true })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Tonight");
    assert_eq!(json["data"]["isPinned"], true);
}

#[tokio::test]
async fn update_unknown_list_is_not_found() {
    let app = build_test_app().await;
    let response = send(
        &app,
        Method::PUT,
        "/lists/does-not-exist",
        Some(json!({ "isPinned": true })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_removes_list_from_queries() {
    let app = build_test_app().await;
    let id = create_list(&app, "Watchlist", "u1").await;

    post_json(
        &app,
        "/lists/addItemToLists",
        json!({ "itemIds": [id], "movieDetail": { "id": "m1", "title": "Heat" } }),
    )
    .await;

    let response = send(&app, Method::DELETE, &format!("/lists/{id}"), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "List deleted successfully");
    assert!(json.get("data").is_none());

    let json = body_json(get(&app, "/lists/u1").await).await;
    assert_eq!(json["data"], json!([]));

    let response = get(&app, "/lists/itemInLists/u1/m1").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&app, Method::DELETE, &format!("/lists/{id}"), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// addItemToLists
// ---------------------------------------------------------------------------

#[tokio::test]
async fn add_item_reports_added_and_already_present() {
    let app = build_test_app().await;
    let l1 = create_list(&app, "L1", "u1").await;
    let l2 = create_list(&app, "L2", "u1").await;

    post_json(
        &app,
        "/lists/addItemToLists",
        json!({ "itemIds": [l1], "movieDetail": { "id": "X" } }),
    )
    .await;

    let response = post_json(
        &app,
        "/lists/addItemToLists",
        json!({ "itemIds": [l1, l2], "movieDetail": { "id": "X", "title": "Heat" } }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["addedToLists"], json!(["L2"]));
    assert_eq!(json["data"]["alreadyPresentInLists"], json!(["L1"]));
    assert_eq!(json["data"]["notFoundLists"], json!([]));
    assert_eq!(
        json["message"],
        "Item added to lists: L2. Item already present in lists: L1."
    );
}

#[tokio::test]
async fn add_item_to_only_unknown_lists_is_not_found() {
    let app = build_test_app().await;
    let response = post_json(
        &app,
        "/lists/addItemToLists",
        json!({ "itemIds": ["nope"], "movieDetail": { "id": "X" } }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn add_item_rejects_bad_input() {
    let app = build_test_app().await;

    let response = post_json(
        &app,
        "/lists/addItemToLists",
        json!({ "itemIds": [], "movieDetail": { "id": "X" } }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json(
        &app,
        "/lists/addItemToLists",
        json!({ "itemIds": "abc", "movieDetail": { "id": "X" } }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json(
        &app,
        "/lists/addItemToLists",
        json!({ "itemIds": ["abc"], "movieDetail": "X" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// updateItemToLists
// ---------------------------------------------------------------------------

#[tokio::test]
async fn update_item_moves_between_lists() {
    let app = build_test_app().await;
    let a = create_list(&app, "A", "u1").await;
    let b = create_list(&app, "B", "u1").await;

    post_json(
        &app,
        "/lists/addItemToLists",
        json!({ "itemIds": [a], "movieDetail": { "id": "item1", "userRating": 3 } }),
    )
    .await;

    let response = post_json(
        &app,
        "/lists/updateItemToLists",
        json!({
            "userId": "u1",
            "itemIds": [b],
            "movieDetail": { "id": "item1", "userRating": 4 }
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["addedTo"], json!(["B"]));
    assert_eq!(json["data"]["removedFrom"], json!(["A"]));
    assert_eq!(json["data"]["ratingUpdatedIn"], json!(["A"]));

    let found = body_json(get(&app, "/lists/itemInLists/u1/item1").await).await;
    assert_eq!(found["data"]["lists"], json!(["B"]));
    assert_eq!(found["data"]["item"]["userRating"], 4);
}

#[tokio::test]
async fn update_item_twice_reports_no_changes() {
    let app = build_test_app().await;
    let a = create_list(&app, "A", "u1").await;
    let body = json!({
        "userId": "u1",
        "itemIds": [a],
        "movieDetail": { "id": "m1", "title": "Heat", "userRating": 5 }
    });

    let first = body_json(post_json(&app, "/lists/updateItemToLists", body.clone()).await).await;
    assert_eq!(first["message"], "Item added to lists: A.");

    let response = post_json(&app, "/lists/updateItemToLists", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let second = body_json(response).await;
    assert_eq!(second["message"], "No changes made.");
}

#[tokio::test]
async fn update_item_requires_targets_and_id() {
    let app = build_test_app().await;

    let response = post_json(
        &app,
        "/lists/updateItemToLists",
        json!({ "userId": "u1", "itemIds": [], "movieDetail": { "id": "m1" } }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json(
        &app,
        "/lists/updateItemToLists",
        json!({ "userId": "u1", "itemIds": ["x"], "movieDetail": { "title": "no id" } }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Query helpers
// ---------------------------------------------------------------------------

#[tokio::test]
async fn all_item_ids_are_distinct() {
    let app = build_test_app().await;
    let a = create_list(&app, "A", "u1").await;
    let b = create_list(&app, "B", "u1").await;

    post_json(
        &app,
        "/lists/addItemToLists",
        json!({ "itemIds": [a, b], "movieDetail": { "id": "m1" } }),
    )
    .await;
    post_json(
        &app,
        "/lists/addItemToLists",
        json!({ "itemIds": [b], "movieDetail": { "id": "m2" } }),
    )
    .await;

    let json = body_json(get(&app, "/lists/allItemIds/u1").await).await;
    assert_eq!(json["data"], json!(["m1", "m2"]));
}

#[tokio::test]
async fn item_in_lists_unknown_item_is_not_found() {
    let app = build_test_app().await;
    create_list(&app, "A", "u1").await;

    let response = get(&app, "/lists/itemInLists/u1/ghost").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["statusCode"], 404);
}
