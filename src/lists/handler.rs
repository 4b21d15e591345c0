//! HTTP Handlers for the Lists API

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    response::Response,
};
use serde::Deserialize;
use serde_json::Value;

use super::{Lists, SyncCommand, parse_list_ids};
use crate::api;
use crate::error::{ListError, ListResult};
use crate::handler::AppState;
use crate::model::{CreateList, Item, UpdateList};
use crate::store::SqlListStore;

// ============================================================================
// Request Bodies
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    pub item_ids: Option<Value>,
    pub movie_detail: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncItemRequest {
    pub user_id: Option<String>,
    pub item_ids: Option<Value>,
    pub movie_detail: Option<Value>,
}

fn lists(state: &AppState) -> Lists<SqlListStore<'_>> {
    Lists::new(SqlListStore::new(state.db.connection()))
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> ListResult<T> {
    payload
        .map(|Json(inner)| inner)
        .map_err(|rejection| ListError::Validation(rejection.body_text()))
}

fn item_from(detail: Option<Value>) -> ListResult<Item> {
    match detail {
        Some(value) => Item::from_payload(value),
        None => Err(ListError::Validation(
            "Invalid item details provided.".to_string(),
        )),
    }
}

// ============================================================================
// List Handlers
// ============================================================================

pub async fn create_list(
    State(state): State<AppState>,
    payload: Result<Json<CreateList>, JsonRejection>,
) -> ListResult<Response> {
    let new = body(payload)?.validate()?;
    let list = lists(&state).create_list(new).await?;
    Ok(api::created("List created successfully", list))
}

pub async fn get_lists(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ListResult<Response> {
    let found = lists(&state).lists_for_user(&user_id).await?;
    Ok(api::ok("Lists fetched successfully", found))
}

pub async fn update_list(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateList>, JsonRejection>,
) -> ListResult<Response> {
    let patch = body(payload)?.validate()?;
    let list = lists(&state).update_list(&id, patch).await?;
    Ok(api::ok("List updated successfully", list))
}

pub async fn delete_list(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ListResult<Response> {
    lists(&state).delete_list(&id).await?;
    Ok(api::ok_message("List deleted successfully"))
}

// ============================================================================
// Item Handlers
// ============================================================================

pub async fn add_item_to_lists(
    State(state): State<AppState>,
    payload: Result<Json<AddItemRequest>, JsonRejection>,
) -> ListResult<Response> {
    let req = body(payload)?;
    let list_ids = parse_list_ids(req.item_ids)?;
    let item = item_from(req.movie_detail)?;

    let outcome = lists(&state).add_item_to_lists(&list_ids, item).await?;
    Ok(api::ok(&outcome.summary(), outcome))
}

pub async fn update_item_to_lists(
    State(state): State<AppState>,
    payload: Result<Json<SyncItemRequest>, JsonRejection>,
) -> ListResult<Response> {
    let req = body(payload)?;
    let list_ids = parse_list_ids(req.item_ids)?;
    let item = item_from(req.movie_detail)?;
    let cmd = SyncCommand::new(req.user_id.as_deref().unwrap_or_default(), item, list_ids)?;

    let outcome = lists(&state).sync_item(cmd).await?;
    Ok(api::ok(&outcome.summary(), outcome))
}

pub async fn all_item_ids(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ListResult<Response> {
    let ids = lists(&state).all_item_ids(&user_id).await?;
    Ok(api::ok("Item ids fetched successfully", ids))
}

pub async fn item_in_lists(
    State(state): State<AppState>,
    Path((user_id, item_id)): Path<(String, String)>,
) -> ListResult<Response> {
    let found = lists(&state).item_in_lists(&user_id, &item_id).await?;
    Ok(api::ok("Item lists fetched successfully", found))
}
