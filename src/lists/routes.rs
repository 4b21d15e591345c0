use axum::{
    Router,
    routing::{get, post},
};

use super::handler;
use crate::handler::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handler::create_list))
        .route("/addItemToLists", post(handler::add_item_to_lists))
        .route("/updateItemToLists", post(handler::update_item_to_lists))
        .route("/allItemIds/:user_id", get(handler::all_item_ids))
        .route("/itemInLists/:user_id/:item_id", get(handler::item_in_lists))
        // `:id` is the owner id for GET and the list id for PUT/DELETE.
        .route(
            "/:id",
            get(handler::get_lists)
                .put(handler::update_list)
                .delete(handler::delete_list),
        )
}
