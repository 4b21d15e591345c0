use std::sync::Arc;

use axum::response::Response;
use tracing::info;

use crate::api;
use crate::db::Database;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
}

pub async fn healthcheck() -> Response {
    info!("got healthcheck request");
    api::ok_message("ok")
}
