use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::api::APIResponse;

/// Failures of the underlying list store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] libsql::Error),

    #[error("items column codec error: {0}")]
    Codec(#[from] serde_json::Error),

    #[error("corrupt list row {id}: {reason}")]
    Corrupt { id: String, reason: String },

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ListError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type ListResult<T> = Result<T, ListError>;

impl ListError {
    pub fn status(&self) -> StatusCode {
        match self {
            ListError::Validation(_) => StatusCode::BAD_REQUEST,
            ListError::Conflict(_) => StatusCode::CONFLICT,
            ListError::NotFound(_) => StatusCode::NOT_FOUND,
            ListError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ListError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ListError::Store(e) => {
                tracing::error!(error = %crate::unpack_error(e), "list store failure");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(APIResponse::<()>::message(status, &message))).into_response()
    }
}
