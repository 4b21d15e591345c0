use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Uniform response envelope shared by every endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct APIResponse<T> {
    pub status_code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> APIResponse<T> {
    pub fn new(status: StatusCode, msg: &str, data: Option<T>) -> Self {
        APIResponse {
            status_code: status.as_u16(),
            message: msg.to_owned(),
            data,
        }
    }

    pub fn message(status: StatusCode, msg: &str) -> Self {
        APIResponse::new(status, msg, None)
    }

    pub fn into_response_with(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

pub fn ok<T: Serialize>(msg: &str, data: T) -> Response {
    APIResponse::new(StatusCode::OK, msg, Some(data)).into_response_with(StatusCode::OK)
}

pub fn ok_message(msg: &str) -> Response {
    APIResponse::<()>::message(StatusCode::OK, msg).into_response_with(StatusCode::OK)
}

pub fn created<T: Serialize>(msg: &str, data: T) -> Response {
    APIResponse::new(StatusCode::CREATED, msg, Some(data)).into_response_with(StatusCode::CREATED)
}
