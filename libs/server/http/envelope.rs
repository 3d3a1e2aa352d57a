use axum::{
    body::Bytes,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use kitchen_core::{KitchenError, UserErrorKind};
use serde::de::DeserializeOwned;
use serde_derive::Serialize;

use super::RequestId;

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Body of every API response.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<T>,
    pub request_id: String,
}

pub fn reply<T: serde::Serialize>(request_id: &RequestId, result: kitchen_core::Result<T>) -> Response {
    match result {
        Ok(results) => envelope(StatusCode::OK, request_id, None, Some(results)),
        Err(e) => reply_error(request_id, e),
    }
}

pub fn reply_empty(request_id: &RequestId, result: kitchen_core::Result<()>) -> Response {
    match result {
        Ok(()) => envelope::<()>(StatusCode::OK, request_id, None, None),
        Err(e) => reply_error(request_id, e),
    }
}

fn reply_error(request_id: &RequestId, error: KitchenError) -> Response {
    let (status, message) = match error {
        KitchenError::User(e) => {
            let status = match e.kind {
                UserErrorKind::BadRequest => StatusCode::BAD_REQUEST,
                UserErrorKind::NotFound => StatusCode::NOT_FOUND,
            };
            tracing::info!(status = status.as_u16(), error = %e.message, "request rejected");
            (status, e.message)
        }
        KitchenError::System(report) => {
            tracing::error!(error = ?report, "request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                INTERNAL_ERROR_MESSAGE.to_owned(),
            )
        }
    };
    envelope::<()>(status, request_id, Some(message), None)
}

fn envelope<T: serde::Serialize>(
    status: StatusCode,
    request_id: &RequestId,
    error: Option<String>,
    results: Option<T>,
) -> Response {
    let body = Envelope {
        error,
        results,
        request_id: request_id.0.clone(),
    };
    (status, Json(body)).into_response()
}

/// Body of an update, it must be a JSON document of the expected shape.
pub fn parse_body<T: DeserializeOwned>(body: &Bytes) -> kitchen_core::Result<T> {
    serde_json::from_slice(body)
        .map_err(|e| KitchenError::bad_request(format!("Invalid request body: {e}")))
}

/// Body of a create, anything unreadable counts as no body.
pub fn parse_optional_body<T: DeserializeOwned>(body: &Bytes) -> Option<T> {
    serde_json::from_slice(body).ok()
}
