use axum::{
    body::Body,
    http::{HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use tracing::Instrument;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Identifier of the request being served, echoed in every envelope.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestId(pub String);

impl RequestId {
    pub fn generate() -> Self {
        Self(ulid::Ulid::new().to_string())
    }

    fn from_request(request: &Request<Body>) -> Self {
        let inbound = request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty());

        match inbound {
            Some(value) => Self(value.to_owned()),
            None => Self::generate(),
        }
    }
}

/// Opens the request span and makes the request id available to handlers
/// and to the caller through the response header.
pub async fn track_request(mut request: Request<Body>, next: Next) -> Response {
    let request_id = RequestId::from_request(&request);
    let span = tracing::info_span!(
        "http.request",
        request_id = %request_id.0,
        method = %request.method(),
        path = %request.uri().path(),
    );
    request.extensions_mut().insert(request_id.clone());

    let mut response = async move {
        let response = next.run(request).await;
        tracing::info!(status = response.status().as_u16(), "request completed");
        response
    }
    .instrument(span)
    .await;

    if let Ok(value) = HeaderValue::from_str(&request_id.0) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}
