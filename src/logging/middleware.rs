use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tower_http::request_id::{
    MakeRequestUuid, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};

fn request_id(request: &Request) -> String {
    request
        .extensions()
        .get::<RequestId>()
        .and_then(|id| id.header_value().to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}

/// One line when a request arrives and one when it completes.
/// 4xx completions log at warn, 5xx at error.
pub async fn log_request(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let req_id = request_id(&request);
    let method = request.method().clone();
    let uri = request.uri().clone();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_default();

    tracing::debug!(request_id = %req_id, %method, %uri, "incoming request");

    let response = next.run(request).await;

    let status = response.status();
    let duration_ms = start.elapsed().as_millis() as u64;

    if status.is_server_error() {
        tracing::error!(request_id = %req_id, %method, %uri, %route, %status, duration_ms, "request failed");
    } else if status.is_client_error() {
        tracing::warn!(request_id = %req_id, %method, %uri, %route, %status, duration_ms, "request rejected");
    } else {
        tracing::info!(request_id = %req_id, %method, %uri, %route, %status, duration_ms, "request completed");
    }

    response
}

pub fn request_id_layer() -> SetRequestIdLayer<MakeRequestUuid> {
    SetRequestIdLayer::x_request_id(MakeRequestUuid)
}

pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::x_request_id()
}
