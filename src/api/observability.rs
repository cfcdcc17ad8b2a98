use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{Instrument, debug, info_span, warn};
use uuid::Uuid;

use crate::api::AppState;

pub async fn get_metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.prometheus_handle.as_ref().map_or_else(
        || "Metrics not enabled or failed to initialize".to_string(),
        metrics_exporter_prometheus::PrometheusHandle::render,
    )
}

/// Per-route request counters and latency for the trending API.
///
/// Installed as a route layer, so only matched routes are labelled.
pub async fn track_requests(req: Request, next: Next) -> Response {
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map_or("unmatched", MatchedPath::as_str)
        .to_string();
    let method = req.method().clone();

    let span = info_span!(
        "api_request",
        request_id = %Uuid::new_v4().simple(),
        method = %method,
        route = %route,
    );

    async move {
        let started = Instant::now();
        let response = next.run(req).await;
        let elapsed = started.elapsed();
        let elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        let status = response.status();

        metrics::counter!(
            "cinetrend_api_requests_total",
            "route" => route.clone(),
            "status" => status_class(status),
        )
        .increment(1);
        metrics::histogram!("cinetrend_api_request_seconds", "route" => route)
            .record(elapsed.as_secs_f64());

        if status.is_server_error() {
            warn!(status = status.as_u16(), elapsed_ms, "API request failed");
        } else {
            debug!(status = status.as_u16(), elapsed_ms, "API request served");
        }

        response
    }
    .instrument(span)
    .await
}

const fn status_class(status: StatusCode) -> &'static str {
    match status.as_u16() {
        200..=299 => "2xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classes() {
        assert_eq!(status_class(StatusCode::ACCEPTED), "2xx");
        assert_eq!(status_class(StatusCode::BAD_REQUEST), "4xx");
        assert_eq!(status_class(StatusCode::BAD_GATEWAY), "5xx");
        assert_eq!(status_class(StatusCode::SWITCHING_PROTOCOLS), "other");
    }
}
