use crate::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use std::sync::Arc;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn ready(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    // The store must answer a listing
    if let Err(e) = state.store.list().await {
        tracing::warn!(error = %e, "Readiness check failed");
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            "object store unavailable".to_string(),
        );
    }

    (StatusCode::OK, "ready".to_string())
}

pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    // Collect storage gauges on-demand
    if let Ok(records) = state.store.list().await {
        metrics::gauge!(crate::metrics::OBJECT_COUNT).set(records.len() as f64);
        let total_bytes: u64 = records.iter().map(|r| r.size).sum();
        metrics::gauge!(crate::metrics::STORED_BYTES).set(total_bytes as f64);
    }

    let uptime = state.start_time.elapsed().as_secs_f64();
    metrics::gauge!(crate::metrics::UPTIME).set(uptime);

    let output = state.metrics_handle.render();
    (
        StatusCode::OK,
        [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
        output,
    )
}
