use axum::body::Body;
use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use std::time::Instant;

use vault_core::gateway::{classify, operation_for};

pub async fn metrics_middleware(request: Request<Body>, next: Next) -> Response {
    let routed = classify(request.uri().path());
    let operation_name = operation_for(request.method(), routed.class)
        .map(|op| op.name())
        .unwrap_or("Unknown");

    let start = Instant::now();
    let response = next.run(request).await;
    let duration = start.elapsed().as_secs_f64();

    metrics::counter!(crate::metrics::REQUEST_COUNTER, "operation" => operation_name).increment(1);
    metrics::histogram!(crate::metrics::REQUEST_DURATION, "operation" => operation_name)
        .record(duration);

    let status = response.status().as_u16();
    if status >= 400 {
        metrics::counter!(crate::metrics::ERROR_COUNTER, "status" => status.to_string())
            .increment(1);
    }

    response
}
