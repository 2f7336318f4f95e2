use crate::AppState;
use crate::handlers;
use crate::middleware::auth::{Identity, auth_middleware};
use crate::middleware::metrics::metrics_middleware;
use axum::{
    Router,
    body::Body,
    extract::{Request, State},
    middleware as axum_mw,
    response::{IntoResponse, Response},
    routing::get,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use vault_core::VaultError;
use vault_core::gateway::{Decision, Operation, classify, evaluate};

/// Runs after `auth_middleware`, so an `Identity` is always present.
async fn vault_dispatcher(
    State(state): State<Arc<AppState>>,
    request: Request<Body>,
) -> Response<Body> {
    let identity = match request.extensions().get::<Identity>().cloned() {
        Some(identity) => identity,
        None => return VaultError::AuthRequired.into_response(),
    };

    let method = request.method().clone();
    let routed = classify(request.uri().path());

    let operation = match evaluate(&method, routed.class, identity.role) {
        Decision::Allow(op) => op,
        Decision::Forbidden(message) => {
            tracing::debug!(
                method = %method,
                class = routed.class.name(),
                role = identity.role.as_str(),
                "Request forbidden for role"
            );
            return VaultError::Forbidden(message).into_response();
        }
        Decision::Unmatched => return VaultError::NotFound.into_response(),
        Decision::Unauthenticated => return VaultError::AuthRequired.into_response(),
    };

    tracing::debug!(
        operation = operation.name(),
        role = identity.role.as_str(),
        key = ?routed.key,
        "Dispatching vault operation"
    );

    match (operation, routed.key) {
        (Operation::Put, Some(key)) => handlers::object::put_object(state, &key, request).await,
        (Operation::Get, Some(key)) => handlers::object::get_object(state, &key).await,
        (Operation::Delete, Some(key)) => handlers::object::delete_object(state, &key).await,
        (Operation::List, _) => handlers::index::list_objects(state, &identity).await,
        // classify only yields keyless routes for the collection
        (_, None) => VaultError::NotFound.into_response(),
    }
}

/// The public surface. Every request authenticates before it is routed.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .fallback(vault_dispatcher)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(axum_mw::from_fn(metrics_middleware))
                .layer(axum_mw::from_fn_with_state(state.clone(), auth_middleware)),
        )
        .with_state(state)
}

/// Health, readiness and Prometheus metrics, served on the ops listener.
pub fn build_ops_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/ready", get(handlers::health::ready))
        .route("/metrics", get(handlers::health::metrics_handler))
        .with_state(state)
}
