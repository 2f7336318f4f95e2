use crate::AppState;
use crate::middleware::auth::Identity;
use axum::body::Body;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use std::sync::Arc;
use vault_core::render;
use vault_core::storage::sort_newest_first;

/// `GET /`: list every object, newest first, as an HTML page.
pub async fn list_objects(state: Arc<AppState>, identity: &Identity) -> Response<Body> {
    let mut records = match state.store.list().await {
        Ok(r) => r,
        Err(e) => return e.into_response(),
    };
    sort_newest_first(&mut records);

    let html = match render::index_page(&records, identity.role, &identity.user) {
        Ok(html) => html,
        Err(e) => return e.into_response(),
    };
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        html,
    )
        .into_response()
}
