use crate::AppState;
use axum::{
    body::Body,
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use vault_core::VaultError;
use vault_core::auth::{Role, extract_basic, resolve_role};

/// Who the request runs as. Inserted into request extensions once the
/// credentials resolve to a role.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user: String,
    pub role: Role,
}

pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    // A header that isn't valid UTF-8 is as good as a missing one.
    let header_value = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let creds = match extract_basic(header_value) {
        Some(c) => c,
        None => {
            tracing::debug!(method = %method, path = %path, "Auth failed: missing or malformed credentials");
            return VaultError::AuthRequired.into_response();
        }
    };

    let role = resolve_role(&creds, &state.config);
    if role == Role::Unauthenticated {
        tracing::debug!(method = %method, path = %path, "Auth failed: credentials not recognized");
        return VaultError::AuthRequired.into_response();
    }

    request.extensions_mut().insert(Identity {
        user: creds.user,
        role,
    });
    next.run(request).await
}
