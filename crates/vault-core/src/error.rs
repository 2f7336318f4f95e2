use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

pub const AUTH_CHALLENGE: &str = "Basic realm=\"Secure Cloud\"";

#[derive(Debug, thiserror::Error)]
pub enum VaultError {
    #[error("Authentication required")]
    AuthRequired,
    #[error("{0}")]
    Forbidden(&'static str),
    #[error("Not Found")]
    NotFound,
    #[error("Object store failure: {0}")]
    StoreFailure(String),
    #[error("Template rendering failed: {0}")]
    Render(String),
}

impl From<askama::Error> for VaultError {
    fn from(err: askama::Error) -> Self {
        VaultError::Render(err.to_string())
    }
}

impl VaultError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            VaultError::AuthRequired => StatusCode::UNAUTHORIZED,
            VaultError::Forbidden(_) => StatusCode::FORBIDDEN,
            VaultError::NotFound => StatusCode::NOT_FOUND,
            VaultError::StoreFailure(_) | VaultError::Render(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Client-facing body. Never includes store detail.
    pub fn body(&self) -> &'static str {
        match self {
            VaultError::AuthRequired => "🔒 Login Required",
            VaultError::Forbidden(message) => *message,
            VaultError::NotFound => "Not Found",
            VaultError::StoreFailure(_) | VaultError::Render(_) => "Internal Server Error",
        }
    }
}

impl IntoResponse for VaultError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        // Log store errors server-side but don't leak details to clients
        match &self {
            VaultError::StoreFailure(detail) => {
                tracing::error!(detail = %detail, "Object store failure")
            }
            VaultError::Render(detail) => {
                tracing::error!(detail = %detail, "Page rendering failure")
            }
            _ => {}
        }
        if let VaultError::AuthRequired = self {
            return (
                status,
                [(header::WWW_AUTHENTICATE, AUTH_CHALLENGE)],
                self.body(),
            )
                .into_response();
        }
        (status, self.body()).into_response()
    }
}
