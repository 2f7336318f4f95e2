//! Upload, download and delete. Each handler runs only after the decision
//! table allowed the operation for the caller's role.

use crate::AppState;
use axum::body::Body;
use axum::extract::Request;
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use futures::TryStreamExt;
use std::io;
use std::sync::Arc;
use tokio_util::io::{ReaderStream, StreamReader};
use vault_core::VaultError;
use vault_core::storage::{DEFAULT_CONTENT_TYPE, ObjectRecord};

pub async fn put_object(state: Arc<AppState>, key: &str, request: Request<Body>) -> Response<Body> {
    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or(DEFAULT_CONTENT_TYPE)
        .to_string();

    // Stream body to the store
    let stream = request.into_body().into_data_stream().map_err(io::Error::other);
    let mut reader = StreamReader::new(stream);

    match state.store.put(key, &content_type, &mut reader).await {
        Ok(record) => {
            tracing::info!(key = %key, size = record.size, "Object uploaded");
            let mut headers = HeaderMap::new();
            if let Ok(value) = HeaderValue::from_str(&quoted_etag(&record)) {
                headers.insert(header::ETAG, value);
            }
            (StatusCode::OK, headers, "OK").into_response()
        }
        Err(e) => e.into_response(),
    }
}

pub async fn get_object(state: Arc<AppState>, key: &str) -> Response<Body> {
    let object = match state.store.get(key).await {
        Ok(Some(o)) => o,
        Ok(None) => return VaultError::NotFound.into_response(),
        Err(e) => return e.into_response(),
    };

    let body = Body::from_stream(ReaderStream::new(object.body));
    let mut response = Response::new(body);
    *response.status_mut() = StatusCode::OK;
    set_object_headers(response.headers_mut(), &object.record);
    response
}

/// Always 200: deleting an absent key is not an error.
pub async fn delete_object(state: Arc<AppState>, key: &str) -> Response<Body> {
    match state.store.delete(key).await {
        Ok(()) => {
            tracing::info!(key = %key, "Object deleted");
            (StatusCode::OK, "Deleted").into_response()
        }
        Err(e) => e.into_response(),
    }
}

fn quoted_etag(record: &ObjectRecord) -> String {
    format!("\"{}\"", record.etag)
}

fn set_object_headers(headers: &mut HeaderMap, record: &ObjectRecord) {
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_str(&record.content_type)
            .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_CONTENT_TYPE)),
    );
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(record.size));
    if let Ok(value) = HeaderValue::from_str(&quoted_etag(record)) {
        headers.insert(header::ETAG, value);
    }
    if let Ok(value) = HeaderValue::from_str(&http_date(record)) {
        headers.insert(header::LAST_MODIFIED, value);
    }
}

fn http_date(record: &ObjectRecord) -> String {
    record
        .uploaded
        .format("%a, %d %b %Y %H:%M:%S GMT")
        .to_string()
}
