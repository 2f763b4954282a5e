//! Relay HTTP request handlers

use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::Response,
};
use bytes::Bytes;
use s3bin_core::{BinId, RelayError};
use std::sync::Arc;
use tracing::{error, info};

use crate::storage::{ObjectMetadata, ObjectStorage, StorageError};

/// Shared state for relay handlers
pub struct RelayState {
    pub storage: Arc<dyn ObjectStorage>,
    pub bucket: String,
    pub base_path: String,
}

impl RelayState {
    pub fn new(
        storage: Arc<dyn ObjectStorage>,
        bucket: impl Into<String>,
        base_path: impl Into<String>,
    ) -> Self {
        Self {
            storage,
            bucket: bucket.into(),
            base_path: base_path.into(),
        }
    }
}

/// `GET /ping`: check that the bucket can be listed
pub async fn ping(State(state): State<Arc<RelayState>>) -> Response {
    match state.storage.list_objects(&state.bucket, 1).await {
        Ok(_) => text_response(StatusCode::OK, "Pong!\n"),
        Err(e) => {
            let err = RelayError::backend_unreachable(e.to_string());
            error!(bucket = %state.bucket, error = %err, "Error accessing bucket");
            error_response(&err)
        }
    }
}

/// `POST /bin`: store the request body under a fresh bin id
pub async fn post_bin(State(state): State<Arc<RelayState>>, body: Bytes) -> Response {
    let bin_id = BinId::new();
    let key = bin_id.storage_key(&state.base_path);
    let size = body.len();

    match state
        .storage
        .put_object(&state.bucket, &key, body, ObjectMetadata::bin())
        .await
    {
        Ok(()) => {
            info!(bin_id = %bin_id, key = %key, size, "Stored bin");
            text_response(StatusCode::OK, format!("BinID {bin_id}\n"))
        }
        Err(e) => {
            if let StorageError::BucketNotFound(bucket) = &e {
                error!(bucket = %bucket, "Bucket {} does not exist", bucket);
            }
            let err = RelayError::upload_failed(e.to_string());
            error!(key = %key, error = %err, "Could not upload");
            error_response(&err)
        }
    }
}

fn text_response(status: StatusCode, body: impl Into<Body>) -> Response {
    let mut response = Response::new(body.into());
    *response.status_mut() = status;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    response
}

/// Caller-facing error: fixed status and message, no backend detail
fn error_response(err: &RelayError) -> Response {
    let status =
        StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    text_response(status, err.public_message())
}
