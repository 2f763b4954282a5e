//! Storage backend traits

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// Errors from storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Bucket not found: {0}")]
    BucketNotFound(String),

    #[error("Object not found: {bucket}/{key}")]
    ObjectNotFound { bucket: String, key: String },

    #[error("Backend error: {0}")]
    Backend(String),
}

/// Canned access control applied to a new object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CannedAcl {
    /// Only the storing principal may read the object
    #[default]
    Private,
}

/// Object metadata sent along with a write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectMetadata {
    pub content_type: String,
    pub content_disposition: String,
    pub acl: CannedAcl,
}

impl ObjectMetadata {
    /// Metadata every bin is stored with: private, plain text, download-only
    pub fn bin() -> Self {
        Self {
            content_type: "text/plain".to_string(),
            content_disposition: "attachment".to_string(),
            acl: CannedAcl::Private,
        }
    }
}

/// A stored object, as read back by test backends
#[derive(Debug)]
pub struct StoredObject {
    pub data: Bytes,
    pub size: u64,
    pub metadata: ObjectMetadata,
}

/// Result of a list operation
#[derive(Debug, Default)]
pub struct ListObjectsResult {
    pub keys: Vec<String>,
}

/// Capability the relay needs from an object store.
///
/// Implementations are shared across all requests and must be safe to call
/// concurrently.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Put an object. The content length is the length of `data`.
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: Bytes,
        metadata: ObjectMetadata,
    ) -> Result<(), StorageError>;

    /// List up to `max_keys` keys of a bucket
    async fn list_objects(
        &self,
        bucket: &str,
        max_keys: i32,
    ) -> Result<ListObjectsResult, StorageError>;
}
