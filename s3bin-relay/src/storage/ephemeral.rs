//! In-memory ephemeral storage backend

use super::traits::*;
use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// In-memory stored object
struct InMemoryObject {
    data: Bytes,
    metadata: ObjectMetadata,
}

/// In-memory bucket
struct InMemoryBucket {
    objects: DashMap<String, InMemoryObject>,
}

impl InMemoryBucket {
    fn new() -> Self {
        Self {
            objects: DashMap::new(),
        }
    }
}

/// Ephemeral (in-memory) storage backend.
///
/// Buckets must be created up front, like on a real object store. The backend
/// can also be switched offline to simulate an unreachable service.
pub struct EphemeralStorage {
    buckets: DashMap<String, Arc<InMemoryBucket>>,
    offline: AtomicBool,
}

impl Default for EphemeralStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl EphemeralStorage {
    pub fn new() -> Self {
        Self {
            buckets: DashMap::new(),
            offline: AtomicBool::new(false),
        }
    }

    /// Create a bucket. Creating an existing bucket is a no-op.
    pub fn create_bucket(&self, bucket: &str) {
        self.buckets
            .entry(bucket.to_string())
            .or_insert_with(|| Arc::new(InMemoryBucket::new()));
    }

    /// Make every subsequent call fail as if the service were down
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Read an object back
    pub fn get_object(&self, bucket: &str, key: &str) -> Result<StoredObject, StorageError> {
        let bucket_ref = self.bucket(bucket)?;

        let obj = bucket_ref
            .objects
            .get(key)
            .ok_or_else(|| StorageError::ObjectNotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            })?;

        Ok(StoredObject {
            data: obj.data.clone(),
            size: obj.data.len() as u64,
            metadata: obj.metadata.clone(),
        })
    }

    /// Number of objects in a bucket, 0 if it does not exist
    pub fn object_count(&self, bucket: &str) -> usize {
        self.buckets
            .get(bucket)
            .map_or(0, |bucket_ref| bucket_ref.objects.len())
    }

    fn bucket(&self, bucket: &str) -> Result<Arc<InMemoryBucket>, StorageError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StorageError::Backend(
                "dispatch failure: connection refused".to_string(),
            ));
        }

        self.buckets
            .get(bucket)
            .map(|r| r.value().clone())
            .ok_or_else(|| StorageError::BucketNotFound(bucket.to_string()))
    }
}

#[async_trait]
impl ObjectStorage for EphemeralStorage {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: Bytes,
        metadata: ObjectMetadata,
    ) -> Result<(), StorageError> {
        let bucket_ref = self.bucket(bucket)?;

        bucket_ref
            .objects
            .insert(key.to_string(), InMemoryObject { data, metadata });

        Ok(())
    }

    async fn list_objects(
        &self,
        bucket: &str,
        max_keys: i32,
    ) -> Result<ListObjectsResult, StorageError> {
        let bucket_ref = self.bucket(bucket)?;
        let max_keys = usize::try_from(max_keys).unwrap_or(0);

        let mut keys: Vec<String> = bucket_ref.objects.iter().map(|e| e.key().clone()).collect();
        keys.sort();
        keys.truncate(max_keys);

        Ok(ListObjectsResult { keys })
    }
}
