//! Tests for the in-memory storage backend

use super::*;
use bytes::Bytes;

/// Test helper to create storage with one bucket
fn storage() -> EphemeralStorage {
    let s = EphemeralStorage::new();
    s.create_bucket("my-bucket");
    s
}

// =============================================================================
// OBJECT OPERATIONS
// =============================================================================

mod object_tests {
    use super::*;

    #[tokio::test]
    async fn test_put_object_simple() {
        let s = storage();
        s.put_object("my-bucket", "key", Bytes::from("hello"), ObjectMetadata::bin())
            .await
            .unwrap();

        let obj = s.get_object("my-bucket", "key").unwrap();
        assert_eq!(obj.data, Bytes::from("hello"));
        assert_eq!(obj.size, 5);
    }

    #[tokio::test]
    async fn test_put_object_bucket_not_found() {
        let s = storage();
        let result = s
            .put_object("nonexistent", "key", Bytes::from("data"), ObjectMetadata::bin())
            .await;
        assert!(matches!(result, Err(StorageError::BucketNotFound(b)) if b == "nonexistent"));
    }

    #[tokio::test]
    async fn test_get_object_not_found() {
        let s = storage();
        let result = s.get_object("my-bucket", "missing");
        assert!(matches!(result, Err(StorageError::ObjectNotFound { .. })));
    }

    #[tokio::test]
    async fn test_empty_object() {
        let s = storage();
        s.put_object("my-bucket", "empty", Bytes::new(), ObjectMetadata::bin())
            .await
            .unwrap();

        let obj = s.get_object("my-bucket", "empty").unwrap();
        assert!(obj.data.is_empty());
        assert_eq!(obj.size, 0);
    }

    #[tokio::test]
    async fn test_binary_payload_preserved() {
        let s = storage();
        let payload: Vec<u8> = (0..=255).collect();
        s.put_object("my-bucket", "/bin/raw", Bytes::from(payload.clone()), ObjectMetadata::bin())
            .await
            .unwrap();

        assert_eq!(s.get_object("my-bucket", "/bin/raw").unwrap().data, payload);
    }

    #[tokio::test]
    async fn test_metadata_preserved() {
        let s = storage();
        s.put_object("my-bucket", "key", Bytes::from("x"), ObjectMetadata::bin())
            .await
            .unwrap();

        let metadata = s.get_object("my-bucket", "key").unwrap().metadata;
        assert_eq!(metadata.content_type, "text/plain");
        assert_eq!(metadata.content_disposition, "attachment");
        assert_eq!(metadata.acl, CannedAcl::Private);
    }
}

// =============================================================================
// LIST OPERATIONS
// =============================================================================

mod list_objects_tests {
    use super::*;

    #[tokio::test]
    async fn test_list_empty_bucket() {
        let s = storage();
        let result = s.list_objects("my-bucket", 1000).await.unwrap();
        assert!(result.keys.is_empty());
    }

    #[tokio::test]
    async fn test_list_bucket_not_found() {
        let s = storage();
        let result = s.list_objects("nonexistent", 1).await;
        assert!(matches!(result, Err(StorageError::BucketNotFound(_))));
    }

    #[tokio::test]
    async fn test_list_max_keys_alphabetical() {
        let s = storage();
        for key in ["c", "a", "b"] {
            s.put_object("my-bucket", key, Bytes::from(key), ObjectMetadata::bin())
                .await
                .unwrap();
        }

        let result = s.list_objects("my-bucket", 2).await.unwrap();
        assert_eq!(result.keys, vec!["a", "b"]);
    }
}

// =============================================================================
// AVAILABILITY
// =============================================================================

mod offline_tests {
    use super::*;

    #[tokio::test]
    async fn test_offline_backend_fails_all_calls() {
        let s = storage();
        s.set_offline(true);

        assert!(matches!(
            s.list_objects("my-bucket", 1).await,
            Err(StorageError::Backend(_))
        ));
        assert!(matches!(
            s.put_object("my-bucket", "k", Bytes::new(), ObjectMetadata::bin()).await,
            Err(StorageError::Backend(_))
        ));
        assert_eq!(s.object_count("my-bucket"), 0);

        s.set_offline(false);
        assert!(s.list_objects("my-bucket", 1).await.is_ok());
    }

    #[tokio::test]
    async fn test_create_bucket_is_idempotent() {
        let s = storage();
        s.put_object("my-bucket", "k", Bytes::from("v"), ObjectMetadata::bin())
            .await
            .unwrap();
        s.create_bucket("my-bucket");

        assert_eq!(s.object_count("my-bucket"), 1);
    }
}
