//! Amazon S3 (and S3-compatible) storage backend

use super::traits::*;
use async_trait::async_trait;
use aws_config::meta::region::RegionProviderChain;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;
use aws_sdk_s3::Client;
use bytes::Bytes;
use std::error::Error;
use std::fmt::Debug;
use tracing::debug;

/// Region used when neither the options nor the AWS environment name one
pub const DEFAULT_REGION: &str = "us-east-1";

/// Error code S3 returns for a missing bucket
const NO_SUCH_BUCKET: &str = "NoSuchBucket";

/// How to reach the S3 service
#[derive(Debug, Clone, Default)]
pub struct S3Options {
    /// Explicit region; falls back to the AWS default chain, then `us-east-1`
    pub region: Option<String>,
    /// Custom endpoint for S3-compatible services (MinIO, localstack, ...)
    pub endpoint_url: Option<String>,
    /// Address buckets as `endpoint/bucket` instead of `bucket.endpoint`
    pub force_path_style: bool,
}

/// Storage backend talking to S3 through the AWS SDK.
///
/// Credentials come from the standard AWS provider chain (environment,
/// shared config/credentials files, instance profile, ...).
#[derive(Debug, Clone)]
pub struct S3Storage {
    client: Client,
}

impl S3Storage {
    /// Wrap an already configured client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client from the AWS environment and `options`
    pub async fn connect(options: &S3Options) -> Self {
        let region = RegionProviderChain::first_try(options.region.clone().map(Region::new))
            .or_default_provider()
            .or_else(Region::new(DEFAULT_REGION));

        let mut loader = aws_config::defaults(BehaviorVersion::latest()).region(region);
        if let Some(endpoint) = &options.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }
        let shared = loader.load().await;

        debug!(
            region = ?shared.region(),
            endpoint = ?options.endpoint_url,
            force_path_style = options.force_path_style,
            "Configured S3 client"
        );

        let config = aws_sdk_s3::config::Builder::from(&shared)
            .force_path_style(options.force_path_style)
            .build();

        Self::new(Client::from_conf(config))
    }
}

#[async_trait]
impl ObjectStorage for S3Storage {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: Bytes,
        metadata: ObjectMetadata,
    ) -> Result<(), StorageError> {
        let acl = match metadata.acl {
            CannedAcl::Private => ObjectCannedAcl::Private,
        };
        let content_length = i64::try_from(data.len())
            .map_err(|_| StorageError::Backend(format!("object too large: {} bytes", data.len())))?;

        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .acl(acl)
            .content_type(metadata.content_type)
            .content_disposition(metadata.content_disposition)
            .content_length(content_length)
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| storage_error(bucket, &e))?;

        Ok(())
    }

    async fn list_objects(
        &self,
        bucket: &str,
        max_keys: i32,
    ) -> Result<ListObjectsResult, StorageError> {
        let output = self
            .client
            .list_objects_v2()
            .bucket(bucket)
            .max_keys(max_keys)
            .send()
            .await
            .map_err(|e| storage_error(bucket, &e))?;

        let keys = output
            .contents()
            .iter()
            .filter_map(|object| object.key().map(String::from))
            .collect();

        Ok(ListObjectsResult { keys })
    }
}

/// Map an SDK failure, singling out a missing bucket
fn storage_error<E, R>(bucket: &str, err: &SdkError<E, R>) -> StorageError
where
    E: ProvideErrorMetadata + Error + 'static,
    R: Debug,
{
    if err.code() == Some(NO_SUCH_BUCKET) {
        return StorageError::BucketNotFound(bucket.to_string());
    }
    StorageError::Backend(DisplayErrorContext(err).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_s3::error::ErrorMetadata;
    use aws_sdk_s3::operation::list_objects_v2::ListObjectsV2Error;
    use aws_sdk_s3::operation::put_object::PutObjectError;

    fn metadata(code: &str, message: &str) -> ErrorMetadata {
        ErrorMetadata::builder().code(code).message(message).build()
    }

    #[test]
    fn test_no_such_bucket_on_put() {
        let err = SdkError::service_error(
            PutObjectError::generic(metadata(NO_SUCH_BUCKET, "bucket missing")),
            (),
        );

        match storage_error("bins", &err) {
            StorageError::BucketNotFound(bucket) => assert_eq!(bucket, "bins"),
            other => panic!("expected BucketNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_no_such_bucket_on_list() {
        let err = SdkError::service_error(
            ListObjectsV2Error::generic(metadata(NO_SUCH_BUCKET, "bucket missing")),
            (),
        );

        assert!(matches!(
            storage_error("bins", &err),
            StorageError::BucketNotFound(bucket) if bucket == "bins"
        ));
    }

    #[test]
    fn test_access_denied_is_a_backend_error() {
        let err = SdkError::service_error(
            PutObjectError::generic(metadata("AccessDenied", "Access Denied")),
            (),
        );

        match storage_error("bins", &err) {
            StorageError::Backend(detail) => {
                assert!(detail.contains("AccessDenied"), "detail: {detail}");
            }
            other => panic!("expected Backend, got {other:?}"),
        }
    }

    #[test]
    fn test_transport_failure_is_a_backend_error() {
        let err: SdkError<ListObjectsV2Error, ()> =
            SdkError::timeout_error("connection timed out");

        match storage_error("bins", &err) {
            StorageError::Backend(detail) => {
                assert!(detail.contains("connection timed out"), "detail: {detail}");
            }
            other => panic!("expected Backend, got {other:?}"),
        }
    }
}
