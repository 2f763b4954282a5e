//! Storage backends

mod ephemeral;
mod s3;
mod traits;

#[cfg(test)]
mod tests;

pub use ephemeral::EphemeralStorage;
pub use s3::{S3Options, S3Storage, DEFAULT_REGION};
pub use traits::{
    CannedAcl, ListObjectsResult, ObjectMetadata, ObjectStorage, StorageError, StoredObject,
};
