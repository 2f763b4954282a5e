//! Object storage relay for s3bin
//!
//! This crate holds the storage capability the relay writes through and the
//! HTTP handlers for the liveness check and the bin upload.

pub mod handlers;
pub mod storage;

pub use handlers::RelayState;
