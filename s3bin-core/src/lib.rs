//! Core types for s3bin
//!
//! This crate provides the bin identifier and the caller-facing error taxonomy
//! shared by the relay crates.

pub mod bin_id;
pub mod error;

pub use bin_id::{join_key, BinId};
pub use error::{ErrorCode, RelayError};
