//! HTTP Basic authentication for s3bin
//!
//! Parses `Authorization: Basic ...` headers and guards routes behind a single
//! shared username/password pair.

pub mod basic;
pub mod gate;

pub use basic::{parse_basic_auth, BasicAuthError, BasicCredentials};
pub use gate::{require_basic_auth, CredentialGate};
