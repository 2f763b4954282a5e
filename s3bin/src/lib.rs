//! s3bin - store posted payloads in an S3 bucket
//!
//! `POST /bin` (HTTP Basic protected) uploads the request body under a fresh
//! id and answers with that id. `GET /ping` checks that the bucket is
//! reachable.

pub mod config;
pub mod router;

pub use config::{Args, Config, ConfigError};
pub use router::{create_router, AppState};
