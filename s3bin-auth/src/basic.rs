//! HTTP Basic credential parsing (RFC 7617)

use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::fmt;
use thiserror::Error;

/// Reasons a request fails Basic authentication
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BasicAuthError {
    #[error("Missing authorization header")]
    MissingHeader,

    #[error("Authorization header is not valid text")]
    InvalidHeader,

    #[error("Unsupported authorization scheme")]
    UnsupportedScheme,

    #[error("Credentials are not valid base64")]
    InvalidBase64,

    #[error("Credentials are not valid UTF-8")]
    InvalidUtf8,

    #[error("Credentials lack a ':' separator")]
    MissingSeparator,

    #[error("Invalid username or password")]
    InvalidCredentials,
}

/// Username/password pair presented by a client
#[derive(Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Parse the value of an `Authorization` header.
///
/// Format: `Basic base64(username:password)`. The scheme name is matched
/// case-insensitively and the pair is split on the first `:`, so passwords may
/// contain colons.
pub fn parse_basic_auth(header: &str) -> Result<BasicCredentials, BasicAuthError> {
    let (scheme, encoded) = header
        .split_once(' ')
        .ok_or(BasicAuthError::UnsupportedScheme)?;
    if !scheme.eq_ignore_ascii_case("Basic") {
        return Err(BasicAuthError::UnsupportedScheme);
    }

    let decoded = STANDARD
        .decode(encoded.trim())
        .map_err(|_| BasicAuthError::InvalidBase64)?;
    let decoded = String::from_utf8(decoded).map_err(|_| BasicAuthError::InvalidUtf8)?;

    let (username, password) = decoded
        .split_once(':')
        .ok_or(BasicAuthError::MissingSeparator)?;

    Ok(BasicCredentials {
        username: username.to_string(),
        password: password.to_string(),
    })
}
