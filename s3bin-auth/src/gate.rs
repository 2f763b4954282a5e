//! Credential gate middleware

use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use hmac::{Hmac, Mac};
use http::{header, HeaderMap, HeaderValue, StatusCode};
use s3bin_core::ErrorCode;
use sha2::Sha256;
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

use crate::basic::{parse_basic_auth, BasicAuthError};

type HmacSha256 = Hmac<Sha256>;

const FALLBACK_CHALLENGE: &str = "Basic realm=\"Restricted\"";

/// Guards a route behind a single configured username/password pair.
///
/// The configured pair is never stored in the clear. The gate keeps an
/// HMAC-SHA256 tag of it under a per-process random key, and a presented pair
/// is accepted when its tag verifies against that one. Tag verification is
/// constant-time, so response timing does not reveal how much of a guess was
/// right.
pub struct CredentialGate {
    key: [u8; 16],
    expected: Vec<u8>,
    challenge: HeaderValue,
}

impl CredentialGate {
    pub fn new(username: &str, password: &str, realm: &str) -> Self {
        let key = *Uuid::new_v4().as_bytes();
        let expected = credential_mac(&key, username, password)
            .finalize()
            .into_bytes()
            .to_vec();

        Self {
            key,
            expected,
            challenge: challenge_header(realm),
        }
    }

    /// Check the `Authorization` header of a request
    pub fn verify(&self, headers: &HeaderMap) -> Result<(), BasicAuthError> {
        let value = headers
            .get(header::AUTHORIZATION)
            .ok_or(BasicAuthError::MissingHeader)?
            .to_str()
            .map_err(|_| BasicAuthError::InvalidHeader)?;
        let creds = parse_basic_auth(value)?;

        credential_mac(&self.key, &creds.username, &creds.password)
            .verify_slice(&self.expected)
            .map_err(|_| BasicAuthError::InvalidCredentials)
    }

    /// `WWW-Authenticate` value sent with every rejection
    pub fn challenge(&self) -> &HeaderValue {
        &self.challenge
    }

    /// 401 response carrying the challenge
    pub fn reject(&self) -> Response {
        let code = ErrorCode::Unauthorized;
        let status = StatusCode::from_u16(code.http_status()).unwrap_or(StatusCode::UNAUTHORIZED);
        Response::builder()
            .status(status)
            .header(header::WWW_AUTHENTICATE, self.challenge.clone())
            .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
            .body(Body::from(code.public_message()))
            .unwrap_or_else(|_| {
                let mut response = Response::new(Body::from(code.public_message()));
                *response.status_mut() = status;
                response
            })
    }
}

/// Middleware that only lets requests with valid credentials through.
///
/// Use with `axum::middleware::from_fn_with_state(gate, require_basic_auth)`.
pub async fn require_basic_auth(
    State(gate): State<Arc<CredentialGate>>,
    request: Request,
    next: Next,
) -> Response {
    match gate.verify(request.headers()) {
        Ok(()) => next.run(request).await,
        Err(e) => {
            warn!(
                method = %request.method(),
                uri = %request.uri(),
                reason = %e,
                "Rejected unauthenticated request"
            );
            gate.reject()
        }
    }
}

fn credential_mac(key: &[u8], username: &str, password: &str) -> HmacSha256 {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can take key of any size");
    // Length prefix keeps ("ab", "c") and ("a", "bc") apart
    mac.update(&(username.len() as u64).to_be_bytes());
    mac.update(username.as_bytes());
    mac.update(password.as_bytes());
    mac
}

fn challenge_header(realm: &str) -> HeaderValue {
    let realm: String = realm
        .chars()
        .filter(|c| !c.is_control() && *c != '"' && *c != '\\')
        .collect();
    HeaderValue::from_str(&format!("Basic realm=\"{realm}\""))
        .unwrap_or_else(|_| HeaderValue::from_static(FALLBACK_CHALLENGE))
}
