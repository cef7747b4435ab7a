//! HTTP Basic access guard.
//!
//! Every protected request is checked against the single configured
//! username/password pair. Nothing is issued or remembered between requests.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::Engine;
use metrics::counter;
use tracing::warn;

/// Realm sent in the authentication challenge.
pub const REALM: &str = "Login Required";

const ACCESS_DENIED: &str = "Access Denied. Please provide valid credentials.";

/// The configured username/password pair.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn has_empty_password(&self) -> bool {
        self.password.is_empty()
    }

    /// Both fields must match exactly.
    pub fn matches(&self, supplied: &BasicCredentials) -> bool {
        supplied.username == self.username && supplied.password == self.password
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Credentials decoded from an `Authorization: Basic ...` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

/// Why a request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    MissingHeader,
    MalformedHeader,
    BadCredentials,
}

impl AuthFailure {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthFailure::MissingHeader => "missing_header",
            AuthFailure::MalformedHeader => "malformed_header",
            AuthFailure::BadCredentials => "bad_credentials",
        }
    }
}

/// Decode a Basic `Authorization` header value.
///
/// The password field must be present (`user:` is an empty password,
/// `user` alone is malformed).
pub fn parse_basic(value: &str) -> Option<BasicCredentials> {
    let (scheme, encoded) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }
    let decoded = base64::engine::general_purpose::STANDARD
        .decode(encoded.trim())
        .ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some(BasicCredentials {
        username: username.to_string(),
        password: password.to_string(),
    })
}

/// Check the request headers against the configured credentials.
pub fn authorize(credentials: &Credentials, headers: &HeaderMap) -> Result<(), AuthFailure> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthFailure::MissingHeader)?;
    let value = value.to_str().map_err(|_| AuthFailure::MalformedHeader)?;
    let supplied = parse_basic(value).ok_or(AuthFailure::MalformedHeader)?;
    if credentials.matches(&supplied) {
        Ok(())
    } else {
        Err(AuthFailure::BadCredentials)
    }
}

/// 401 response carrying the Basic challenge.
pub fn challenge_response() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(
            header::WWW_AUTHENTICATE,
            format!("Basic realm=\"{}\"", REALM),
        )],
        ACCESS_DENIED,
    )
        .into_response()
}

/// Middleware gating the wrapped routes.
pub async fn require_basic_auth(
    State(credentials): State<Arc<Credentials>>,
    request: Request,
    next: Next,
) -> Response {
    match authorize(&credentials, request.headers()) {
        Ok(()) => next.run(request).await,
        Err(failure) => {
            warn!(
                path = %request.uri().path(),
                reason = failure.as_str(),
                "Rejected unauthenticated request"
            );
            counter!("surf_auth_failures_total", "reason" => failure.as_str()).increment(1);
            challenge_response()
        }
    }
}
