//! Access guard module
//!
//! Basic Authentication check in front of the teachers namespace. Each check
//! is stateless: the Authorization header is decoded and compared against the
//! configured credential pair, and rejected requests get a 401 with a
//! `WWW-Authenticate` challenge naming the realm.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::HeaderMap;
use hyper::{Response, StatusCode};
use subtle::ConstantTimeEq;

use crate::config::AuthConfig;

/// Why a request was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    /// No Authorization header, or not the Basic scheme
    MissingCredentials,
    /// Credentials present but malformed or not matching
    InvalidCredentials,
}

impl AuthError {
    /// Body text sent with the 401 response
    pub const fn message(self) -> &'static str {
        match self {
            Self::MissingCredentials => "Access denied: authentication required",
            Self::InvalidCredentials => "Invalid credentials",
        }
    }
}

/// Validate the Authorization header against the configured credential pair
///
/// On success the request may be forwarded unmodified; on failure the caller
/// must answer with [`challenge`] and not touch the store.
pub fn authorize(headers: &HeaderMap, auth: &AuthConfig) -> Result<(), AuthError> {
    let header = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingCredentials)?;

    let payload = header
        .strip_prefix("Basic ")
        .ok_or(AuthError::MissingCredentials)?;

    let (username, password) =
        decode_credentials(payload).ok_or(AuthError::InvalidCredentials)?;

    if credentials_match(&username, &password, auth) {
        Ok(())
    } else {
        Err(AuthError::InvalidCredentials)
    }
}

/// Decode a base64 `username:password` payload
///
/// Splits on the first colon, so passwords containing colons survive.
fn decode_credentials(payload: &str) -> Option<(String, String)> {
    let decoded = BASE64.decode(payload.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

/// Constant-time comparison of both credential components
fn credentials_match(username: &str, password: &str, auth: &AuthConfig) -> bool {
    let user_ok: bool = username.as_bytes().ct_eq(auth.username.as_bytes()).into();
    let pass_ok: bool = password.as_bytes().ct_eq(auth.password.as_bytes()).into();
    user_ok && pass_ok
}

/// Build the 401 challenge response
pub fn challenge(realm: &str, error: AuthError) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::UNAUTHORIZED)
        .header("WWW-Authenticate", format!("Basic realm=\"{realm}\""))
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from(error.message())))
        .unwrap_or_else(|_| Response::new(Full::new(Bytes::from("Unauthorized"))))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_auth() -> AuthConfig {
        AuthConfig {
            username: "admin".to_string(),
            password: "1234".to_string(),
            realm: "Teachers API".to_string(),
        }
    }

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", value.parse().unwrap());
        headers
    }

    #[test]
    fn test_valid_credentials() {
        // base64("admin:1234")
        let headers = headers_with("Basic YWRtaW46MTIzNA==");
        assert!(authorize(&headers, &test_auth()).is_ok());
    }

    #[test]
    fn test_missing_header() {
        let headers = HeaderMap::new();
        assert_eq!(
            authorize(&headers, &test_auth()),
            Err(AuthError::MissingCredentials)
        );
    }

    #[test]
    fn test_wrong_scheme() {
        let headers = headers_with("Bearer sometoken");
        assert_eq!(
            authorize(&headers, &test_auth()),
            Err(AuthError::MissingCredentials)
        );
    }

    #[test]
    fn test_bad_base64() {
        let headers = headers_with("Basic not-base64!!!");
        assert_eq!(
            authorize(&headers, &test_auth()),
            Err(AuthError::InvalidCredentials)
        );
    }

    #[test]
    fn test_payload_without_colon() {
        // base64("admin1234")
        let headers = headers_with("Basic YWRtaW4xMjM0");
        assert_eq!(
            authorize(&headers, &test_auth()),
            Err(AuthError::InvalidCredentials)
        );
    }

    #[test]
    fn test_wrong_password() {
        // base64("admin:wrong")
        let headers = headers_with("Basic YWRtaW46d3Jvbmc=");
        assert_eq!(
            authorize(&headers, &test_auth()),
            Err(AuthError::InvalidCredentials)
        );
    }

    #[test]
    fn test_password_with_colon() {
        let auth = AuthConfig {
            username: "admin".to_string(),
            password: "12:34".to_string(),
            realm: "Teachers API".to_string(),
        };
        // base64("admin:12:34")
        let headers = headers_with("Basic YWRtaW46MTI6MzQ=");
        assert!(authorize(&headers, &auth).is_ok());
    }

    #[test]
    fn test_challenge_response() {
        let resp = challenge("Teachers API", AuthError::MissingCredentials);
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            resp.headers().get("WWW-Authenticate").unwrap(),
            "Basic realm=\"Teachers API\""
        );
    }
}
