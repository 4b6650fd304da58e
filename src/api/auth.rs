//! Capability check for mutating routes.
//!
//! Session management and caller identity belong to an external identity
//! provider; the catalog only needs to know "is this request authenticated".
//! Here that is a bearer token compared against the configured value. Routes
//! fail closed when no token is configured.

use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;

use crate::config::Config;
use crate::error::ApiError;

pub fn require_auth(config: &Config, headers: &HeaderMap) -> Result<(), ApiError> {
    let Some(expected) = config.api_token.as_deref() else {
        return Err(ApiError::Unauthorized(
            "Authentication is not configured".to_string(),
        ));
    };

    let provided = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    match provided {
        Some(token) if token == expected => Ok(()),
        _ => Err(ApiError::Unauthorized("Unauthorized".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn config_with_token(token: &str) -> Config {
        Config {
            api_token: Some(token.to_string()),
            ..Config::default()
        }
    }

    fn bearer(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, format!("Bearer {token}").parse().unwrap());
        headers
    }

    #[test]
    fn test_matching_token_passes() {
        assert!(require_auth(&config_with_token("s3cret"), &bearer("s3cret")).is_ok());
    }

    #[test]
    fn test_wrong_token_is_401() {
        let err = require_auth(&config_with_token("s3cret"), &bearer("wrong")).unwrap_err();
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_missing_header_is_401() {
        let err = require_auth(&config_with_token("s3cret"), &HeaderMap::new()).unwrap_err();
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_unconfigured_token_fails_closed() {
        let err = require_auth(&Config::default(), &bearer("anything")).unwrap_err();
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }
}
