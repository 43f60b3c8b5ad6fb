// SPDX-License-Identifier: MIT
//! Identity extraction.
//!
//! Authentication lives upstream: the gateway validates the session and
//! injects the caller's opaque user id as the `x-user-id` header. This
//! module only checks the header is present — the id's format is never
//! validated, only resource ownership downstream.

use axum::http::HeaderMap;

use crate::error::ApiError;

pub const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated caller's opaque user id, or `unauthorized`.
pub fn require_user_id(headers: &HeaderMap) -> Result<String, ApiError> {
    headers
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or(ApiError::Unauthorized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_header_is_unauthorized() {
        let headers = HeaderMap::new();
        assert!(require_user_id(&headers).is_err());
    }

    #[test]
    fn empty_header_is_unauthorized() {
        let mut headers = HeaderMap::new();
        headers.insert(USER_ID_HEADER, "".parse().unwrap());
        assert!(require_user_id(&headers).is_err());
    }

    #[test]
    fn opaque_id_passes_through_unparsed() {
        let mut headers = HeaderMap::new();
        headers.insert(USER_ID_HEADER, "usr_941|weird:format".parse().unwrap());
        assert_eq!(require_user_id(&headers).unwrap(), "usr_941|weird:format");
    }
}
