// SPDX-License-Identifier: MIT
//! REST error taxonomy.
//!
//! Every error carries a stable machine-readable code alongside the human
//! message. Client errors (4xx) report their cause verbatim; anything else
//! collapses to `server_error` with a generic message so internal detail
//! never leaks to the caller — the detail is logged instead.

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// No user identity on the request.
    #[error("authentication required")]
    Unauthorized,
    /// Malformed request body or parameters.
    #[error("{0}")]
    InvalidPayload(String),
    /// Plan missing, not owned by the caller, not active, or soft-deleted.
    #[error("{0}")]
    NotFound(String),
    /// Day number outside the plan.
    #[error("day {0} is not part of this plan")]
    InvalidDay(u32),
    /// Persistence or other internal failure.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    /// Stable machine-readable code for the wire.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Unauthorized => "unauthorized",
            ApiError::InvalidPayload(_) => "invalid_payload",
            ApiError::NotFound(_) => "not_found",
            ApiError::InvalidDay(_) => "invalid_day",
            ApiError::Internal(_) => "server_error",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidDay(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let message = match &self {
            ApiError::Internal(e) => {
                error!(err = ?e, "request failed");
                "internal server error".to_string()
            }
            other => other.to_string(),
        };
        let body = Json(json!({
            "error": { "code": self.code(), "message": message }
        }));
        (self.status(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(ApiError::Unauthorized.code(), "unauthorized");
        assert_eq!(ApiError::InvalidPayload("x".into()).code(), "invalid_payload");
        assert_eq!(ApiError::NotFound("x".into()).code(), "not_found");
        assert_eq!(ApiError::InvalidDay(9).code(), "invalid_day");
        assert_eq!(ApiError::Internal(anyhow::anyhow!("boom")).code(), "server_error");
    }

    #[test]
    fn internal_detail_never_reaches_the_message() {
        let resp = ApiError::Internal(anyhow::anyhow!("secret table name")).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
