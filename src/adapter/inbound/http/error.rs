//! Mapping from crate errors to HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

use crate::error::Error;

/// Error body returned by every route: `{ "error": .., "details"?: .. }`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    details: Option<String>,
}

impl ApiError {
    /// Classify `err` for a route whose generic failure text is `context`.
    ///
    /// Unknown markets map to 404, bad input to 400 and upstream rejections
    /// to the upstream status. Everything else is a 500 carrying `context`.
    pub fn from_error(err: Error, context: &'static str) -> Self {
        match err {
            Error::NotFound(slug) => {
                warn!(slug = %slug, "Market not found");
                Self {
                    status: StatusCode::NOT_FOUND,
                    message: "Market not found".into(),
                    details: None,
                }
            }
            Error::InvalidInput(reason) => Self {
                status: StatusCode::BAD_REQUEST,
                message: reason,
                details: None,
            },
            Error::Upstream { status, message } => {
                warn!(status, message = %message, "{context}");
                Self {
                    status: StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                    message: format!("{context}: {message}"),
                    details: None,
                }
            }
            other => {
                error!(error = %other, "{context}");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: context.into(),
                    details: Some(other.to_string()),
                }
            }
        }
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.message, "details": details }),
            None => json!({ "error": self.message }),
        };
        (self.status, Json(body)).into_response()
    }
}
