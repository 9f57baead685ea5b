//! HTTP error mapping. Domain errors become status codes with a `detail` body;
//! upstream failure detail is logged, never returned.

use crate::domain::DomainError;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::error;

pub const UNAVAILABLE_DETAIL: &str = "AI service temporarily unavailable - please try again";
pub const INTERNAL_DETAIL: &str = "Internal server error";

/// One entry of a 422 body: where, what, which kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationDetail {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug)]
pub enum ApiError {
    /// 422 with structured details.
    Validation(Vec<ValidationDetail>),
    /// 500, generic message.
    Unavailable,
    /// 500, generic message.
    Internal,
}

impl ApiError {
    /// Map a use-case failure, logging the detail under `operation`.
    pub fn from_domain(operation: &str, err: DomainError) -> Self {
        match err {
            DomainError::Validation { field, message } => Self::Validation(vec![ValidationDetail {
                loc: vec!["body".to_string(), field],
                msg: message,
                kind: "value_error".to_string(),
            }]),
            DomainError::UpstreamUnavailable { .. } => {
                error!(operation, error = %err, "completion service unavailable");
                Self::Unavailable
            }
            other => {
                error!(operation, error = %other, "request failed");
                Self::Internal
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let kind = match &rejection {
            JsonRejection::JsonDataError(_) => "value_error",
            JsonRejection::JsonSyntaxError(_) => "json_invalid",
            JsonRejection::MissingJsonContentType(_) => "content_type",
            _ => "body_error",
        };
        Self::Validation(vec![ValidationDetail {
            loc: vec!["body".to_string()],
            msg: rejection.body_text(),
            kind: kind.to_string(),
        }])
    }
}

#[derive(Serialize)]
struct DetailBody<T: Serialize> {
    detail: T,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(details) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(DetailBody { detail: details }),
            )
                .into_response(),
            ApiError::Unavailable => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(DetailBody {
                    detail: UNAVAILABLE_DETAIL,
                }),
            )
                .into_response(),
            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(DetailBody {
                    detail: INTERNAL_DETAIL,
                }),
            )
                .into_response(),
        }
    }
}
