use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::engine::{EvalError, FenError};

/// Structured API error that serializes to JSON.
#[derive(Debug)]
pub enum ApiError {
    InvalidFen(FenError),
    InvalidEvaluation(EvalError),
    InvalidRequest(String),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorDetail {
    code: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<&'static str>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, kind) = match self {
            ApiError::InvalidFen(err) => (
                StatusCode::BAD_REQUEST,
                "INVALID_FEN",
                err.to_string(),
                Some(err.kind()),
            ),
            ApiError::InvalidEvaluation(err) => (
                StatusCode::BAD_REQUEST,
                "INVALID_EVALUATION",
                err.to_string(),
                None,
            ),
            ApiError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, "INVALID_REQUEST", msg, None)
            }
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                kind,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<FenError> for ApiError {
    fn from(err: FenError) -> Self {
        ApiError::InvalidFen(err)
    }
}

impl From<EvalError> for ApiError {
    fn from(err: EvalError) -> Self {
        ApiError::InvalidEvaluation(err)
    }
}
