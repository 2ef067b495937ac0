use axum::extract::Json;
use axum::http::status::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::Value;
use std::fmt;

use crate::domain::ports::secondary::{AssistantError, ExtractionError};
use crate::domain::sample::SAMPLE_EXTRACTED_TEXT;
use crate::domain::ImageError;
use common::err_context::ErrorContext;

#[derive(Debug)]
pub enum Error {
    InvalidImage {
        context: String,
        source: ImageError,
    },
    InvalidQuestion {
        context: String,
    },
    /// The engine failed, the client gets the sample text instead.
    Extraction {
        context: String,
        source: ExtractionError,
    },
    /// The assistant failed, the client gets `fallback` instead.
    Assistant {
        context: String,
        source: AssistantError,
        fallback: String,
    },
    NotFound {
        context: String,
    },
}

/// The body of a failure response, and the full error chain, attached to the
/// response so that middlewares can enrich it.
#[derive(Debug, Clone)]
pub struct ErrorBody {
    pub body: Value,
    pub detail: String,
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidImage { context, source } => {
                write!(fmt, "Invalid Image: {context} | {source}")
            }
            Error::InvalidQuestion { context } => {
                write!(fmt, "Invalid Question: {context}")
            }
            Error::Extraction { context, source } => {
                write!(fmt, "Extraction: {context} | {source}")
            }
            Error::Assistant {
                context, source, ..
            } => {
                write!(fmt, "Assistant: {context} | {source}")
            }
            Error::NotFound { context } => {
                write!(fmt, "Not Found: {context}")
            }
        }
    }
}

impl std::error::Error for Error {}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, Json(body)) = self.standardize();
        if status.is_server_error() {
            tracing::error!(error = %self, %status, "Request failed");
        } else {
            tracing::info!(error = %self, %status, "Request rejected");
        }
        let mut resp = (status, Json(body.clone())).into_response();
        resp.extensions_mut().insert(ErrorBody {
            body,
            detail: self.to_string(),
        });
        resp
    }
}

impl From<ErrorContext<ImageError>> for Error {
    fn from(err: ErrorContext<ImageError>) -> Self {
        Error::InvalidImage {
            context: err.0,
            source: err.1,
        }
    }
}

impl From<ErrorContext<ExtractionError>> for Error {
    fn from(err: ErrorContext<ExtractionError>) -> Self {
        Error::Extraction {
            context: err.0,
            source: err.1,
        }
    }
}

impl Error {
    pub fn standardize(&self) -> (StatusCode, Json<Value>) {
        match self {
            Error::InvalidImage { context, source } => (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({
                    "status": "fail",
                    "message": format!("{context}: {source}"),
                    "code": "image/invalid_data_url"
                })),
            ),
            Error::InvalidQuestion { context } => (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({
                    "status": "fail",
                    "message": context,
                    "code": "chat/invalid_question"
                })),
            ),
            Error::Extraction { context, source: _ } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "status": "fail",
                    "message": context,
                    "code": "extraction/engine_failure",
                    "text": SAMPLE_EXTRACTED_TEXT
                })),
            ),
            Error::Assistant {
                context,
                source: _,
                fallback,
            } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "status": "fail",
                    "message": context,
                    "code": "chat/assistant_failure",
                    "response": fallback
                })),
            ),
            Error::NotFound { context } => (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({
                    "status": "fail",
                    "message": context,
                    "code": "route/not_found"
                })),
            ),
        }
    }
}
