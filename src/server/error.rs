use std::any::Any;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::errors::BudgetError;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// JSON error body: `{"message": "..."}`.
#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Wraps [`BudgetError`] so handlers can return it with `?`.
#[derive(Debug)]
pub struct ApiError(pub BudgetError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            BudgetError::InvalidInput(_) | BudgetError::Validation(_) => StatusCode::BAD_REQUEST,
            BudgetError::NotFound(_) => StatusCode::NOT_FOUND,
            BudgetError::StorageError(_) | BudgetError::ConfigError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<BudgetError> for ApiError {
    fn from(err: BudgetError) -> Self {
        ApiError(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(BudgetError::InvalidInput(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if !self.0.is_client_error() {
            tracing::error!(error = %self.0, "request failed");
        }
        (status, Json(MessageBody::new(self.0.to_string()))).into_response()
    }
}

/// Converts a handler panic into a JSON 500 response.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("non-string panic payload");
    tracing::error!(panic = detail, "request handler panicked");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(MessageBody::new("Something went wrong!")),
    )
        .into_response()
}
