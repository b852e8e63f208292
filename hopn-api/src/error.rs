use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use hopn_core::CoreError;
use hopn_fare::FareError;
use hopn_trip::TripError;
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    AuthenticationError(String),
    AuthorizationError(String),
    ValidationError(String),
    NotFoundError(String),
    ConflictError(String),
    InternalServerError(String),
    Anyhow(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::AuthenticationError(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::AuthorizationError(msg) => (StatusCode::FORBIDDEN, msg),
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::ConflictError(msg) => (StatusCode::CONFLICT, msg),
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
            AppError::Anyhow(err) => {
                tracing::error!("Internal Server Error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ValidationError(msg) => AppError::ValidationError(msg),
            CoreError::AuthError(msg) => AppError::AuthenticationError(msg),
            CoreError::PermissionDenied(msg) => AppError::AuthorizationError(msg),
            CoreError::NotFound(msg) => AppError::NotFoundError(msg),
            e @ CoreError::SlotBusy(_) => AppError::ConflictError(e.to_string()),
            CoreError::InternalError(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl From<TripError> for AppError {
    fn from(err: TripError) -> Self {
        match err {
            TripError::Core(e) => e.into(),
            e @ TripError::InvalidLuggage(_) => AppError::ValidationError(e.to_string()),
        }
    }
}

impl From<FareError> for AppError {
    fn from(err: FareError) -> Self {
        match err {
            FareError::Core(e) => e.into(),
            e @ (FareError::InvalidTransition { .. } | FareError::NoQuoteSelected) => {
                AppError::ConflictError(e.to_string())
            }
            e @ (FareError::UnknownQuote(_) | FareError::MissingStart) => AppError::ValidationError(e.to_string()),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Anyhow(err)
    }
}
