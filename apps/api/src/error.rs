use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use barberdesk_core::AppError;
use serde::Serialize;
use ts_rs::TS;

const INTERNAL_SERVER_ERROR_MESSAGE: &str = "Internal server error";

/// API error payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/error-response.ts"
)]
pub struct ErrorResponse {
    error: String,
}

/// HTTP API error wrapper around core application errors.
///
/// Server-side failures never expose their cause; it is logged instead.
#[derive(Debug)]
pub struct ApiError {
    source: AppError,
    fixed: Option<(StatusCode, &'static str)>,
}

impl ApiError {
    /// Caller has no resolvable identity.
    pub fn unauthorized() -> Self {
        Self {
            source: AppError::Unauthorized("no caller identity".to_owned()),
            fixed: Some((StatusCode::UNAUTHORIZED, "Unauthorized")),
        }
    }

    /// Caller is authenticated but has no local user row.
    pub fn user_not_found() -> Self {
        Self {
            source: AppError::NotFound("no local user for caller".to_owned()),
            fixed: Some((StatusCode::NOT_FOUND, "User not found in database")),
        }
    }

    /// Reports any error as an opaque server failure.
    pub fn internal(source: AppError) -> Self {
        Self {
            source,
            fixed: Some((
                StatusCode::INTERNAL_SERVER_ERROR,
                INTERNAL_SERVER_ERROR_MESSAGE,
            )),
        }
    }
}

impl From<AppError> for ApiError {
    fn from(source: AppError) -> Self {
        Self {
            source,
            fixed: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self.fixed {
            Some((status, message)) => (status, message.to_owned()),
            None => match &self.source {
                AppError::Validation(_) => (StatusCode::BAD_REQUEST, self.source.to_string()),
                AppError::NotFound(_) => (StatusCode::NOT_FOUND, self.source.to_string()),
                AppError::Conflict(_) => (StatusCode::CONFLICT, self.source.to_string()),
                AppError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, self.source.to_string()),
                AppError::Forbidden(_) => (StatusCode::FORBIDDEN, self.source.to_string()),
                AppError::Persistence(_) | AppError::IdentityMissing(_) | AppError::Internal(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_SERVER_ERROR_MESSAGE.to_owned(),
                ),
            },
        };

        if status.is_server_error() {
            tracing::error!(error = %self.source, "request failed");
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// Standard API result type.
pub type ApiResult<T> = Result<T, ApiError>;
