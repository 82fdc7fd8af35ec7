use axum::http::Uri;
use barberdesk_core::AppError;

use crate::error::ApiError;

/// Answers unknown API paths with a JSON 404 instead of the dashboard bundle.
pub async fn api_not_found_handler(uri: Uri) -> ApiError {
    AppError::NotFound(format!("no route for '{}'", uri.path())).into()
}
