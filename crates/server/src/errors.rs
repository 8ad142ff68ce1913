use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use service::sellers::errors::SellerError;

/// API-boundary error translating the business taxonomy into HTTP statuses.
///
/// Internal failure details stay in the log; the response body only carries
/// user-facing messages.
#[derive(Debug)]
pub struct ApiError(pub SellerError);

impl From<SellerError> for ApiError {
    fn from(e: SellerError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let kind = self.0;
        let status = match &kind {
            SellerError::Validation(_) | SellerError::Conflict => StatusCode::BAD_REQUEST,
            SellerError::NotFound => StatusCode::NOT_FOUND,
            SellerError::InvalidCredentials | SellerError::Unauthorized => {
                StatusCode::UNAUTHORIZED
            }
            SellerError::Hash(_) | SellerError::Token(_) | SellerError::Repository(_) => {
                error!(code = kind.code(), error = %kind, "internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let msg = if status == StatusCode::INTERNAL_SERVER_ERROR {
            "internal server error".to_string()
        } else {
            kind.to_string()
        };
        let mut resp = (status, Json(serde_json::json!({ "error": msg }))).into_response();
        if status == StatusCode::UNAUTHORIZED {
            resp.headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        resp
    }
}
