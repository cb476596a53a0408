use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cinedex_core::error::{ApiError, ErrorEnvelope};
use cinedex_upstream::{CatalogError, TransportError};

/// Newtype wrapper so we can implement `IntoResponse` in this crate.
#[derive(Debug)]
pub struct AppError(pub ApiError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let envelope = ErrorEnvelope::from(&self.0);
        (status, Json(envelope)).into_response()
    }
}

// Upstream error bodies are never inspected; only the failure kind is mapped.
impl From<CatalogError> for AppError {
    fn from(e: CatalogError) -> Self {
        let api = match e {
            CatalogError::Validation(err) => ApiError::BadRequest(err.to_string()),
            CatalogError::InvalidIdentifier(id) => {
                ApiError::BadRequest(format!("invalid title identifier: {id:?}"))
            }
            CatalogError::Transport(TransportError::Timeout) => {
                ApiError::GatewayTimeout(TransportError::Timeout.to_string())
            }
            CatalogError::Transport(TransportError::Status(404)) => {
                ApiError::NotFound("resource not found upstream".into())
            }
            CatalogError::Transport(err) => ApiError::BadGateway(err.to_string()),
        };
        Self(api)
    }
}
