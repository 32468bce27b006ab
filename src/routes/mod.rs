pub mod events;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use agenda_core::AgendaError;

/// Standard API error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Convert service errors to HTTP responses
pub struct AppError(AgendaError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            AgendaError::EventNotFound(_) => StatusCode::NOT_FOUND,
            AgendaError::InvalidId(_) => StatusCode::BAD_REQUEST,
            AgendaError::Store(_) => {
                tracing::error!("store failure: {}", self.0);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(ErrorResponse {
            error: self.0.to_string(),
        });
        (status, body).into_response()
    }
}

impl From<AgendaError> for AppError {
    fn from(err: AgendaError) -> Self {
        Self(err)
    }
}
