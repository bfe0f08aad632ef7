use api_types::ErrorBody;
use axum::{Json, extract::rejection::JsonRejection, http::StatusCode, response::IntoResponse};
use engine::EngineError;

pub use server::{ServerState, app, run, run_with_listener, spawn_with_listener};

mod auth;
mod dashboard;
mod entries;
mod goals;
mod health;
mod server;

pub enum ServerError {
    Engine(EngineError),
    /// Request body that is not valid JSON or does not fit the expected shape.
    Generic(String),
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
        EngineError::NotFound(_) => StatusCode::NOT_FOUND,
        EngineError::Validation(_)
        | EngineError::Conflict(_)
        | EngineError::InvalidAmount(_)
        | EngineError::InsufficientFunds(_) => StatusCode::BAD_REQUEST,
        EngineError::Internal(_) | EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn message_for_engine_error(err: &EngineError) -> String {
    if err.is_expected() {
        return err.to_string();
    }

    tracing::error!(kind = err.kind(), "request failed: {err}");
    "Internal server error".to_string()
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            ServerError::Engine(err) => (
                status_for_engine_error(&err),
                ErrorBody {
                    error: message_for_engine_error(&err),
                    kind: err.kind().to_string(),
                },
            ),
            ServerError::Generic(error) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error,
                    kind: "validation_error".to_string(),
                },
            ),
        };

        (status, Json(body)).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

impl From<JsonRejection> for ServerError {
    fn from(value: JsonRejection) -> Self {
        Self::Generic(value.body_text())
    }
}
