use crate::config::ConfigError;
use crate::registry::RegistryError;
use crate::telemetry::TelemetryError;
use crate::workflows::declarations::{DeclarationServiceError, ExportError, ResolutionError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("server error: {0}")]
    Server(#[from] axum::Error),
    #[error("declaration error: {0}")]
    Declaration(#[from] DeclarationServiceError),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl From<ResolutionError> for AppError {
    fn from(value: ResolutionError) -> Self {
        Self::Declaration(value.into())
    }
}

impl From<ExportError> for AppError {
    fn from(value: ExportError) -> Self {
        Self::Declaration(value.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Declaration(DeclarationServiceError::SessionNotFound(_)) => {
                StatusCode::NOT_FOUND
            }
            AppError::Declaration(
                DeclarationServiceError::Resolution(_)
                | DeclarationServiceError::Export(ExportError::Resolution(_)),
            ) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Declaration(DeclarationServiceError::Export(ExportError::InProgress)) => {
                StatusCode::CONFLICT
            }
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Registry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Declaration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::declarations::SessionId;

    #[test]
    fn maps_declaration_errors_to_statuses() {
        let missing: AppError =
            DeclarationServiceError::SessionNotFound(SessionId("decl-000042".to_string())).into();
        assert_eq!(missing.into_response().status(), StatusCode::NOT_FOUND);

        let unresolved: AppError = ResolutionError::UnknownProject("nope".to_string()).into();
        assert_eq!(
            unresolved.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );

        let busy: AppError = ExportError::InProgress.into();
        assert_eq!(busy.into_response().status(), StatusCode::CONFLICT);

        let bad = AppError::InvalidInput("day".to_string());
        assert_eq!(bad.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
