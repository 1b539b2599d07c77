//! HTTP mapping for emission errors.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::core::EmisionError;

/// Handler-level error; converts emission failures into JSON bodies.
pub struct ApiError(pub EmisionError);

impl From<EmisionError> for ApiError {
    fn from(e: EmisionError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self.0 {
            EmisionError::Validation(e) => (
                StatusCode::BAD_REQUEST,
                json!({ "success": false, "message": e.to_string() }),
            ),
            EmisionError::Rejection { code, message } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({
                    "success": false,
                    "message": self.0.to_string(),
                    "error": { "codigo": code, "descripcion": message },
                }),
            ),
            EmisionError::Render(detail) => {
                tracing::error!(%detail, "render failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "success": false, "message": "No se pudo generar el PDF" }),
                )
            }
            EmisionError::Infrastructure(detail) => {
                tracing::error!(%detail, "submission failure");
                (
                    StatusCode::BAD_GATEWAY,
                    json!({ "success": false, "message": "No se pudo enviar el comprobante a SUNAT" }),
                )
            }
            EmisionError::Storage(detail) => {
                tracing::error!(%detail, "publication failure");
                (
                    StatusCode::BAD_GATEWAY,
                    json!({ "success": false, "message": "No se pudo publicar los archivos del comprobante" }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    use crate::core::{EmisionError, ValidationError};

    use super::ApiError;

    #[test]
    fn validation_maps_to_400() {
        let response =
            ApiError(EmisionError::Validation(ValidationError::missing("serie"))).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn rejection_maps_to_422() {
        let response = ApiError(EmisionError::Rejection {
            code: "2335".into(),
            message: "documento alterado".into(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn infrastructure_maps_to_502() {
        let response =
            ApiError(EmisionError::Infrastructure("timeout".into())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
