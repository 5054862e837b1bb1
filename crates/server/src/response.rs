use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::error::{AppError, FieldErrors};

pub type ApiResult<T> = Result<ApiResponse<T>, AppError>;

/// Successful bodies are the bare resource JSON; only the status varies.
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub status: StatusCode,
    pub body: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(body: T) -> ApiResult<T> {
        Ok(Self {
            status: StatusCode::OK,
            body: Some(body),
        })
    }

    pub fn created(body: T) -> ApiResult<T> {
        Ok(Self {
            status: StatusCode::CREATED,
            body: Some(body),
        })
    }
}

impl ApiResponse<()> {
    pub fn no_content() -> ApiResult<()> {
        Ok(Self {
            status: StatusCode::NO_CONTENT,
            body: None,
        })
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        match self.body {
            Some(body) => (self.status, Json(body)).into_response(),
            None => self.status.into_response(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorEnvelope<'a> {
    pub status: u16,
    pub message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<&'a FieldErrors>,
}

impl<'a> ErrorEnvelope<'a> {
    pub fn from_error(err: &'a AppError) -> Self {
        Self {
            status: status_for(err).as_u16(),
            message: err.message(),
            errors: err.field_errors(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = status_for(&self);
        if status.is_server_error() {
            log_app_error(&self, status);
        }
        (status, Json(ErrorEnvelope::from_error(&self))).into_response()
    }
}

pub fn status_for(err: &AppError) -> StatusCode {
    match err {
        AppError::BadRequest(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
        AppError::NotFound(_) => StatusCode::NOT_FOUND,
        AppError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn log_app_error(err: &AppError, status: StatusCode) {
    match err {
        AppError::Internal {
            message,
            source: Some(source),
        } => {
            tracing::error!(
                status = status.as_u16(),
                error = %message,
                source = %source,
                "request failed"
            );
        }
        _ => {
            tracing::error!(status = status.as_u16(), error = %err, "request failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{body::to_bytes, http::StatusCode, response::IntoResponse};
    use serde_json::{Value, json};

    use super::{ApiResponse, ErrorEnvelope};
    use crate::error::{AppError, FieldErrors};

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        serde_json::from_slice(&bytes).expect("body should be JSON")
    }

    #[tokio::test]
    async fn validation_errors_render_field_map() {
        let response =
            AppError::validation("email", "user with this email already exists.").into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({
                "status": 400,
                "message": "Validation failed",
                "errors": {"email": ["user with this email already exists."]}
            })
        );
    }

    #[tokio::test]
    async fn envelope_omits_empty_errors() {
        let response = AppError::not_found("Not found.").into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await,
            json!({"status": 404, "message": "Not found."})
        );
    }

    #[test]
    fn empty_validation_map_is_not_serialized() {
        let err = AppError::Validation(FieldErrors::new());
        let envelope = ErrorEnvelope::from_error(&err);

        assert!(envelope.errors.is_none());
        assert_eq!(envelope.status, 400);
    }

    #[tokio::test]
    async fn no_content_has_empty_body() {
        let response = ApiResponse::no_content()
            .expect("no content is ok")
            .into_response();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        assert!(bytes.is_empty());
    }
}
