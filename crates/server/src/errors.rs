use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::ErrorResponse;
use service::errors::ServiceError;
use tracing::error;

/// An HTTP status paired with the error envelope sent to the client.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, error_code: &str, detail: impl Into<String>) -> Self {
        let message = status.canonical_reason().unwrap_or("Error");
        Self { status, body: ErrorResponse::new(error_code, detail).with_message(message) }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &ErrorResponse {
        &self.body
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(msg) => ApiError::new(StatusCode::UNPROCESSABLE_ENTITY, "validation_error", msg),
            ServiceError::NotFound(msg) => ApiError::new(StatusCode::NOT_FOUND, "not_found", msg),
            ServiceError::FeatureDisabled(feature) => {
                ApiError::new(StatusCode::NOT_FOUND, "feature_disabled", format!("{feature} is disabled"))
            }
            ServiceError::Envelope(e) => ApiError::new(StatusCode::BAD_REQUEST, "invalid_pagination", e.to_string()),
            ServiceError::Db(msg) => {
                // keep driver messages out of the response body
                error!(error = %msg, "database error");
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "database_error", "database operation failed")
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => {
                ApiError::new(StatusCode::UNPROCESSABLE_ENTITY, "validation_error", rejection.body_text())
            }
            JsonRejection::MissingJsonContentType(_) => {
                ApiError::new(StatusCode::UNSUPPORTED_MEDIA_TYPE, "unsupported_media_type", rejection.body_text())
            }
            other => ApiError::new(other.status(), "bad_request", other.body_text()),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::new(StatusCode::BAD_REQUEST, "invalid_path", rejection.body_text())
    }
}

// the only query string the API reads is pagination
impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::new(StatusCode::BAD_REQUEST, "invalid_pagination", rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, code = ?self.body.error_code(), "request failed");
        }
        (self.status, Json(self.body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_statuses() {
        let cases = [
            (ServiceError::Validation("name required".into()), StatusCode::UNPROCESSABLE_ENTITY, "validation_error"),
            (ServiceError::not_found("organization"), StatusCode::NOT_FOUND, "not_found"),
            (ServiceError::FeatureDisabled("analytics".into()), StatusCode::NOT_FOUND, "feature_disabled"),
            (ServiceError::Db("connection refused".into()), StatusCode::INTERNAL_SERVER_ERROR, "database_error"),
        ];
        for (err, status, code) in cases {
            let api: ApiError = err.into();
            assert_eq!(api.status(), status);
            assert_eq!(api.body().error_code(), Some(code));
        }
    }

    #[test]
    fn db_detail_is_not_leaked() {
        let api: ApiError = ServiceError::Db("password authentication failed for user x".into()).into();
        assert_eq!(api.body().detail(), Some("database operation failed"));
        assert_eq!(api.body().message(), Some("Internal Server Error"));
    }
}
