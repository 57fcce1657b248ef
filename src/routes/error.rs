//! Uniform API error envelope.
//!
//! Every error response carries `{code, message, parameters}` so clients can
//! branch on `code` without parsing the human-readable message.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::{Map, Value, json};
use thiserror::Error;

use crate::services::ServiceError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{entity} not found ({identifier})")]
    NotFound { entity: String, identifier: String },

    #[error("invalid value for parameter {parameter}: {value}")]
    BadValue { parameter: String, value: String },

    #[error("{0}")]
    BadRequest(String),

    #[error("validation failed")]
    Validation(Vec<String>),

    #[error("access denied")]
    Forbidden,

    #[error("authentication required")]
    Unauthorized,

    #[error("{0}")]
    MethodNotAllowed(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    fn code(&self) -> &'static str {
        match self {
            ApiError::NotFound { .. } => "NOT_FOUND",
            ApiError::BadValue { .. } => "BAD_VALUE",
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::Forbidden => "FORBIDDEN",
            ApiError::Unauthorized => "UNAUTHORIZED",
            ApiError::MethodNotAllowed(_) => "METHOD_NOT_ALLOWED",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn parameters(&self) -> Value {
        match self {
            ApiError::NotFound { entity, identifier } => json!({
                "entity": entity,
                "identifier": identifier,
            }),
            ApiError::BadValue { parameter, value } => json!({
                "parameter": parameter,
                "value": value,
            }),
            ApiError::Validation(errors) => json!({ "errors": errors }),
            _ => Value::Object(Map::new()),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::BadValue { .. } | ApiError::BadRequest(_) | ApiError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let ApiError::Internal(detail) = self {
            log::error!("internal error: {detail}");
        }
        HttpResponse::build(self.status_code()).json(json!({
            "code": self.code(),
            "message": self.to_string(),
            "parameters": self.parameters(),
        }))
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Forbidden => ApiError::Forbidden,
            ServiceError::NotFound { entity, identifier } => ApiError::NotFound {
                entity: entity.to_string(),
                identifier,
            },
            ServiceError::MethodNotAllowed(message) => ApiError::MethodNotAllowed(message),
            ServiceError::Validation(message) => ApiError::Validation(vec![message]),
            ServiceError::Crypto(detail) => ApiError::Internal(detail),
            ServiceError::Repository(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let messages = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => format!("{field}: {msg}"),
                    None => format!("{field}: invalid ({})", e.code),
                })
            })
            .collect();
        ApiError::Validation(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_error_kinds() {
        let not_found = ApiError::NotFound {
            entity: "identity".into(),
            identifier: "x".into(),
        };
        assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(not_found.code(), "NOT_FOUND");

        let bad = ApiError::BadValue {
            parameter: "createdFrom".into(),
            value: "yesterday".into(),
        };
        assert_eq!(bad.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(bad.code(), "BAD_VALUE");

        assert_eq!(
            ApiError::MethodNotAllowed("no".into()).status_code(),
            StatusCode::METHOD_NOT_ALLOWED
        );
    }

    #[test]
    fn bad_value_names_the_parameter() {
        let bad = ApiError::BadValue {
            parameter: "ownerId".into(),
            value: "not-a-uuid".into(),
        };
        assert_eq!(bad.parameters()["parameter"], "ownerId");
        assert_eq!(bad.parameters()["value"], "not-a-uuid");
    }
}
