use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;

/// The only body shape the gateway produces on its own.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ApiErrorBody {
    pub error: String,
}

/// Local failures of the relays. `Display` is the message sent to the caller.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    #[error("Authorization header required")] BasicAuthRequired,
    #[error("JWT required")] BearerRequired,
    #[error("Invalid request format")] InvalidRequestFormat,
    #[error("Error reading request body")] RequestBodyUnreadable,
    #[error("Server error")] Internal,
    #[error("Authentication service unavailable")] AuthUnavailable,
    #[error("Error reading authentication response")] AuthResponseUnreadable,
    #[error("GraphQL service unavailable")] GraphqlUnavailable,
    #[error("Error reading GraphQL response")] GraphqlResponseUnreadable,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BasicAuthRequired | ApiError::BearerRequired => StatusCode::UNAUTHORIZED,
            ApiError::InvalidRequestFormat | ApiError::RequestBodyUnreadable => StatusCode::BAD_REQUEST,
            ApiError::AuthUnavailable | ApiError::GraphqlUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal
            | ApiError::AuthResponseUnreadable
            | ApiError::GraphqlResponseUnreadable => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ApiErrorBody { error: self.to_string() })
    }
}
