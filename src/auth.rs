//! `Authorization` scheme checks. Only the scheme prefix is inspected; the
//! credentials themselves are forwarded untouched and never decoded here.

use actix_web::{dev::Payload, http::header, FromRequest, HttpRequest};
use std::future::{ready, Ready};

use crate::error::ApiError;

pub const BASIC_PREFIX: &str = "Basic ";
pub const BEARER_PREFIX: &str = "Bearer ";

/// Full `Authorization` value if it is present, valid UTF-8 and starts with `prefix`.
pub fn authorization_with_prefix(req: &HttpRequest, prefix: &str) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .filter(|v| v.starts_with(prefix))
        .map(str::to_owned)
}

/// Extractor for a `Basic ...` authorization header (whole header value).
pub struct BasicAuthorization(pub String);

impl FromRequest for BasicAuthorization {
    type Error = ApiError;
    type Future = Ready<Result<Self, ApiError>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(authorization_with_prefix(req, BASIC_PREFIX).map(BasicAuthorization).ok_or(ApiError::BasicAuthRequired))
    }
}

/// Extractor for a `Bearer ...` authorization header. The token is not validated.
pub struct BearerAuthorization(pub String);

impl FromRequest for BearerAuthorization {
    type Error = ApiError;
    type Future = Ready<Result<Self, ApiError>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(authorization_with_prefix(req, BEARER_PREFIX).map(BearerAuthorization).ok_or(ApiError::BearerRequired))
    }
}
