use std::path::Path;
use std::sync::Arc;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::http::header::{self, HeaderName, HeaderValue};
use actix_web::{guard, web, HttpResponse};
use futures_util::StreamExt as _;
use tracing::{info, warn};
use utoipa::OpenApi;

use crate::auth::{BasicAuthorization, BearerAuthorization};
use crate::config::GatewayConfig;
use crate::error::ApiError;
use crate::models::SignInRequest;
use crate::openapi::ApiDoc;
use crate::upstream::{UpstreamClient, UpstreamError};

/// Method guards sit on the resources themselves, so a request that misses
/// (wrong method, unknown `/api/...` path) falls through to [`static_files`].
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/auth/signin").guard(guard::Post()).to(sign_in))
        .service(web::resource("/api/proxy/graphql").guard(guard::Post()).to(proxy_graphql))
        .service(web::resource("/api/openapi.json").guard(guard::Get()).to(openapi_json));
}

/// Catch-all for the client bundle. Register after [`config`] so the API routes win.
pub fn static_files(client_path: impl AsRef<Path>) -> Files {
    Files::new("/", client_path.as_ref())
        .index_file("index.html")
        .show_files_listing()
        .redirect_to_slash_directory()
}

/// Any origin, GET/POST/OPTIONS, `Content-Type` and `Authorization` only.
pub fn cors_policy() -> Cors {
    Cors::default()
        .allow_any_origin()
        .send_wildcard()
        .allowed_methods(["GET", "POST", "OPTIONS"])
        .allowed_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    pub upstream: UpstreamClient,
}

impl AppState {
    pub fn new(config: GatewayConfig) -> Self {
        Self { config: Arc::new(config), upstream: UpstreamClient::new() }
    }
}

// Framing headers belong to the upstream connection, actix recomputes them for the buffered body.
const HOP_BY_HOP: &[&str] = &[
    "connection", "keep-alive", "proxy-connection", "transfer-encoding",
    "content-length", "te", "trailer", "upgrade",
];

async fn read_payload(mut payload: web::Payload) -> Result<Vec<u8>, actix_web::error::PayloadError> {
    let mut body = Vec::new();
    while let Some(chunk) = payload.next().await {
        body.extend_from_slice(&chunk?);
    }
    Ok(body)
}

#[utoipa::path(
    post,
    path = "/api/auth/signin",
    request_body(content = SignInRequest, description = "Optional; validated but never forwarded"),
    params(("Authorization" = String, Header, description = "Basic credentials, forwarded as-is")),
    responses(
        (status = 200, description = "Upstream status and body relayed verbatim"),
        (status = 400, description = "Invalid request format", body = ApiErrorBody),
        (status = 401, description = "Authorization header required", body = ApiErrorBody),
        (status = 500, description = "Error reading authentication response", body = ApiErrorBody),
        (status = 503, description = "Authentication service unavailable", body = ApiErrorBody)
    )
)]
pub async fn sign_in(
    auth: BasicAuthorization,
    payload: web::Payload,
    data: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let body = read_payload(payload).await.map_err(|e| {
        warn!("sign-in body read failed: {e}");
        ApiError::InvalidRequestFormat
    })?;
    SignInRequest::validate_body(&body).map_err(|_| ApiError::InvalidRequestFormat)?;

    let reply = data
        .upstream
        .post_credentials(&data.config.auth_endpoint, &auth.0)
        .await
        .map_err(|e| match e {
            UpstreamError::Build(_) => ApiError::Internal,
            UpstreamError::Dispatch(_) => ApiError::AuthUnavailable,
            UpstreamError::Body(_) => ApiError::AuthResponseUnreadable,
        })?;
    info!(status = reply.status.as_u16(), "sign-in relayed");

    // upstream headers are deliberately not forwarded here
    Ok(HttpResponse::build(reply.status)
        .content_type("application/json")
        .body(reply.body))
}

#[utoipa::path(
    post,
    path = "/api/proxy/graphql",
    request_body(content = String, content_type = "application/json", description = "GraphQL request, forwarded byte-for-byte"),
    params(("Authorization" = String, Header, description = "Bearer token, forwarded as-is")),
    responses(
        (status = 200, description = "Upstream status, headers and body relayed verbatim"),
        (status = 400, description = "Error reading request body", body = ApiErrorBody),
        (status = 401, description = "JWT required", body = ApiErrorBody),
        (status = 500, description = "Error reading GraphQL response", body = ApiErrorBody),
        (status = 503, description = "GraphQL service unavailable", body = ApiErrorBody)
    )
)]
pub async fn proxy_graphql(
    auth: BearerAuthorization,
    payload: web::Payload,
    data: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let body = read_payload(payload).await.map_err(|e| {
        warn!("graphql body read failed: {e}");
        ApiError::RequestBodyUnreadable
    })?;

    let reply = data
        .upstream
        .post_json(&data.config.api_endpoint, &auth.0, body)
        .await
        .map_err(|e| match e {
            UpstreamError::Build(_) => ApiError::Internal,
            UpstreamError::Dispatch(_) => ApiError::GraphqlUnavailable,
            UpstreamError::Body(_) => ApiError::GraphqlResponseUnreadable,
        })?;

    let mut resp = HttpResponse::build(reply.status);
    for (name, value) in &reply.headers {
        if HOP_BY_HOP.contains(&name.as_str()) {
            continue;
        }
        match (HeaderName::from_bytes(name.as_bytes()), HeaderValue::from_bytes(value)) {
            (Ok(n), Ok(v)) => { resp.append_header((n, v)); }
            _ => warn!(header = %name, "dropping upstream header that does not convert"),
        }
    }
    Ok(resp.body(reply.body))
}

pub async fn openapi_json() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}
