use actix_web::http::StatusCode;
use reqwest::{header, Client};
use tracing::{debug, warn};

/// Why an upstream exchange failed. Each relay maps these onto its own messages.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// The outbound request could not be constructed (bad endpoint URL, bad header value).
    #[error("building request: {0}")]
    Build(#[source] reqwest::Error),
    #[error("dispatch: {0}")]
    Dispatch(#[source] reqwest::Error),
    #[error("reading body: {0}")]
    Body(#[source] reqwest::Error),
}

/// Fully buffered upstream response.
#[derive(Debug)]
pub struct UpstreamReply {
    pub status: StatusCode,
    /// Every header in arrival order, repeated keys kept as separate entries.
    pub headers: Vec<(String, Vec<u8>)>,
    pub body: Vec<u8>,
}

/// Thin wrapper over one shared `reqwest::Client`. No timeout and no retries:
/// a single call per relayed request, surfaced to the caller as-is.
#[derive(Clone, Default)]
pub struct UpstreamClient {
    http: Client,
}

impl UpstreamClient {
    pub fn new() -> Self {
        Self { http: Client::new() }
    }

    /// POST with an empty body, carrying only `authorization`.
    pub async fn post_credentials(&self, url: &str, authorization: &str) -> Result<UpstreamReply, UpstreamError> {
        let req = self
            .http
            .post(url)
            .header(header::AUTHORIZATION, authorization)
            .build()
            .map_err(UpstreamError::Build)?;
        self.execute(req).await
    }

    /// POST `body` verbatim as JSON, carrying `authorization`.
    pub async fn post_json(&self, url: &str, authorization: &str, body: Vec<u8>) -> Result<UpstreamReply, UpstreamError> {
        let req = self
            .http
            .post(url)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, authorization)
            .body(body)
            .build()
            .map_err(UpstreamError::Build)?;
        self.execute(req).await
    }

    async fn execute(&self, req: reqwest::Request) -> Result<UpstreamReply, UpstreamError> {
        let url = req.url().clone();
        let resp = self.http.execute(req).await.map_err(|e| {
            warn!(%url, "upstream dispatch failed: {e}");
            UpstreamError::Dispatch(e)
        })?;
        // through the raw code so the actix and reqwest `http` versions need not match
        let status = StatusCode::from_u16(resp.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
        let headers = resp
            .headers()
            .iter()
            .map(|(k, v)| (k.as_str().to_owned(), v.as_bytes().to_vec()))
            .collect();
        let body = resp.bytes().await.map_err(|e| {
            warn!(%url, "upstream body read failed: {e}");
            UpstreamError::Body(e)
        })?;
        debug!(%url, status = status.as_u16(), bytes = body.len(), "upstream replied");
        Ok(UpstreamReply { status, headers, body: body.to_vec() })
    }
}
