//! Executes `HttpRequest`s against the network.
//!
//! # Design
//! `Transport` is the only I/O seam in the crate. `Feed` is generic over it,
//! tests substitute a scripted implementation, and `ReqwestTransport` is the
//! production one. Each call builds its own `reqwest::Client`, so no
//! connection pool or other state is shared between calls.

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform one round-trip. Non-2xx statuses are returned as responses,
    /// not errors.
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ReqwestTransport;

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let url = Url::parse(&request.url).map_err(|_| ApiError::BadUrl)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(classify)?;

        let mut call = match request.method {
            HttpMethod::Get => client.get(url),
            HttpMethod::Post => client.post(url),
        };
        for (name, value) in &request.headers {
            call = call.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            call = call.body(body);
        }

        debug!(method = ?request.method, url = %request.url, "sending request");
        let response = call.send().await.map_err(classify)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.text().await.map_err(classify)?;
        debug!(status, bytes = body.len(), "received response");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn classify(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::RequestTimeout
    } else {
        ApiError::other(err)
    }
}
