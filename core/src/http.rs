//! HTTP requests and responses as plain data.
//!
//! # Design
//! `FeedClient` builds `HttpRequest` values and parses `HttpResponse` values
//! without touching the network. A `Transport` (see `transport.rs`) performs
//! the round-trip in between, so request shaping and status classification
//! stay deterministic and testable on their own.

use std::time::Duration;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// An HTTP request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    /// Upper bound for the whole call. `None` leaves the transport default.
    pub timeout: Option<Duration>,
}

/// An HTTP response described as plain data.
///
/// Every status code is represented here, including 4xx and 5xx; only
/// failures without a status line are transport errors.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// The body as an error message, if there is any text in it.
    pub fn message(&self) -> Option<String> {
        let text = self.body.trim();
        (!text.is_empty()).then(|| text.to_string())
    }
}
