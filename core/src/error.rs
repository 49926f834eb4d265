//! Error types for the topic feed client.
//!
//! # Design
//! `ApiError` is a closed set: every failure a caller of the HTTP layer can
//! observe lands in exactly one variant. Status-derived variants come from
//! `ApiError::from_status`; transport and serialization failures that have no
//! dedicated variant are wrapped in `Other` with the underlying error kept as
//! the source.

use thiserror::Error;

/// Boxed underlying error carried by `ApiError::Other`.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors returned by `FeedClient` parse methods, transports and `Feed`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A request URL could not be parsed.
    #[error("invalid request URL")]
    BadUrl,

    /// The server returned 404.
    #[error("server not found")]
    ServerNotFound,

    /// The server returned 400, or failed without further detail.
    #[error("bad request{}", detail(.0))]
    BadRequest(Option<String>),

    /// The server returned 408, or the call exceeded its timeout.
    #[error("request timed out")]
    RequestTimeout,

    /// Conflict with existing server state. Not produced by `from_status`.
    #[error("conflict{}", detail(.0))]
    Conflict(Option<String>),

    /// The response body was not a JSON array of objects.
    #[error("response is not a JSON array of objects")]
    JsonConversion,

    /// An unclassified transport or serialization failure.
    #[error("{0}")]
    Other(#[source] BoxError),

    /// Catch-all with a human readable explanation.
    #[error("{}", .0.as_deref().unwrap_or("unknown error"))]
    OtherWithMessage(Option<String>),
}

impl ApiError {
    /// Classify a non-success HTTP status code.
    ///
    /// 400, 404 and 408 have dedicated variants; everything else, 409
    /// included, becomes `OtherWithMessage`. `Conflict` stays unmapped until
    /// the status code it stands for is confirmed.
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        match status {
            400 => ApiError::BadRequest(message),
            404 => ApiError::ServerNotFound,
            408 => ApiError::RequestTimeout,
            _ => ApiError::OtherWithMessage(message),
        }
    }

    /// Wrap any error as `ApiError::Other`.
    pub fn other<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        ApiError::Other(err.into())
    }

    pub(crate) fn invalid(message: &str) -> Self {
        ApiError::OtherWithMessage(Some(message.to_string()))
    }
}

fn detail(message: &Option<String>) -> String {
    match message {
        Some(msg) if !msg.is_empty() => format!(": {msg}"),
        _ => String::new(),
    }
}
