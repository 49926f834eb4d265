//! Client core for the topic feed board.
//!
//! # Overview
//! Lists topics, submits new ones and casts up/down votes against the board's
//! four HTTP endpoints. Request shaping and response classification live in
//! `FeedClient` and never touch the network; a `Transport` executes the
//! round-trip, and `Feed` ties the two together into the list / mutate /
//! reload workflow.
//!
//! # Design
//! - `FeedClient` is stateless apart from its `ClientConfig`.
//! - Every failure is an `ApiError` value; untrusted input never panics.
//! - `Topic` parsing is all or nothing, and so is a list fetch.
//! - Mutations echo the caller's topic; fresh counts come from a reload.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod date;
pub mod error;
pub mod feed;
pub mod form;
pub mod http;
pub mod transport;
pub mod types;

pub use client::FeedClient;
pub use config::{ClientConfig, Endpoint};
pub use error::ApiError;
pub use feed::Feed;
pub use form::{FormError, NewTopic};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{ReqwestTransport, Transport};
pub use types::Topic;
