//! Stateless HTTP request builder and response parser for the topic API.
//!
//! # Design
//! `FeedClient` holds only its `ClientConfig` and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. Add, upvote and downvote share one POST shape and differ
//! only in the endpoint they target.

use serde_json::{Map, Value};

use crate::config::{ClientConfig, Endpoint};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::Topic;

const INVALID_RESPONSE: &str = "Invalid response data.";

#[derive(Debug, Clone)]
pub struct FeedClient {
    config: ClientConfig,
}

impl FeedClient {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn build_list_topics(&self) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Get,
            url: self.config.endpoint(Endpoint::List)?.into(),
            headers: Vec::new(),
            body: None,
            timeout: Some(self.config.list_timeout()),
        })
    }

    pub fn build_add_topic(&self, topic: &Topic) -> Result<HttpRequest, ApiError> {
        self.build_mutation(Endpoint::Add, topic)
    }

    pub fn build_upvote(&self, topic: &Topic) -> Result<HttpRequest, ApiError> {
        self.build_mutation(Endpoint::UpVote, topic)
    }

    pub fn build_downvote(&self, topic: &Topic) -> Result<HttpRequest, ApiError> {
        self.build_mutation(Endpoint::DownVote, topic)
    }

    /// POST the topic's full JSON to `endpoint` with JSON headers and the
    /// configured timeout.
    pub fn build_mutation(&self, endpoint: Endpoint, topic: &Topic) -> Result<HttpRequest, ApiError> {
        let url = self.config.endpoint(endpoint)?;
        let body = topic.to_json()?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: url.into(),
            headers: json_headers(),
            body: Some(body),
            timeout: Some(self.config.timeout()),
        })
    }

    /// Parse a list response into topics. One malformed element fails the
    /// whole list. An element without a string `id` is reported as invalid
    /// response data rather than an invalid topic.
    pub fn parse_list_topics(&self, response: HttpResponse) -> Result<Vec<Topic>, ApiError> {
        if !(200..300).contains(&response.status) {
            return Err(ApiError::from_status(response.status, response.message()));
        }
        if response.body.trim().is_empty() {
            return Err(ApiError::invalid(INVALID_RESPONSE));
        }
        parse_object_array(&response.body)?
            .into_iter()
            .map(|object| {
                if !object.get("id").is_some_and(Value::is_string) {
                    return Err(ApiError::invalid(INVALID_RESPONSE));
                }
                Topic::from_json_object(object)
            })
            .collect()
    }

    /// Check a mutation response and return its payload.
    ///
    /// Only 200 and 201 succeed, and only with an array-of-objects body.
    /// Any other status goes through the status rule with the body as the
    /// message, so a failed POST is never a bare `BadRequest(None)`.
    pub fn parse_mutation(&self, response: HttpResponse) -> Result<Vec<Map<String, Value>>, ApiError> {
        match response.status {
            200 | 201 => {
                if response.body.trim().is_empty() {
                    return Err(ApiError::JsonConversion);
                }
                parse_object_array(&response.body)
            }
            status => Err(ApiError::from_status(status, response.message())),
        }
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![
        ("Content-Type".to_string(), "application/json".to_string()),
        ("Accept".to_string(), "application/json".to_string()),
    ]
}

/// Syntax errors surface as `Other`; well-formed JSON of the wrong shape as
/// `JsonConversion`.
fn parse_object_array(body: &str) -> Result<Vec<Map<String, Value>>, ApiError> {
    match serde_json::from_str::<Value>(body).map_err(ApiError::other)? {
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::Object(object) => Ok(object),
                _ => Err(ApiError::JsonConversion),
            })
            .collect(),
        _ => Err(ApiError::JsonConversion),
    }
}
