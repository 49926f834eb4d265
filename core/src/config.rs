//! Client configuration: server location, endpoint paths, timeout, author.
//!
//! Values are layered with the `config` crate: built-in defaults, then an
//! optional file, then `TOPIC_FEED_*` environment variables.

use std::path::Path;
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ApiError;

/// The four server operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    List,
    Add,
    UpVote,
    DownVote,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    pub list_path: String,
    pub add_path: String,
    pub upvote_path: String,
    pub downvote_path: String,
    /// Timeout applied to add, upvote and downvote calls.
    pub timeout_secs: u64,
    /// Timeout applied to the list call.
    pub list_timeout_secs: u64,
    /// Name recorded as `createdBy` on locally composed topics.
    pub author: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://cryptic-shelf-48078.herokuapp.com".to_string(),
            list_path: "/api/TinnoTopic/GetTopics".to_string(),
            add_path: "/api/TinnoTopic/AddTopic".to_string(),
            upvote_path: "/api/TinnoTopic/UpVote".to_string(),
            downvote_path: "/api/TinnoTopic/DownVote".to_string(),
            timeout_secs: 10,
            list_timeout_secs: 60,
            author: "DemoIOSUSer".to_string(),
        }
    }
}

impl ClientConfig {
    /// Default paths and timeout against a different server.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    /// Load defaults, then `path` if given, then the environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with(path, environment())
    }

    fn load_with(path: Option<&Path>, env: Environment) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        builder.add_source(env).build()?.try_deserialize()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn list_timeout(&self) -> Duration {
        Duration::from_secs(self.list_timeout_secs)
    }

    /// Absolute URL for an endpoint. A malformed result is `ApiError::BadUrl`.
    pub fn endpoint(&self, endpoint: Endpoint) -> Result<Url, ApiError> {
        let path = match endpoint {
            Endpoint::List => &self.list_path,
            Endpoint::Add => &self.add_path,
            Endpoint::UpVote => &self.upvote_path,
            Endpoint::DownVote => &self.downvote_path,
        };
        Url::parse(&format!("{}{}", self.base_url.trim_end_matches('/'), path))
            .map_err(|_| ApiError::BadUrl)
    }
}

fn environment() -> Environment {
    Environment::with_prefix("TOPIC_FEED").try_parsing(true)
}
