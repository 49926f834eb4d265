//! Local validation for topics composed on the client.

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::types::Topic;

/// Longest content accepted while composing, in characters.
pub const MAX_CONTENT_LEN: usize = 255;

/// Reasons a composed topic is rejected before any request is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Please enter a title.")]
    EmptyTitle,

    #[error("Content cannot be empty.")]
    EmptyContent,

    #[error("Content is {len} characters long; the limit is {max}.")]
    ContentTooLong { len: usize, max: usize },
}

/// User input for a new topic.
#[derive(Debug, Clone, Default)]
pub struct NewTopic {
    pub title: String,
    pub content: String,
}

impl NewTopic {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Check the form and turn it into a `Topic` with a fresh random id.
    pub fn validate(self, author: &str, now: DateTime<Utc>) -> Result<Topic, FormError> {
        if self.title.is_empty() {
            return Err(FormError::EmptyTitle);
        }
        if self.content.is_empty() {
            return Err(FormError::EmptyContent);
        }
        let len = self.content.chars().count();
        if len > MAX_CONTENT_LEN {
            return Err(FormError::ContentTooLong {
                len,
                max: MAX_CONTENT_LEN,
            });
        }

        let mut topic = Topic::new(Uuid::new_v4().to_string());
        topic.title = Some(self.title);
        topic.content = Some(self.content);
        topic.created_by = Some(author.to_string());
        topic.created_date = now;
        Ok(topic)
    }
}
