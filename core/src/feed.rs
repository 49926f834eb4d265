//! List, submit and vote against the board through a `Transport`.
//!
//! # Design
//! Mutations never adopt the server's reply: a successful add or vote
//! returns the caller's own topic unchanged, and the authoritative counts
//! come from the next full `list`. Nothing is retried; each failure is
//! returned once to the caller.

use chrono::Utc;
use tracing::{debug, instrument, warn};

use crate::client::FeedClient;
use crate::config::Endpoint;
use crate::error::ApiError;
use crate::form::{FormError, NewTopic};
use crate::transport::Transport;
use crate::types::Topic;

pub struct Feed<T> {
    client: FeedClient,
    transport: T,
}

impl<T: Transport> Feed<T> {
    pub fn new(client: FeedClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &FeedClient {
        &self.client
    }

    /// Validate user input into a new topic authored by the configured user.
    /// No request is made.
    pub fn compose(&self, form: NewTopic) -> Result<Topic, FormError> {
        form.validate(&self.client.config().author, Utc::now())
    }

    /// Fetch every topic, most up-voted first.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Topic>, ApiError> {
        let request = self.client.build_list_topics()?;
        let response = self.transport.execute(request).await;
        let mut topics = response
            .and_then(|r| self.client.parse_list_topics(r))
            .inspect_err(|err| warn!(error = %err, "topic list failed"))?;
        sort_by_up_votes(&mut topics);
        debug!(count = topics.len(), "fetched topics");
        Ok(topics)
    }

    pub async fn submit(&self, topic: Topic) -> Result<Topic, ApiError> {
        self.mutate(Endpoint::Add, topic).await
    }

    pub async fn upvote(&self, topic: Topic) -> Result<Topic, ApiError> {
        self.mutate(Endpoint::UpVote, topic).await
    }

    pub async fn downvote(&self, topic: Topic) -> Result<Topic, ApiError> {
        self.mutate(Endpoint::DownVote, topic).await
    }

    /// Submit, then reload the whole list. A failed submit skips the reload.
    pub async fn submit_and_reload(&self, topic: Topic) -> Result<Vec<Topic>, ApiError> {
        self.submit(topic).await?;
        self.list().await
    }

    pub async fn upvote_and_reload(&self, topic: Topic) -> Result<Vec<Topic>, ApiError> {
        self.upvote(topic).await?;
        self.list().await
    }

    pub async fn downvote_and_reload(&self, topic: Topic) -> Result<Vec<Topic>, ApiError> {
        self.downvote(topic).await?;
        self.list().await
    }

    #[instrument(skip(self, topic), fields(id = %topic.id()))]
    async fn mutate(&self, endpoint: Endpoint, topic: Topic) -> Result<Topic, ApiError> {
        let request = self.client.build_mutation(endpoint, &topic)?;
        let response = self.transport.execute(request).await;
        response
            .and_then(|r| self.client.parse_mutation(r))
            .inspect_err(|err| warn!(error = %err, "mutation failed"))?;
        debug!("mutation accepted");
        Ok(topic)
    }
}

/// Highest `up_vote` first; ties keep server order.
pub fn sort_by_up_votes(topics: &mut [Topic]) {
    topics.sort_by(|a, b| b.up_vote.cmp(&a.up_vote));
}
