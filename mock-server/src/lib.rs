use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;

pub const GET_TOPICS: &str = "/api/TinnoTopic/GetTopics";
pub const ADD_TOPIC: &str = "/api/TinnoTopic/AddTopic";
pub const UP_VOTE: &str = "/api/TinnoTopic/UpVote";
pub const DOWN_VOTE: &str = "/api/TinnoTopic/DownVote";

/// A topic as the server stores and returns it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoredTopic {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(rename = "createdBy")]
    pub created_by: String,
    #[serde(rename = "upVote")]
    pub up_vote: u64,
    #[serde(rename = "downVote")]
    pub down_vote: u64,
    /// `/Date(<milliseconds>)/`
    #[serde(rename = "createdDate")]
    pub created_date: String,
}

/// A topic as posted by clients. Vote counters in the body are ignored.
#[derive(Deserialize)]
pub struct PostedTopic {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, rename = "createdBy")]
    pub created_by: String,
    #[serde(default, rename = "createdDate")]
    pub created_date: Option<String>,
    #[serde(default, rename = "CreatedDate")]
    pub created_date_capitalised: Option<String>,
}

impl PostedTopic {
    /// The posted date, preferring `createdDate` over `CreatedDate`.
    pub fn posted_date(&self) -> Option<&str> {
        self.created_date
            .as_deref()
            .or(self.created_date_capitalised.as_deref())
    }
}

pub type Db = Arc<RwLock<Vec<StoredTopic>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Vec::new()));
    Router::new()
        .route(GET_TOPICS, get(get_topics))
        .route(ADD_TOPIC, post(add_topic))
        .route(UP_VOTE, post(up_vote))
        .route(DOWN_VOTE, post(down_vote))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn json_date(posted: Option<&str>) -> String {
    let millis = posted
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|d| d.timestamp_millis())
        .unwrap_or_else(|| Utc::now().timestamp_millis());
    format!("/Date({millis})/")
}

async fn get_topics(State(db): State<Db>) -> Json<Vec<StoredTopic>> {
    Json(db.read().await.clone())
}

async fn add_topic(
    State(db): State<Db>,
    Json(input): Json<PostedTopic>,
) -> Result<(StatusCode, Json<Vec<StoredTopic>>), StatusCode> {
    let mut topics = db.write().await;
    if topics.iter().any(|t| t.id == input.id) {
        return Err(StatusCode::CONFLICT);
    }
    let topic = StoredTopic {
        created_date: json_date(input.posted_date()),
        id: input.id,
        title: input.title,
        content: input.content,
        created_by: input.created_by,
        up_vote: 0,
        down_vote: 0,
    };
    info!(id = %topic.id, "topic added");
    topics.push(topic.clone());
    Ok((StatusCode::CREATED, Json(vec![topic])))
}

async fn up_vote(
    State(db): State<Db>,
    Json(input): Json<PostedTopic>,
) -> Result<Json<Vec<StoredTopic>>, StatusCode> {
    vote(&db, &input.id, |t| t.up_vote += 1).await
}

async fn down_vote(
    State(db): State<Db>,
    Json(input): Json<PostedTopic>,
) -> Result<Json<Vec<StoredTopic>>, StatusCode> {
    vote(&db, &input.id, |t| t.down_vote += 1).await
}

async fn vote(
    db: &Db,
    id: &str,
    apply: impl FnOnce(&mut StoredTopic),
) -> Result<Json<Vec<StoredTopic>>, StatusCode> {
    let mut topics = db.write().await;
    let topic = topics
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    apply(&mut *topic);
    info!(id, up = topic.up_vote, down = topic.down_vote, "vote recorded");
    Ok(Json(vec![topic.clone()]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_topic_uses_wire_keys() {
        let topic = StoredTopic {
            id: "a".to_string(),
            title: "T".to_string(),
            content: "C".to_string(),
            created_by: "bob".to_string(),
            up_vote: 1,
            down_vote: 2,
            created_date: "/Date(0)/".to_string(),
        };
        let json = serde_json::to_value(&topic).unwrap();
        assert_eq!(json["createdBy"], "bob");
        assert_eq!(json["upVote"], 1);
        assert_eq!(json["downVote"], 2);
        assert_eq!(json["createdDate"], "/Date(0)/");
    }

    #[test]
    fn posted_topic_accepts_capitalised_date() {
        let input: PostedTopic = serde_json::from_str(
            r#"{"id":"a","title":"T","content":"C","createdBy":"b","upVote":9,"downVote":9,"CreatedDate":"2019-10-05T18:40:00.042Z"}"#,
        )
        .unwrap();
        assert_eq!(input.posted_date(), Some("2019-10-05T18:40:00.042Z"));
    }

    #[test]
    fn posted_topic_accepts_both_date_spellings() {
        let input: PostedTopic = serde_json::from_str(
            r#"{"id":"a","createdDate":"2019-10-05T18:40:00.042Z","CreatedDate":"2020-01-01T00:00:00.000Z"}"#,
        )
        .unwrap();
        assert_eq!(input.posted_date(), Some("2019-10-05T18:40:00.042Z"));
    }

    #[test]
    fn posted_topic_rejects_missing_id() {
        let result: Result<PostedTopic, _> = serde_json::from_str(r#"{"title":"T"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn json_date_converts_rfc3339_to_millis() {
        assert_eq!(
            json_date(Some("2019-10-05T18:40:00.042Z")),
            "/Date(1570300800042)/"
        );
    }

    #[test]
    fn json_date_defaults_to_now() {
        let date = json_date(Some("whenever"));
        assert!(date.starts_with("/Date(") && date.ends_with(")/"));
    }
}
