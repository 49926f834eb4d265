//! The `Topic` entity and its JSON wire representation.
//!
//! # Design
//! Inbound and outbound shapes are separate private structs. Inbound parsing
//! is all or nothing: a missing or wrongly typed required field rejects the
//! whole object. `createdDate` is the one lenient field and falls back to the
//! parse time when absent or unreadable. Outbound keys follow the server's
//! contract, including the capitalised `CreatedDate`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::date::{format_wire_date, parse_created_date};
use crate::error::ApiError;

const INVALID_STRUCTURE: &str = "Invalid data structure.";

/// A single discussion item on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    id: String,
    pub title: Option<String>,
    pub content: Option<String>,
    pub created_by: Option<String>,
    pub up_vote: u64,
    pub down_vote: u64,
    pub created_date: DateTime<Utc>,
}

#[derive(Deserialize)]
struct InboundTopic {
    id: String,
    title: String,
    content: String,
    #[serde(rename = "createdBy")]
    created_by: String,
    #[serde(rename = "upVote")]
    up_vote: u64,
    #[serde(rename = "downVote")]
    down_vote: u64,
    #[serde(default, rename = "createdDate")]
    created_date: Option<Value>,
    #[serde(default, rename = "CreatedDate")]
    created_date_capitalised: Option<Value>,
}

#[derive(Serialize)]
struct OutboundTopic<'a> {
    id: &'a str,
    title: &'a str,
    content: &'a str,
    #[serde(rename = "createdBy")]
    created_by: &'a str,
    #[serde(rename = "upVote")]
    up_vote: u64,
    #[serde(rename = "downVote")]
    down_vote: u64,
    #[serde(rename = "CreatedDate")]
    created_date: String,
}

impl Topic {
    /// A blank topic with the given id, no votes, created now.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
            content: None,
            created_by: None,
            up_vote: 0,
            down_vote: 0,
            created_date: Utc::now(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Build a topic from one server-shaped JSON object.
    ///
    /// Fails with `OtherWithMessage("Invalid data structure.")` when any of
    /// `id`, `title`, `content`, `createdBy`, `upVote` or `downVote` is
    /// missing or has the wrong type.
    pub fn from_json_object(object: Map<String, Value>) -> Result<Self, ApiError> {
        Self::from_json_object_at(object, Utc::now())
    }

    /// Parse a single topic object from a JSON string.
    pub fn from_json_str(input: &str) -> Result<Self, ApiError> {
        match serde_json::from_str::<Value>(input).map_err(ApiError::other)? {
            Value::Object(object) => Self::from_json_object(object),
            _ => Err(ApiError::invalid(INVALID_STRUCTURE)),
        }
    }

    pub(crate) fn from_json_object_at(
        object: Map<String, Value>,
        now: DateTime<Utc>,
    ) -> Result<Self, ApiError> {
        let inbound: InboundTopic = serde_json::from_value(Value::Object(object))
            .map_err(|_| ApiError::invalid(INVALID_STRUCTURE))?;
        let created_date = parse_created_date(
            inbound
                .created_date
                .as_ref()
                .and_then(Value::as_str)
                .or_else(|| inbound.created_date_capitalised.as_ref().and_then(Value::as_str)),
            now,
        );
        Ok(Self {
            id: inbound.id,
            title: Some(inbound.title),
            content: Some(inbound.content),
            created_by: Some(inbound.created_by),
            up_vote: inbound.up_vote,
            down_vote: inbound.down_vote,
            created_date,
        })
    }

    /// Serialize to the request body shared by add, upvote and downvote.
    ///
    /// Missing text fields are sent as empty strings.
    pub fn to_json(&self) -> Result<String, ApiError> {
        let outbound = OutboundTopic {
            id: &self.id,
            title: self.title.as_deref().unwrap_or_default(),
            content: self.content.as_deref().unwrap_or_default(),
            created_by: self.created_by.as_deref().unwrap_or_default(),
            up_vote: self.up_vote,
            down_vote: self.down_vote,
            created_date: format_wire_date(self.created_date),
        };
        serde_json::to_string(&outbound).map_err(ApiError::other)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    fn server_object() -> Map<String, Value> {
        match json!({
            "id": "abc-123",
            "title": "Rust",
            "content": "Ownership is neat",
            "createdBy": "alice",
            "upVote": 7,
            "downVote": 2,
            "createdDate": "/Date(1570300800000)/"
        }) {
            Value::Object(object) => object,
            _ => unreachable!(),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn parses_well_formed_server_object() {
        let topic = Topic::from_json_object_at(server_object(), now()).unwrap();
        assert_eq!(topic.id(), "abc-123");
        assert_eq!(topic.title.as_deref(), Some("Rust"));
        assert_eq!(topic.content.as_deref(), Some("Ownership is neat"));
        assert_eq!(topic.created_by.as_deref(), Some("alice"));
        assert_eq!(topic.up_vote, 7);
        assert_eq!(topic.down_vote, 2);
        assert_eq!(topic.created_date.timestamp(), 1_570_300_800);
    }

    #[test]
    fn rejects_each_missing_required_field() {
        for key in ["id", "title", "content", "createdBy", "upVote", "downVote"] {
            let mut object = server_object();
            object.remove(key);
            let err = Topic::from_json_object(object).unwrap_err();
            assert!(
                matches!(err, ApiError::OtherWithMessage(Some(ref m)) if m == INVALID_STRUCTURE),
                "missing {key}"
            );
        }
    }

    #[test]
    fn rejects_each_wrongly_typed_field() {
        let cases = [
            ("id", json!(42)),
            ("title", json!(null)),
            ("content", json!(["x"])),
            ("createdBy", json!(false)),
            ("upVote", json!("7")),
            ("downVote", json!(-1)),
            ("upVote", json!(1.5)),
        ];
        for (key, value) in cases {
            let mut object = server_object();
            object.insert(key.to_string(), value.clone());
            assert!(
                Topic::from_json_object(object).is_err(),
                "{key} = {value}"
            );
        }
    }

    #[test]
    fn accepts_plain_and_capitalised_created_date() {
        let mut object = server_object();
        object.remove("createdDate");
        object.insert("CreatedDate".to_string(), json!("2019-10-06T00:00:00"));
        let topic = Topic::from_json_object_at(object, now()).unwrap();
        assert_eq!(topic.created_date, Utc.with_ymd_and_hms(2019, 10, 6, 0, 0, 0).unwrap());
    }

    #[test]
    fn both_created_date_spellings_prefer_lower_camel_case() {
        let topic = Topic::from_json_str(
            r#"{"id":"a","title":"t","content":"c","createdBy":"b","upVote":1,"downVote":0,"createdDate":"/Date(1570300800000)/","CreatedDate":"2019-10-06T00:00:00"}"#,
        )
        .unwrap();
        assert_eq!(topic.id(), "a");
        assert_eq!(topic.created_date.timestamp(), 1_570_300_800);

        let mut object = server_object();
        object.insert("createdDate".to_string(), json!(7));
        object.insert("CreatedDate".to_string(), json!("2019-10-06T00:00:00"));
        let topic = Topic::from_json_object_at(object, now()).unwrap();
        assert_eq!(topic.created_date, Utc.with_ymd_and_hms(2019, 10, 6, 0, 0, 0).unwrap());
    }

    #[test]
    fn unreadable_created_date_becomes_now() {
        for value in [json!("soon"), json!(12345), json!(null)] {
            let mut object = server_object();
            object.insert("createdDate".to_string(), value);
            let topic = Topic::from_json_object_at(object, now()).unwrap();
            assert_eq!(topic.created_date, now());
        }

        let mut object = server_object();
        object.remove("createdDate");
        let topic = Topic::from_json_object_at(object, now()).unwrap();
        assert_eq!(topic.created_date, now());
    }

    #[test]
    fn ignores_unknown_fields() {
        let mut object = server_object();
        object.insert("pinned".to_string(), json!(true));
        assert!(Topic::from_json_object(object).is_ok());
    }

    #[test]
    fn from_json_str_requires_an_object() {
        assert!(Topic::from_json_str("[]").is_err());
        assert!(matches!(Topic::from_json_str("{"), Err(ApiError::Other(_))));
        let topic = Topic::from_json_str(
            r#"{"id":"1","title":"t","content":"c","createdBy":"b","upVote":0,"downVote":0}"#,
        )
        .unwrap();
        assert_eq!(topic.id(), "1");
    }

    #[test]
    fn to_json_uses_wire_keys() {
        let mut topic = Topic::new("xyz");
        topic.title = Some("Hello".to_string());
        topic.up_vote = 3;
        topic.created_date = DateTime::from_timestamp_millis(1_570_300_800_042).unwrap();

        let body: Value = serde_json::from_str(&topic.to_json().unwrap()).unwrap();
        assert_eq!(
            body,
            json!({
                "id": "xyz",
                "title": "Hello",
                "content": "",
                "createdBy": "",
                "upVote": 3,
                "downVote": 0,
                "CreatedDate": "2019-10-05T18:40:00.042Z"
            })
        );
    }

    #[test]
    fn local_topic_survives_serialize_then_parse() {
        let mut topic = Topic::new("round-trip");
        topic.title = Some("Title".to_string());
        topic.content = Some("Body".to_string());
        topic.created_by = Some("DemoIOSUSer".to_string());
        topic.up_vote = 4;
        topic.down_vote = 1;

        let back = Topic::from_json_str(&topic.to_json().unwrap()).unwrap();
        assert_eq!(back.id(), topic.id());
        assert_eq!(back.title, topic.title);
        assert_eq!(back.content, topic.content);
        assert_eq!(back.created_by, topic.created_by);
        assert_eq!(back.up_vote, topic.up_vote);
        assert_eq!(back.down_vote, topic.down_vote);
    }
}
