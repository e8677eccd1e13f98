// libs/video-api-cell/src/models/stream.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::VideoApiError;
use crate::models::composition::from_epoch_millis;
use crate::models::enums::{lenient, ConnectionState, VideoType};
use crate::validation::require_text;

/// Layout classes to apply to one stream of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStream {
    id: String,
    #[serde(default)]
    layout_class_list: Vec<String>,
}

impl SessionStream {
    pub fn builder(id: impl Into<String>) -> SessionStreamBuilder {
        SessionStreamBuilder {
            id: Some(id.into()),
            layout_class_list: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn layout_class_list(&self) -> &[String] {
        &self.layout_class_list
    }
}

#[derive(Debug, Clone)]
pub struct SessionStreamBuilder {
    id: Option<String>,
    layout_class_list: Vec<String>,
}

impl SessionStreamBuilder {
    pub fn layout_class_list<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.layout_class_list = classes.into_iter().map(Into::into).collect();
        self
    }

    pub fn build(self) -> Result<SessionStream, VideoApiError> {
        Ok(SessionStream {
            id: require_text(self.id, "id")?,
            layout_class_list: self.layout_class_list,
        })
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct SetStreamLayoutRequest<'a> {
    pub items: &'a [SessionStream],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetStreamResponse {
    pub id: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::deserialize"
    )]
    pub video_type: Option<VideoType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub layout_class_list: Vec<String>,
}

/// A client connected to a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub connection_id: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::deserialize"
    )]
    pub connection_state: Option<ConnectionState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
}

impl Connection {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at.and_then(from_epoch_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    #[test]
    fn test_session_stream_serialization() {
        let stream = SessionStream::builder("8b732909-0a06-46a2-8ea8-074e64d43422")
            .layout_class_list(["full"])
            .build()
            .unwrap();
        assert_eq!(
            serde_json::to_value(&stream).unwrap(),
            json!({"id": "8b732909-0a06-46a2-8ea8-074e64d43422", "layoutClassList": ["full"]})
        );
    }

    #[test]
    fn test_session_stream_requires_id() {
        assert_matches!(
            SessionStream::builder(" ").build(),
            Err(VideoApiError::MissingField { field: "id" })
        );
    }

    #[test]
    fn test_stream_response_lenient_video_type() {
        let stream: GetStreamResponse =
            serde_json::from_value(json!({"id": "abc", "videoType": "hologram"})).unwrap();
        assert_eq!(stream.video_type, None);
        assert!(stream.layout_class_list.is_empty());
    }

    #[test]
    fn test_connection_decoding() {
        let connection: Connection = serde_json::from_value(json!({
            "connectionId": "e9f8c166-6c67-440d-994a-04fb6dfed007",
            "connectionState": "connected",
            "createdAt": 1384221730000i64
        }))
        .unwrap();
        assert_eq!(connection.connection_state, Some(ConnectionState::Connected));
        assert_eq!(connection.created_at().unwrap().timestamp(), 1384221730);
    }
}
