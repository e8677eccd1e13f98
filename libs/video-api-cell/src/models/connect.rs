// libs/video-api-cell/src/models/connect.rs
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::VideoApiError;
use crate::models::common::SessionTokenFields;
use crate::models::enums::AudioRate;
use crate::validation::{require_non_empty, require_text};

/// Audio connector target: the websocket session audio is streamed to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Websocket {
    uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    streams: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    headers: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    audio_rate: Option<AudioRate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    bidirectional: Option<bool>,
}

impl Websocket {
    pub fn builder() -> WebsocketBuilder {
        WebsocketBuilder::default()
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn streams(&self) -> &[String] {
        self.streams.as_deref().unwrap_or_default()
    }

    pub fn headers(&self) -> Option<&BTreeMap<String, String>> {
        self.headers.as_ref()
    }

    pub fn audio_rate(&self) -> Option<AudioRate> {
        self.audio_rate
    }

    pub fn bidirectional(&self) -> Option<bool> {
        self.bidirectional
    }

    pub fn validate(&self) -> Result<(), VideoApiError> {
        require_non_empty(&self.uri, "uri")?;
        if !(self.uri.starts_with("ws://") || self.uri.starts_with("wss://")) {
            return Err(VideoApiError::invalid(
                "uri",
                format!("'{}' is not a ws:// or wss:// URI", self.uri),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct WebsocketBuilder {
    uri: Option<String>,
    streams: Vec<String>,
    headers: BTreeMap<String, String>,
    audio_rate: Option<AudioRate>,
    bidirectional: Option<bool>,
}

impl WebsocketBuilder {
    pub fn uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    /// Restricts the connector to these stream ids; all streams otherwise.
    pub fn add_stream(mut self, stream_id: impl Into<String>) -> Self {
        self.streams.push(stream_id.into());
        self
    }

    pub fn add_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn audio_rate(mut self, audio_rate: AudioRate) -> Self {
        self.audio_rate = Some(audio_rate);
        self
    }

    pub fn bidirectional(mut self, bidirectional: bool) -> Self {
        self.bidirectional = Some(bidirectional);
        self
    }

    pub fn build(self) -> Result<Websocket, VideoApiError> {
        let websocket = Websocket {
            uri: require_text(self.uri, "uri")?,
            streams: (!self.streams.is_empty()).then_some(self.streams),
            headers: (!self.headers.is_empty()).then_some(self.headers),
            audio_rate: self.audio_rate,
            bidirectional: self.bidirectional,
        };
        websocket.validate()?;
        Ok(websocket)
    }
}

/// Connects a session's audio to a websocket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectRequest {
    #[serde(flatten)]
    session: SessionTokenFields,
    websocket: Websocket,
}

impl ConnectRequest {
    pub fn builder() -> ConnectRequestBuilder {
        ConnectRequestBuilder::default()
    }

    pub fn session_id(&self) -> &str {
        self.session.session_id()
    }

    pub fn token(&self) -> &str {
        self.session.token()
    }

    pub fn websocket(&self) -> &Websocket {
        &self.websocket
    }

    pub fn validate(&self) -> Result<(), VideoApiError> {
        self.session.validate()?;
        self.websocket.validate()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConnectRequestBuilder {
    session_id: Option<String>,
    token: Option<String>,
    websocket: Option<Websocket>,
}

impl ConnectRequestBuilder {
    pub fn session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn websocket(mut self, websocket: Websocket) -> Self {
        self.websocket = Some(websocket);
        self
    }

    pub fn build(self) -> Result<ConnectRequest, VideoApiError> {
        let request = ConnectRequest {
            session: SessionTokenFields::build(self.session_id, self.token)?,
            websocket: self.websocket.ok_or(VideoApiError::missing("websocket"))?,
        };
        request.validate()?;
        Ok(request)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectResponse {
    pub id: String,
    pub connection_id: String,
}
