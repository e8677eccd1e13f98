// libs/video-api-cell/src/models/sip.rs
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::VideoApiError;
use crate::models::common::SessionTokenFields;
use crate::validation::{require_non_empty, require_text};

const TLS_TRANSPORT_SUFFIX: &str = ";transport=tls";

/// Dials a SIP endpoint into a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SipDialRequest {
    #[serde(flatten)]
    session: SessionTokenFields,
    sip: SipOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SipOptions {
    uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    headers: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    auth: Option<SipAuth>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    secure: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    video: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    observe_force_mute: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SipAuth {
    username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    password: Option<String>,
}

impl SipDialRequest {
    pub fn builder() -> SipDialRequestBuilder {
        SipDialRequestBuilder::default()
    }

    pub fn session_id(&self) -> &str {
        self.session.session_id()
    }

    pub fn token(&self) -> &str {
        self.session.token()
    }

    pub fn uri(&self) -> &str {
        &self.sip.uri
    }

    pub fn from_uri(&self) -> Option<&str> {
        self.sip.from.as_deref()
    }

    pub fn headers(&self) -> Option<&BTreeMap<String, String>> {
        self.sip.headers.as_ref()
    }

    pub fn username(&self) -> Option<&str> {
        self.sip.auth.as_ref().map(|a| a.username.as_str())
    }

    pub fn password(&self) -> Option<&str> {
        self.sip.auth.as_ref().and_then(|a| a.password.as_deref())
    }

    pub fn secure(&self) -> Option<bool> {
        self.sip.secure
    }

    pub fn video(&self) -> Option<bool> {
        self.sip.video
    }

    pub fn validate(&self) -> Result<(), VideoApiError> {
        self.session.validate()?;
        require_non_empty(&self.sip.uri, "uri")?;
        if let Some(auth) = &self.sip.auth {
            require_non_empty(&auth.username, "username")?;
        }
        Ok(())
    }

    pub fn observe_force_mute(&self) -> Option<bool> {
        self.sip.observe_force_mute
    }
}

#[derive(Debug, Clone, Default)]
pub struct SipDialRequestBuilder {
    session_id: Option<String>,
    token: Option<String>,
    uri: Option<String>,
    tls: bool,
    from: Option<String>,
    headers: BTreeMap<String, String>,
    username: Option<String>,
    password: Option<String>,
    secure: Option<bool>,
    video: Option<bool>,
    observe_force_mute: Option<bool>,
}

impl SipDialRequestBuilder {
    pub fn session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// SIP URI to dial. With `tls` the `;transport=tls` parameter is appended.
    pub fn uri(mut self, uri: impl Into<String>, tls: bool) -> Self {
        self.uri = Some(uri.into());
        self.tls = tls;
        self
    }

    pub fn from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    /// Custom header forwarded in the SIP INVITE.
    pub fn add_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Encrypt media with SRTP.
    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = Some(secure);
        self
    }

    pub fn video(mut self, video: bool) -> Self {
        self.video = Some(video);
        self
    }

    pub fn observe_force_mute(mut self, observe: bool) -> Self {
        self.observe_force_mute = Some(observe);
        self
    }

    pub fn build(self) -> Result<SipDialRequest, VideoApiError> {
        let session = SessionTokenFields::build(self.session_id, self.token)?;

        let mut uri = require_text(self.uri, "uri")?;
        if self.tls && !uri.ends_with(TLS_TRANSPORT_SUFFIX) {
            uri.push_str(TLS_TRANSPORT_SUFFIX);
        }

        let auth = match (self.username, self.password) {
            (Some(username), password) => Some(SipAuth { username, password }),
            (None, Some(_)) => return Err(VideoApiError::missing("username")),
            (None, None) => None,
        };

        let request = SipDialRequest {
            session,
            sip: SipOptions {
                uri,
                from: self.from,
                headers: (!self.headers.is_empty()).then_some(self.headers),
                auth,
                secure: self.secure,
                video: self.video,
                observe_force_mute: self.observe_force_mute,
            },
        };
        request.validate()?;
        Ok(request)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SipDialResponse {
    pub id: String,
    pub connection_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream_id: Option<String>,
}
