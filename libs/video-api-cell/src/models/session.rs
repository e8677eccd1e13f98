// libs/video-api-cell/src/models/session.rs
use std::net::IpAddr;

use serde::{Deserialize, Serialize};

use crate::error::VideoApiError;
use crate::models::enums::{ArchiveMode, MediaMode};

/// Options for creating a new session. Sent as a form body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateSessionRequest {
    location: Option<IpAddr>,
    media_mode: Option<MediaMode>,
    archive_mode: Option<ArchiveMode>,
    e2ee: Option<bool>,
}

impl CreateSessionRequest {
    pub fn builder() -> CreateSessionRequestBuilder {
        CreateSessionRequestBuilder::default()
    }

    pub fn location(&self) -> Option<IpAddr> {
        self.location
    }

    pub fn media_mode(&self) -> Option<MediaMode> {
        self.media_mode
    }

    pub fn archive_mode(&self) -> Option<ArchiveMode> {
        self.archive_mode
    }

    pub fn e2ee(&self) -> Option<bool> {
        self.e2ee
    }

    pub fn form_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(archive_mode) = self.archive_mode {
            params.push(("archiveMode".to_string(), archive_mode.as_str().to_string()));
        }
        if let Some(location) = self.location {
            params.push(("location".to_string(), location.to_string()));
        }
        if let Some(media_mode) = self.media_mode {
            params.push(("p2p.preference".to_string(), media_mode.p2p_preference().to_string()));
        }
        if let Some(e2ee) = self.e2ee {
            params.push(("e2ee".to_string(), e2ee.to_string()));
        }
        params
    }
}

#[derive(Debug, Clone, Default)]
pub struct CreateSessionRequestBuilder {
    location: Option<String>,
    media_mode: Option<MediaMode>,
    archive_mode: Option<ArchiveMode>,
    e2ee: Option<bool>,
}

impl CreateSessionRequestBuilder {
    /// IP address hint used to pick the media server region.
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn media_mode(mut self, media_mode: MediaMode) -> Self {
        self.media_mode = Some(media_mode);
        self
    }

    pub fn archive_mode(mut self, archive_mode: ArchiveMode) -> Self {
        self.archive_mode = Some(archive_mode);
        self
    }

    pub fn e2ee(mut self, e2ee: bool) -> Self {
        self.e2ee = Some(e2ee);
        self
    }

    pub fn build(self) -> Result<CreateSessionRequest, VideoApiError> {
        let location = match self.location {
            Some(raw) => Some(raw.trim().parse::<IpAddr>().map_err(|_| {
                VideoApiError::invalid("location", format!("'{}' is not an IP address", raw))
            })?),
            None => None,
        };

        if self.archive_mode == Some(ArchiveMode::Always) {
            if self.media_mode == Some(MediaMode::Relayed) {
                return Err(VideoApiError::illegal_state(
                    "archiveMode always requires the routed media mode",
                ));
            }
            if self.e2ee == Some(true) {
                return Err(VideoApiError::illegal_state(
                    "end-to-end encrypted sessions cannot be archived automatically",
                ));
            }
        }

        Ok(CreateSessionRequest {
            location,
            media_mode: self.media_mode,
            archive_mode: self.archive_mode,
            e2ee: self.e2ee,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateSessionResponse {
    pub session_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_dt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_server_url: Option<String>,
}
