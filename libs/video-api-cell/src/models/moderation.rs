// libs/video-api-cell/src/models/moderation.rs
//! Payloads for signaling, muting, DTMF and composition stream changes.

use serde::{Deserialize, Serialize};

use crate::error::VideoApiError;
use crate::validation::{check_length, require_text, validate_dtmf_digits};

pub const MAX_SIGNAL_TYPE_LENGTH: usize = 128;
pub const MAX_SIGNAL_DATA_LENGTH: usize = 8192;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalRequest {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    signal_type: Option<String>,
    data: String,
}

impl SignalRequest {
    pub fn builder() -> SignalRequestBuilder {
        SignalRequestBuilder::default()
    }

    pub fn signal_type(&self) -> Option<&str> {
        self.signal_type.as_deref()
    }

    pub fn data(&self) -> &str {
        &self.data
    }
}

#[derive(Debug, Clone, Default)]
pub struct SignalRequestBuilder {
    signal_type: Option<String>,
    data: Option<String>,
}

impl SignalRequestBuilder {
    pub fn signal_type(mut self, signal_type: impl Into<String>) -> Self {
        self.signal_type = Some(signal_type.into());
        self
    }

    pub fn data(mut self, data: impl Into<String>) -> Self {
        self.data = Some(data.into());
        self
    }

    pub fn build(self) -> Result<SignalRequest, VideoApiError> {
        let data = require_text(self.data, "data")?;
        check_length(Some(&data), 1, MAX_SIGNAL_DATA_LENGTH, "data")?;
        check_length(self.signal_type.as_deref(), 0, MAX_SIGNAL_TYPE_LENGTH, "type")?;
        Ok(SignalRequest {
            signal_type: self.signal_type,
            data,
        })
    }
}

/// Mutes every publisher in a session, optionally sparing some streams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MuteSessionRequest {
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excluded_stream_ids: Option<Vec<String>>,
}

impl MuteSessionRequest {
    pub fn new(active: bool, excluded_stream_ids: Vec<String>) -> Self {
        Self {
            active,
            excluded_stream_ids: (!excluded_stream_ids.is_empty()).then_some(excluded_stream_ids),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayDtmfRequest {
    digits: String,
}

impl PlayDtmfRequest {
    pub fn new(digits: impl Into<String>) -> Result<Self, VideoApiError> {
        let digits = digits.into();
        validate_dtmf_digits(&digits)?;
        Ok(Self { digits })
    }

    pub fn digits(&self) -> &str {
        &self.digits
    }
}

/// Adds a stream to, or removes one from, a manual-mode archive or broadcast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchComposedStreamsRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    add_stream: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    remove_stream: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    has_audio: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    has_video: Option<bool>,
}

impl PatchComposedStreamsRequest {
    pub fn add(stream_id: impl Into<String>, has_audio: Option<bool>, has_video: Option<bool>) -> Self {
        Self {
            add_stream: Some(stream_id.into()),
            remove_stream: None,
            has_audio,
            has_video,
        }
    }

    pub fn remove(stream_id: impl Into<String>) -> Self {
        Self {
            add_stream: None,
            remove_stream: Some(stream_id.into()),
            has_audio: None,
            has_video: None,
        }
    }

    pub fn stream_id(&self) -> &str {
        self.add_stream
            .as_deref()
            .or(self.remove_stream.as_deref())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    #[test]
    fn test_signal_bounds() {
        assert!(SignalRequest::builder().data("x".repeat(MAX_SIGNAL_DATA_LENGTH)).build().is_ok());
        assert!(SignalRequest::builder()
            .data("x".repeat(MAX_SIGNAL_DATA_LENGTH + 1))
            .build()
            .is_err());
        assert_matches!(
            SignalRequest::builder()
                .signal_type("t".repeat(MAX_SIGNAL_TYPE_LENGTH + 1))
                .data("hi")
                .build(),
            Err(VideoApiError::InvalidArgument { field: "type", .. })
        );
        assert_matches!(
            SignalRequest::builder().build(),
            Err(VideoApiError::MissingField { field: "data" })
        );
    }

    #[test]
    fn test_signal_serialization() {
        let signal = SignalRequest::builder().signal_type("chat").data("hello").build().unwrap();
        assert_eq!(
            serde_json::to_value(&signal).unwrap(),
            json!({"type": "chat", "data": "hello"})
        );
    }

    #[test]
    fn test_mute_session_omits_empty_exclusions() {
        assert_eq!(
            serde_json::to_value(MuteSessionRequest::new(true, vec![])).unwrap(),
            json!({"active": true})
        );
        assert_eq!(
            serde_json::to_value(MuteSessionRequest::new(false, vec!["s1".into()])).unwrap(),
            json!({"active": false, "excludedStreamIds": ["s1"]})
        );
    }

    #[test]
    fn test_patch_streams_shapes() {
        assert_eq!(
            serde_json::to_value(PatchComposedStreamsRequest::add("s1", Some(true), None)).unwrap(),
            json!({"addStream": "s1", "hasAudio": true})
        );
        assert_eq!(
            serde_json::to_value(PatchComposedStreamsRequest::remove("s1")).unwrap(),
            json!({"removeStream": "s1"})
        );
    }

    #[test]
    fn test_dtmf_digits_validated() {
        assert!(PlayDtmfRequest::new("1713").is_ok());
        assert!(PlayDtmfRequest::new("17x").is_err());
    }
}
