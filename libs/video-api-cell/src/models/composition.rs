// libs/video-api-cell/src/models/composition.rs
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::VideoApiError;
use crate::models::enums::{lenient, OutputMode, Resolution, StreamMode};
use crate::models::layout::StreamCompositionLayout;
use crate::validation::{check_range, validate_session_id};

pub const MIN_BITRATE: u32 = 100_000;
pub const MAX_BITRATE: u32 = 6_000_000;

/// Fields shared by archives and broadcasts.
///
/// Embedded (flattened) in [`crate::models::Archive`] and
/// [`crate::models::Broadcast`]; request-only and response-only fields live
/// side by side and are omitted from JSON when unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamComposition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) id: Option<String>,
    #[serde(default)]
    pub(crate) session_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) application_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) created_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) updated_at: Option<i64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::deserialize"
    )]
    pub(crate) resolution: Option<Resolution>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::deserialize"
    )]
    pub(crate) output_mode: Option<OutputMode>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::deserialize"
    )]
    pub(crate) stream_mode: Option<StreamMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) layout: Option<StreamCompositionLayout>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) max_bitrate: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) has_audio: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) has_video: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) streams: Option<Vec<ArchiveStream>>,
}

impl StreamComposition {
    pub(crate) fn for_session(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            ..Self::default()
        }
    }

    /// Checks that apply to every composition regardless of kind.
    pub fn validate(&self) -> Result<(), VideoApiError> {
        validate_session_id(&self.session_id)?;

        if let Some(layout) = &self.layout {
            layout.validate()?;
        }

        if self.layout.is_some() && self.output_mode.is_some_and(|m| m != OutputMode::Composed) {
            return Err(VideoApiError::illegal_state(
                "layout can only be set when outputMode is composed",
            ));
        }

        if self.resolution.is_some() && self.output_mode == Some(OutputMode::Individual) {
            return Err(VideoApiError::illegal_state(
                "resolution cannot be set when outputMode is individual",
            ));
        }

        check_range(self.max_bitrate, MIN_BITRATE, MAX_BITRATE, "maxBitrate")
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn application_id(&self) -> Option<&str> {
        self.application_id.as_deref()
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at.and_then(from_epoch_millis)
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at.and_then(from_epoch_millis)
    }

    pub fn resolution(&self) -> Option<Resolution> {
        self.resolution
    }

    pub fn output_mode(&self) -> Option<OutputMode> {
        self.output_mode
    }

    pub fn stream_mode(&self) -> Option<StreamMode> {
        self.stream_mode
    }

    pub fn layout(&self) -> Option<&StreamCompositionLayout> {
        self.layout.as_ref()
    }

    pub fn max_bitrate(&self) -> Option<u32> {
        self.max_bitrate
    }

    pub fn has_audio(&self) -> Option<bool> {
        self.has_audio
    }

    pub fn has_video(&self) -> Option<bool> {
        self.has_video
    }

    pub fn streams(&self) -> &[ArchiveStream] {
        self.streams.as_deref().unwrap_or_default()
    }
}

pub(crate) fn from_epoch_millis(millis: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(millis).single()
}

/// A stream included in a manual-mode composition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveStream {
    pub stream_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_audio: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_video: Option<bool>,
}
