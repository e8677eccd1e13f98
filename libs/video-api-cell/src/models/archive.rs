// libs/video-api-cell/src/models/archive.rs
use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::VideoApiError;
use crate::models::composition::StreamComposition;
use crate::models::enums::{lenient, ArchiveStatus, OutputMode, Resolution, StreamMode};
use crate::models::layout::StreamCompositionLayout;
use crate::validation::check_range;

pub const MIN_QUANTIZATION_PARAMETER: u32 = 15;
pub const MAX_QUANTIZATION_PARAMETER: u32 = 40;

/// A recording of a session, used both to start an archive and as the
/// archive returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Archive {
    #[serde(flatten)]
    composition: StreamComposition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    multi_archive_tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    quantization_parameter: Option<u32>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::deserialize"
    )]
    status: Option<ArchiveStatus>,
    /// Seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    duration: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

impl Archive {
    pub fn builder(session_id: impl Into<String>) -> ArchiveBuilder {
        ArchiveBuilder {
            composition: StreamComposition::for_session(session_id),
            name: None,
            multi_archive_tag: None,
            quantization_parameter: None,
        }
    }

    pub fn composition(&self) -> &StreamComposition {
        &self.composition
    }

    pub fn id(&self) -> Option<&str> {
        self.composition.id()
    }

    pub fn session_id(&self) -> &str {
        self.composition.session_id()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn multi_archive_tag(&self) -> Option<&str> {
        self.multi_archive_tag.as_deref()
    }

    pub fn quantization_parameter(&self) -> Option<u32> {
        self.quantization_parameter
    }

    pub fn status(&self) -> Option<ArchiveStatus> {
        self.status
    }

    pub fn duration_seconds(&self) -> Option<i64> {
        self.duration
    }

    pub fn duration(&self) -> Option<Duration> {
        self.duration.map(Duration::seconds)
    }

    pub fn size(&self) -> Option<u64> {
        self.size
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    /// Rules an archive must satisfy before it can be started.
    pub fn validate(&self) -> Result<(), VideoApiError> {
        if self.quantization_parameter.is_some() && self.composition.max_bitrate.is_some() {
            return Err(VideoApiError::illegal_state(
                "quantizationParameter and maxBitrate cannot both be set",
            ));
        }

        self.composition.validate()?;
        check_range(
            self.quantization_parameter,
            MIN_QUANTIZATION_PARAMETER,
            MAX_QUANTIZATION_PARAMETER,
            "quantizationParameter",
        )
    }
}

#[derive(Debug, Clone)]
pub struct ArchiveBuilder {
    composition: StreamComposition,
    name: Option<String>,
    multi_archive_tag: Option<String>,
    quantization_parameter: Option<u32>,
}

impl ArchiveBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Lets more than one archive run on the same session at once.
    pub fn multi_archive_tag(mut self, tag: impl Into<String>) -> Self {
        self.multi_archive_tag = Some(tag.into());
        self
    }

    pub fn resolution(mut self, resolution: Resolution) -> Self {
        self.composition.resolution = Some(resolution);
        self
    }

    pub fn output_mode(mut self, output_mode: OutputMode) -> Self {
        self.composition.output_mode = Some(output_mode);
        self
    }

    pub fn stream_mode(mut self, stream_mode: StreamMode) -> Self {
        self.composition.stream_mode = Some(stream_mode);
        self
    }

    pub fn layout(mut self, layout: StreamCompositionLayout) -> Self {
        self.composition.layout = Some(layout);
        self
    }

    pub fn max_bitrate(mut self, bits_per_second: u32) -> Self {
        self.composition.max_bitrate = Some(bits_per_second);
        self
    }

    pub fn quantization_parameter(mut self, qp: u32) -> Self {
        self.quantization_parameter = Some(qp);
        self
    }

    pub fn has_audio(mut self, has_audio: bool) -> Self {
        self.composition.has_audio = Some(has_audio);
        self
    }

    pub fn has_video(mut self, has_video: bool) -> Self {
        self.composition.has_video = Some(has_video);
        self
    }

    pub fn build(self) -> Result<Archive, VideoApiError> {
        let archive = Archive {
            composition: self.composition,
            name: self.name,
            multi_archive_tag: self.multi_archive_tag,
            quantization_parameter: self.quantization_parameter,
            status: None,
            duration: None,
            size: None,
            url: None,
            reason: None,
        };
        archive.validate()?;
        Ok(archive)
    }
}
