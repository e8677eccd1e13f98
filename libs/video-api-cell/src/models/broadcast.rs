// libs/video-api-cell/src/models/broadcast.rs
use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::VideoApiError;
use crate::models::composition::StreamComposition;
use crate::models::enums::{
    lenient, BroadcastStatus, OutputMode, Resolution, RtmpStatus, StreamMode,
};
use crate::models::layout::StreamCompositionLayout;
use crate::validation::{check_range, require_non_empty, require_text};

pub const MIN_BROADCAST_DURATION_SECS: u32 = 60;
pub const MAX_BROADCAST_DURATION_SECS: u32 = 36_000;
pub const MAX_RTMP_TARGETS: usize = 5;

// ==============================================================================
// OUTPUT TARGETS
// ==============================================================================

/// An RTMP server the broadcast is pushed to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rtmp {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    server_url: String,
    stream_name: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::deserialize"
    )]
    status: Option<RtmpStatus>,
}

impl Rtmp {
    pub fn builder() -> RtmpBuilder {
        RtmpBuilder::default()
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    pub fn stream_name(&self) -> &str {
        &self.stream_name
    }

    pub fn validate(&self) -> Result<(), VideoApiError> {
        require_non_empty(&self.server_url, "serverUrl")?;
        require_non_empty(&self.stream_name, "streamName")
    }

    pub fn status(&self) -> Option<RtmpStatus> {
        self.status
    }
}

#[derive(Debug, Clone, Default)]
pub struct RtmpBuilder {
    id: Option<String>,
    server_url: Option<String>,
    stream_name: Option<String>,
}

impl RtmpBuilder {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn server_url(mut self, server_url: impl Into<String>) -> Self {
        self.server_url = Some(server_url.into());
        self
    }

    pub fn stream_name(mut self, stream_name: impl Into<String>) -> Self {
        self.stream_name = Some(stream_name.into());
        self
    }

    pub fn build(self) -> Result<Rtmp, VideoApiError> {
        Ok(Rtmp {
            id: self.id,
            server_url: require_text(self.server_url, "serverUrl")?,
            stream_name: require_text(self.stream_name, "streamName")?,
            status: None,
        })
    }
}

/// HLS output settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hls {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    dvr: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    low_latency: Option<bool>,
}

impl Hls {
    pub fn builder() -> HlsBuilder {
        HlsBuilder::default()
    }

    pub fn dvr(&self) -> Option<bool> {
        self.dvr
    }

    pub fn low_latency(&self) -> Option<bool> {
        self.low_latency
    }

    pub fn validate(&self) -> Result<(), VideoApiError> {
        if self.dvr == Some(true) && self.low_latency == Some(true) {
            return Err(VideoApiError::illegal_state(
                "dvr and lowLatency cannot both be enabled",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct HlsBuilder {
    dvr: Option<bool>,
    low_latency: Option<bool>,
}

impl HlsBuilder {
    /// Keeps a rewindable window of the stream.
    pub fn dvr(mut self, dvr: bool) -> Self {
        self.dvr = Some(dvr);
        self
    }

    pub fn low_latency(mut self, low_latency: bool) -> Self {
        self.low_latency = Some(low_latency);
        self
    }

    pub fn build(self) -> Result<Hls, VideoApiError> {
        let hls = Hls {
            dvr: self.dvr,
            low_latency: self.low_latency,
        };
        hls.validate()?;
        Ok(hls)
    }
}

/// Requested outputs, sent when starting a broadcast.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BroadcastOutputs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hls: Option<Hls>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rtmp: Option<Vec<Rtmp>>,
}

/// Live output locations reported by the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BroadcastUrls {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hls: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rtmp: Option<Vec<Rtmp>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BroadcastSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hls: Option<Hls>,
}

// ==============================================================================
// BROADCAST
// ==============================================================================

/// A live re-stream of a session to RTMP and/or HLS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Broadcast {
    #[serde(flatten)]
    composition: StreamComposition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    multi_broadcast_tag: Option<String>,
    /// Seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_duration: Option<u32>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::deserialize"
    )]
    status: Option<BroadcastStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    outputs: Option<BroadcastOutputs>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    broadcast_urls: Option<BroadcastUrls>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    settings: Option<BroadcastSettings>,
}

impl Broadcast {
    pub fn builder(session_id: impl Into<String>) -> BroadcastBuilder {
        BroadcastBuilder {
            composition: StreamComposition::for_session(session_id),
            multi_broadcast_tag: None,
            max_duration: None,
            hls: None,
            rtmp: Vec::new(),
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

    pub fn multi_broadcast_tag(&self) -> Option<&str> {
        self.multi_broadcast_tag.as_deref()
    }

    pub fn max_duration_seconds(&self) -> Option<u32> {
        self.max_duration
    }

    pub fn max_duration(&self) -> Option<Duration> {
        self.max_duration.map(|secs| Duration::seconds(secs.into()))
    }

    pub fn status(&self) -> Option<BroadcastStatus> {
        self.status
    }

    pub fn outputs(&self) -> Option<&BroadcastOutputs> {
        self.outputs.as_ref()
    }

    pub fn broadcast_urls(&self) -> Option<&BroadcastUrls> {
        self.broadcast_urls.as_ref()
    }

    /// RTMP targets as reported by the API, or as requested.
    pub fn rtmps(&self) -> &[Rtmp] {
        self.broadcast_urls
            .as_ref()
            .and_then(|urls| urls.rtmp.as_deref())
            .or_else(|| self.outputs.as_ref().and_then(|o| o.rtmp.as_deref()))
            .unwrap_or_default()
    }

    /// HLS settings as reported by the API, or as requested.
    pub fn hls(&self) -> Option<&Hls> {
        self.settings
            .as_ref()
            .and_then(|s| s.hls.as_ref())
            .or_else(|| self.outputs.as_ref().and_then(|o| o.hls.as_ref()))
    }

    pub fn hls_url(&self) -> Option<&str> {
        self.broadcast_urls.as_ref().and_then(|u| u.hls.as_deref())
    }

    /// Rules a broadcast must satisfy before it can be started. Only the
    /// requested `outputs` are considered.
    pub fn validate(&self) -> Result<(), VideoApiError> {
        self.composition.validate()?;

        let hls = self.outputs.as_ref().and_then(|o| o.hls.as_ref());
        let rtmp = self
            .outputs
            .as_ref()
            .and_then(|o| o.rtmp.as_deref())
            .unwrap_or_default();

        if hls.is_none() && rtmp.is_empty() {
            return Err(VideoApiError::illegal_state(
                "at least one RTMP target or HLS output is required",
            ));
        }

        if rtmp.len() > MAX_RTMP_TARGETS {
            return Err(VideoApiError::invalid(
                "rtmp",
                format!(
                    "{} RTMP targets given, at most {} are allowed",
                    rtmp.len(),
                    MAX_RTMP_TARGETS
                ),
            ));
        }

        if let Some(hls) = hls {
            hls.validate()?;
        }
        for target in rtmp {
            target.validate()?;
        }

        check_range(
            self.max_duration,
            MIN_BROADCAST_DURATION_SECS,
            MAX_BROADCAST_DURATION_SECS,
            "maxDuration",
        )
    }
}

#[derive(Debug, Clone)]
pub struct BroadcastBuilder {
    composition: StreamComposition,
    multi_broadcast_tag: Option<String>,
    max_duration: Option<u32>,
    hls: Option<Hls>,
    rtmp: Vec<Rtmp>,
}

impl BroadcastBuilder {
    pub fn multi_broadcast_tag(mut self, tag: impl Into<String>) -> Self {
        self.multi_broadcast_tag = Some(tag.into());
        self
    }

    pub fn max_duration(mut self, seconds: u32) -> Self {
        self.max_duration = Some(seconds);
        self
    }

    pub fn hls(mut self, hls: Hls) -> Self {
        self.hls = Some(hls);
        self
    }

    pub fn add_rtmp(mut self, rtmp: Rtmp) -> Self {
        self.rtmp.push(rtmp);
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

    pub fn has_audio(mut self, has_audio: bool) -> Self {
        self.composition.has_audio = Some(has_audio);
        self
    }

    pub fn has_video(mut self, has_video: bool) -> Self {
        self.composition.has_video = Some(has_video);
        self
    }

    pub fn build(self) -> Result<Broadcast, VideoApiError> {
        let outputs = BroadcastOutputs {
            hls: self.hls,
            rtmp: (!self.rtmp.is_empty()).then_some(self.rtmp),
        };

        let broadcast = Broadcast {
            composition: self.composition,
            multi_broadcast_tag: self.multi_broadcast_tag,
            max_duration: self.max_duration,
            status: None,
            outputs: Some(outputs),
            broadcast_urls: None,
            settings: None,
        };
        broadcast.validate()?;
        Ok(broadcast)
    }
}
