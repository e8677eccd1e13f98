// libs/video-api-cell/src/models/enums.rs
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

// ==============================================================================
// COMPOSITION SETTINGS
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resolution {
    #[serde(rename = "640x480")]
    SdLandscape,
    #[serde(rename = "480x640")]
    SdPortrait,
    #[serde(rename = "1280x720")]
    HdLandscape,
    #[serde(rename = "720x1280")]
    HdPortrait,
    #[serde(rename = "1920x1080")]
    FhdLandscape,
    #[serde(rename = "1080x1920")]
    FhdPortrait,
}

/// Single merged file, or one file per participant stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputMode {
    #[serde(rename = "composed")]
    Composed,
    #[serde(rename = "individual")]
    Individual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StreamMode {
    #[serde(rename = "auto")]
    Auto,      // All streams in the session are included
    #[serde(rename = "manual")]
    Manual,    // Streams are added and removed explicitly
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScreenLayoutType {
    #[serde(rename = "bestFit")]
    BestFit,
    #[serde(rename = "custom")]
    Custom,
    #[serde(rename = "horizontalPresentation")]
    Horizontal,
    #[serde(rename = "pip")]
    Pip,
    #[serde(rename = "verticalPresentation")]
    Vertical,
}

// ==============================================================================
// LIFECYCLE STATUSES
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArchiveStatus {
    #[serde(rename = "available")]
    Available,
    #[serde(rename = "expired")]
    Expired,
    #[serde(rename = "failed")]
    Failed,
    #[serde(rename = "paused")]
    Paused,
    #[serde(rename = "started")]
    Started,
    #[serde(rename = "stopped")]
    Stopped,
    #[serde(rename = "uploaded")]
    Uploaded,
    #[serde(rename = "deleted")]
    Deleted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BroadcastStatus {
    #[serde(rename = "started")]
    Started,
    #[serde(rename = "stopped")]
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RtmpStatus {
    #[serde(rename = "connecting")]
    Connecting,
    #[serde(rename = "live")]
    Live,
    #[serde(rename = "offline")]
    Offline,
    #[serde(rename = "error")]
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RenderStatus {
    #[serde(rename = "starting")]
    Starting,
    #[serde(rename = "started")]
    Started,
    #[serde(rename = "stopped")]
    Stopped,
    #[serde(rename = "failed")]
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConnectionState {
    #[serde(rename = "connecting")]
    Connecting,
    #[serde(rename = "connected")]
    Connected,
    #[serde(rename = "disconnected")]
    Disconnected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectStatus {
    #[serde(rename = "ACTIVE")]
    Active,
    #[serde(rename = "SUSPENDED")]
    Suspended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectEnvironment {
    #[serde(rename = "standard")]
    Standard,
    #[serde(rename = "enterprise")]
    Enterprise,
}

// ==============================================================================
// SESSION & PARTICIPANTS
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "subscriber")]
    Subscriber,
    #[serde(rename = "publisher")]
    #[default]
    Publisher,
    #[serde(rename = "publisheronly")]
    PublisherOnly,
    #[serde(rename = "moderator")]
    Moderator,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Subscriber => "subscriber",
            Role::Publisher => "publisher",
            Role::PublisherOnly => "publisheronly",
            Role::Moderator => "moderator",
        }
    }
}

/// Whether media flows through the media router or peer to peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaMode {
    #[serde(rename = "routed")]
    Routed,
    #[serde(rename = "relayed")]
    Relayed,
}

impl MediaMode {
    /// Value of the `p2p.preference` form parameter.
    pub fn p2p_preference(&self) -> &'static str {
        match self {
            MediaMode::Routed => "disabled",
            MediaMode::Relayed => "enabled",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArchiveMode {
    #[serde(rename = "manual")]
    Manual,
    #[serde(rename = "always")]
    Always,
}

impl ArchiveMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArchiveMode::Manual => "manual",
            ArchiveMode::Always => "always",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VideoType {
    #[serde(rename = "camera")]
    Camera,
    #[serde(rename = "screen")]
    Screen,
    #[serde(rename = "custom")]
    Custom,
}

/// BCP-47 caption language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "en-US")]
    EnUs,
}

/// Sample rate of the audio sent over an audio connector websocket.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioRate {
    L16_8K,
    L16_16K,
}

impl AudioRate {
    pub fn hertz(&self) -> u32 {
        match self {
            AudioRate::L16_8K => 8000,
            AudioRate::L16_16K => 16000,
        }
    }
}

impl Serialize for AudioRate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.hertz())
    }
}

impl<'de> Deserialize<'de> for AudioRate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match u32::deserialize(deserializer)? {
            8000 => Ok(AudioRate::L16_8K),
            16000 => Ok(AudioRate::L16_16K),
            other => Err(de::Error::custom(format!("unsupported audio rate {}", other))),
        }
    }
}

// ==============================================================================
// LENIENT DECODING
// ==============================================================================

/// Decodes an optional enum field, mapping unrecognised strings to `None`.
///
/// Values that are not strings at all (numbers, objects, arrays) are still an
/// error. Use as `#[serde(default, deserialize_with = "lenient::deserialize")]`.
pub mod lenient {
    use serde::de::{self, DeserializeOwned};
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => Ok(None),
            Some(value @ Value::String(_)) => Ok(serde_json::from_value(value).ok()),
            Some(other) => Err(de::Error::custom(format!(
                "expected an enum string, found {}",
                other
            ))),
        }
    }
}
