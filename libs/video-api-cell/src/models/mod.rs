// libs/video-api-cell/src/models/mod.rs

// ==============================================================================
// VIDEO API DOMAIN MODELS
// ==============================================================================

pub mod archive;
pub mod broadcast;
pub mod captions;
pub mod common;
pub mod composition;
pub mod connect;
pub mod enums;
pub mod layout;
pub mod list;
pub mod moderation;
pub mod project;
pub mod render;
pub mod session;
pub mod sip;
pub mod stream;
pub mod token;

pub use archive::{Archive, ArchiveBuilder};
pub use broadcast::{
    Broadcast, BroadcastBuilder, BroadcastOutputs, BroadcastSettings, BroadcastUrls, Hls, Rtmp,
};
pub use captions::{CaptionsRequest, CaptionsResponse, StartCaptionsRequest};
pub use common::SessionTokenFields;
pub use composition::{ArchiveStream, StreamComposition};
pub use connect::{ConnectRequest, ConnectResponse, Websocket};
pub use enums::{
    ArchiveMode, ArchiveStatus, AudioRate, BroadcastStatus, ConnectionState, Language, MediaMode,
    OutputMode, ProjectEnvironment, ProjectStatus, RenderStatus, Resolution, Role, RtmpStatus,
    ScreenLayoutType, StreamMode, VideoType,
};
pub use layout::StreamCompositionLayout;
pub use list::{
    ListArchivesResponse, ListBroadcastsResponse, ListConnectionsResponse, ListRendersResponse,
    ListResponse, ListStreamCompositionsRequest, ListStreamsResponse,
};
pub use moderation::{MuteSessionRequest, PatchComposedStreamsRequest, PlayDtmfRequest, SignalRequest};
pub use project::ProjectDetails;
pub use render::{RenderRequest, RenderResponse};
pub use session::{CreateSessionRequest, CreateSessionResponse};
pub use sip::{SipDialRequest, SipDialResponse};
pub use stream::{Connection, GetStreamResponse, SessionStream};
pub use token::TokenOptions;
