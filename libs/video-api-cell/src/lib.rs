// libs/video-api-cell/src/lib.rs
//! # Video API Cell
//!
//! Typed client for the hosted video platform REST API: sessions, client
//! tokens, archives, live broadcasts, moderation, SIP dial-out, live
//! captions, experience composer renders and audio connector websockets.
//!
//! ## Architecture
//!
//! ```text
//! +-----------------------------------------------------+
//! |                  Video API Cell                     |
//! +-----------------------------------------------------+
//! |  models/        |  Request/response DTOs & builders |
//! |  validation.rs  |  Shared field checks              |
//! |  error.rs       |  VideoApiError                    |
//! |  services/      |  API access layer                 |
//! |    endpoints.rs |  Paths, methods, response parsing |
//! |    transport.rs |  HttpTransport + reqwest impl     |
//! |    client.rs    |  VideoClient facade               |
//! +-----------------------------------------------------+
//! ```
//!
//! Builders validate on `build()`, so a value that exists is one the API
//! will accept. Response-only fields are optional and unknown enum strings
//! decode to `None`.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use shared_config::AppConfig;
//! use video_api_cell::models::{Archive, OutputMode, Role, TokenOptions};
//! use video_api_cell::VideoClient;
//!
//! # async fn example() -> Result<(), video_api_cell::VideoApiError> {
//! let config = AppConfig::from_env();
//! let client = VideoClient::new(&config)?;
//!
//! let session = client.create_session(&Default::default()).await?;
//! let token = client.generate_token(
//!     &session.session_id,
//!     &TokenOptions::builder().role(Role::Moderator).build()?,
//! )?;
//!
//! let archive = Archive::builder(&session.session_id)
//!     .name("Weekly sync")
//!     .output_mode(OutputMode::Composed)
//!     .build()?;
//! let started = client.create_archive(&archive).await?;
//! # let _ = (token, started);
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! - `VIDEO_API_APPLICATION_ID` - application identifier
//! - `VIDEO_API_PRIVATE_KEY` or `VIDEO_API_PRIVATE_KEY_PATH` - RSA private key (PEM)
//! - `VIDEO_API_BASE_URL` - API base URL (optional, defaults to production)
//! - `VIDEO_API_TIMEOUT_SECS` - request timeout (optional, defaults to 30)

pub mod error;
pub mod models;
pub mod services;
pub mod validation;

// Re-export commonly used types
pub use error::VideoApiError;

pub use models::{
    Archive, Broadcast, CaptionsRequest, ConnectRequest, CreateSessionRequest,
    CreateSessionResponse, RenderRequest, SipDialRequest, StreamCompositionLayout, TokenOptions,
};

pub use services::{HttpTransport, ReqwestTransport, VideoClient};
