// libs/video-api-cell/src/services/endpoints.rs
//! Request construction and response decoding for each API operation.
//!
//! Everything here is pure; [`crate::services::VideoClient`] pairs these
//! functions with a transport.

use serde::de::DeserializeOwned;
use tracing::error;

use shared_models::error::ApiErrorBody;

use crate::error::VideoApiError;
use crate::models::stream::SetStreamLayoutRequest;
use crate::models::{
    Archive, Broadcast, CaptionsRequest, ConnectRequest, CreateSessionRequest,
    CreateSessionResponse, ListStreamCompositionsRequest, MuteSessionRequest,
    PatchComposedStreamsRequest, PlayDtmfRequest, RenderRequest, SessionStream, SignalRequest,
    SipDialRequest, StreamCompositionLayout,
};
use crate::services::transport::{ApiRequest, ApiResponse};
use reqwest::Method;

pub const CREATE_SESSION_PATH: &str = "/session/create";

fn project(app_id: &str) -> String {
    format!("/v2/project/{}", app_id)
}

fn session(app_id: &str, session_id: &str) -> String {
    format!("{}/session/{}", project(app_id), session_id)
}

fn connection(app_id: &str, session_id: &str, connection_id: Option<&str>) -> String {
    match connection_id {
        Some(cid) => format!("{}/connection/{}", session(app_id, session_id), cid),
        None => session(app_id, session_id),
    }
}

// ------------------------------------------------------------------------------
// Sessions, streams and connections
// ------------------------------------------------------------------------------

pub fn create_session(request: &CreateSessionRequest) -> ApiRequest {
    ApiRequest::post(CREATE_SESSION_PATH).with_form(request.form_params())
}

pub fn list_streams(app_id: &str, session_id: &str) -> ApiRequest {
    ApiRequest::get(format!("{}/stream", session(app_id, session_id)))
}

pub fn get_stream(app_id: &str, session_id: &str, stream_id: &str) -> ApiRequest {
    ApiRequest::get(format!("{}/stream/{}", session(app_id, session_id), stream_id))
}

pub fn set_stream_layout(
    app_id: &str,
    session_id: &str,
    streams: &[SessionStream],
) -> Result<ApiRequest, VideoApiError> {
    ApiRequest::new(Method::PUT, format!("{}/stream", session(app_id, session_id)))
        .with_json(&SetStreamLayoutRequest { items: streams })
}

pub fn list_connections(app_id: &str, session_id: &str) -> ApiRequest {
    ApiRequest::get(format!("{}/connection", session(app_id, session_id)))
}

/// Signals one connection, or every connection when `connection_id` is `None`.
pub fn signal(
    app_id: &str,
    session_id: &str,
    connection_id: Option<&str>,
    request: &SignalRequest,
) -> Result<ApiRequest, VideoApiError> {
    ApiRequest::post(format!(
        "{}/signal",
        connection(app_id, session_id, connection_id)
    ))
    .with_json(request)
}

pub fn force_disconnect(app_id: &str, session_id: &str, connection_id: &str) -> ApiRequest {
    ApiRequest::delete(connection(app_id, session_id, Some(connection_id)))
}

pub fn mute_stream(app_id: &str, session_id: &str, stream_id: &str) -> ApiRequest {
    ApiRequest::post(format!(
        "{}/stream/{}/mute",
        session(app_id, session_id),
        stream_id
    ))
}

pub fn mute_session(
    app_id: &str,
    session_id: &str,
    request: &MuteSessionRequest,
) -> Result<ApiRequest, VideoApiError> {
    ApiRequest::post(format!("{}/mute", session(app_id, session_id))).with_json(request)
}

pub fn play_dtmf(
    app_id: &str,
    session_id: &str,
    connection_id: Option<&str>,
    request: &PlayDtmfRequest,
) -> Result<ApiRequest, VideoApiError> {
    ApiRequest::post(format!(
        "{}/play-dtmf",
        connection(app_id, session_id, connection_id)
    ))
    .with_json(request)
}

// ------------------------------------------------------------------------------
// Archives
// ------------------------------------------------------------------------------

pub fn create_archive(app_id: &str, archive: &Archive) -> Result<ApiRequest, VideoApiError> {
    ApiRequest::post(format!("{}/archive", project(app_id))).with_json(archive)
}

pub fn list_archives(app_id: &str, request: &ListStreamCompositionsRequest) -> ApiRequest {
    ApiRequest::get(format!("{}/archive", project(app_id))).with_query(request.query_params())
}

pub fn get_archive(app_id: &str, archive_id: &str) -> ApiRequest {
    ApiRequest::get(format!("{}/archive/{}", project(app_id), archive_id))
}

pub fn stop_archive(app_id: &str, archive_id: &str) -> ApiRequest {
    ApiRequest::post(format!("{}/archive/{}/stop", project(app_id), archive_id))
}

pub fn delete_archive(app_id: &str, archive_id: &str) -> ApiRequest {
    ApiRequest::delete(format!("{}/archive/{}", project(app_id), archive_id))
}

pub fn update_archive_layout(
    app_id: &str,
    archive_id: &str,
    layout: &StreamCompositionLayout,
) -> Result<ApiRequest, VideoApiError> {
    ApiRequest::new(
        Method::PUT,
        format!("{}/archive/{}/layout", project(app_id), archive_id),
    )
    .with_json(layout)
}

pub fn patch_archive_streams(
    app_id: &str,
    archive_id: &str,
    request: &PatchComposedStreamsRequest,
) -> Result<ApiRequest, VideoApiError> {
    ApiRequest::new(
        Method::PATCH,
        format!("{}/archive/{}/streams", project(app_id), archive_id),
    )
    .with_json(request)
}

// ------------------------------------------------------------------------------
// Broadcasts
// ------------------------------------------------------------------------------

pub fn create_broadcast(app_id: &str, broadcast: &Broadcast) -> Result<ApiRequest, VideoApiError> {
    ApiRequest::post(format!("{}/broadcast", project(app_id))).with_json(broadcast)
}

pub fn list_broadcasts(app_id: &str, request: &ListStreamCompositionsRequest) -> ApiRequest {
    ApiRequest::get(format!("{}/broadcast", project(app_id))).with_query(request.query_params())
}

pub fn get_broadcast(app_id: &str, broadcast_id: &str) -> ApiRequest {
    ApiRequest::get(format!("{}/broadcast/{}", project(app_id), broadcast_id))
}

pub fn stop_broadcast(app_id: &str, broadcast_id: &str) -> ApiRequest {
    ApiRequest::post(format!("{}/broadcast/{}/stop", project(app_id), broadcast_id))
}

pub fn update_broadcast_layout(
    app_id: &str,
    broadcast_id: &str,
    layout: &StreamCompositionLayout,
) -> Result<ApiRequest, VideoApiError> {
    ApiRequest::new(
        Method::PUT,
        format!("{}/broadcast/{}/layout", project(app_id), broadcast_id),
    )
    .with_json(layout)
}

pub fn patch_broadcast_streams(
    app_id: &str,
    broadcast_id: &str,
    request: &PatchComposedStreamsRequest,
) -> Result<ApiRequest, VideoApiError> {
    ApiRequest::new(
        Method::PATCH,
        format!("{}/broadcast/{}/streams", project(app_id), broadcast_id),
    )
    .with_json(request)
}

// ------------------------------------------------------------------------------
// SIP, captions, experience composer and audio connector
// ------------------------------------------------------------------------------

pub fn sip_dial(app_id: &str, request: &SipDialRequest) -> Result<ApiRequest, VideoApiError> {
    ApiRequest::post(format!("{}/dial", project(app_id))).with_json(request)
}

pub fn start_captions(app_id: &str, request: &CaptionsRequest) -> Result<ApiRequest, VideoApiError> {
    ApiRequest::post(format!("{}/captions", project(app_id))).with_json(request)
}

pub fn stop_captions(app_id: &str, captions_id: &str) -> ApiRequest {
    ApiRequest::post(format!("{}/captions/{}/stop", project(app_id), captions_id))
}

pub fn start_render(app_id: &str, request: &RenderRequest) -> Result<ApiRequest, VideoApiError> {
    ApiRequest::post(format!("{}/render", project(app_id))).with_json(request)
}

pub fn list_renders(app_id: &str, request: &ListStreamCompositionsRequest) -> ApiRequest {
    ApiRequest::get(format!("{}/render", project(app_id))).with_query(request.query_params())
}

pub fn get_render(app_id: &str, render_id: &str) -> ApiRequest {
    ApiRequest::get(format!("{}/render/{}", project(app_id), render_id))
}

pub fn stop_render(app_id: &str, render_id: &str) -> ApiRequest {
    ApiRequest::delete(format!("{}/render/{}", project(app_id), render_id))
}

pub fn connect(app_id: &str, request: &ConnectRequest) -> Result<ApiRequest, VideoApiError> {
    ApiRequest::post(format!("{}/connect", project(app_id))).with_json(request)
}

pub fn get_project(app_id: &str) -> ApiRequest {
    ApiRequest::get(project(app_id))
}

// ------------------------------------------------------------------------------
// Response handling
// ------------------------------------------------------------------------------

/// Maps a non-2xx response to [`VideoApiError::Http`].
pub fn check_status(response: &ApiResponse) -> Result<(), VideoApiError> {
    if response.is_success() {
        return Ok(());
    }

    let body = ApiErrorBody::parse(&response.body);
    error!("Video API request failed: {} - {}", response.status, response.body);

    Err(VideoApiError::Http {
        status: response.status,
        message: body.summary(),
    })
}

pub fn parse_json<T: DeserializeOwned>(response: &ApiResponse) -> Result<T, VideoApiError> {
    check_status(response)?;
    serde_json::from_str(&response.body).map_err(|e| VideoApiError::Json {
        message: format!("Failed to parse response: {}", e),
    })
}

pub fn parse_empty(response: &ApiResponse) -> Result<(), VideoApiError> {
    check_status(response)
}

/// Session creation answers with a single-element array.
pub fn parse_create_session(response: &ApiResponse) -> Result<CreateSessionResponse, VideoApiError> {
    let sessions: Vec<CreateSessionResponse> = parse_json(response)?;
    sessions.into_iter().next().ok_or_else(|| VideoApiError::Json {
        message: "Session creation returned no sessions".to_string(),
    })
}
