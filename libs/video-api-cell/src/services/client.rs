// libs/video-api-cell/src/services/client.rs
use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, info};

use shared_config::AppConfig;
use shared_utils::jwt::JwtSigner;

use crate::error::VideoApiError;
use crate::models::{
    Archive, Broadcast, CaptionsRequest, CaptionsResponse, ConnectRequest, ConnectResponse,
    CreateSessionRequest, CreateSessionResponse, GetStreamResponse, ListArchivesResponse,
    ListBroadcastsResponse, ListConnectionsResponse, ListRendersResponse,
    ListStreamCompositionsRequest, ListStreamsResponse, MuteSessionRequest,
    PatchComposedStreamsRequest, PlayDtmfRequest, ProjectDetails, RenderRequest, RenderResponse,
    SessionStream, SignalRequest, SipDialRequest, SipDialResponse, StreamCompositionLayout,
    TokenOptions,
};
use crate::services::endpoints;
use crate::services::transport::{ApiRequest, HttpTransport, ReqwestTransport};
use crate::validation::{validate_session_id, validate_uuid};

/// Entry point for every video API operation.
///
/// Arguments are validated before anything is sent. The client keeps no
/// state between calls and never retries.
#[derive(Clone)]
pub struct VideoClient {
    signer: Arc<JwtSigner>,
    transport: Arc<dyn HttpTransport>,
}

impl VideoClient {
    pub fn new(config: &AppConfig) -> Result<Self, VideoApiError> {
        if !config.is_video_api_configured() {
            return Err(VideoApiError::NotConfigured);
        }

        let signer = Arc::new(
            JwtSigner::new(&config.video_api_application_id, &config.video_api_private_key)
                .map_err(|message| VideoApiError::Token { message })?,
        );
        let transport = ReqwestTransport::new(config, Arc::clone(&signer))?;

        Ok(Self::with_transport(signer, Arc::new(transport)))
    }

    /// Uses a caller-supplied transport instead of the default HTTP client.
    pub fn with_transport(signer: Arc<JwtSigner>, transport: Arc<dyn HttpTransport>) -> Self {
        Self { signer, transport }
    }

    pub fn application_id(&self) -> &str {
        self.signer.application_id()
    }

    async fn send<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, VideoApiError> {
        let response = self.transport.execute(request).await?;
        endpoints::parse_json(&response)
    }

    async fn send_empty(&self, request: ApiRequest) -> Result<(), VideoApiError> {
        let response = self.transport.execute(request).await?;
        endpoints::parse_empty(&response)
    }

    // ==========================================================================
    // SESSIONS
    // ==========================================================================

    pub async fn create_session(
        &self,
        request: &CreateSessionRequest,
    ) -> Result<CreateSessionResponse, VideoApiError> {
        info!("Creating video session");

        let response = self
            .transport
            .execute(endpoints::create_session(request))
            .await?;
        let session = endpoints::parse_create_session(&response)?;

        info!("Created video session: {}", session.session_id);
        Ok(session)
    }

    /// Signs a client token for joining `session_id`. No network call.
    pub fn generate_token(
        &self,
        session_id: &str,
        options: &TokenOptions,
    ) -> Result<String, VideoApiError> {
        validate_session_id(session_id)?;

        debug!(
            "Generating {} token for session: {}",
            options.role().as_str(),
            session_id
        );

        let claims = options.to_claims(self.application_id(), session_id);
        self.signer
            .sign(&claims)
            .map_err(|message| VideoApiError::Token { message })
    }

    pub async fn list_streams(&self, session_id: &str) -> Result<ListStreamsResponse, VideoApiError> {
        validate_session_id(session_id)?;
        self.send(endpoints::list_streams(self.application_id(), session_id))
            .await
    }

    pub async fn get_stream(
        &self,
        session_id: &str,
        stream_id: &str,
    ) -> Result<GetStreamResponse, VideoApiError> {
        validate_session_id(session_id)?;
        validate_uuid(stream_id, "streamId")?;
        self.send(endpoints::get_stream(self.application_id(), session_id, stream_id))
            .await
    }

    pub async fn set_stream_layout(
        &self,
        session_id: &str,
        streams: &[SessionStream],
    ) -> Result<(), VideoApiError> {
        validate_session_id(session_id)?;
        if streams.is_empty() {
            return Err(VideoApiError::missing("items"));
        }
        self.send_empty(endpoints::set_stream_layout(
            self.application_id(),
            session_id,
            streams,
        )?)
        .await
    }

    pub async fn list_connections(
        &self,
        session_id: &str,
    ) -> Result<ListConnectionsResponse, VideoApiError> {
        validate_session_id(session_id)?;
        self.send(endpoints::list_connections(self.application_id(), session_id))
            .await
    }

    // ==========================================================================
    // MODERATION
    // ==========================================================================

    pub async fn signal(
        &self,
        session_id: &str,
        connection_id: &str,
        request: &SignalRequest,
    ) -> Result<(), VideoApiError> {
        validate_session_id(session_id)?;
        validate_uuid(connection_id, "connectionId")?;
        self.send_empty(endpoints::signal(
            self.application_id(),
            session_id,
            Some(connection_id),
            request,
        )?)
        .await
    }

    pub async fn signal_all(
        &self,
        session_id: &str,
        request: &SignalRequest,
    ) -> Result<(), VideoApiError> {
        validate_session_id(session_id)?;
        self.send_empty(endpoints::signal(
            self.application_id(),
            session_id,
            None,
            request,
        )?)
        .await
    }

    pub async fn force_disconnect(
        &self,
        session_id: &str,
        connection_id: &str,
    ) -> Result<(), VideoApiError> {
        validate_session_id(session_id)?;
        validate_uuid(connection_id, "connectionId")?;

        info!("Disconnecting {} from session {}", connection_id, session_id);
        self.send_empty(endpoints::force_disconnect(
            self.application_id(),
            session_id,
            connection_id,
        ))
        .await
    }

    pub async fn mute_stream(&self, session_id: &str, stream_id: &str) -> Result<(), VideoApiError> {
        validate_session_id(session_id)?;
        validate_uuid(stream_id, "streamId")?;
        self.send_empty(endpoints::mute_stream(self.application_id(), session_id, stream_id))
            .await
    }

    /// Mutes (or, with `active == false`, unmutes) every stream except the
    /// excluded ones.
    pub async fn mute_session(
        &self,
        session_id: &str,
        active: bool,
        excluded_stream_ids: Vec<String>,
    ) -> Result<ProjectDetails, VideoApiError> {
        validate_session_id(session_id)?;
        for stream_id in &excluded_stream_ids {
            validate_uuid(stream_id, "excludedStreamIds")?;
        }

        let request = MuteSessionRequest::new(active, excluded_stream_ids);
        self.send(endpoints::mute_session(
            self.application_id(),
            session_id,
            &request,
        )?)
        .await
    }

    pub async fn send_dtmf(
        &self,
        session_id: &str,
        connection_id: Option<&str>,
        digits: &str,
    ) -> Result<(), VideoApiError> {
        validate_session_id(session_id)?;
        if let Some(cid) = connection_id {
            validate_uuid(cid, "connectionId")?;
        }

        let request = PlayDtmfRequest::new(digits)?;
        self.send_empty(endpoints::play_dtmf(
            self.application_id(),
            session_id,
            connection_id,
            &request,
        )?)
        .await
    }

    // ==========================================================================
    // ARCHIVES
    // ==========================================================================

    pub async fn create_archive(&self, archive: &Archive) -> Result<Archive, VideoApiError> {
        archive.validate()?;
        info!("Starting archive for session: {}", archive.session_id());

        let created: Archive = self
            .send(endpoints::create_archive(self.application_id(), archive)?)
            .await?;

        info!("Started archive: {}", created.id().unwrap_or_default());
        Ok(created)
    }

    /// First 1000 archives of the project.
    pub async fn list_archives(&self) -> Result<ListArchivesResponse, VideoApiError> {
        self.list_archives_with(&ListStreamCompositionsRequest::all())
            .await
    }

    pub async fn list_archives_with(
        &self,
        request: &ListStreamCompositionsRequest,
    ) -> Result<ListArchivesResponse, VideoApiError> {
        self.send(endpoints::list_archives(self.application_id(), request))
            .await
    }

    pub async fn get_archive(&self, archive_id: &str) -> Result<Archive, VideoApiError> {
        validate_uuid(archive_id, "archiveId")?;
        self.send(endpoints::get_archive(self.application_id(), archive_id))
            .await
    }

    pub async fn stop_archive(&self, archive_id: &str) -> Result<Archive, VideoApiError> {
        validate_uuid(archive_id, "archiveId")?;

        info!("Stopping archive: {}", archive_id);
        self.send(endpoints::stop_archive(self.application_id(), archive_id))
            .await
    }

    pub async fn delete_archive(&self, archive_id: &str) -> Result<(), VideoApiError> {
        validate_uuid(archive_id, "archiveId")?;

        info!("Deleting archive: {}", archive_id);
        self.send_empty(endpoints::delete_archive(self.application_id(), archive_id))
            .await
    }

    pub async fn update_archive_layout(
        &self,
        archive_id: &str,
        layout: &StreamCompositionLayout,
    ) -> Result<(), VideoApiError> {
        validate_uuid(archive_id, "archiveId")?;
        self.send_empty(endpoints::update_archive_layout(
            self.application_id(),
            archive_id,
            layout,
        )?)
        .await
    }

    pub async fn add_archive_stream(
        &self,
        archive_id: &str,
        stream_id: &str,
        has_audio: Option<bool>,
        has_video: Option<bool>,
    ) -> Result<(), VideoApiError> {
        self.patch_archive_streams(
            archive_id,
            &PatchComposedStreamsRequest::add(stream_id, has_audio, has_video),
        )
        .await
    }

    pub async fn remove_archive_stream(
        &self,
        archive_id: &str,
        stream_id: &str,
    ) -> Result<(), VideoApiError> {
        self.patch_archive_streams(archive_id, &PatchComposedStreamsRequest::remove(stream_id))
            .await
    }

    async fn patch_archive_streams(
        &self,
        archive_id: &str,
        request: &PatchComposedStreamsRequest,
    ) -> Result<(), VideoApiError> {
        validate_uuid(archive_id, "archiveId")?;
        validate_uuid(request.stream_id(), "streamId")?;
        self.send_empty(endpoints::patch_archive_streams(
            self.application_id(),
            archive_id,
            request,
        )?)
        .await
    }

    // ==========================================================================
    // BROADCASTS
    // ==========================================================================

    pub async fn create_broadcast(&self, broadcast: &Broadcast) -> Result<Broadcast, VideoApiError> {
        broadcast.validate()?;
        info!("Starting broadcast for session: {}", broadcast.session_id());

        let created: Broadcast = self
            .send(endpoints::create_broadcast(self.application_id(), broadcast)?)
            .await?;

        info!("Started broadcast: {}", created.id().unwrap_or_default());
        Ok(created)
    }

    /// First 1000 broadcasts of the project.
    pub async fn list_broadcasts(&self) -> Result<ListBroadcastsResponse, VideoApiError> {
        self.list_broadcasts_with(&ListStreamCompositionsRequest::all())
            .await
    }

    pub async fn list_broadcasts_with(
        &self,
        request: &ListStreamCompositionsRequest,
    ) -> Result<ListBroadcastsResponse, VideoApiError> {
        self.send(endpoints::list_broadcasts(self.application_id(), request))
            .await
    }

    pub async fn get_broadcast(&self, broadcast_id: &str) -> Result<Broadcast, VideoApiError> {
        validate_uuid(broadcast_id, "broadcastId")?;
        self.send(endpoints::get_broadcast(self.application_id(), broadcast_id))
            .await
    }

    pub async fn stop_broadcast(&self, broadcast_id: &str) -> Result<Broadcast, VideoApiError> {
        validate_uuid(broadcast_id, "broadcastId")?;

        info!("Stopping broadcast: {}", broadcast_id);
        self.send(endpoints::stop_broadcast(self.application_id(), broadcast_id))
            .await
    }

    pub async fn update_broadcast_layout(
        &self,
        broadcast_id: &str,
        layout: &StreamCompositionLayout,
    ) -> Result<(), VideoApiError> {
        validate_uuid(broadcast_id, "broadcastId")?;
        self.send_empty(endpoints::update_broadcast_layout(
            self.application_id(),
            broadcast_id,
            layout,
        )?)
        .await
    }

    pub async fn add_broadcast_stream(
        &self,
        broadcast_id: &str,
        stream_id: &str,
        has_audio: Option<bool>,
        has_video: Option<bool>,
    ) -> Result<(), VideoApiError> {
        self.patch_broadcast_streams(
            broadcast_id,
            &PatchComposedStreamsRequest::add(stream_id, has_audio, has_video),
        )
        .await
    }

    pub async fn remove_broadcast_stream(
        &self,
        broadcast_id: &str,
        stream_id: &str,
    ) -> Result<(), VideoApiError> {
        self.patch_broadcast_streams(broadcast_id, &PatchComposedStreamsRequest::remove(stream_id))
            .await
    }

    async fn patch_broadcast_streams(
        &self,
        broadcast_id: &str,
        request: &PatchComposedStreamsRequest,
    ) -> Result<(), VideoApiError> {
        validate_uuid(broadcast_id, "broadcastId")?;
        validate_uuid(request.stream_id(), "streamId")?;
        self.send_empty(endpoints::patch_broadcast_streams(
            self.application_id(),
            broadcast_id,
            request,
        )?)
        .await
    }

    // ==========================================================================
    // SIP / CAPTIONS / RENDER / CONNECT
    // ==========================================================================

    pub async fn sip_dial(&self, request: &SipDialRequest) -> Result<SipDialResponse, VideoApiError> {
        request.validate()?;
        info!("Dialing SIP endpoint into session: {}", request.session_id());
        self.send(endpoints::sip_dial(self.application_id(), request)?)
            .await
    }

    pub async fn start_captions(
        &self,
        request: &CaptionsRequest,
    ) -> Result<CaptionsResponse, VideoApiError> {
        request.validate()?;
        info!("Starting captions for session: {}", request.session_id());
        self.send(endpoints::start_captions(self.application_id(), request)?)
            .await
    }

    pub async fn stop_captions(&self, captions_id: &str) -> Result<(), VideoApiError> {
        validate_uuid(captions_id, "captionsId")?;

        info!("Stopping captions: {}", captions_id);
        self.send_empty(endpoints::stop_captions(self.application_id(), captions_id))
            .await
    }

    pub async fn start_render(&self, request: &RenderRequest) -> Result<RenderResponse, VideoApiError> {
        request.validate()?;
        info!("Starting render of {} for session: {}", request.url(), request.session_id());
        self.send(endpoints::start_render(self.application_id(), request)?)
            .await
    }

    /// First 1000 renders of the project.
    pub async fn list_renders(&self) -> Result<ListRendersResponse, VideoApiError> {
        self.list_renders_with(&ListStreamCompositionsRequest::all())
            .await
    }

    pub async fn list_renders_with(
        &self,
        request: &ListStreamCompositionsRequest,
    ) -> Result<ListRendersResponse, VideoApiError> {
        self.send(endpoints::list_renders(self.application_id(), request))
            .await
    }

    pub async fn get_render(&self, render_id: &str) -> Result<RenderResponse, VideoApiError> {
        validate_uuid(render_id, "renderId")?;
        self.send(endpoints::get_render(self.application_id(), render_id))
            .await
    }

    pub async fn stop_render(&self, render_id: &str) -> Result<(), VideoApiError> {
        validate_uuid(render_id, "renderId")?;

        info!("Stopping render: {}", render_id);
        self.send_empty(endpoints::stop_render(self.application_id(), render_id))
            .await
    }

    pub async fn connect_to_websocket(
        &self,
        request: &ConnectRequest,
    ) -> Result<ConnectResponse, VideoApiError> {
        request.validate()?;
        info!(
            "Connecting session {} to websocket: {}",
            request.session_id(),
            request.websocket().uri()
        );
        self.send(endpoints::connect(self.application_id(), request)?)
            .await
    }

    pub async fn get_project(&self) -> Result<ProjectDetails, VideoApiError> {
        self.send(endpoints::get_project(self.application_id()))
            .await
    }
}

impl fmt::Debug for VideoClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VideoClient")
            .field("application_id", &self.application_id())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use reqwest::Method;
    use serde_json::json;

    use shared_models::auth::SessionTokenClaims;
    use shared_utils::jwt::validate_token;
    use shared_utils::test_utils::{TestConfig, TEST_PRIVATE_KEY, TEST_PUBLIC_KEY};

    use crate::models::Role;
    use crate::services::transport::{ApiResponse, RequestBody};

    const ARCHIVE_ID: &str = "b40ef09b-3811-4726-b508-e41a0f96c68f";

    /// Records requests and answers each with the same canned response.
    struct RecordingTransport {
        requests: Mutex<Vec<ApiRequest>>,
        status: u16,
        body: String,
    }

    impl RecordingTransport {
        fn new(status: u16, body: serde_json::Value) -> Arc<Self> {
            Arc::new(Self {
                requests: Mutex::new(Vec::new()),
                status,
                body: body.to_string(),
            })
        }

        fn last(&self) -> ApiRequest {
            self.requests.lock().unwrap().last().cloned().unwrap()
        }

        fn count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl HttpTransport for RecordingTransport {
        async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, VideoApiError> {
            self.requests.lock().unwrap().push(request);
            Ok(ApiResponse {
                status: self.status,
                body: self.body.clone(),
            })
        }
    }

    fn client_with(transport: Arc<RecordingTransport>) -> VideoClient {
        let config = TestConfig::default();
        let signer = Arc::new(JwtSigner::new(&config.application_id, TEST_PRIVATE_KEY).unwrap());
        VideoClient::with_transport(signer, transport)
    }

    #[test]
    fn test_new_requires_configuration() {
        let mut config = TestConfig::default().to_app_config();
        config.video_api_private_key = String::new();

        assert_matches!(VideoClient::new(&config), Err(VideoApiError::NotConfigured));
    }

    #[test]
    fn test_generate_token_claims() {
        let client = client_with(RecordingTransport::new(200, json!({})));
        let options = TokenOptions::builder()
            .role(Role::Moderator)
            .data("name=Johnny")
            .initial_layout_class_list(["focus", "inactive"])
            .build()
            .unwrap();

        let token = client.generate_token("sess-1", &options).unwrap();
        let claims: SessionTokenClaims = validate_token(&token, TEST_PUBLIC_KEY).unwrap();

        assert_eq!(claims.application_id, client.application_id());
        assert_eq!(claims.scope, "session.connect");
        assert_eq!(claims.sub, "video");
        assert_eq!(claims.session_id, "sess-1");
        assert_eq!(claims.role, "moderator");
        assert_eq!(claims.initial_layout_class_list.as_deref(), Some("focus inactive"));
        assert_eq!(claims.connection_data.as_deref(), Some("name=Johnny"));
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_generate_token_requires_session() {
        let client = client_with(RecordingTransport::new(200, json!({})));
        let result = client.generate_token(" ", &TokenOptions::default());
        assert_matches!(result, Err(VideoApiError::MissingField { field: "sessionId" }));
    }

    #[tokio::test]
    async fn test_invalid_archive_id_never_sent() {
        let transport = RecordingTransport::new(200, json!({}));
        let client = client_with(transport.clone());

        let result = client.stop_archive("not-a-uuid").await;

        assert_matches!(result, Err(VideoApiError::InvalidArgument { field: "archiveId", .. }));
        assert_eq!(transport.count(), 0);
    }

    #[tokio::test]
    async fn test_stop_archive_request() {
        let transport = RecordingTransport::new(
            200,
            json!({"id": ARCHIVE_ID, "sessionId": "sess-1", "status": "stopped"}),
        );
        let client = client_with(transport.clone());

        let archive = client.stop_archive(ARCHIVE_ID).await.unwrap();

        assert_eq!(archive.id(), Some(ARCHIVE_ID));
        let request = transport.last();
        assert_eq!(request.method, Method::POST);
        assert_eq!(
            request.path,
            format!("/v2/project/{}/archive/{}/stop", client.application_id(), ARCHIVE_ID)
        );
    }

    #[tokio::test]
    async fn test_list_archives_defaults() {
        let transport = RecordingTransport::new(200, json!({"count": 0, "items": []}));
        let client = client_with(transport.clone());

        let archives = client.list_archives().await.unwrap();

        assert_eq!(archives.count, 0);
        let query = transport.last().query;
        assert!(query.contains(&("offset".to_string(), "0".to_string())));
        assert!(query.contains(&("count".to_string(), "1000".to_string())));
    }

    #[tokio::test]
    async fn test_mute_session_omits_empty_exclusions() {
        let transport = RecordingTransport::new(
            200,
            json!({"id": "app", "status": "ACTIVE", "environment": "standard"}),
        );
        let client = client_with(transport.clone());

        client.mute_session("sess-1", true, Vec::new()).await.unwrap();

        assert_eq!(transport.last().body, RequestBody::Json(json!({"active": true})));
    }

    #[tokio::test]
    async fn test_send_dtmf_rejects_bad_digits() {
        let transport = RecordingTransport::new(204, json!(null));
        let client = client_with(transport.clone());

        let result = client.send_dtmf("sess-1", None, "12a").await;

        assert_matches!(result, Err(VideoApiError::InvalidArgument { field: "digits", .. }));
        assert_eq!(transport.count(), 0);
    }

    #[tokio::test]
    async fn test_http_error_propagated() {
        let transport = RecordingTransport::new(
            409,
            json!({"code": 409, "message": "Archive already stopped"}),
        );
        let client = client_with(transport);

        let result = client.stop_archive(ARCHIVE_ID).await;

        assert_matches!(result, Err(VideoApiError::Http { status: 409, message }) => {
            assert_eq!(message, "Archive already stopped");
        });
    }

    #[tokio::test]
    async fn test_set_stream_layout_requires_items() {
        let transport = RecordingTransport::new(200, json!(null));
        let client = client_with(transport.clone());

        let result = client.set_stream_layout("sess-1", &[]).await;

        assert_matches!(result, Err(VideoApiError::MissingField { field: "items" }));
        assert_eq!(transport.count(), 0);
    }

    #[tokio::test]
    async fn test_decoded_requests_validated_before_sending() {
        let transport = RecordingTransport::new(200, json!({}));
        let client = client_with(transport.clone());

        let archive: Archive = serde_json::from_value(
            json!({"sessionId": "", "quantizationParameter": 99, "maxBitrate": 1}),
        )
        .unwrap();
        assert_matches!(
            client.create_archive(&archive).await,
            Err(VideoApiError::IllegalState { .. })
        );

        let render: RenderRequest = serde_json::from_value(
            json!({"sessionId": "", "token": "", "url": "x", "maxDuration": 1}),
        )
        .unwrap();
        assert_matches!(
            client.start_render(&render).await,
            Err(VideoApiError::MissingField { field: "sessionId" })
        );

        let render: RenderRequest = serde_json::from_value(
            json!({"sessionId": "sess-1", "token": "tok", "url": "x", "maxDuration": 1}),
        )
        .unwrap();
        assert_matches!(
            client.start_render(&render).await,
            Err(VideoApiError::InvalidArgument { field: "url", .. })
        );

        let sip: SipDialRequest = serde_json::from_value(
            json!({"sessionId": "sess-1", "token": "tok", "sip": {"uri": ""}}),
        )
        .unwrap();
        assert_matches!(
            client.sip_dial(&sip).await,
            Err(VideoApiError::MissingField { field: "uri" })
        );

        let connect: ConnectRequest = serde_json::from_value(json!({
            "sessionId": "sess-1",
            "token": "tok",
            "websocket": {"uri": "http://service.com/ws"}
        }))
        .unwrap();
        assert_matches!(
            client.connect_to_websocket(&connect).await,
            Err(VideoApiError::InvalidArgument { field: "uri", .. })
        );

        assert_eq!(transport.count(), 0);
    }
}
