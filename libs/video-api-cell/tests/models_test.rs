use assert_matches::assert_matches;
use chrono::Duration;
use serde_json::json;

use shared_utils::test_utils::MockVideoApiResponses;
use video_api_cell::models::{
    AudioRate, CaptionsRequest, ConnectRequest, Hls, Language, OutputMode,
    PatchComposedStreamsRequest, Resolution, Rtmp, ScreenLayoutType, SignalRequest,
    SipDialRequest, StreamCompositionLayout, TokenOptions, Websocket,
};
use video_api_cell::{Archive, Broadcast, RenderRequest, VideoApiError};

fn composed_layout() -> StreamCompositionLayout {
    StreamCompositionLayout::builder()
        .layout_type(ScreenLayoutType::BestFit)
        .screenshare_type(ScreenLayoutType::Pip)
        .build()
        .unwrap()
}

#[test]
fn test_archive_quantization_parameter_only() {
    let archive = Archive::builder("sess1").quantization_parameter(19).build().unwrap();
    let encoded = serde_json::to_string(&archive).unwrap();

    assert!(encoded.contains(r#""quantizationParameter":19"#));
    assert!(!encoded.contains("maxBitrate"));
}

#[test]
fn test_broadcast_without_outputs_fails() {
    let result = Broadcast::builder("sess1").build();
    assert_matches!(result, Err(VideoApiError::IllegalState { .. }));
}

#[test]
fn test_render_url_minimum_length() {
    let build = |url: &str| {
        RenderRequest::builder()
            .session_id("sess1")
            .token("tok")
            .url(url)
            .build()
    };

    assert_matches!(build("http://abc.com"), Err(VideoApiError::InvalidArgument { field: "url", .. }));
    assert!(build("https://abc.com").is_ok());
}

#[test]
fn test_token_expiry_capped_at_thirty_days() {
    let too_long = TokenOptions::builder()
        .expiry_length(Duration::days(30) + Duration::milliseconds(1))
        .build();
    assert_matches!(too_long, Err(VideoApiError::InvalidArgument { .. }));

    assert!(TokenOptions::builder()
        .expiry_length(Duration::days(30))
        .build()
        .is_ok());
}

#[test]
fn test_unknown_archive_status_is_tolerated() {
    let mut body = MockVideoApiResponses::archive_response("a1", "sess1");
    body["status"] = json!("f00");

    let archive: Archive = serde_json::from_value(body).unwrap();

    assert_eq!(archive.status(), None);
    assert_eq!(archive.name(), Some("Foo"));
}

#[test]
fn test_composed_layout_accepted_for_archive_and_broadcast() {
    let archive = Archive::builder("sess1")
        .output_mode(OutputMode::Composed)
        .layout(composed_layout())
        .build()
        .unwrap();
    let decoded: Archive =
        serde_json::from_str(&serde_json::to_string(&archive).unwrap()).unwrap();
    assert_eq!(decoded, archive);

    let broadcast = Broadcast::builder("sess1")
        .hls(Hls::builder().low_latency(true).build().unwrap())
        .output_mode(OutputMode::Composed)
        .layout(composed_layout())
        .build()
        .unwrap();
    let decoded: Broadcast =
        serde_json::from_str(&serde_json::to_string(&broadcast).unwrap()).unwrap();
    assert_eq!(decoded, broadcast);
}

#[test]
fn test_layout_rejected_for_individual_output() {
    let archive = Archive::builder("sess1")
        .output_mode(OutputMode::Individual)
        .layout(composed_layout())
        .build();
    assert_matches!(archive, Err(VideoApiError::IllegalState { .. }));

    let broadcast = Broadcast::builder("sess1")
        .hls(Hls::builder().build().unwrap())
        .output_mode(OutputMode::Individual)
        .layout(composed_layout())
        .build();
    assert_matches!(broadcast, Err(VideoApiError::IllegalState { .. }));
}

#[test]
fn test_hls_flag_combinations() {
    assert!(Hls::builder().build().is_ok());
    assert!(Hls::builder().dvr(true).build().is_ok());
    assert!(Hls::builder().low_latency(true).build().is_ok());
    assert!(Hls::builder().dvr(false).low_latency(false).build().is_ok());
    assert_matches!(
        Hls::builder().dvr(true).low_latency(true).build(),
        Err(VideoApiError::IllegalState { .. })
    );
}

#[test]
fn test_broadcast_response_decoding() {
    let body = MockVideoApiResponses::broadcast_response("b1", "sess1");
    let broadcast: Broadcast = serde_json::from_value(body).unwrap();

    assert_eq!(broadcast.id(), Some("b1"));
    assert_eq!(broadcast.multi_broadcast_tag(), Some("broadcast-1"));
    assert_eq!(broadcast.max_duration(), Some(Duration::seconds(5400)));
    assert_eq!(broadcast.composition().resolution(), Some(Resolution::HdLandscape));
    assert_eq!(broadcast.rtmps()[0].server_url(), "rtmps://myfooserver/myfooapp");
    assert!(broadcast.composition().created_at().is_some());
}

#[test]
fn test_session_token_requests_round_trip() {
    let sip = SipDialRequest::builder()
        .session_id("sess1")
        .token("tok")
        .uri("sip:user@sip.partner.com", true)
        .from("from@example.com")
        .add_header("X-Foo", "bar")
        .username("user")
        .password("secret")
        .build()
        .unwrap();
    let decoded: SipDialRequest = serde_json::from_str(&serde_json::to_string(&sip).unwrap()).unwrap();
    assert_eq!(decoded, sip);

    let captions = CaptionsRequest::builder()
        .session_id("sess1")
        .token("tok")
        .language_code(Language::EnUs)
        .max_duration(1800)
        .partial_captions(false)
        .build()
        .unwrap();
    let decoded: CaptionsRequest =
        serde_json::from_str(&serde_json::to_string(&captions).unwrap()).unwrap();
    assert_eq!(decoded, captions);

    let connect = ConnectRequest::builder()
        .session_id("sess1")
        .token("tok")
        .websocket(
            Websocket::builder()
                .uri("wss://service.com/ws-endpoint")
                .add_stream("stream-1")
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();
    let decoded: ConnectRequest =
        serde_json::from_str(&serde_json::to_string(&connect).unwrap()).unwrap();
    assert_eq!(decoded, connect);
}

#[test]
fn test_rtmp_round_trip() {
    let rtmp = Rtmp::builder()
        .id("foo")
        .server_url("rtmps://myfooserver/myfooapp")
        .stream_name("myfoostreamname")
        .build()
        .unwrap();

    let value = serde_json::to_value(&rtmp).unwrap();
    assert_eq!(
        value,
        json!({"id": "foo", "serverUrl": "rtmps://myfooserver/myfooapp", "streamName": "myfoostreamname"})
    );
    assert_eq!(serde_json::from_value::<Rtmp>(value).unwrap(), rtmp);
}

#[test]
fn test_render_request_round_trip() {
    let render = RenderRequest::builder()
        .session_id("sess1")
        .token("tok")
        .url("https://webapp.customer.com")
        .max_duration(1800)
        .resolution(Resolution::HdLandscape)
        .name("Composed stream for live event")
        .build()
        .unwrap();

    let value = serde_json::to_value(&render).unwrap();
    assert_eq!(value["properties"], json!({"name": "Composed stream for live event"}));
    assert_eq!(value["resolution"], json!("1280x720"));
    assert_eq!(serde_json::from_value::<RenderRequest>(value).unwrap(), render);
}

#[test]
fn test_moderation_payloads_round_trip() {
    let signal = SignalRequest::builder()
        .signal_type("chat")
        .data("hello")
        .build()
        .unwrap();
    let decoded: SignalRequest =
        serde_json::from_str(&serde_json::to_string(&signal).unwrap()).unwrap();
    assert_eq!(decoded, signal);

    let add = PatchComposedStreamsRequest::add("stream-1", Some(true), Some(false));
    let value = serde_json::to_value(&add).unwrap();
    assert_eq!(value, json!({"addStream": "stream-1", "hasAudio": true, "hasVideo": false}));
    assert_eq!(serde_json::from_value::<PatchComposedStreamsRequest>(value).unwrap(), add);

    let remove = PatchComposedStreamsRequest::remove("stream-1");
    let value = serde_json::to_value(&remove).unwrap();
    assert_eq!(value, json!({"removeStream": "stream-1"}));
    assert_eq!(serde_json::from_value::<PatchComposedStreamsRequest>(value).unwrap(), remove);
}

#[test]
fn test_websocket_audio_options_round_trip() {
    let websocket = Websocket::builder()
        .uri("wss://service.com/ws-endpoint")
        .add_stream("stream-1")
        .add_header("X-Customer", "acme")
        .audio_rate(AudioRate::L16_16K)
        .bidirectional(true)
        .build()
        .unwrap();

    let value = serde_json::to_value(&websocket).unwrap();
    assert_eq!(value["audioRate"], json!(16000));
    assert_eq!(value["bidirectional"], json!(true));

    let decoded: Websocket = serde_json::from_value(value).unwrap();
    assert_eq!(decoded, websocket);
    assert_eq!(decoded.audio_rate(), Some(AudioRate::L16_16K));
}
