//! End-to-end WebSocket streaming tests against in-process stub providers.
//!
//! The stub server mimics the two external APIs (generateContent and
//! text:synthesize) so the full path client → socket → orchestrator →
//! providers → client runs without the network.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use futures_util::{SinkExt, StreamExt};
use podscript::{Preferences, ScriptClient};
use podspeech::SpeechClient;
use podstream::{podcast_stream_router, ClientMessage, ServerMessage, StreamState, StreamTiming};
use serde_json::json;
use tokio::net::TcpListener;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

const SCRIPT: &str = "\
[NARRAÇÃO|00:00-00:30] Introdução
[MÚSICA|00:00-10:00] Estilo: ambiente suave
[EFEITOS|00:15-00:17] Som de páginas virando
[NARRAÇÃO|00:30-03:00] Primeiro bloco
[NARRAÇÃO|03:00-05:00] Segundo bloco";

struct StubProvider {
    synth_calls: AtomicUsize,
    /// Zero-based synthesis call index that answers 500
    fail_synth_on: Option<usize>,
}

async fn generate_content() -> Json<serde_json::Value> {
    Json(json!({
        "candidates": [{"content": {"parts": [{"text": SCRIPT}]}}]
    }))
}

async fn synthesize(State(stub): State<Arc<StubProvider>>) -> axum::response::Response {
    let call = stub.synth_calls.fetch_add(1, Ordering::SeqCst);
    if stub.fail_synth_on == Some(call) {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    Json(json!({ "audioContent": format!("YXVkaW8t{}", call) })).into_response()
}

async fn spawn_stub_provider(fail_synth_on: Option<usize>) -> (String, Arc<StubProvider>) {
    let stub = Arc::new(StubProvider {
        synth_calls: AtomicUsize::new(0),
        fail_synth_on,
    });

    let app = Router::new()
        .route(
            "/v1beta/models/test-model:generateContent",
            post(generate_content),
        )
        .route("/v1/text:synthesize", post(synthesize))
        .with_state(stub.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), stub)
}

async fn spawn_stream_server(provider_url: &str) -> String {
    let script = ScriptClient::builder()
        .api_key("test-key")
        .base_url(provider_url)
        .model("test-model")
        .build()
        .unwrap();
    let speech = SpeechClient::builder()
        .api_key("test-key")
        .base_url(provider_url)
        .build()
        .unwrap();

    // Short pauses keep the tests fast without changing the control flow
    let state = StreamState::new(Arc::new(script), Arc::new(speech)).with_timing(StreamTiming {
        segment_pacing: Duration::from_millis(5),
        loop_pause: Duration::from_millis(30),
        error_pause: Duration::from_millis(60),
    });

    let app = podcast_stream_router(state);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("ws://{}/ws", addr)
}

type WsClient = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

async fn connect(url: &str) -> WsClient {
    let (ws, _) = connect_async(url).await.expect("websocket connect");
    ws
}

async fn next_message(ws: &mut WsClient) -> ServerMessage {
    loop {
        let frame = tokio::time::timeout(Duration::from_secs(5), ws.next())
            .await
            .expect("timed out waiting for a server message")
            .expect("socket closed unexpectedly")
            .expect("socket error");
        if let WsMessage::Text(text) = frame {
            return serde_json::from_str(&text).expect("valid server message");
        }
    }
}

/// Asserts that nothing arrives on the socket for `window`
async fn expect_silence(ws: &mut WsClient, window: Duration) {
    let result = tokio::time::timeout(window, ws.next()).await;
    assert!(result.is_err(), "expected silence, got {:?}", result);
}

async fn send(ws: &mut WsClient, message: &ClientMessage) {
    let payload = serde_json::to_string(message).unwrap();
    ws.send(WsMessage::Text(payload.into())).await.unwrap();
}

fn batch_request() -> ClientMessage {
    ClientMessage::GeneratePodcast {
        title: "Noites de Jazz".to_string(),
        description: "Uma viagem pelo jazz brasileiro".to_string(),
        preferences: Preferences::default(),
        genres: vec!["jazz".to_string()],
        artists: vec!["Tom Jobim".to_string()],
    }
}

fn stream_request() -> ClientMessage {
    ClientMessage::StartStream {
        preferences: Preferences::default(),
        genres: vec!["jazz".to_string()],
        artists: vec![],
    }
}

#[tokio::test]
async fn batch_mode_streams_segments_in_script_order() {
    let (provider_url, _stub) = spawn_stub_provider(None).await;
    let url = spawn_stream_server(&provider_url).await;
    let mut ws = connect(&url).await;

    assert!(matches!(
        next_message(&mut ws).await,
        ServerMessage::Connected { .. }
    ));

    send(&mut ws, &batch_request()).await;

    assert!(matches!(
        next_message(&mut ws).await,
        ServerMessage::Status { .. }
    ));
    match next_message(&mut ws).await {
        ServerMessage::ScriptReady { segments, .. } => assert_eq!(segments, 5),
        other => panic!("expected script_ready, got {:?}", other),
    }

    let mut audio_ids = Vec::new();
    loop {
        match next_message(&mut ws).await {
            ServerMessage::GeneratingSegment { total, .. } => assert_eq!(total, 5),
            ServerMessage::AudioSegment {
                segment_id,
                start_time,
                duration,
                ..
            } => {
                if segment_id == "segment_0" {
                    // [NARRAÇÃO|00:00-00:30]
                    assert_eq!(start_time, Some(0));
                    assert_eq!(duration, Some(30));
                }
                if segment_id == "segment_1" {
                    // [MÚSICA|00:00-10:00]
                    assert_eq!(duration, Some(600));
                }
                audio_ids.push(segment_id);
            }
            ServerMessage::GenerationComplete { .. } => break,
            other => panic!("unexpected message: {:?}", other),
        }
    }

    assert_eq!(
        audio_ids,
        vec![
            "segment_0",
            "segment_1",
            "segment_2",
            "segment_3",
            "segment_4"
        ]
    );
}

#[tokio::test]
async fn one_failed_segment_does_not_abort_the_batch() {
    // Third synthesis call (segment_2) answers 500
    let (provider_url, _stub) = spawn_stub_provider(Some(2)).await;
    let url = spawn_stream_server(&provider_url).await;
    let mut ws = connect(&url).await;

    assert!(matches!(
        next_message(&mut ws).await,
        ServerMessage::Connected { .. }
    ));
    send(&mut ws, &batch_request()).await;

    let mut audio_ids = Vec::new();
    let mut failed_ids = Vec::new();
    loop {
        match next_message(&mut ws).await {
            ServerMessage::AudioSegment { segment_id, .. } => audio_ids.push(segment_id),
            ServerMessage::SegmentError { segment_id, .. } => failed_ids.push(segment_id),
            ServerMessage::GenerationComplete { .. } => break,
            ServerMessage::Status { .. }
            | ServerMessage::ScriptReady { .. }
            | ServerMessage::GeneratingSegment { .. } => {}
            other => panic!("unexpected message: {:?}", other),
        }
    }

    assert_eq!(
        audio_ids,
        vec!["segment_0", "segment_1", "segment_3", "segment_4"]
    );
    assert_eq!(failed_ids, vec!["segment_2"]);
}

#[tokio::test]
async fn stop_stream_halts_the_infinite_loop() {
    let (provider_url, _stub) = spawn_stub_provider(None).await;
    let url = spawn_stream_server(&provider_url).await;
    let mut ws = connect(&url).await;

    assert!(matches!(
        next_message(&mut ws).await,
        ServerMessage::Connected { .. }
    ));
    send(&mut ws, &stream_request()).await;

    assert!(matches!(
        next_message(&mut ws).await,
        ServerMessage::StreamStarted { .. }
    ));

    // Let a couple of segments through, then stop
    let mut audio_before_stop = 0;
    while audio_before_stop < 2 {
        match next_message(&mut ws).await {
            ServerMessage::AudioSegment { .. } => audio_before_stop += 1,
            ServerMessage::GeneratingContent { .. } => {}
            other => panic!("unexpected message: {:?}", other),
        }
    }

    send(&mut ws, &ClientMessage::StopStream).await;

    // At most the in-flight iteration may still complete; then the loop must
    // acknowledge the stop and go quiet
    let mut audio_after_stop = 0;
    loop {
        match next_message(&mut ws).await {
            ServerMessage::AudioSegment { .. } => audio_after_stop += 1,
            ServerMessage::GeneratingContent { .. } => {}
            ServerMessage::StreamStopped => break,
            other => panic!("unexpected message: {:?}", other),
        }
    }
    assert!(
        audio_after_stop <= 1,
        "expected at most the in-flight segment after stop, got {}",
        audio_after_stop
    );

    expect_silence(&mut ws, Duration::from_millis(200)).await;

    // Stopping again has no observable effect
    send(&mut ws, &ClientMessage::StopStream).await;
    expect_silence(&mut ws, Duration::from_millis(200)).await;
}

#[tokio::test]
async fn malformed_messages_keep_the_connection_open() {
    let (provider_url, _stub) = spawn_stub_provider(None).await;
    let url = spawn_stream_server(&provider_url).await;
    let mut ws = connect(&url).await;

    assert!(matches!(
        next_message(&mut ws).await,
        ServerMessage::Connected { .. }
    ));

    ws.send(WsMessage::text("definitely not json"))
        .await
        .unwrap();
    assert!(matches!(
        next_message(&mut ws).await,
        ServerMessage::Error { .. }
    ));

    // The connection is still usable afterwards
    send(&mut ws, &batch_request()).await;
    assert!(matches!(
        next_message(&mut ws).await,
        ServerMessage::Status { .. }
    ));
}

#[tokio::test]
async fn concurrent_start_commands_are_rejected() {
    let (provider_url, _stub) = spawn_stub_provider(None).await;
    let url = spawn_stream_server(&provider_url).await;
    let mut ws = connect(&url).await;

    assert!(matches!(
        next_message(&mut ws).await,
        ServerMessage::Connected { .. }
    ));

    send(&mut ws, &stream_request()).await;
    assert!(matches!(
        next_message(&mut ws).await,
        ServerMessage::StreamStarted { .. }
    ));

    send(&mut ws, &stream_request()).await;

    // Everything else keeps flowing; somewhere in the stream we must see the
    // rejection of the second start
    let mut saw_rejection = false;
    for _ in 0..10 {
        if let ServerMessage::Error { .. } = next_message(&mut ws).await {
            saw_rejection = true;
            break;
        }
    }
    assert!(saw_rejection, "second start_stream was not rejected");
}
