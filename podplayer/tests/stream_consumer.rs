//! Stream consumer against a stub WebSocket server: decode, drop-on-bad-audio
//! and end-of-stream behavior.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use base64::Engine;
use podplayer::{MockSink, Player, SinkEvent, StreamConsumer};
use podscript::{Preferences, SegmentKind};
use podstream::{ClientMessage, ServerMessage};
use std::time::Duration;
use tokio::net::TcpListener;

fn audio_segment(id: &str, payload: &str) -> ServerMessage {
    ServerMessage::AudioSegment {
        segment_id: id.to_string(),
        segment_type: SegmentKind::Narration,
        start_time: Some(0),
        duration: Some(1),
        audio_data: payload.to_string(),
        message: "Reproduzindo narração...".to_string(),
    }
}

async fn send(socket: &mut WebSocket, message: &ServerMessage) {
    let payload = serde_json::to_string(message).unwrap();
    socket.send(Message::Text(payload.into())).await.unwrap();
}

async fn stub_session(mut socket: WebSocket) {
    send(&mut socket, &ServerMessage::connected()).await;

    // Wait for the start command before streaming
    let _ = socket.recv().await;

    let good = base64::engine::general_purpose::STANDARD.encode(b"mp3-bytes");
    send(&mut socket, &audio_segment("segment_0", &good)).await;
    // Broken payload: the client must drop it and keep going
    send(&mut socket, &audio_segment("segment_1", "@@not-base64@@")).await;
    send(&mut socket, &audio_segment("segment_2", &good)).await;

    send(
        &mut socket,
        &ServerMessage::GenerationComplete {
            message: "Podcast gerado com sucesso!".to_string(),
        },
    )
    .await;

    // Keep the socket open until the client goes away
    while socket.recv().await.is_some() {}
}

async fn ws_handler(ws: WebSocketUpgrade) -> impl IntoResponse {
    ws.on_upgrade(stub_session)
}

async fn spawn_stub_server() -> String {
    let app = Router::new().route("/ws", get(ws_handler));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("ws://{}/ws", addr)
}

#[tokio::test]
async fn consumer_feeds_decodable_segments_and_drops_the_rest() {
    let url = spawn_stub_server().await;

    let (sink, events) = MockSink::new(Duration::from_millis(5));
    let player = Player::spawn(sink);
    let consumer = StreamConsumer::new(&url, player.clone());

    consumer
        .run(ClientMessage::GeneratePodcast {
            title: "Noites de Jazz".to_string(),
            description: "desc".to_string(),
            preferences: Preferences::default(),
            genres: vec![],
            artists: vec![],
        })
        .await
        .expect("consumer run");

    // Wait for playback of both good segments to finish
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            let done = events
                .lock()
                .unwrap()
                .iter()
                .filter(|e| matches!(e, SinkEvent::Finished(_)))
                .count()
                == 2;
            if done {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("playback finished");

    let played: Vec<String> = events
        .lock()
        .unwrap()
        .iter()
        .filter_map(|e| match e {
            SinkEvent::Started(id) => Some(id.clone()),
            SinkEvent::Finished(_) => None,
        })
        .collect();
    assert_eq!(played, vec!["segment_0", "segment_2"]);

    // Upstream closed after generation_complete: nothing is generating
    let state = player.state();
    assert!(!state.is_generating);
}

#[tokio::test]
async fn cancelling_the_token_ends_the_consumer() {
    let url = spawn_stub_server().await;

    let (sink, _events) = MockSink::new(Duration::from_millis(5));
    let player = Player::spawn(sink);
    let consumer = StreamConsumer::new(&url, player.clone());
    let token = consumer.cancellation_token();

    let run = tokio::spawn(consumer.run(ClientMessage::StartStream {
        preferences: Preferences::default(),
        genres: vec![],
        artists: vec![],
    }));

    tokio::time::sleep(Duration::from_millis(50)).await;
    token.cancel();

    tokio::time::timeout(Duration::from_secs(5), run)
        .await
        .expect("consumer did not end")
        .expect("join")
        .expect("run result");
}
