//! WebSocket endpoint for podcast streaming
//!
//! Route type: `GET /api/podcast/ws` (upgrade). One connection = one
//! [`Session`] = at most one generation task. Outbound messages from the
//! control loop and the generation task share an mpsc channel drained by a
//! writer task, so segments are always delivered in generation order.

use crate::messages::{ClientMessage, ServerMessage};
use crate::orchestrator::Orchestrator;
use crate::session::Session;
use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
    routing::get,
    Router,
};
use futures_util::{SinkExt, StreamExt};
use podscript::{ScriptClient, ScriptRequest, TopicRequest};
use podspeech::SpeechClient;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Capacity of the per-connection outbound channel
const OUTBOUND_CHANNEL_SIZE: usize = 64;

/// Pacing and pause durations for the orchestrator loops
#[derive(Debug, Clone, Copy)]
pub struct StreamTiming {
    /// Delay after each successful `audio_segment` send (batch mode)
    pub segment_pacing: Duration,
    /// Pause between infinite-mode iterations
    pub loop_pause: Duration,
    /// Longer pause after an infinite-mode segment failure
    pub error_pause: Duration,
}

impl Default for StreamTiming {
    fn default() -> Self {
        Self {
            segment_pacing: Duration::from_millis(100),
            loop_pause: Duration::from_secs(2),
            error_pause: Duration::from_secs(5),
        }
    }
}

/// Shared state for the streaming endpoint
///
/// Both provider clients are stateless and shared across connections; each
/// connection gets its own [`Session`].
#[derive(Clone)]
pub struct StreamState {
    pub script: Arc<ScriptClient>,
    pub speech: Arc<SpeechClient>,
    pub timing: StreamTiming,
}

impl StreamState {
    pub fn new(script: Arc<ScriptClient>, speech: Arc<SpeechClient>) -> Self {
        Self {
            script,
            speech,
            timing: StreamTiming::default(),
        }
    }

    /// Builds both provider clients from the global configuration
    pub fn from_config() -> anyhow::Result<Self> {
        let script = ScriptClient::from_config()?;
        let speech = SpeechClient::from_config()?;
        Ok(Self::new(Arc::new(script), Arc::new(speech)))
    }

    /// Overrides the loop timing (tests, local tuning)
    pub fn with_timing(mut self, timing: StreamTiming) -> Self {
        self.timing = timing;
        self
    }
}

/// Router ready to be mounted (ex: `/api/podcast`)
pub fn podcast_stream_router(state: StreamState) -> Router {
    Router::new().route("/ws", get(podcast_ws)).with_state(state)
}

/// Upgrade handler for the streaming socket
pub async fn podcast_ws(
    ws: WebSocketUpgrade,
    State(state): State<StreamState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Per-connection control loop
///
/// Reads client commands until the socket closes. Generation runs in a
/// separate task so `stop_stream` is handled while segments are in flight;
/// any malformed message is answered with an `error` message and the
/// connection stays open.
async fn handle_socket(socket: WebSocket, state: StreamState) {
    let (mut sink, mut stream) = socket.split();

    let (outbound, mut outbound_rx) = mpsc::channel::<ServerMessage>(OUTBOUND_CHANNEL_SIZE);
    let writer = tokio::spawn(async move {
        while let Some(message) = outbound_rx.recv().await {
            let payload = match serde_json::to_string(&message) {
                Ok(payload) => payload,
                Err(err) => {
                    warn!(error = %err, "Failed to encode outbound message");
                    continue;
                }
            };
            if sink.send(Message::Text(payload.into())).await.is_err() {
                break;
            }
        }
    });

    let mut session = Session::new("websocket");
    info!(peer = %session.peer(), "WebSocket connected");

    let _ = outbound.send(ServerMessage::connected()).await;

    while let Some(Ok(message)) = stream.next().await {
        match message {
            Message::Text(text) => {
                handle_client_message(&text, &state, &mut session, &outbound).await;
            }
            Message::Close(_) => break,
            // Ping/pong handled by axum; binary frames are not part of the protocol
            _ => {}
        }
    }

    info!(peer = %session.peer(), "WebSocket disconnected");
    session.close();
    drop(outbound);
    let _ = writer.await;
}

async fn handle_client_message(
    text: &str,
    state: &StreamState,
    session: &mut Session,
    outbound: &mpsc::Sender<ServerMessage>,
) {
    let message: ClientMessage = match serde_json::from_str(text) {
        Ok(message) => message,
        Err(err) => {
            warn!(error = %err, "Malformed client message");
            let _ = outbound
                .send(ServerMessage::error(format!("Mensagem inválida: {}", err)))
                .await;
            return;
        }
    };

    debug!(?message, "Received client message");

    match message {
        ClientMessage::GeneratePodcast {
            title,
            description,
            preferences,
            genres,
            artists,
        } => {
            let Some(token) = session.begin() else {
                let _ = outbound
                    .send(ServerMessage::error("Uma transmissão já está em andamento"))
                    .await;
                return;
            };
            session.set_profile(preferences.clone(), genres.clone(), artists.clone());
            info!(
                peer = %session.peer(),
                title = %title,
                duration_min = session.preferences().map(|p| p.duration).unwrap_or_default(),
                genres = session.genres().len(),
                "Batch generation requested"
            );

            let request = ScriptRequest {
                title,
                description,
                preferences,
                genres,
                artists,
            };
            let orchestrator = Orchestrator::new(state.clone(), outbound.clone(), token);
            session.attach(tokio::spawn(orchestrator.run_batch(request)));
        }

        ClientMessage::StartStream {
            preferences,
            genres,
            artists,
        } => {
            let Some(token) = session.begin() else {
                let _ = outbound
                    .send(ServerMessage::error("Uma transmissão já está em andamento"))
                    .await;
                return;
            };
            session.set_profile(preferences, genres.clone(), artists.clone());
            info!(
                peer = %session.peer(),
                genres = session.genres().len(),
                artists = session.artists().len(),
                "Infinite stream requested"
            );

            let request = TopicRequest { genres, artists };
            let orchestrator = Orchestrator::new(state.clone(), outbound.clone(), token);
            session.attach(tokio::spawn(orchestrator.run_infinite(request)));
        }

        ClientMessage::StopStream => {
            // Idempotent: stopping an idle session has no observable effect.
            // The generation task emits `stream_stopped` when it winds down.
            if session.stop() {
                info!(peer = %session.peer(), "Stream stop requested");
            } else {
                debug!(peer = %session.peer(), "Stop with no active stream");
            }
        }
    }
}
