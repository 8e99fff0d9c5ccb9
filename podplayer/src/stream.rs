//! WebSocket stream consumer
//!
//! Connects to the PodWave streaming endpoint, sends the start command, and
//! feeds incoming `audio_segment` payloads to the player. Undecodable
//! segments are logged and dropped; `stream_stopped` and
//! `generation_complete` end the consumer.
//!
//! Stopping is cooperative: [`PlayerHandle::stop`] cancels the token bound
//! here, which makes the consumer send `stop_stream` upstream and wind down.
//!
//! [`PlayerHandle::stop`]: crate::player::PlayerHandle::stop

use crate::buffer::AudioBuffer;
use crate::error::Result;
use crate::player::PlayerHandle;
use futures_util::{SinkExt, StreamExt};
use podstream::{ClientMessage, ServerMessage};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Feeds one podcast stream into a player
pub struct StreamConsumer {
    url: String,
    player: PlayerHandle,
    token: CancellationToken,
}

impl StreamConsumer {
    /// Creates a consumer for the given `ws://.../ws` endpoint
    pub fn new(url: impl Into<String>, player: PlayerHandle) -> Self {
        Self {
            url: url.into(),
            player,
            token: CancellationToken::new(),
        }
    }

    /// Token cancelled by [`PlayerHandle::stop`] (or by the caller) to end
    /// the stream
    ///
    /// [`PlayerHandle::stop`]: crate::player::PlayerHandle::stop
    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Connects, sends the start command and pumps segments until the stream
    /// ends or the token is cancelled
    pub async fn run(self, start: ClientMessage) -> Result<()> {
        let (socket, _) = connect_async(&self.url).await?;
        let (mut sink, mut stream) = socket.split();

        info!(url = %self.url, "Connected to podcast stream");
        self.player.bind_upstream(self.token.clone()).await.ok();
        self.player.set_upstream_open(true).await.ok();

        sink.send(Message::text(serde_json::to_string(&start)?))
            .await?;

        loop {
            tokio::select! {
                _ = self.token.cancelled() => {
                    debug!("Stop requested, ending upstream stream");
                    let stop = serde_json::to_string(&ClientMessage::StopStream)?;
                    let _ = sink.send(Message::text(stop)).await;
                    break;
                }
                frame = stream.next() => {
                    match frame {
                        None => break,
                        Some(Err(err)) => {
                            warn!(error = %err, "Stream transport error");
                            break;
                        }
                        Some(Ok(Message::Text(text))) => {
                            if self.handle_server_message(&text).await {
                                break;
                            }
                        }
                        Some(Ok(Message::Close(_))) => break,
                        Some(Ok(_)) => {}
                    }
                }
            }
        }

        self.player.set_upstream_open(false).await.ok();
        Ok(())
    }

    /// Handles one server message; returns true when the stream is over
    async fn handle_server_message(&self, text: &str) -> bool {
        let message: ServerMessage = match serde_json::from_str(text) {
            Ok(message) => message,
            Err(err) => {
                // Not fatal: skip what we cannot understand
                warn!(error = %err, "Malformed server message dropped");
                return false;
            }
        };

        match message {
            ServerMessage::AudioSegment {
                segment_id,
                segment_type,
                duration,
                audio_data,
                ..
            } => match AudioBuffer::decode(&segment_id, segment_type, duration, &audio_data) {
                Ok(buffer) => {
                    if self.player.enqueue(buffer).await.is_err() {
                        warn!("Player is gone, ending stream");
                        return true;
                    }
                }
                Err(err) => {
                    warn!(segment_id = %segment_id, error = %err, "Dropping undecodable segment");
                }
            },
            ServerMessage::SegmentError { segment_id, error } => {
                warn!(segment_id = %segment_id, error = %error, "Server skipped a segment");
            }
            ServerMessage::GenerationComplete { .. } => {
                info!("Episode generation complete");
                return true;
            }
            ServerMessage::StreamStopped => {
                info!("Stream stopped by server");
                return true;
            }
            ServerMessage::Error { message } => {
                warn!(message = %message, "Server reported an error");
            }
            ServerMessage::Connected { .. }
            | ServerMessage::Status { .. }
            | ServerMessage::ScriptReady { .. }
            | ServerMessage::GeneratingSegment { .. }
            | ServerMessage::GeneratingContent { .. }
            | ServerMessage::StreamStarted { .. } => {
                debug!(?message, "Stream progress");
            }
        }
        false
    }
}
