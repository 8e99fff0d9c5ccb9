//! Per-connection stream orchestration
//!
//! One `Orchestrator` drives one generation task: either a batch episode
//! (script → segments → audio, in script order) or an infinite stream
//! (topic → one segment per iteration, until cancelled).
//!
//! Segments are generated strictly sequentially; provider round-trips are the
//! only suspension points. The cancellation token is checked before each
//! iteration and before each result is committed, so a stop request takes
//! effect before the next provider call and in-flight results are discarded.

use crate::generator::SegmentAudioGenerator;
use crate::messages::ServerMessage;
use crate::ws::StreamState;
use podscript::{fallback_topic, parse_script, ScriptRequest, Segment, SegmentKind, TopicRequest};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Fixed segment-kind rotation for infinite mode
///
/// Narration-heavy, with one music slot and one effect slot per cycle.
const SEGMENT_CYCLE: [SegmentKind; 6] = [
    SegmentKind::Narration,
    SegmentKind::Narration,
    SegmentKind::Music,
    SegmentKind::Narration,
    SegmentKind::Narration,
    SegmentKind::Effect,
];

/// Drives one generation task over one connection's outbound channel
pub struct Orchestrator {
    state: StreamState,
    outbound: mpsc::Sender<ServerMessage>,
    token: CancellationToken,
    generator: SegmentAudioGenerator,
}

impl Orchestrator {
    pub fn new(
        state: StreamState,
        outbound: mpsc::Sender<ServerMessage>,
        token: CancellationToken,
    ) -> Self {
        let generator = SegmentAudioGenerator::new(state.speech.clone());
        Self {
            state,
            outbound,
            token,
            generator,
        }
    }

    async fn send(&self, message: ServerMessage) {
        // The writer task only dies with the connection; at that point the
        // stream is being torn down anyway
        let _ = self.outbound.send(message).await;
    }

    // ========================================================================
    // Batch mode
    // ========================================================================

    /// Generates one full episode and streams its segments in script order
    ///
    /// Failures of individual segments are reported and skipped; a failure to
    /// obtain the script itself is reported as an `error` message and ends
    /// the task without closing the connection.
    pub async fn run_batch(self, request: ScriptRequest) {
        info!(title = %request.title, "Starting batch podcast generation");

        if let Err(err) = self.batch_inner(&request).await {
            warn!(error = %err, "Batch generation failed");
            self.send(ServerMessage::error(err.to_string())).await;
        }
    }

    async fn batch_inner(&self, request: &ScriptRequest) -> crate::Result<()> {
        self.send(ServerMessage::Status {
            message: "Gerando roteiro com IA...".to_string(),
        })
        .await;

        let script = self.state.script.generate_script(request).await?;
        debug!(script_len = script.len(), "Script generated");

        let segments = parse_script(&script);
        self.send(ServerMessage::ScriptReady {
            segments: segments.len(),
            message: "Roteiro criado! Iniciando geração de áudio...".to_string(),
        })
        .await;

        let total = segments.len();
        for (index, segment) in segments.iter().enumerate() {
            // Stop before the next provider call is issued
            if self.token.is_cancelled() {
                self.send(ServerMessage::StreamStopped).await;
                return Ok(());
            }

            self.send(ServerMessage::GeneratingSegment {
                current: index + 1,
                total,
                segment_type: segment.kind,
                message: format!(
                    "Gerando {} {}/{}...",
                    segment.kind.label_pt(),
                    index + 1,
                    total
                ),
            })
            .await;

            match self.generator.generate(segment).await {
                Some(audio) => {
                    // A stop that raced the in-flight call discards its result
                    if self.token.is_cancelled() {
                        self.send(ServerMessage::StreamStopped).await;
                        return Ok(());
                    }
                    self.send(Self::audio_message(segment, audio)).await;

                    // Pace successful sends so the client is not flooded
                    tokio::time::sleep(self.state.timing.segment_pacing).await;
                }
                None => {
                    self.send(ServerMessage::SegmentError {
                        segment_id: segment.id.clone(),
                        error: "Falha na geração de áudio".to_string(),
                    })
                    .await;
                }
            }
        }

        self.send(ServerMessage::GenerationComplete {
            message: "Podcast gerado com sucesso!".to_string(),
        })
        .await;
        Ok(())
    }

    fn audio_message(segment: &Segment, audio: String) -> ServerMessage {
        ServerMessage::AudioSegment {
            segment_id: segment.id.clone(),
            segment_type: segment.kind,
            start_time: Some(segment.start_time),
            duration: Some(segment.duration),
            audio_data: audio,
            message: format!("Reproduzindo {}...", segment.kind.label_pt()),
        }
    }

    // ========================================================================
    // Infinite mode
    // ========================================================================

    /// Streams generated segments until the token is cancelled
    ///
    /// Each iteration asks the generation provider for a short contextual
    /// topic (substituting a deterministic template on failure), picks the
    /// segment kind from a fixed rotation, synthesizes it, and pauses before
    /// the next round. Errors lengthen the pause; nothing breaks the loop
    /// except cancellation.
    pub async fn run_infinite(self, request: TopicRequest) {
        info!(
            genres = request.genres.len(),
            artists = request.artists.len(),
            "Starting infinite stream"
        );

        self.send(ServerMessage::StreamStarted {
            message: "Transmissão contínua iniciada".to_string(),
        })
        .await;

        let mut counter: u64 = 0;

        while !self.token.is_cancelled() {
            self.send(ServerMessage::GeneratingContent {
                message: "Gerando novo conteúdo...".to_string(),
            })
            .await;

            let topic = match self.state.script.generate_topic(&request).await {
                Ok(topic) => topic,
                Err(err) => {
                    warn!(error = %err, "Topic generation failed, using fallback");
                    fallback_topic(&request, counter)
                }
            };

            // Stop before committing to the synthesis call
            if self.token.is_cancelled() {
                break;
            }

            let kind = SEGMENT_CYCLE[(counter as usize) % SEGMENT_CYCLE.len()];
            let segment = Segment {
                id: Segment::id_for(counter),
                kind,
                start_time: 0,
                duration: 0,
                content: topic,
            };

            let pause = match self.generator.generate(&segment).await {
                Some(audio) => {
                    if self.token.is_cancelled() {
                        break;
                    }
                    // No global timeline in infinite mode: omit timing fields
                    self.send(ServerMessage::AudioSegment {
                        segment_id: segment.id.clone(),
                        segment_type: segment.kind,
                        start_time: None,
                        duration: None,
                        audio_data: audio,
                        message: format!("Reproduzindo {}...", segment.kind.label_pt()),
                    })
                    .await;
                    self.state.timing.loop_pause
                }
                None => {
                    self.send(ServerMessage::SegmentError {
                        segment_id: segment.id.clone(),
                        error: "Falha na geração de áudio".to_string(),
                    })
                    .await;
                    self.state.timing.error_pause
                }
            };

            counter += 1;

            tokio::select! {
                _ = tokio::time::sleep(pause) => {}
                _ = self.token.cancelled() => break,
            }
        }

        info!(segments = counter, "Infinite stream stopped");
        self.send(ServerMessage::StreamStopped).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_is_narration_heavy_with_periodic_slots() {
        let narrations = SEGMENT_CYCLE
            .iter()
            .filter(|k| **k == SegmentKind::Narration)
            .count();
        assert_eq!(narrations, 4);
        assert_eq!(SEGMENT_CYCLE[2], SegmentKind::Music);
        assert_eq!(SEGMENT_CYCLE[5], SegmentKind::Effect);
    }

    #[test]
    fn cycle_repeats_every_six_segments() {
        for counter in 0..18usize {
            assert_eq!(
                SEGMENT_CYCLE[counter % SEGMENT_CYCLE.len()],
                SEGMENT_CYCLE[(counter + 6) % SEGMENT_CYCLE.len()]
            );
        }
    }
}
