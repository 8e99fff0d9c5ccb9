//! Best-effort audio generation for segments
//!
//! Thin dispatch layer between the orchestrator and the speech client. A
//! provider failure yields `None`: the affected segment is skipped and the
//! stream continues. There are no retries anywhere on this path.

use podscript::Segment;
use podspeech::SpeechClient;
use std::sync::Arc;
use tracing::warn;

/// Generates audio for segments, one at a time
#[derive(Clone)]
pub struct SegmentAudioGenerator {
    speech: Arc<SpeechClient>,
}

impl SegmentAudioGenerator {
    pub fn new(speech: Arc<SpeechClient>) -> Self {
        Self { speech }
    }

    /// Synthesizes one segment with the voice profile for its kind
    ///
    /// Returns the base64 audio on success, `None` on any provider failure.
    pub async fn generate(&self, segment: &Segment) -> Option<String> {
        match self
            .speech
            .synthesize_segment(segment.kind, &segment.content)
            .await
        {
            Ok(audio) => Some(audio),
            Err(err) => {
                warn!(
                    segment_id = %segment.id,
                    kind = %segment.kind,
                    error = %err,
                    "Audio generation failed, skipping segment"
                );
                None
            }
        }
    }
}
