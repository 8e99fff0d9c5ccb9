//! Decoded audio buffers
//!
//! Incoming `audio_segment` messages carry base64 MP3 bytes. The client
//! decodes them once into an [`AudioBuffer`] before queueing; an undecodable
//! payload is dropped (logged by the caller), never fatal.

use crate::error::{Error, Result};
use base64::Engine;
use podscript::SegmentKind;
use std::time::Duration;

/// Nominal bitrate used to estimate playback time when the segment carries
/// no duration metadata (infinite mode), in kilobits per second
const NOMINAL_BITRATE_KBPS: u64 = 128;

/// One decoded audio segment, ready for playback
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    pub segment_id: String,
    pub kind: SegmentKind,
    /// Raw MP3 bytes (playback itself is delegated to the sink)
    pub data: Vec<u8>,
    /// Metadata duration, or an estimate from the payload size
    pub duration: Duration,
}

impl AudioBuffer {
    /// Decodes a base64 audio payload into a playable buffer
    ///
    /// `duration` comes from the segment metadata when present (batch mode);
    /// infinite-mode segments have no timeline, so the duration is estimated
    /// from the payload size at a nominal bitrate.
    pub fn decode(
        segment_id: impl Into<String>,
        kind: SegmentKind,
        duration: Option<u32>,
        audio_b64: &str,
    ) -> Result<Self> {
        let data = base64::engine::general_purpose::STANDARD.decode(audio_b64)?;
        if data.is_empty() {
            return Err(Error::EmptyAudio);
        }

        let duration = match duration {
            Some(seconds) => Duration::from_secs(u64::from(seconds)),
            None => estimate_duration(data.len()),
        };

        Ok(Self {
            segment_id: segment_id.into(),
            kind,
            data,
            duration,
        })
    }
}

/// Estimates playback time from an MP3 payload size
fn estimate_duration(byte_len: usize) -> Duration {
    let bits = (byte_len as u64) * 8;
    Duration::from_secs_f64(bits as f64 / (NOMINAL_BITRATE_KBPS as f64 * 1000.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_valid_base64() {
        let buffer =
            AudioBuffer::decode("segment_0", SegmentKind::Narration, Some(30), "bXAzLWJ5dGVz")
                .unwrap();
        assert_eq!(buffer.data, b"mp3-bytes");
        assert_eq!(buffer.duration, Duration::from_secs(30));
    }

    #[test]
    fn rejects_invalid_base64() {
        let result = AudioBuffer::decode("segment_0", SegmentKind::Narration, Some(30), "???");
        assert!(matches!(result, Err(Error::Decode(_))));
    }

    #[test]
    fn rejects_empty_payloads() {
        let result = AudioBuffer::decode("segment_0", SegmentKind::Narration, Some(30), "");
        assert!(matches!(result, Err(Error::EmptyAudio)));
    }

    #[test]
    fn estimates_duration_without_metadata() {
        // 16000 bytes at 128 kbps = 1 second
        let payload = base64::engine::general_purpose::STANDARD.encode(vec![0u8; 16000]);
        let buffer =
            AudioBuffer::decode("segment_1", SegmentKind::Music, None, &payload).unwrap();
        assert_eq!(buffer.duration, Duration::from_secs(1));
    }
}
