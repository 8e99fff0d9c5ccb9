//! WebSocket message schema
//!
//! All traffic on the podcast socket is JSON with a `type` discriminator.
//! Tag values are snake_case; payload fields are camelCase, matching what the
//! web client consumes (`segmentId`, `audioData`, ...).

use podscript::{Preferences, SegmentKind};
use serde::{Deserialize, Serialize};

/// Messages accepted from clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Batch mode: generate one full episode from a script
    GeneratePodcast {
        title: String,
        description: String,
        preferences: Preferences,
        #[serde(default)]
        genres: Vec<String>,
        #[serde(default)]
        artists: Vec<String>,
    },
    /// Infinite mode: stream generated segments until stopped
    StartStream {
        preferences: Preferences,
        #[serde(default)]
        genres: Vec<String>,
        #[serde(default)]
        artists: Vec<String>,
    },
    /// Stop the active stream, if any
    StopStream,
}

/// Messages emitted to clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Connection acknowledgment, sent once on socket open
    Connected { message: String },

    /// Free-form progress update
    Status { message: String },

    /// The episode script is parsed; audio generation starts
    ScriptReady { segments: usize, message: String },

    /// Audio generation for one segment started
    #[serde(rename_all = "camelCase")]
    GeneratingSegment {
        current: usize,
        total: usize,
        segment_type: SegmentKind,
        message: String,
    },

    /// One synthesized audio segment
    #[serde(rename_all = "camelCase")]
    AudioSegment {
        segment_id: String,
        segment_type: SegmentKind,
        #[serde(skip_serializing_if = "Option::is_none")]
        start_time: Option<u32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        duration: Option<u32>,
        /// Base64-encoded audio bytes
        audio_data: String,
        message: String,
    },

    /// Audio generation for one segment failed; the stream continues
    #[serde(rename_all = "camelCase")]
    SegmentError { segment_id: String, error: String },

    /// Batch generation finished
    GenerationComplete { message: String },

    /// Infinite-mode stream accepted and running
    StreamStarted { message: String },

    /// Infinite mode: a new topic/segment is being produced
    GeneratingContent { message: String },

    /// Recoverable failure; the connection stays open
    Error { message: String },

    /// The active stream was stopped
    StreamStopped,
}

impl ServerMessage {
    /// Connection acknowledgment
    pub fn connected() -> Self {
        Self::Connected {
            message: "Podcast streaming ready".to_string(),
        }
    }

    /// Recoverable error report
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }
}
