//! # podplayer - Client-side playback for PodWave streams
//!
//! The client companion to `podstream`: a WebSocket consumer that decodes
//! incoming base64 audio segments into buffers, a FIFO queue, and a playback
//! scheduler that plays buffers back-to-back and exposes
//! play/pause/stop/volume to the UI layer.
//!
//! Invariants:
//! - at most one buffer is ever the current source;
//! - buffers play in arrival order, gaplessly;
//! - a failed decode drops that segment only.
//!
//! Real audio output is out of scope: sinks stub playback (see
//! [`sink::TimedSink`] and [`sink::MockSink`]).

pub mod buffer;
pub mod error;
pub mod player;
pub mod queue;
pub mod sink;
pub mod stream;

pub use buffer::AudioBuffer;
pub use error::{Error, Result};
pub use player::{Player, PlayerHandle, PlayerState};
pub use queue::SegmentQueue;
pub use sink::{AudioSink, MockSink, SinkEvent, SinkEvents, TimedSink};
pub use stream::StreamConsumer;
