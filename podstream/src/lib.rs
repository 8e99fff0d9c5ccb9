//! # podstream - WebSocket streaming orchestrator
//!
//! The core of PodWave: a per-connection control loop that turns listener
//! preferences into a stream of synthesized audio segments.
//!
//! Control flow: the client opens the socket and receives `connected`; a
//! `generate_podcast` command produces one scripted episode segment by
//! segment (batch mode), while `start_stream` produces segments forever
//! until `stop_stream` or disconnect (infinite mode). Segments are generated
//! strictly one at a time and delivered in generation order; a failed
//! segment is reported and skipped, never fatal.
//!
//! The WebSocket endpoint lives in [`ws`]; mount
//! [`ws::podcast_stream_router`] under your API prefix.

pub mod error;
pub mod generator;
pub mod messages;
pub mod orchestrator;
pub mod session;
pub mod ws;

pub use error::{Error, Result};
pub use generator::SegmentAudioGenerator;
pub use messages::{ClientMessage, ServerMessage};
pub use orchestrator::Orchestrator;
pub use session::Session;
pub use ws::{podcast_stream_router, StreamState, StreamTiming};
