//! # podspeech - Speech-synthesis provider client
//!
//! This crate turns segment text into audio through the text-to-speech
//! provider. Each [`podscript::SegmentKind`] maps to a dedicated
//! [`VoiceProfile`]: neutral narration, a slowed/lowered music stand-in, and
//! a raised effects voice. The provider returns MP3 bytes encoded in base64,
//! which travel to clients untouched.
//!
//! Synthesis is deliberately best-effort: there are no retries, and callers
//! are expected to skip a failed segment rather than abort the stream.

pub mod client;
pub mod config_ext;
pub mod error;
pub mod models;
pub mod profiles;

pub use client::{ClientBuilder, SpeechClient};
pub use config_ext::SpeechConfigExt;
pub use error::{Error, Result};
pub use models::{AudioConfig, AudioEncoding, SsmlGender, SynthesizeRequest, SynthesizeResponse};
pub use profiles::VoiceProfile;
