//! Wire models for the speech-synthesis provider
//!
//! The provider takes a `text:synthesize` POST with input text, a voice
//! selection and prosody parameters, and answers with base64-encoded audio.

use serde::{Deserialize, Serialize};

/// Request body for the `text:synthesize` endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SynthesizeRequest {
    pub input: SynthesisInput,
    pub voice: VoiceSelection,
    pub audio_config: AudioConfig,
}

/// Text to synthesize
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SynthesisInput {
    pub text: String,
}

/// Voice selection parameters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VoiceSelection {
    /// BCP-47 language code (e.g., "pt-BR")
    pub language_code: String,
    /// Provider voice name (e.g., "pt-BR-Neural2-A")
    pub name: String,
    pub ssml_gender: SsmlGender,
}

/// Voice gender hint
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SsmlGender {
    Neutral,
    Female,
    Male,
}

/// Output encoding and prosody parameters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AudioConfig {
    pub audio_encoding: AudioEncoding,
    /// 1.0 is normal speed
    pub speaking_rate: f32,
    /// Semitones relative to the voice default
    pub pitch: f32,
    /// Gain applied to the output, in dB
    pub volume_gain_db: f32,
}

/// Output audio encoding
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AudioEncoding {
    #[serde(rename = "MP3")]
    Mp3,
}

/// Response body from the `text:synthesize` endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesizeResponse {
    /// Base64-encoded audio bytes
    #[serde(default)]
    pub audio_content: String,
}
