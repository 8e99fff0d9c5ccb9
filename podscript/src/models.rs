//! Data models for podcast scripts and the generation provider
//!
//! This module contains the script domain types (segments, listener
//! preferences) and the structures needed to serialize requests to and
//! deserialize responses from the generation provider.

use serde::{Deserialize, Serialize};

// ============================================================================
// Script Domain Models
// ============================================================================

/// Category of a podcast segment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    /// Spoken narration
    Narration,
    /// Background music cue (synthesized as a speech stand-in)
    Music,
    /// Sound effect cue
    Effect,
}

impl SegmentKind {
    /// Maps a script tag label to a segment kind, case-insensitively
    ///
    /// The provider emits Portuguese labels (`NARRAÇÃO`, `MÚSICA`, `EFEITOS`).
    /// Unknown labels return `None`.
    pub fn from_tag(label: &str) -> Option<Self> {
        match label.to_lowercase().as_str() {
            "narração" => Some(Self::Narration),
            "música" => Some(Self::Music),
            "efeitos" => Some(Self::Effect),
            _ => None,
        }
    }

    /// Portuguese display label, as used in user-facing status messages
    pub fn label_pt(&self) -> &'static str {
        match self {
            Self::Narration => "narração",
            Self::Music => "música",
            Self::Effect => "efeitos",
        }
    }
}

impl std::fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Narration => "narration",
            Self::Music => "music",
            Self::Effect => "effect",
        };
        write!(f, "{}", name)
    }
}

/// A timed unit of podcast content
///
/// Produced by the script parser (batch mode) or synthesized on the fly
/// (infinite mode). Immutable once created; the synthesized audio travels on
/// the wire message, not on the segment itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Segment {
    /// Sequential identifier (`segment_0`, `segment_1`, ...)
    pub id: String,
    /// Segment category
    pub kind: SegmentKind,
    /// Offset from the start of the episode, in seconds
    pub start_time: u32,
    /// Duration in seconds
    pub duration: u32,
    /// Text content (narration text, music style hint, effect description)
    pub content: String,
}

impl Segment {
    /// Builds the conventional id for the nth segment
    pub fn id_for(index: u64) -> String {
        format!("segment_{}", index)
    }
}

/// Listener preferences collected by the onboarding flow
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Preferences {
    /// Target episode duration in minutes
    pub duration: u32,
    /// Listening intensity (e.g., "relaxado", "moderado", "intenso")
    pub intensity: String,
    /// Preferred episode format
    pub format: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            duration: 10,
            intensity: "moderado".to_string(),
            format: "musical".to_string(),
        }
    }
}

/// Everything needed to request a full episode script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptRequest {
    pub title: String,
    pub description: String,
    pub preferences: Preferences,
    pub genres: Vec<String>,
    pub artists: Vec<String>,
}

/// Everything needed to request a short contextual topic (infinite mode)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicRequest {
    pub genres: Vec<String>,
    pub artists: Vec<String>,
}

// ============================================================================
// Generation Provider Wire Models
// ============================================================================

/// Request body for the `generateContent` endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    /// Wraps a single natural-language prompt
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.into(),
                }],
            }],
        }
    }
}

/// A block of content parts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

/// A single text part
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

/// Response body from the `generateContent` endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// A single completion candidate
#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    pub content: Content,
}

impl GenerateContentResponse {
    /// Extracts the text of the first candidate, if any
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_mapping_is_case_insensitive() {
        assert_eq!(SegmentKind::from_tag("NARRAÇÃO"), Some(SegmentKind::Narration));
        assert_eq!(SegmentKind::from_tag("narração"), Some(SegmentKind::Narration));
        assert_eq!(SegmentKind::from_tag("Música"), Some(SegmentKind::Music));
        assert_eq!(SegmentKind::from_tag("efeitos"), Some(SegmentKind::Effect));
        assert_eq!(SegmentKind::from_tag("INTERLÚDIO"), None);
    }

    #[test]
    fn kind_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&SegmentKind::Narration).unwrap(),
            "\"narration\""
        );
        assert_eq!(serde_json::to_string(&SegmentKind::Music).unwrap(), "\"music\"");
        assert_eq!(serde_json::to_string(&SegmentKind::Effect).unwrap(), "\"effect\"");
    }

    #[test]
    fn first_text_reads_the_first_candidate() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"roteiro"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(response.first_text(), Some("roteiro"));

        let empty: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.first_text(), None);
    }
}
