//! Voice profiles per segment kind
//!
//! Each segment category is synthesized with its own voice and prosody.
//! Music and effects are speech stand-ins: there is no real music synthesis
//! behind them, only a slowed/lowered (music) or sped-up/raised (effects)
//! voice rendering of a placeholder text.

use crate::models::{AudioConfig, AudioEncoding, SsmlGender, SynthesisInput, SynthesizeRequest, VoiceSelection};
use podscript::SegmentKind;

/// Language code shared by all profiles
pub const LANGUAGE_CODE: &str = "pt-BR";

/// Fixed input text used for music segments (the content is a style hint,
/// not something to read aloud)
pub const MUSIC_PLACEHOLDER: &str = "[Som ambiente musical]";

/// Voice and prosody configuration for one segment kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoiceProfile {
    pub voice_name: &'static str,
    pub gender: SsmlGender,
    pub speaking_rate: f32,
    pub pitch: f32,
    pub volume_gain_db: f32,
}

/// Neutral narration voice
pub const NARRATION: VoiceProfile = VoiceProfile {
    voice_name: "pt-BR-Neural2-A",
    gender: SsmlGender::Neutral,
    speaking_rate: 1.0,
    pitch: 0.0,
    volume_gain_db: 0.0,
};

/// Slowed, lowered, quieter voice standing in for background music
pub const MUSIC: VoiceProfile = VoiceProfile {
    voice_name: "pt-BR-Neural2-B",
    gender: SsmlGender::Female,
    speaking_rate: 0.6,
    pitch: -5.0,
    volume_gain_db: -10.0,
};

/// Faster, raised, slightly quieter voice for sound effects
pub const EFFECT: VoiceProfile = VoiceProfile {
    voice_name: "pt-BR-Neural2-C",
    gender: SsmlGender::Male,
    speaking_rate: 1.5,
    pitch: 5.0,
    volume_gain_db: -5.0,
};

impl VoiceProfile {
    /// Returns the profile for a segment kind
    pub fn for_kind(kind: SegmentKind) -> &'static VoiceProfile {
        match kind {
            SegmentKind::Narration => &NARRATION,
            SegmentKind::Music => &MUSIC,
            SegmentKind::Effect => &EFFECT,
        }
    }
}

/// The text actually sent to the synthesizer for a segment
pub fn input_text(kind: SegmentKind, content: &str) -> String {
    match kind {
        SegmentKind::Narration => content.to_string(),
        SegmentKind::Music => MUSIC_PLACEHOLDER.to_string(),
        SegmentKind::Effect => format!("[Efeito sonoro: {}]", content),
    }
}

/// Builds the full synthesis request for a segment
pub fn request_for(kind: SegmentKind, content: &str) -> SynthesizeRequest {
    let profile = VoiceProfile::for_kind(kind);

    SynthesizeRequest {
        input: SynthesisInput {
            text: input_text(kind, content),
        },
        voice: VoiceSelection {
            language_code: LANGUAGE_CODE.to_string(),
            name: profile.voice_name.to_string(),
            ssml_gender: profile.gender,
        },
        audio_config: AudioConfig {
            audio_encoding: AudioEncoding::Mp3,
            speaking_rate: profile.speaking_rate,
            pitch: profile.pitch,
            volume_gain_db: profile.volume_gain_db,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_kind_has_a_distinct_voice() {
        let narration = VoiceProfile::for_kind(SegmentKind::Narration);
        let music = VoiceProfile::for_kind(SegmentKind::Music);
        let effect = VoiceProfile::for_kind(SegmentKind::Effect);

        assert_eq!(narration.voice_name, "pt-BR-Neural2-A");
        assert_eq!(music.voice_name, "pt-BR-Neural2-B");
        assert_eq!(effect.voice_name, "pt-BR-Neural2-C");
    }

    #[test]
    fn music_prosody_is_slowed_and_lowered() {
        assert_eq!(MUSIC.speaking_rate, 0.6);
        assert_eq!(MUSIC.pitch, -5.0);
        assert_eq!(MUSIC.volume_gain_db, -10.0);
    }

    #[test]
    fn effect_prosody_is_raised() {
        assert_eq!(EFFECT.speaking_rate, 1.5);
        assert_eq!(EFFECT.pitch, 5.0);
        assert_eq!(EFFECT.volume_gain_db, -5.0);
    }

    #[test]
    fn music_input_ignores_the_style_hint() {
        assert_eq!(
            input_text(SegmentKind::Music, "Estilo: ambiente suave"),
            MUSIC_PLACEHOLDER
        );
    }

    #[test]
    fn effect_input_wraps_the_description() {
        assert_eq!(
            input_text(SegmentKind::Effect, "Som de páginas virando"),
            "[Efeito sonoro: Som de páginas virando]"
        );
    }

    #[test]
    fn narration_input_is_verbatim() {
        assert_eq!(input_text(SegmentKind::Narration, "Bem-vindos"), "Bem-vindos");
    }
}
