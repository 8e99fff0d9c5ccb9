//! Prompt builders for the generation provider
//!
//! The provider is driven entirely through natural-language prompts in
//! Portuguese, matching the product's pt-BR audience. The script prompt pins
//! the exact tagged-line format the parser consumes.

use crate::models::{ScriptRequest, TopicRequest};

/// Maximum number of reference artists mentioned in a prompt
const MAX_PROMPT_ARTISTS: usize = 5;

/// Builds the full-episode script prompt
pub fn script_prompt(request: &ScriptRequest) -> String {
    let artists = request
        .artists
        .iter()
        .take(MAX_PROMPT_ARTISTS)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");
    let genres = request.genres.join(", ");
    let lead_genre = request
        .genres
        .first()
        .map(String::as_str)
        .unwrap_or("música popular");

    format!(
        "Crie um roteiro detalhado para um podcast de {duration} minutos sobre \"{title}\".

Descrição: {description}
Gêneros musicais: {genres}
Artistas de referência: {artists}
Intensidade: {intensity}

O roteiro deve incluir:
1. [NARRAÇÃO] Introdução cativante (30 segundos)
2. [NARRAÇÃO] Desenvolvimento principal com 5 segmentos de 2-3 minutos cada
3. [MÚSICA] Indicações de música de fundo apropriada para cada momento
4. [EFEITOS] Momentos específicos para efeitos sonoros
5. [NARRAÇÃO] Conclusão impactante (30 segundos)

Formate EXATAMENTE assim:
[NARRAÇÃO|00:00-00:30] Texto da introdução...
[MÚSICA|00:00-10:00] Estilo: ambiente suave, inspirado em {lead_genre}
[EFEITOS|00:15-00:17] Som de páginas virando
[NARRAÇÃO|00:30-03:00] Primeiro segmento...

Continue este padrão para todo o episódio.",
        duration = request.preferences.duration,
        title = request.title,
        description = request.description,
        genres = genres,
        artists = artists,
        intensity = request.preferences.intensity,
        lead_genre = lead_genre,
    )
}

/// Builds the short contextual-topic prompt (infinite mode)
pub fn topic_prompt(request: &TopicRequest) -> String {
    let genres = if request.genres.is_empty() {
        "música popular".to_string()
    } else {
        request.genres.join(", ")
    };
    let artists = request
        .artists
        .iter()
        .take(MAX_PROMPT_ARTISTS)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Sugira um tema curto (uma frase) para o próximo bloco de um podcast musical.
Gêneros: {genres}
Artistas de referência: {artists}

Responda apenas com o tema, sem aspas e sem pontuação final.",
    )
}

/// Deterministic fallback topic when the provider call fails
///
/// Rotates over a fixed set of templates, filling the blanks from the
/// listener's genres and artists. The same counter always yields the same
/// topic so a failing provider produces a stable, predictable stream.
pub fn fallback_topic(request: &TopicRequest, counter: u64) -> String {
    let genre = pick(&request.genres, counter).unwrap_or("pop");
    let artist = pick(&request.artists, counter).unwrap_or("um grande artista");

    match counter % 4 {
        0 => format!("A história do {}", genre),
        1 => format!("Curiosidades sobre {}", artist),
        2 => format!("Os discos que definiram o {}", genre),
        _ => format!("A influência de {} na música atual", artist),
    }
}

fn pick(values: &[String], counter: u64) -> Option<&str> {
    if values.is_empty() {
        return None;
    }
    values
        .get((counter as usize) % values.len())
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Preferences;

    fn request() -> ScriptRequest {
        ScriptRequest {
            title: "Noites de Jazz".to_string(),
            description: "Uma viagem pelo jazz brasileiro".to_string(),
            preferences: Preferences {
                duration: 15,
                intensity: "relaxado".to_string(),
                format: "musical".to_string(),
            },
            genres: vec!["jazz".to_string(), "bossa nova".to_string()],
            artists: (1..=8).map(|i| format!("Artista {}", i)).collect(),
        }
    }

    #[test]
    fn script_prompt_pins_the_tagged_format() {
        let prompt = script_prompt(&request());
        assert!(prompt.contains("15 minutos"));
        assert!(prompt.contains("\"Noites de Jazz\""));
        assert!(prompt.contains("[NARRAÇÃO|00:00-00:30]"));
        assert!(prompt.contains("inspirado em jazz"));
    }

    #[test]
    fn script_prompt_caps_reference_artists() {
        let prompt = script_prompt(&request());
        assert!(prompt.contains("Artista 5"));
        assert!(!prompt.contains("Artista 6"));
    }

    #[test]
    fn fallback_topic_is_deterministic() {
        let request = TopicRequest {
            genres: vec!["rock".to_string()],
            artists: vec!["Rita Lee".to_string()],
        };
        assert_eq!(fallback_topic(&request, 3), fallback_topic(&request, 3));
        assert_eq!(fallback_topic(&request, 0), "A história do rock");
        assert_eq!(fallback_topic(&request, 1), "Curiosidades sobre Rita Lee");
    }

    #[test]
    fn fallback_topic_handles_empty_preferences() {
        let request = TopicRequest::default();
        assert_eq!(fallback_topic(&request, 0), "A história do pop");
        assert_eq!(
            fallback_topic(&request, 1),
            "Curiosidades sobre um grande artista"
        );
    }
}
