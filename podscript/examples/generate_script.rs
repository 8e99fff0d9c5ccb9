//! Generates and parses an episode script using the configured provider.
//!
//! Usage: cargo run --example generate_script
//!
//! Requires `providers.script.api_key` in the PodWave configuration.

use podscript::{parse_script, Preferences, ScriptClient, ScriptRequest};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let client = ScriptClient::from_config()?;

    let request = ScriptRequest {
        title: "Noites de Jazz".to_string(),
        description: "Uma viagem pelo jazz brasileiro dos anos 60".to_string(),
        preferences: Preferences::default(),
        genres: vec!["jazz".to_string(), "bossa nova".to_string()],
        artists: vec!["João Donato".to_string(), "Tom Jobim".to_string()],
    };

    let script = client.generate_script(&request).await?;
    println!("--- roteiro ---\n{}\n", script);

    let segments = parse_script(&script);
    println!("{} segmento(s):", segments.len());
    for segment in &segments {
        println!(
            "  {} [{}] {}s+{}s: {}",
            segment.id, segment.kind, segment.start_time, segment.duration, segment.content
        );
    }

    Ok(())
}
