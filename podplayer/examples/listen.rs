//! Connects to a running PodWave server and simulates playback of an
//! infinite stream.
//!
//! Usage: cargo run --example listen [ws://localhost:8080/api/podcast/ws]

use podplayer::{Player, StreamConsumer, TimedSink};
use podscript::Preferences;
use podstream::ClientMessage;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "ws://localhost:8080/api/podcast/ws".to_string());

    let player = Player::spawn(TimedSink::realtime());
    let consumer = StreamConsumer::new(&url, player.clone());
    let token = consumer.cancellation_token();

    // Stop cleanly on Ctrl+C
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        token.cancel();
    });

    let mut state_rx = player.subscribe();
    tokio::spawn(async move {
        while state_rx.changed().await.is_ok() {
            let state = state_rx.borrow().clone();
            println!(
                "playing={} generating={} t={:.1}s/{:.1}s vol={:.2}",
                state.is_playing,
                state.is_generating,
                state.current_time,
                state.duration,
                state.volume
            );
        }
    });

    consumer
        .run(ClientMessage::StartStream {
            preferences: Preferences::default(),
            genres: vec!["mpb".to_string(), "bossa nova".to_string()],
            artists: vec!["Elis Regina".to_string()],
        })
        .await?;

    Ok(())
}
