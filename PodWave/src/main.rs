use podscript::ScriptConfigExt;
use podserver::{LoggingOptions, Server};
use podspeech::SpeechConfigExt;
use podstream::StreamState;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ========== PHASE 1 : Configuration et logging ==========

    podserver::init_logging(&LoggingOptions::from_config());

    let config = podconfig::get_config();
    info!(
        "🎙️ PodWave starting on {}:{}",
        config.get_base_url(),
        config.get_http_port()
    );

    if !config.get_script_enabled()? {
        tracing::warn!("⚠️ Script provider is disabled in configuration");
    }
    if !config.get_speech_enabled()? {
        tracing::warn!("⚠️ Speech provider is disabled in configuration");
    }

    // ========== PHASE 2 : Providers et endpoint de streaming ==========

    info!("📡 Initializing provider clients...");
    let stream_state = StreamState::from_config()
        .expect("Failed to build provider clients (check providers.*.api_key in the config)");

    let mut server = Server::new_configured();

    let server_info = server.info();
    server
        .add_route("/info", move || {
            let info = server_info.clone();
            async move {
                serde_json::json!({
                    "name": info.name,
                    "version": env!("CARGO_PKG_VERSION"),
                    "stream_endpoint": "/api/podcast/ws",
                })
            }
        })
        .await;

    info!("🎵 Mounting podcast streaming endpoint at /api/podcast/ws");
    server
        .add_router(
            "/api/podcast",
            podstream::podcast_stream_router(stream_state),
        )
        .await;

    // ========== PHASE 3 : Démarrage du serveur ==========

    info!("🌐 Starting HTTP server...");
    server.start().await;

    info!("✅ PodWave is ready!");
    info!("Press Ctrl+C to stop...");
    server.wait().await;

    Ok(())
}
