//! Initialisation du logging (tracing) depuis la configuration

use podconfig::get_config;
use tracing_subscriber::EnvFilter;

/// Options de configuration du logging
#[derive(Debug, Clone)]
pub struct LoggingOptions {
    /// Niveau minimum (TRACE, DEBUG, INFO, WARN, ERROR)
    pub min_level: String,
    /// Activer la sortie console
    pub enable_console: bool,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            min_level: "INFO".to_string(),
            enable_console: true,
        }
    }
}

impl LoggingOptions {
    /// Construit les options depuis la configuration PodWave
    pub fn from_config() -> Self {
        let config = get_config();
        Self {
            min_level: config
                .get_log_min_level()
                .unwrap_or_else(|_| "INFO".to_string()),
            enable_console: config.get_log_enable_console().unwrap_or(true),
        }
    }
}

/// Initialise le système de tracing
///
/// La variable d'environnement `RUST_LOG` prend le pas sur le niveau
/// configuré. À n'appeler qu'une seule fois au démarrage.
pub fn init_logging(options: &LoggingOptions) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(options.min_level.to_lowercase()));

    if options.enable_console {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::sink)
            .init();
    }
}
