//! # Module Server - API de haut niveau pour Axum
//!
//! Abstraction simple pour créer le serveur HTTP de PodWave avec Axum :
//! routes JSON dynamiques, handlers avec état (WebSocket inclus), montage de
//! sous-routers, démarrage avec arrêt propre sur Ctrl+C, et initialisation
//! du logging depuis la configuration.

mod logs;
mod server;

pub use logs::{init_logging, LoggingOptions};
pub use server::{Server, ServerBuilder, ServerInfo};
