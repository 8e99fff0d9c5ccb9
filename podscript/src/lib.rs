//! # podscript - Podcast scripts and the generation provider
//!
//! This crate owns the script side of PodWave:
//!
//! - The script domain model ([`Segment`], [`SegmentKind`], [`Preferences`])
//! - The tagged-script parser ([`parse_script`]) for the
//!   `[NARRAÇÃO|MM:SS-MM:SS] ...` line format
//! - The generation-provider HTTP client ([`ScriptClient`]) for episode
//!   scripts and infinite-mode topics
//! - Portuguese prompt builders and the deterministic topic fallback
//!
//! # Example
//!
//! ```
//! use podscript::{parse_script, SegmentKind};
//!
//! let segments = parse_script("[NARRAÇÃO|00:00-00:30] Bem-vindos ao PodWave");
//! assert_eq!(segments.len(), 1);
//! assert_eq!(segments[0].kind, SegmentKind::Narration);
//! assert_eq!(segments[0].duration, 30);
//! ```

pub mod client;
pub mod config_ext;
pub mod error;
pub mod models;
pub mod parser;
pub mod prompt;

pub use client::{ClientBuilder, ScriptClient};
pub use config_ext::ScriptConfigExt;
pub use error::{Error, Result};
pub use models::{Preferences, ScriptRequest, Segment, SegmentKind, TopicRequest};
pub use parser::{parse_script, parse_timestamp};
pub use prompt::fallback_topic;
