//! Extension trait integrating the speech provider into podconfig
//!
//! Adds typed accessors for the speech provider settings to
//! `podconfig::Config`. The API key is stored encrypted (machine-bound).

use anyhow::Result;
use podconfig::Config;
use serde_yaml::Value;

use crate::client::DEFAULT_BASE_URL;

/// Typed accessors for the speech provider configuration
pub trait SpeechConfigExt {
    /// Whether speech synthesis is enabled (default: true)
    fn get_speech_enabled(&self) -> Result<bool>;

    /// Enables or disables speech synthesis
    fn set_speech_enabled(&self, enabled: bool) -> Result<()>;

    /// Provider base URL (default: the public synthesis endpoint)
    fn get_speech_base_url(&self) -> Result<String>;

    /// Sets the provider base URL
    fn set_speech_base_url(&self, base_url: &str) -> Result<()>;

    /// Provider API key, decrypted; `None` if not configured
    fn get_speech_api_key(&self) -> Result<Option<String>>;

    /// Stores the provider API key, encrypted with the machine-bound key
    fn set_speech_api_key(&self, api_key: &str) -> Result<()>;
}

const ENABLED: &[&str] = &["providers", "speech", "enabled"];
const BASE_URL: &[&str] = &["providers", "speech", "base_url"];
const API_KEY: &[&str] = &["providers", "speech", "api_key"];

impl SpeechConfigExt for Config {
    fn get_speech_enabled(&self) -> Result<bool> {
        match self.get_value(ENABLED) {
            Ok(Value::Bool(b)) => Ok(b),
            _ => Ok(true),
        }
    }

    fn set_speech_enabled(&self, enabled: bool) -> Result<()> {
        self.set_value(ENABLED, Value::Bool(enabled))
    }

    fn get_speech_base_url(&self) -> Result<String> {
        match self.get_value(BASE_URL) {
            Ok(Value::String(s)) if !s.is_empty() => Ok(s),
            _ => Ok(DEFAULT_BASE_URL.to_string()),
        }
    }

    fn set_speech_base_url(&self, base_url: &str) -> Result<()> {
        self.set_value(BASE_URL, Value::String(base_url.to_string()))
    }

    fn get_speech_api_key(&self) -> Result<Option<String>> {
        self.get_secret(API_KEY)
    }

    fn set_speech_api_key(&self, api_key: &str) -> Result<()> {
        self.set_secret(API_KEY, api_key)
    }
}
