//! Extension trait integrating the generation provider into podconfig
//!
//! Adds typed accessors for the script provider settings to
//! `podconfig::Config`. API keys are stored encrypted (machine-bound) and
//! decrypted transparently on read.

use anyhow::Result;
use podconfig::Config;
use serde_yaml::Value;

use crate::client::{DEFAULT_BASE_URL, DEFAULT_MODEL};

/// Typed accessors for the script provider configuration
pub trait ScriptConfigExt {
    /// Whether script generation is enabled (default: true)
    fn get_script_enabled(&self) -> Result<bool>;

    /// Enables or disables script generation
    fn set_script_enabled(&self, enabled: bool) -> Result<()>;

    /// Provider base URL (default: the public generation endpoint)
    fn get_script_base_url(&self) -> Result<String>;

    /// Sets the provider base URL
    fn set_script_base_url(&self, base_url: &str) -> Result<()>;

    /// Generation model name (default: `gemini-pro`)
    fn get_script_model(&self) -> Result<String>;

    /// Sets the generation model name
    fn set_script_model(&self, model: &str) -> Result<()>;

    /// Provider API key, decrypted; `None` if not configured
    fn get_script_api_key(&self) -> Result<Option<String>>;

    /// Stores the provider API key, encrypted with the machine-bound key
    fn set_script_api_key(&self, api_key: &str) -> Result<()>;
}

const ENABLED: &[&str] = &["providers", "script", "enabled"];
const BASE_URL: &[&str] = &["providers", "script", "base_url"];
const MODEL: &[&str] = &["providers", "script", "model"];
const API_KEY: &[&str] = &["providers", "script", "api_key"];

impl ScriptConfigExt for Config {
    fn get_script_enabled(&self) -> Result<bool> {
        match self.get_value(ENABLED) {
            Ok(Value::Bool(b)) => Ok(b),
            _ => Ok(true),
        }
    }

    fn set_script_enabled(&self, enabled: bool) -> Result<()> {
        self.set_value(ENABLED, Value::Bool(enabled))
    }

    fn get_script_base_url(&self) -> Result<String> {
        match self.get_value(BASE_URL) {
            Ok(Value::String(s)) if !s.is_empty() => Ok(s),
            _ => Ok(DEFAULT_BASE_URL.to_string()),
        }
    }

    fn set_script_base_url(&self, base_url: &str) -> Result<()> {
        self.set_value(BASE_URL, Value::String(base_url.to_string()))
    }

    fn get_script_model(&self) -> Result<String> {
        match self.get_value(MODEL) {
            Ok(Value::String(s)) if !s.is_empty() => Ok(s),
            _ => Ok(DEFAULT_MODEL.to_string()),
        }
    }

    fn set_script_model(&self, model: &str) -> Result<()> {
        self.set_value(MODEL, Value::String(model.to_string()))
    }

    fn get_script_api_key(&self) -> Result<Option<String>> {
        self.get_secret(API_KEY)
    }

    fn set_script_api_key(&self, api_key: &str) -> Result<()> {
        self.set_secret(API_KEY, api_key)
    }
}
