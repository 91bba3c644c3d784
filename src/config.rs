use std::time::Duration;

use anyhow::{Context, Result};

use crate::gemini::DEMO_KEY;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_IMAGE_BASE: &str = "https://picsum.photos";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub api_base: String,
    pub model: String,
    pub request_timeout: Duration,
    pub image_base: String,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: DEMO_KEY.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            request_timeout: Duration::from_secs(30),
            image_base: DEFAULT_IMAGE_BASE.to_string(),
            port: 8080,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let timeout_secs = match lookup("GEMINI_TIMEOUT_SECS") {
            Some(v) => v
                .trim()
                .parse::<u64>()
                .with_context(|| format!("GEMINI_TIMEOUT_SECS must be a whole number of seconds, got {v:?}"))?,
            None => defaults.request_timeout.as_secs(),
        };
        let port = match lookup("PORT") {
            Some(v) => v.trim().parse::<u16>().with_context(|| format!("PORT must be a valid port, got {v:?}"))?,
            None => defaults.port,
        };

        Ok(Self {
            api_key: lookup("GEMINI_API_KEY").filter(|k| !k.is_empty()).unwrap_or(defaults.api_key),
            api_base: lookup("GEMINI_API_BASE").unwrap_or(defaults.api_base),
            model: lookup("GEMINI_MODEL").unwrap_or(defaults.model),
            request_timeout: Duration::from_secs(timeout_secs),
            image_base: lookup("IMAGE_BASE_URL").unwrap_or(defaults.image_base),
            port,
        })
    }
}
