use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ai::types::AiMode;
use crate::config::{env_parse_u64, env_var};

const DEFAULT_AI_TIMEOUT_MS: u64 = 60_000;
const DEFAULT_OLLAMA_ENDPOINT: &str = "http://127.0.0.1:11434";
const DEFAULT_OLLAMA_MODEL: &str = "qwen3:8b";
const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Placeholder shipped in sample configs; never a usable credential.
pub const PLACEHOLDER_API_KEY: &str = "YOUR_API_KEY_HERE";

/// Narrative generation settings.
///
/// Built once at the program edge and handed to providers; nothing below
/// this reads the environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiSettings {
    pub mode: AiMode,
    pub timeout_ms: u64,
    pub ollama_endpoint: String,
    pub ollama_model: String,
    pub gemini_endpoint: String,
    pub gemini_model: String,
    #[serde(skip_serializing)]
    pub gemini_api_key: Option<String>,
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            mode: AiMode::Cloud,
            timeout_ms: DEFAULT_AI_TIMEOUT_MS,
            ollama_endpoint: DEFAULT_OLLAMA_ENDPOINT.to_string(),
            ollama_model: DEFAULT_OLLAMA_MODEL.to_string(),
            gemini_endpoint: DEFAULT_GEMINI_ENDPOINT.to_string(),
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_api_key: None,
        }
    }
}

impl AiSettings {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            mode: env_var("MDR_AI_MODE")
                .and_then(|v| AiMode::parse(&v))
                .unwrap_or(defaults.mode),
            timeout_ms: env_parse_u64("MDR_AI_TIMEOUT_MS", DEFAULT_AI_TIMEOUT_MS, 1_000, 300_000),
            ollama_endpoint: env_var("MDR_AI_OLLAMA_ENDPOINT").unwrap_or(defaults.ollama_endpoint),
            ollama_model: env_var("MDR_AI_OLLAMA_MODEL").unwrap_or(defaults.ollama_model),
            gemini_endpoint: env_var("MDR_AI_GEMINI_ENDPOINT").unwrap_or(defaults.gemini_endpoint),
            gemini_model: env_var("MDR_AI_GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            gemini_api_key: env_var("MDR_AI_GEMINI_API_KEY").or_else(|| env_var("GEMINI_API_KEY")),
        }
    }

    pub fn with_mode(mut self, mode: AiMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_gemini_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.gemini_api_key = Some(api_key.into());
        self
    }

    /// The Gemini key, if one is set and is not the placeholder.
    pub fn usable_gemini_api_key(&self) -> Option<&str> {
        self.gemini_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && *key != PLACEHOLDER_API_KEY)
    }

    pub(crate) fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_key_is_not_usable() {
        let settings = AiSettings::default().with_gemini_api_key(PLACEHOLDER_API_KEY);
        assert!(settings.usable_gemini_api_key().is_none());

        let settings = AiSettings::default().with_gemini_api_key("  ");
        assert!(settings.usable_gemini_api_key().is_none());

        let settings = AiSettings::default().with_gemini_api_key("abc123");
        assert_eq!(settings.usable_gemini_api_key(), Some("abc123"));
    }

    #[test]
    fn api_key_is_never_serialized() {
        let settings = AiSettings::default().with_gemini_api_key("secret-key");
        let json = serde_json::to_string(&settings).expect("settings should serialize");
        assert!(!json.contains("secret-key"));
    }
}
