//! Narrative boundary
//!
//! Everything that can go wrong while obtaining a narrative ends here as an
//! error-sentinel string. Callers never see an `Err` from this module.

use anyhow::{Result, anyhow};
use reqwest::Client;

use crate::ai::config::AiSettings;
use crate::ai::provider::NarrativeSource;
use crate::ai::providers::{gemini::GeminiProvider, ollama::OllamaProvider};
use crate::ai::types::AiMode;

/// Leading marker of every error sentinel produced by this crate.
pub const ERROR_SENTINEL_MARKER: &str = "⚠️ Error";

/// Marker used by earlier releases for service failures.
const LEGACY_SERVICE_ERROR_MARKER: &str = "⚠️ An error";

/// True when `text` carries an error-sentinel marker anywhere in it.
pub fn is_error_sentinel(text: &str) -> bool {
    text.contains(ERROR_SENTINEL_MARKER) || text.contains(LEGACY_SERVICE_ERROR_MARKER)
}

pub(crate) fn configuration_error_sentinel(detail: &str) -> String {
    format!("{}: {}", ERROR_SENTINEL_MARKER, detail)
}

pub(crate) fn service_error_sentinel(source_id: &str, err: &anyhow::Error) -> String {
    format!(
        "{}: An error occurred while communicating with the {} API: {:#}",
        ERROR_SENTINEL_MARKER, source_id, err
    )
}

/// Build the narrative source selected by `settings`.
///
/// Fails when the configuration cannot produce a usable source (mode
/// disabled, missing credential, client construction failure).
pub fn build_narrative_source(settings: &AiSettings) -> Result<Box<dyn NarrativeSource>> {
    let client = || {
        Client::builder()
            .timeout(settings.timeout())
            .build()
            .map_err(|e| anyhow!("AI client init failed: {}", e))
    };

    match settings.mode {
        AiMode::Disabled => Err(anyhow!(
            "Narrative generation is disabled. Set MDR_AI_MODE to 'cloud' or 'local'."
        )),
        AiMode::Local => Ok(Box::new(OllamaProvider::new(
            client()?,
            settings.ollama_endpoint.clone(),
            settings.ollama_model.clone(),
        ))),
        AiMode::Cloud => {
            let api_key = settings.usable_gemini_api_key().ok_or_else(|| {
                anyhow!(
                    "Please provide a valid Gemini API key via MDR_AI_GEMINI_API_KEY (or GEMINI_API_KEY)."
                )
            })?;
            Ok(Box::new(GeminiProvider::new(
                client()?,
                settings.gemini_endpoint.clone(),
                settings.gemini_model.clone(),
                api_key.to_string(),
            )))
        }
    }
}

/// Ask `source` for a narrative; a failure becomes a service-error sentinel.
pub async fn generate_narrative(source: &dyn NarrativeSource, prompt: &str) -> String {
    crate::log_debug!(
        "Requesting narrative from {} ({})",
        source.source_id(),
        source.model_name()
    );
    match source.generate(prompt).await {
        Ok(text) => {
            crate::log_stderr!(
                "Narrative received from {} ({} chars)",
                source.source_id(),
                text.chars().count()
            );
            text
        }
        Err(e) => {
            crate::log_warn!("Narrative generation via {} failed: {:#}", source.source_id(), e);
            service_error_sentinel(source.source_id(), &e)
        }
    }
}

/// Build the configured source and ask it for a narrative.
///
/// A configuration problem becomes a configuration-error sentinel without
/// any network traffic.
pub async fn generate_narrative_with_settings(settings: &AiSettings, prompt: &str) -> String {
    match build_narrative_source(settings) {
        Ok(source) => generate_narrative(source.as_ref(), prompt).await,
        Err(e) => {
            crate::log_warn!("Narrative source unavailable: {}", e);
            configuration_error_sentinel(&e.to_string())
        }
    }
}
