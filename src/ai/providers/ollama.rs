use anyhow::{Context, anyhow};
use reqwest::Client;
use serde_json::json;

use crate::ai::prompt::SYSTEM_PERSONA;
use crate::ai::provider::{GenerateFuture, NarrativeSource, extract_narrative_text};

#[derive(Debug, Clone)]
pub struct OllamaProvider {
    client: Client,
    endpoint: String,
    model: String,
}

impl OllamaProvider {
    pub fn new(client: Client, endpoint: String, model: String) -> Self {
        Self {
            client,
            endpoint,
            model,
        }
    }
}

impl NarrativeSource for OllamaProvider {
    fn source_id(&self) -> &'static str {
        "ollama"
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn generate<'a>(&'a self, prompt: &'a str) -> GenerateFuture<'a> {
        Box::pin(async move {
            let endpoint = self.endpoint.trim_end_matches('/');
            let url = format!("{}/api/generate", endpoint);

            let response = self
                .client
                .post(url)
                .json(&json!({
                    "model": self.model,
                    "system": SYSTEM_PERSONA,
                    "prompt": prompt,
                    "stream": false
                }))
                .send()
                .await
                .context("Failed to call Ollama generate endpoint")?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(anyhow!("Ollama request failed with {}: {}", status, body));
            }

            let payload: serde_json::Value = response
                .json()
                .await
                .context("Failed to parse Ollama response JSON")?;
            let text = payload
                .get("response")
                .and_then(|v| v.as_str())
                .ok_or_else(|| anyhow!("Ollama response missing 'response' field"))?;

            extract_narrative_text(text)
        })
    }
}
