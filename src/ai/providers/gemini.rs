use anyhow::{Context, anyhow};
use reqwest::Client;
use serde_json::json;

use crate::ai::prompt::compose_request_text;
use crate::ai::provider::{GenerateFuture, NarrativeSource, extract_narrative_text};

#[derive(Debug, Clone)]
pub struct GeminiProvider {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl GeminiProvider {
    pub fn new(client: Client, endpoint: String, model: String, api_key: String) -> Self {
        Self {
            client,
            endpoint,
            model,
            api_key,
        }
    }
}

impl NarrativeSource for GeminiProvider {
    fn source_id(&self) -> &'static str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn generate<'a>(&'a self, prompt: &'a str) -> GenerateFuture<'a> {
        Box::pin(async move {
            let endpoint = self.endpoint.trim_end_matches('/');
            let url = format!("{}/v1beta/models/{}:generateContent", endpoint, self.model);

            // Header rather than query string so the key never shows up in reqwest errors.
            let response = self
                .client
                .post(url)
                .header("x-goog-api-key", &self.api_key)
                .json(&json!({
                    "contents": [{
                        "role": "user",
                        "parts": [{ "text": compose_request_text(prompt) }]
                    }],
                    "generationConfig": {
                        "temperature": 0.7
                    }
                }))
                .send()
                .await
                .context("Failed to call Gemini generateContent endpoint")?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(anyhow!("Gemini request failed with {}: {}", status, body));
            }

            let payload: serde_json::Value = response
                .json()
                .await
                .context("Failed to parse Gemini response JSON")?;

            let text = payload
                .get("candidates")
                .and_then(|v| v.as_array())
                .and_then(|arr| arr.first())
                .and_then(|candidate| candidate.get("content"))
                .and_then(|content| content.get("parts"))
                .and_then(|parts| parts.as_array())
                .and_then(|parts| parts.first())
                .and_then(|part| part.get("text"))
                .and_then(|v| v.as_str())
                .ok_or_else(|| {
                    anyhow!("Gemini response missing candidates[0].content.parts[0].text")
                })?;

            extract_narrative_text(text)
        })
    }
}
