//! Narrative generation: prompt building, providers and the error-sentinel boundary.

pub mod config;
pub mod narrative;
pub mod prompt;
pub mod provider;
mod providers;
pub mod types;

pub use config::AiSettings;
pub use narrative::{
    ERROR_SENTINEL_MARKER, build_narrative_source, generate_narrative,
    generate_narrative_with_settings, is_error_sentinel,
};
pub use prompt::{SYSTEM_PERSONA, build_prompt, compose_request_text};
pub use provider::{GenerateFuture, NarrativeSource};
pub use providers::{gemini::GeminiProvider, ollama::OllamaProvider};
pub use types::AiMode;
