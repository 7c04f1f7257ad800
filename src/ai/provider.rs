use anyhow::{Result, anyhow};
use std::future::Future;
use std::pin::Pin;

/// Boxed future returned by [`NarrativeSource::generate`].
pub type GenerateFuture<'a> = Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>>;

/// External text-generation capability.
///
/// Implementations make exactly one attempt per call. Failures come back as
/// `Err` and are turned into an error sentinel at the narrative boundary.
pub trait NarrativeSource: Send + Sync {
    fn source_id(&self) -> &'static str;
    fn model_name(&self) -> &str;
    fn generate<'a>(&'a self, prompt: &'a str) -> GenerateFuture<'a>;
}

/// Normalize raw model output: strip a surrounding code fence, trim, reject empty text.
pub(crate) fn extract_narrative_text(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    let unfenced = if trimmed.starts_with("```") && trimmed.ends_with("```") && trimmed.len() >= 6 {
        let inner = &trimmed[3..trimmed.len() - 3];
        // Drop an optional language tag on the opening fence line.
        match inner.split_once('\n') {
            Some((tag, rest)) if !tag.trim().contains(' ') => rest,
            _ => inner,
        }
    } else {
        trimmed
    };

    let text = unfenced.trim();
    if text.is_empty() {
        return Err(anyhow!("Model returned an empty narrative"));
    }
    Ok(text.to_string())
}
