//! Export functionality for assessments
//!
//! Renders the PDF report and PPTX deck for a finished assessment, plus a
//! JSON summary.

pub mod json;
#[cfg(feature = "pdf-export")]
pub mod pdf;
pub mod pptx;
pub mod report_layout;
pub mod text;

#[cfg(not(feature = "pdf-export"))]
pub mod pdf {
    use anyhow::{Result, anyhow};

    use crate::exports::report_layout::ReportOptions;
    use crate::models::ClientProfile;

    pub fn render_report(
        _profile: &ClientProfile,
        _advisory: Option<&str>,
        _narrative: &str,
        _recommendations: &[String],
        _options: &ReportOptions,
    ) -> Result<Vec<u8>> {
        Err(anyhow!(
            "PDF export is disabled at compile time. Rebuild with --features pdf-export."
        ))
    }
}

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::ai::is_error_sentinel;
use crate::models::ClientProfile;

pub use json::*;
pub use pdf::render_report;
pub use pptx::{DeckOptions, render_deck};
pub use report_layout::{ReportOptions, ReportStyle};
pub use text::{sanitize, truncate_with_ellipsis, wrap_text};

/// Everything both renderers consume.
#[derive(Debug, Clone, Copy)]
pub struct ReportInputs<'a> {
    pub profile: &'a ClientProfile,
    pub advisory: &'a str,
    pub narrative: &'a str,
    pub recommendations: &'a [String],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportOptions {
    pub report: ReportOptions,
    pub deck: DeckOptions,
    /// Print the vendor advisory as its own report section.
    pub include_advisory: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            report: ReportOptions::default(),
            deck: DeckOptions::default(),
            include_advisory: true,
        }
    }
}

impl ExportOptions {
    /// Options with layout knobs read from `MDR_REPORT_WRAP_WIDTH` and
    /// `MDR_DECK_SUMMARY_CHARS`.
    pub fn from_env() -> Self {
        Self {
            report: ReportOptions {
                wrap_width: crate::config::report_wrap_width(),
                ..ReportOptions::default()
            },
            deck: DeckOptions {
                summary_chars: crate::config::deck_summary_chars(),
            },
            include_advisory: true,
        }
    }

    pub fn with_style(mut self, style: ReportStyle) -> Self {
        self.report.style = style;
        self
    }

    pub fn with_advisory(mut self, include_advisory: bool) -> Self {
        self.include_advisory = include_advisory;
        self
    }
}

/// Rendered report and deck with their suggested filenames.
#[derive(Debug, Clone)]
pub struct ArtifactBundle {
    pub report_filename: String,
    pub report: Vec<u8>,
    pub deck_filename: String,
    pub deck: Vec<u8>,
}

impl ArtifactBundle {
    /// Write both artifacts into `dir`, creating it when missing.
    pub fn write_to_dir(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

        let mut written = Vec::with_capacity(2);
        for (name, bytes) in [
            (&self.report_filename, &self.report),
            (&self.deck_filename, &self.deck),
        ] {
            let path = dir.join(name);
            std::fs::write(&path, bytes)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            written.push(path);
        }
        Ok(written)
    }
}

#[derive(Debug, Clone)]
pub enum ExportOutcome {
    Rendered(ArtifactBundle),
    /// Narrative was an error sentinel; nothing was rendered.
    Skipped { reason: String },
}

fn filename_stem(customer_name: &str) -> String {
    customer_name
        .trim()
        .chars()
        .map(|c| if c.is_whitespace() || c == '/' || c == '\\' { '_' } else { c })
        .collect()
}

pub fn default_report_filename(customer_name: &str) -> String {
    format!("{}_MDR_Report.pdf", filename_stem(customer_name))
}

pub fn default_deck_filename(customer_name: &str) -> String {
    format!("{}_MDR_Deck.pptx", filename_stem(customer_name))
}

/// Render both artifacts, or skip when the narrative is an error sentinel.
pub fn export_artifacts(inputs: &ReportInputs<'_>, options: &ExportOptions) -> Result<ExportOutcome> {
    if is_error_sentinel(inputs.narrative) {
        crate::log_warn!(
            "Skipping document export for '{}': narrative generation failed",
            inputs.profile.customer_name
        );
        return Ok(ExportOutcome::Skipped {
            reason: inputs.narrative.to_string(),
        });
    }

    let narrative = sanitize(inputs.narrative);
    let advisory = options.include_advisory.then_some(inputs.advisory);

    let report = render_report(
        inputs.profile,
        advisory,
        &narrative,
        inputs.recommendations,
        &options.report,
    )
    .context("Failed to render PDF report")?;
    let deck = render_deck(
        inputs.profile,
        &narrative,
        inputs.recommendations,
        &options.deck,
    )
    .context("Failed to render PPTX deck")?;

    crate::log_debug!(
        "Rendered report ({} bytes) and deck ({} bytes)",
        report.len(),
        deck.len()
    );

    Ok(ExportOutcome::Rendered(ArtifactBundle {
        report_filename: default_report_filename(&inputs.profile.customer_name),
        report,
        deck_filename: default_deck_filename(&inputs.profile.customer_name),
        deck,
    }))
}
