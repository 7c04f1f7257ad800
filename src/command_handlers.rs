use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::ai::build_prompt;
use crate::app::{AppContext, AppEvent, GeneratedAssessment, RecommendationSummary};
use crate::config::DEFAULT_OUTPUT_DIR;
use crate::exports::ReportStyle;
use crate::insights::{lookup_advisory, recommend};
use crate::models::ClientProfile;
use crate::workflow::{run_assessment, run_assessment_with_settings};

fn load_profile(path: &Path, context: &AppContext) -> Result<ClientProfile> {
    context.emit_event(AppEvent::Info {
        message: format!("Loading client profile from {}", path.display()),
    });
    let profile = ClientProfile::from_json_file(path)?;
    crate::log_debug!(
        "Loaded profile '{}' ({} sector, {} firewall)",
        profile.customer_name,
        profile.industry,
        profile.firewall
    );
    Ok(profile)
}

pub(crate) fn load_recommendations(
    path: &Path,
    context: &AppContext,
) -> Result<RecommendationSummary> {
    ensure_not_cancelled(context, "recommend")?;
    let profile = load_profile(path, context)?;
    let recommendations = recommend(&profile);
    let advisory = lookup_advisory(profile.firewall.as_str());
    Ok(RecommendationSummary {
        profile,
        advisory,
        recommendations,
    })
}

pub(crate) fn render_prompt(path: &Path, context: &AppContext) -> Result<String> {
    ensure_not_cancelled(context, "prompt")?;
    let profile = load_profile(path, context)?;
    let advisory = lookup_advisory(profile.firewall.as_str());
    Ok(build_prompt(&profile, &advisory))
}

pub(crate) async fn generate_assessment(
    path: &Path,
    out_dir: Option<PathBuf>,
    style: Option<ReportStyle>,
    include_advisory: bool,
    context: &AppContext,
) -> Result<GeneratedAssessment> {
    ensure_not_cancelled(context, "generate")?;
    crate::log_stderr!(
        "MDR Scenario Generator v{}: building assessment",
        env!("CARGO_PKG_VERSION")
    );

    let profile = load_profile(path, context)?;

    let mut options = context.export_options().clone().with_advisory(include_advisory);
    if let Some(style) = style {
        options = options.with_style(style);
    }

    let assessment = match context.narrative_source() {
        Some(source) => run_assessment(profile, source, &options).await,
        None => run_assessment_with_settings(profile, context.ai_settings(), &options).await,
    };

    if let Some(detail) = &assessment.narrative_error {
        context.emit_event(AppEvent::NarrativeFailed {
            detail: detail.clone(),
        });
    }
    if let Some(error) = &assessment.render_error {
        context.emit_event(AppEvent::Error {
            message: format!("Document rendering failed: {}", error),
        });
    }

    if assessment.artifacts.is_none() {
        context.emit_event(AppEvent::Warn {
            message: format!(
                "No report or deck written for '{}'",
                assessment.profile.customer_name
            ),
        });
    }

    ensure_not_cancelled(context, "write-artifacts")?;

    let (output_dir, written) = match &assessment.artifacts {
        Some(bundle) => {
            let dir = out_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
            let written = bundle.write_to_dir(&dir)?;
            for path in &written {
                crate::log_stderr!("Wrote {}", path.display());
                context.emit_event(AppEvent::ArtifactWritten {
                    path: path.display().to_string(),
                });
            }
            (Some(dir), written)
        }
        None => (None, Vec::new()),
    };

    Ok(GeneratedAssessment {
        assessment,
        output_dir,
        written,
    })
}

fn ensure_not_cancelled(context: &AppContext, stage: &str) -> Result<()> {
    if context.is_cancelled() {
        context.emit_event(AppEvent::Cancelled {
            stage: stage.to_string(),
        });
        return Err(anyhow::anyhow!("Operation cancelled ({})", stage));
    }
    Ok(())
}
