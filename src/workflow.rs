//! Assessment workflow
//!
//! profile -> recommendations + advisory -> prompt -> narrative -> artifacts.

use std::time::Instant;

use crate::ai::narrative::configuration_error_sentinel;
use crate::ai::{
    AiSettings, NarrativeSource, build_narrative_source, build_prompt, generate_narrative,
    is_error_sentinel,
};
use crate::exports::{ArtifactBundle, ExportOptions, ExportOutcome, ReportInputs, export_artifacts};
use crate::insights::{lookup_advisory, recommend};
use crate::models::ClientProfile;

/// Everything produced for one client profile.
#[derive(Debug, Clone)]
pub struct AssessmentResult {
    pub profile: ClientProfile,
    pub recommendations: Vec<String>,
    pub advisory: String,
    pub prompt: String,
    pub narrative: String,
    /// `"<source> (<model>)"` when a source was reached.
    pub narrative_source: Option<String>,
    /// The sentinel text when narrative generation failed.
    pub narrative_error: Option<String>,
    pub artifacts: Option<ArtifactBundle>,
    pub render_error: Option<String>,
    pub duration_ms: u64,
}

impl AssessmentResult {
    pub fn is_complete(&self) -> bool {
        self.artifacts.is_some()
    }
}

struct Prepared {
    profile: ClientProfile,
    recommendations: Vec<String>,
    advisory: String,
    prompt: String,
    started: Instant,
}

fn prepare(profile: ClientProfile) -> Prepared {
    let started = Instant::now();
    let recommendations = recommend(&profile);
    let advisory = lookup_advisory(profile.firewall.as_str());
    let prompt = build_prompt(&profile, &advisory);
    crate::log_debug!(
        "Prepared assessment for '{}': {} recommendation(s), prompt {} chars",
        profile.customer_name,
        recommendations.len(),
        prompt.chars().count()
    );
    Prepared {
        profile,
        recommendations,
        advisory,
        prompt,
        started,
    }
}

/// Run the whole pipeline against an explicit narrative source.
pub async fn run_assessment(
    profile: ClientProfile,
    source: &dyn NarrativeSource,
    options: &ExportOptions,
) -> AssessmentResult {
    let prepared = prepare(profile);
    let narrative = generate_narrative(source, &prepared.prompt).await;
    let origin = format!("{} ({})", source.source_id(), source.model_name());
    finish(prepared, narrative, Some(origin), options).await
}

/// Run the whole pipeline with the source selected by `settings`.
///
/// An unusable configuration yields a configuration-error sentinel and no
/// network traffic; recommendations are still produced.
pub async fn run_assessment_with_settings(
    profile: ClientProfile,
    settings: &AiSettings,
    options: &ExportOptions,
) -> AssessmentResult {
    match build_narrative_source(settings) {
        Ok(source) => run_assessment(profile, source.as_ref(), options).await,
        Err(e) => {
            crate::log_warn!("Narrative source unavailable: {}", e);
            let prepared = prepare(profile);
            finish(
                prepared,
                configuration_error_sentinel(&e.to_string()),
                None,
                options,
            )
            .await
        }
    }
}

async fn finish(
    prepared: Prepared,
    narrative: String,
    narrative_source: Option<String>,
    options: &ExportOptions,
) -> AssessmentResult {
    let Prepared {
        profile,
        recommendations,
        advisory,
        prompt,
        started,
    } = prepared;

    let narrative_error = is_error_sentinel(&narrative).then(|| narrative.clone());

    let (artifacts, render_error) = if narrative_error.is_some() {
        (None, None)
    } else {
        let task_profile = profile.clone();
        let task_advisory = advisory.clone();
        let task_narrative = narrative.clone();
        let task_recommendations = recommendations.clone();
        let task_options = options.clone();

        let rendered = tokio::task::spawn_blocking(move || {
            let inputs = ReportInputs {
                profile: &task_profile,
                advisory: &task_advisory,
                narrative: &task_narrative,
                recommendations: &task_recommendations,
            };
            export_artifacts(&inputs, &task_options)
        })
        .await;

        match rendered {
            Ok(Ok(ExportOutcome::Rendered(bundle))) => (Some(bundle), None),
            Ok(Ok(ExportOutcome::Skipped { reason })) => (None, Some(reason)),
            Ok(Err(e)) => {
                crate::log_error!("Artifact rendering failed: {:#}", e);
                (None, Some(format!("{:#}", e)))
            }
            Err(e) => {
                crate::log_error!("Rendering task failed: {}", e);
                (None, Some(format!("Rendering task failed: {}", e)))
            }
        }
    };

    let duration_ms = started.elapsed().as_millis() as u64;
    crate::log_stderr!(
        "Assessment for '{}' finished in {} ms (artifacts: {})",
        profile.customer_name,
        duration_ms,
        if artifacts.is_some() { "rendered" } else { "none" }
    );

    AssessmentResult {
        profile,
        recommendations,
        advisory,
        prompt,
        narrative,
        narrative_source,
        narrative_error,
        artifacts,
        render_error,
        duration_ms,
    }
}
