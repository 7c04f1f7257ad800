//! JSON export functionality
//!
//! Summaries of finished assessments for stdout and downstream tooling.

use anyhow::Result;
use serde::Serialize;
use std::path::Path;

use crate::models::ClientProfile;
use crate::workflow::AssessmentResult;

/// Assessment summary export format
#[derive(Debug, Serialize)]
pub struct AssessmentExport<'a> {
    pub export_date: String,
    pub profile: &'a ClientProfile,
    pub recommendations: &'a [String],
    pub advisory: &'a str,
    pub narrative_status: NarrativeStatus,
    pub narrative_source: Option<&'a str>,
    pub narrative_error: Option<&'a str>,
    pub narrative_chars: usize,
    pub artifacts: Vec<ArtifactEntry<'a>>,
    pub render_error: Option<&'a str>,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NarrativeStatus {
    Generated,
    Failed,
}

#[derive(Debug, Serialize)]
pub struct ArtifactEntry<'a> {
    pub kind: &'static str,
    pub filename: &'a str,
    /// Set once the artifact has been written to disk.
    pub path: Option<String>,
    pub bytes: usize,
}

/// Recommendations and advisory without a narrative (the `recommend` command).
#[derive(Debug, Serialize)]
pub struct RecommendationExport<'a> {
    pub customer_name: &'a str,
    pub firewall: &'a str,
    pub advisory: &'a str,
    pub recommendations: &'a [String],
}

/// Export an assessment summary to pretty JSON
///
/// `output_dir` is the directory the artifacts were written to, if any.
pub fn export_assessment_json(
    result: &AssessmentResult,
    output_dir: Option<&Path>,
) -> Result<String> {
    let path_of = |filename: &str| output_dir.map(|dir| dir.join(filename).display().to_string());
    let artifacts = result
        .artifacts
        .as_ref()
        .map(|bundle| {
            vec![
                ArtifactEntry {
                    kind: "report_pdf",
                    filename: &bundle.report_filename,
                    path: path_of(&bundle.report_filename),
                    bytes: bundle.report.len(),
                },
                ArtifactEntry {
                    kind: "deck_pptx",
                    filename: &bundle.deck_filename,
                    path: path_of(&bundle.deck_filename),
                    bytes: bundle.deck.len(),
                },
            ]
        })
        .unwrap_or_default();

    let export = AssessmentExport {
        export_date: chrono::Utc::now().to_rfc3339(),
        profile: &result.profile,
        recommendations: &result.recommendations,
        advisory: &result.advisory,
        narrative_status: if result.narrative_error.is_some() {
            NarrativeStatus::Failed
        } else {
            NarrativeStatus::Generated
        },
        narrative_source: result.narrative_source.as_deref(),
        narrative_error: result.narrative_error.as_deref(),
        narrative_chars: result.narrative.chars().count(),
        artifacts,
        render_error: result.render_error.as_deref(),
        duration_ms: result.duration_ms,
    };

    let json = serde_json::to_string_pretty(&export)?;
    Ok(json)
}

/// Export recommendations and the vendor advisory to pretty JSON
pub fn export_recommendations_json(
    profile: &ClientProfile,
    advisory: &str,
    recommendations: &[String],
) -> Result<String> {
    let export = RecommendationExport {
        customer_name: &profile.customer_name,
        firewall: profile.firewall.as_str(),
        advisory,
        recommendations,
    };
    let json = serde_json::to_string_pretty(&export)?;
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exports::ArtifactBundle;

    fn sample_result() -> AssessmentResult {
        AssessmentResult {
            profile: ClientProfile::default(),
            recommendations: vec!["First".to_string(), "Second".to_string()],
            advisory: "Advisory text".to_string(),
            prompt: "prompt".to_string(),
            narrative: "Narrative".to_string(),
            narrative_source: Some("gemini (gemini-2.5-flash)".to_string()),
            narrative_error: None,
            artifacts: Some(ArtifactBundle {
                report_filename: "Acme_MDR_Report.pdf".to_string(),
                report: vec![0; 10],
                deck_filename: "Acme_MDR_Deck.pptx".to_string(),
                deck: vec![0; 20],
            }),
            render_error: None,
            duration_ms: 42,
        }
    }

    #[test]
    fn test_export_assessment_json() {
        let json = export_assessment_json(&sample_result(), Some(Path::new("out"))).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed["narrative_status"], "generated");
        assert_eq!(
            parsed["artifacts"][0]["path"],
            Path::new("out").join("Acme_MDR_Report.pdf").display().to_string()
        );
        assert_eq!(parsed["recommendations"][1], "Second");
        assert_eq!(parsed["artifacts"][0]["filename"], "Acme_MDR_Report.pdf");
        assert_eq!(parsed["artifacts"][1]["bytes"], 20);
        assert_eq!(parsed["profile"]["customer_name"], "Unnamed Customer");
    }

    #[test]
    fn failed_narrative_is_reported_without_artifacts() {
        let mut result = sample_result();
        result.narrative_error = Some("⚠️ Error: no key".to_string());
        result.artifacts = None;

        let json = export_assessment_json(&result, None).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["narrative_status"], "failed");
        assert_eq!(parsed["artifacts"].as_array().map(|a| a.len()), Some(0));
        assert_eq!(parsed["narrative_error"], "⚠️ Error: no key");
    }

    #[test]
    fn recommendations_export_lists_advisory_and_items() {
        let profile = ClientProfile::default();
        let recs = vec!["A".to_string()];
        let json = export_recommendations_json(&profile, "adv", &recs).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["firewall"], "Fortinet");
        assert_eq!(parsed["advisory"], "adv");
        assert_eq!(parsed["recommendations"][0], "A");
    }
}
