use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::ai::{AiSettings, NarrativeSource};
use crate::cli::{usage_text, version_text};
use crate::command::AppCommand;
use crate::command_handlers::{generate_assessment, load_recommendations, render_prompt};
use crate::exports::{ExportOptions, export_assessment_json, export_recommendations_json};
use crate::models::ClientProfile;
use crate::workflow::AssessmentResult;

pub type OutputHook = Arc<dyn Fn(&str) + Send + Sync>;
pub type EventHook = Arc<dyn Fn(&AppEvent) + Send + Sync>;

#[derive(Clone)]
pub struct AppContext {
    ai_settings: AiSettings,
    export_options: ExportOptions,
    narrative_source: Option<Arc<dyn NarrativeSource>>,
    output_hook: OutputHook,
    event_hook: EventHook,
    cancel_flag: Arc<AtomicBool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AppEvent {
    Info { message: String },
    Warn { message: String },
    Error { message: String },
    NarrativeFailed { detail: String },
    ArtifactWritten { path: String },
    Cancelled { stage: String },
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendationSummary {
    pub profile: ClientProfile,
    pub advisory: String,
    pub recommendations: Vec<String>,
}

#[derive(Debug)]
pub struct GeneratedAssessment {
    pub assessment: AssessmentResult,
    /// Directory the artifacts went to; `None` when nothing was written.
    pub output_dir: Option<PathBuf>,
    pub written: Vec<PathBuf>,
}

#[derive(Debug)]
pub enum AppCommandResult {
    HelpText(String),
    VersionText(String),
    SampleProfile(ClientProfile),
    Recommendations(RecommendationSummary),
    Prompt(String),
    Generate(GeneratedAssessment),
}

impl Default for AppContext {
    fn default() -> Self {
        Self::from_env()
    }
}

impl AppContext {
    pub fn from_env() -> Self {
        Self {
            ai_settings: AiSettings::from_env(),
            export_options: ExportOptions::from_env(),
            narrative_source: None,
            output_hook: Arc::new(|line| println!("{}", line)),
            event_hook: Arc::new(|_| {}),
            cancel_flag: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_ai_settings(mut self, ai_settings: AiSettings) -> Self {
        self.ai_settings = ai_settings;
        self
    }

    pub fn with_export_options(mut self, export_options: ExportOptions) -> Self {
        self.export_options = export_options;
        self
    }

    /// Use `source` for narratives instead of building one from the AI settings.
    pub fn with_narrative_source(mut self, source: Arc<dyn NarrativeSource>) -> Self {
        self.narrative_source = Some(source);
        self
    }

    pub fn with_output_hook(mut self, output_hook: OutputHook) -> Self {
        self.output_hook = output_hook;
        self
    }

    pub fn with_event_hook(mut self, event_hook: EventHook) -> Self {
        self.event_hook = event_hook;
        self
    }

    pub fn ai_settings(&self) -> &AiSettings {
        &self.ai_settings
    }

    pub fn export_options(&self) -> &ExportOptions {
        &self.export_options
    }

    pub fn narrative_source(&self) -> Option<&dyn NarrativeSource> {
        self.narrative_source.as_deref()
    }

    pub fn emit_line(&self, line: &str) {
        (self.output_hook)(line);
    }

    pub fn emit_event(&self, event: AppEvent) {
        (self.event_hook)(&event);
    }

    pub fn cancel(&self) {
        self.cancel_flag.store(true, Ordering::Relaxed);
    }

    pub fn reset_cancel(&self) {
        self.cancel_flag.store(false, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel_flag.load(Ordering::Relaxed)
    }
}

/// Parse `args` (program name first) and run the command with a context
/// built from the environment.
pub async fn run<I, S>(args: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    crate::cli_adapter::run(args).await
}

/// Like [`run_with_context`], but Ctrl+C sets the context's cancel flag
/// while the command runs.
pub async fn run_with_ctrl_c<I, S>(args: I, context: &AppContext) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    crate::cli_adapter::run_with_ctrl_c(args, context).await
}

/// Parse `args` (program name first) and run the command against `context`.
pub async fn run_with_context<I, S>(args: I, context: &AppContext) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    crate::cli_adapter::run_with_context(args, context).await
}

/// Execute a pre-parsed command. This is reusable for non-CLI entrypoints.
pub async fn execute_command(command: AppCommand) -> Result<()> {
    let context = AppContext::from_env();
    execute_command_with_context(command, &context).await
}

/// Execute a pre-parsed command with an explicit execution context.
pub async fn execute_command_with_context(command: AppCommand, context: &AppContext) -> Result<()> {
    let result = execute_command_typed(command, context).await?;
    emit_command_result(&result, context)
}

/// Execute a pre-parsed command and return a strongly-typed result payload.
pub async fn execute_command_typed(
    command: AppCommand,
    context: &AppContext,
) -> Result<AppCommandResult> {
    match command {
        AppCommand::Help => Ok(AppCommandResult::HelpText(usage_text())),
        AppCommand::Version => Ok(AppCommandResult::VersionText(version_text())),
        AppCommand::SampleProfile => Ok(AppCommandResult::SampleProfile(ClientProfile::default())),
        AppCommand::Recommend { profile } => Ok(AppCommandResult::Recommendations(
            load_recommendations(&profile, context)?,
        )),
        AppCommand::Prompt { profile } => {
            Ok(AppCommandResult::Prompt(render_prompt(&profile, context)?))
        }
        AppCommand::Generate {
            profile,
            out_dir,
            style,
            include_advisory,
        } => Ok(AppCommandResult::Generate(
            generate_assessment(&profile, out_dir, style, include_advisory, context).await?,
        )),
    }
}

fn emit_command_result(result: &AppCommandResult, context: &AppContext) -> Result<()> {
    match result {
        AppCommandResult::HelpText(text) | AppCommandResult::VersionText(text) => {
            context.emit_line(text);
            Ok(())
        }
        AppCommandResult::SampleProfile(profile) => {
            let output = serde_json::to_string_pretty(profile)
                .context("Failed to serialize sample profile")?;
            context.emit_line(&output);
            Ok(())
        }
        AppCommandResult::Recommendations(summary) => {
            let output = export_recommendations_json(
                &summary.profile,
                &summary.advisory,
                &summary.recommendations,
            )
            .context("Failed to serialize recommendations")?;
            context.emit_line(&output);
            Ok(())
        }
        AppCommandResult::Prompt(prompt) => {
            context.emit_line(prompt);
            Ok(())
        }
        AppCommandResult::Generate(generated) => {
            let json =
                export_assessment_json(&generated.assessment, generated.output_dir.as_deref())
                    .context("Failed to serialize assessment summary")?;
            context.emit_line(&json);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::AppCommand;
    use std::sync::{Arc, Mutex};

    use super::{AppCommandResult, AppContext, AppEvent, execute_command_typed};

    #[tokio::test]
    async fn execute_command_typed_help_returns_help_variant() {
        let context = AppContext::from_env();
        let result = execute_command_typed(AppCommand::Help, &context)
            .await
            .expect("typed command execution should succeed");

        assert!(matches!(result, AppCommandResult::HelpText(text) if text.contains("Usage:")));
    }

    #[tokio::test]
    async fn sample_profile_returns_form_defaults() {
        let context = AppContext::from_env();
        let result = execute_command_typed(AppCommand::SampleProfile, &context)
            .await
            .expect("sample-profile should succeed");

        let AppCommandResult::SampleProfile(profile) = result else {
            panic!("expected sample profile");
        };
        assert_eq!(profile.users, 500);
        assert_eq!(profile.critical_infra, "Patient Records Database");
    }

    #[test]
    fn context_event_hook_receives_emitted_event() {
        let events: Arc<Mutex<Vec<AppEvent>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        let context = AppContext::from_env().with_event_hook(Arc::new(move |event| {
            sink.lock()
                .expect("event lock should not be poisoned")
                .push(event.clone());
        }));

        context.emit_event(AppEvent::ArtifactWritten {
            path: "out/report.pdf".to_string(),
        });

        let captured = events.lock().expect("event lock should not be poisoned");
        assert_eq!(
            captured.as_slice(),
            &[AppEvent::ArtifactWritten {
                path: "out/report.pdf".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn run_with_context_parses_args_and_writes_to_output_hook() {
        let lines: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&lines);
        let context = AppContext::from_env().with_output_hook(Arc::new(move |line| {
            sink.lock()
                .expect("output lock should not be poisoned")
                .push(line.to_string());
        }));

        super::run_with_context(["mdr-scenario", "--version"], &context)
            .await
            .expect("version should succeed");

        let captured = lines.lock().expect("output lock should not be poisoned");
        assert_eq!(captured.as_slice(), &[crate::cli::version_text()]);
    }

    #[test]
    fn context_cancel_flag_can_be_set_and_reset() {
        let context = AppContext::from_env();
        assert!(!context.is_cancelled());
        context.cancel();
        assert!(context.is_cancelled());
        context.reset_cancel();
        assert!(!context.is_cancelled());
    }
}
