//! MDR & Offensive Security Scenario Generator
//!
//! Turns a client questionnaire into a tailored threat scenario:
//! - Rule-based advisory and testing recommendations
//! - Vendor threat-intel lookup
//! - Narrative generation via Gemini (cloud) or Ollama (local)
//! - PDF report and three-slide PPTX deck rendering

pub mod ai;
pub mod app;
pub mod cli;
pub mod cli_adapter;
pub mod command;
mod command_handlers;
pub mod config;
pub mod exports;
pub mod insights;
pub mod logging;
pub mod models;
pub mod workflow;

pub use ai::{
    AiMode, AiSettings, ERROR_SENTINEL_MARKER, GeminiProvider, GenerateFuture, NarrativeSource,
    OllamaProvider, build_narrative_source, build_prompt, generate_narrative,
    generate_narrative_with_settings, is_error_sentinel,
};
pub use app::{
    AppCommandResult, AppContext, AppEvent, EventHook, GeneratedAssessment, OutputHook,
    RecommendationSummary, execute_command, execute_command_typed, execute_command_with_context,
    run, run_with_context, run_with_ctrl_c,
};
pub use cli::{CliCommand, parse_cli_args, usage_text, version_text};
pub use command::AppCommand;
pub use config::*;
pub use exports::{
    ArtifactBundle, DeckOptions, ExportOptions, ExportOutcome, ReportInputs, ReportOptions,
    ReportStyle, default_deck_filename, default_report_filename, export_artifacts,
    export_assessment_json, export_recommendations_json, render_deck, render_report, sanitize,
};
pub use insights::{lookup_advisory, recommend};
pub use models::*;
pub use workflow::{AssessmentResult, run_assessment, run_assessment_with_settings};

// Re-export logging macros for use across crate
pub use crate::logging::macros;
