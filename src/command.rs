use std::path::PathBuf;

use crate::exports::ReportStyle;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    Generate {
        profile: PathBuf,
        out_dir: Option<PathBuf>,
        style: Option<ReportStyle>,
        include_advisory: bool,
    },
    Recommend {
        profile: PathBuf,
    },
    Prompt {
        profile: PathBuf,
    },
    SampleProfile,
    Help,
    Version,
}
