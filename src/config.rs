//! Configuration constants for the MDR scenario generator

/// Characters per wrapped report line
pub const REPORT_WRAP_WIDTH: usize = 95;

/// Vertical advance of one wrapped body row (mm)
pub const REPORT_LINE_HEIGHT_MM: f32 = 5.0;

/// Vertical advance for a blank source line between paragraphs (mm)
pub const REPORT_PARAGRAPH_GAP_MM: f32 = 3.0;

/// Gap after a section header (mm)
pub const REPORT_HEADER_GAP_MM: f32 = 9.0;

/// Gap after a finished section (mm)
pub const REPORT_SECTION_GAP_MM: f32 = 6.0;

/// Character budget for the narrative slide body
pub const DECK_SUMMARY_CHARS: usize = 450;

/// Allowed range for the narrative slide budget
pub const DECK_SUMMARY_CHARS_MIN: usize = 250;
pub const DECK_SUMMARY_CHARS_MAX: usize = 500;

/// Default directory for written artifacts
pub const DEFAULT_OUTPUT_DIR: &str = ".";

pub(crate) fn env_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub(crate) fn env_parse_u64(name: &str, default: u64, min: u64, max: u64) -> u64 {
    match env_var(name).and_then(|v| v.parse::<u64>().ok()) {
        Some(v) => v.clamp(min, max),
        None => default,
    }
}

fn env_parse_usize(name: &str, default: usize, min: usize, max: usize) -> usize {
    match env_var(name).and_then(|v| v.parse::<usize>().ok()) {
        Some(v) => v.clamp(min, max),
        None => default,
    }
}

/// Runtime-tunable report wrap width.
/// Env: `MDR_REPORT_WRAP_WIDTH`
pub fn report_wrap_width() -> usize {
    env_parse_usize("MDR_REPORT_WRAP_WIDTH", REPORT_WRAP_WIDTH, 40, 120)
}

/// Runtime-tunable narrative slide budget.
/// Env: `MDR_DECK_SUMMARY_CHARS`
pub fn deck_summary_chars() -> usize {
    env_parse_usize(
        "MDR_DECK_SUMMARY_CHARS",
        DECK_SUMMARY_CHARS,
        DECK_SUMMARY_CHARS_MIN,
        DECK_SUMMARY_CHARS_MAX,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_variables_fall_back_to_defaults() {
        assert_eq!(
            env_parse_usize("MDR_TEST_UNSET_VARIABLE_FOR_CONFIG", 95, 40, 120),
            95
        );
        assert_eq!(env_var("MDR_TEST_UNSET_VARIABLE_FOR_CONFIG"), None);
    }
}
