use serde::{Deserialize, Serialize};

/// Which narrative backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AiMode {
    Disabled,
    Local,
    Cloud,
}

impl AiMode {
    pub(crate) fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "disabled" | "off" | "none" => Some(Self::Disabled),
            "local" | "ollama" => Some(Self::Local),
            "cloud" | "gemini" => Some(Self::Cloud),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AiMode::Disabled => "disabled",
            AiMode::Local => "local",
            AiMode::Cloud => "cloud",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ai_mode_parse_accepts_aliases() {
        assert_eq!(AiMode::parse("gemini"), Some(AiMode::Cloud));
        assert_eq!(AiMode::parse(" Local "), Some(AiMode::Local));
        assert_eq!(AiMode::parse("off"), Some(AiMode::Disabled));
        assert_eq!(AiMode::parse("hybrid"), None);
    }
}
