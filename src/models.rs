//! Client profile data model
//!
//! The questionnaire record that drives both the recommendation rules and
//! the narrative prompt.

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Industry vertical of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Industry {
    Healthcare,
    Finance,
    Manufacturing,
    Retail,
    Technology,
    Education,
}

impl Industry {
    pub fn as_str(&self) -> &'static str {
        match self {
            Industry::Healthcare => "Healthcare",
            Industry::Finance => "Finance",
            Industry::Manufacturing => "Manufacturing",
            Industry::Retail => "Retail",
            Industry::Technology => "Technology",
            Industry::Education => "Education",
        }
    }
}

/// How security-aware the client's users are. Ordered Low < Medium < High.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Savviness {
    Low,
    Medium,
    High,
}

impl Savviness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Savviness::Low => "Low",
            Savviness::Medium => "Medium",
            Savviness::High => "High",
        }
    }
}

/// In-house security team coverage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SecurityTeam {
    None,
    BusinessHours,
    TwentyFourSeven,
}

impl SecurityTeam {
    pub fn as_str(&self) -> &'static str {
        match self {
            SecurityTeam::None => "No",
            SecurityTeam::BusinessHours => "Yes (9-to-5)",
            SecurityTeam::TwentyFourSeven => "Yes (24/7)",
        }
    }
}

/// Perimeter firewall vendor. `Other` is the escape for anything not listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FirewallVendor {
    Fortinet,
    #[serde(rename = "Palo Alto")]
    PaloAlto,
    Cisco,
    #[serde(rename = "Check Point")]
    CheckPoint,
    Sophos,
    Other,
}

impl FirewallVendor {
    pub fn as_str(&self) -> &'static str {
        match self {
            FirewallVendor::Fortinet => "Fortinet",
            FirewallVendor::PaloAlto => "Palo Alto",
            FirewallVendor::Cisco => "Cisco",
            FirewallVendor::CheckPoint => "Check Point",
            FirewallVendor::Sophos => "Sophos",
            FirewallVendor::Other => "Other",
        }
    }
}

macro_rules! impl_display_via_as_str {
    ($($ty:ty),+) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })+
    };
}

impl_display_via_as_str!(Industry, Savviness, SecurityTeam, FirewallVendor);

/// Client estate questionnaire.
///
/// Missing fields in serialized input fall back to [`ClientProfile::default`],
/// so a partially answered questionnaire still yields a complete record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientProfile {
    pub customer_name: String,
    pub consultant_name: String,
    pub industry: Industry,
    pub users: u32,
    pub savviness: Savviness,
    pub in_house_team: SecurityTeam,
    pub endpoints: u32,
    pub servers: u32,
    pub physical_locations: u32,
    pub public_web_apps: bool,
    pub firewall: FirewallVendor,
    pub other_tools: String,
    pub critical_infra: String,
}

impl Default for ClientProfile {
    fn default() -> Self {
        Self {
            customer_name: "Unnamed Customer".to_string(),
            consultant_name: "Unassigned Consultant".to_string(),
            industry: Industry::Healthcare,
            users: 500,
            savviness: Savviness::Low,
            in_house_team: SecurityTeam::None,
            endpoints: 600,
            servers: 50,
            physical_locations: 3,
            public_web_apps: false,
            firewall: FirewallVendor::Fortinet,
            other_tools: "Microsoft Defender".to_string(),
            critical_infra: "Patient Records Database".to_string(),
        }
    }
}

impl ClientProfile {
    /// Check the numeric invariants. Enum fields are enforced by the type system.
    pub fn validate(&self) -> Result<()> {
        let counts = [
            ("users", self.users),
            ("endpoints", self.endpoints),
            ("servers", self.servers),
            ("physical_locations", self.physical_locations),
        ];
        for (field, value) in counts {
            if value == 0 {
                return Err(anyhow!(
                    "Invalid client profile: '{}' must be a positive integer",
                    field
                ));
            }
        }
        Ok(())
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let profile: ClientProfile =
            serde_json::from_str(raw).context("Failed to parse client profile JSON")?;
        profile.validate()?;
        Ok(profile)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read client profile {}", path.display()))?;
        Self::from_json_str(&raw)
            .with_context(|| format!("Invalid client profile in {}", path.display()))
    }

    pub fn public_web_apps_label(&self) -> &'static str {
        if self.public_web_apps { "Yes" } else { "No" }
    }
}
