//! Service recommendations
//!
//! Maps a client profile to an ordered list of testing and advisory services.

use crate::models::{ClientProfile, Savviness, SecurityTeam};

pub const ADVERSARY_EXERCISE: &str = "Secureworks Adversary Exercises (Red Teaming): Emulate a sophisticated adversary to stress-test your mature 24/7 SOC.";
pub const INTERNAL_PENTEST: &str = "Sophos Internal Penetration Testing: Simulate an attacker who has bypassed the perimeter to test domain compromise.";
pub const TABLETOP_EXERCISE: &str = "Secureworks Tabletop Exercises: Ensure leadership and the internal security team are aligned during a crisis.";
pub const IR_RETAINER: &str = "Sophos Emergency Incident Response Retainer: Crucial for organizations without dedicated internal IR teams.";
pub const WEB_APP_ASSESSMENT: &str = "Sophos Web Application Security Assessment: Identify coding flaws in your public-facing web applications.";
pub const EXTERNAL_PENTEST: &str = "Sophos External Penetration Testing: Manual attempts to breach your internet-facing assets.";
pub const WIRELESS_PENTEST: &str = "Sophos Wireless Network Penetration Testing: Evaluate wireless security across your physical locations.";
pub const COMPROMISE_ASSESSMENT: &str = "Sophos Compromise Assessment: Proactively hunt for existing persistence mechanisms in your data center.";
pub const MANAGED_RISK: &str =
    "Sophos Managed Risk: Implement continuous external attack surface management.";

/// Server count above which a compromise assessment is recommended.
const COMPROMISE_ASSESSMENT_SERVER_THRESHOLD: u32 = 50;

/// Derive the recommendation list for a profile.
///
/// Rules run top to bottom and only append. Only the team-maturity rule has
/// mutually exclusive branches; managed risk is always last.
pub fn recommend(profile: &ClientProfile) -> Vec<String> {
    let mut recs = Vec::new();

    if profile.in_house_team == SecurityTeam::TwentyFourSeven
        && profile.savviness == Savviness::High
    {
        recs.push(ADVERSARY_EXERCISE.to_string());
    } else if profile.in_house_team != SecurityTeam::None {
        recs.push(INTERNAL_PENTEST.to_string());
        recs.push(TABLETOP_EXERCISE.to_string());
    } else {
        recs.push(IR_RETAINER.to_string());
    }

    if profile.public_web_apps {
        recs.push(WEB_APP_ASSESSMENT.to_string());
        recs.push(EXTERNAL_PENTEST.to_string());
    }

    if profile.physical_locations > 1 {
        recs.push(WIRELESS_PENTEST.to_string());
    }

    if profile.servers > COMPROMISE_ASSESSMENT_SERVER_THRESHOLD {
        recs.push(COMPROMISE_ASSESSMENT.to_string());
    }

    recs.push(MANAGED_RISK.to_string());
    recs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FirewallVendor;

    fn profile(team: SecurityTeam, savviness: Savviness) -> ClientProfile {
        ClientProfile {
            in_house_team: team,
            savviness,
            physical_locations: 1,
            servers: 10,
            public_web_apps: false,
            ..ClientProfile::default()
        }
    }

    #[test]
    fn mature_soc_gets_adversary_exercise_first() {
        let recs = recommend(&profile(SecurityTeam::TwentyFourSeven, Savviness::High));
        assert_eq!(recs[0], ADVERSARY_EXERCISE);
        assert!(!recs.iter().any(|r| r == INTERNAL_PENTEST));
        assert!(!recs.iter().any(|r| r == TABLETOP_EXERCISE));
    }

    #[test]
    fn round_the_clock_team_without_high_savviness_gets_internal_tests() {
        let recs = recommend(&profile(SecurityTeam::TwentyFourSeven, Savviness::Medium));
        assert_eq!(recs[0], INTERNAL_PENTEST);
        assert_eq!(recs[1], TABLETOP_EXERCISE);
        assert!(!recs.iter().any(|r| r == ADVERSARY_EXERCISE));
    }

    #[test]
    fn business_hours_team_gets_pentest_then_tabletop() {
        for savviness in [Savviness::Low, Savviness::Medium, Savviness::High] {
            let recs = recommend(&profile(SecurityTeam::BusinessHours, savviness));
            let pentest = recs.iter().position(|r| r == INTERNAL_PENTEST);
            let tabletop = recs.iter().position(|r| r == TABLETOP_EXERCISE);
            assert!(matches!((pentest, tabletop), (Some(p), Some(t)) if p < t));
            assert!(!recs.iter().any(|r| r == IR_RETAINER));
        }
    }

    #[test]
    fn no_team_gets_only_the_retainer_from_rule_one() {
        let recs = recommend(&profile(SecurityTeam::None, Savviness::High));
        assert_eq!(recs, vec![IR_RETAINER.to_string(), MANAGED_RISK.to_string()]);
    }

    #[test]
    fn server_threshold_is_strictly_greater_than_fifty() {
        let mut p = profile(SecurityTeam::None, Savviness::Low);
        p.servers = 50;
        assert!(!recommend(&p).iter().any(|r| r == COMPROMISE_ASSESSMENT));
        p.servers = 51;
        assert!(recommend(&p).iter().any(|r| r == COMPROMISE_ASSESSMENT));
    }

    #[test]
    fn single_location_skips_wireless_testing() {
        let mut p = profile(SecurityTeam::None, Savviness::Low);
        p.physical_locations = 1;
        assert!(!recommend(&p).iter().any(|r| r == WIRELESS_PENTEST));
        p.physical_locations = 2;
        assert!(recommend(&p).iter().any(|r| r == WIRELESS_PENTEST));
    }

    #[test]
    fn managed_risk_is_always_last() {
        let teams = [
            SecurityTeam::None,
            SecurityTeam::BusinessHours,
            SecurityTeam::TwentyFourSeven,
        ];
        for team in teams {
            for web in [false, true] {
                for servers in [1, 50, 51, 500] {
                    let p = ClientProfile {
                        in_house_team: team,
                        public_web_apps: web,
                        servers,
                        physical_locations: 4,
                        savviness: Savviness::High,
                        ..ClientProfile::default()
                    };
                    let recs = recommend(&p);
                    assert_eq!(recs.last().map(String::as_str), Some(MANAGED_RISK));
                }
            }
        }
    }

    #[test]
    fn small_cisco_shop_with_web_apps() {
        let p = ClientProfile {
            in_house_team: SecurityTeam::None,
            savviness: Savviness::Low,
            public_web_apps: true,
            physical_locations: 1,
            servers: 10,
            firewall: FirewallVendor::Cisco,
            ..ClientProfile::default()
        };
        assert_eq!(
            recommend(&p),
            vec![
                IR_RETAINER.to_string(),
                WEB_APP_ASSESSMENT.to_string(),
                EXTERNAL_PENTEST.to_string(),
                MANAGED_RISK.to_string(),
            ]
        );
    }
}
