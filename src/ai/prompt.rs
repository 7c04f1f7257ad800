use crate::models::ClientProfile;

/// Persona prepended to every narrative request.
pub const SYSTEM_PERSONA: &str = "You are a Principal Cybersecurity Architect and Threat Intelligence Expert. Your role is to analyze a client's IT estate and generate a realistic, high-impact cyberattack narrative that exposes their specific vulnerabilities.

Your tone must be authoritative, consultative, and technical but accessible to executive leadership. Avoid generic AI fluff. Use accurate terminology (e.g., MITRE ATT&CK framework tactics, threat actor behaviors).

CORE OBJECTIVES:
1. Emphasize the \"Human Element\": Always exploit human vulnerabilities (alert fatigue, skill gaps, off-hours attacks, or social engineering) rather than just relying on technical exploits.
2. The \"Bring Your Own Tech\" (BYOT) Angle: Illustrate how isolated security tools fail to stop lateral movement without cross-platform correlation.
3. Position Sophos MDR: Clearly articulate how human-led threat hunting, 24/7 coverage, and cross-vendor telemetry ingestion would have interrupted the attack chain before the final impact.
4. Enrich Information: Provide additional context to the security testing and advisory section regarding the specific value of Sophos and Secureworks testing.
5. Critical Infrastructure Context: Provide additional context to the customer's critical infrastructure and detail exactly why the attacker targeting these specific solutions/data could be catastrophic.
6. Recommend Portfolio Products: Always suggest specific Sophos products (e.g., Sophos Intercept X, Sophos Email, Sophos Phish Threat, Sophos ZTNA, Sophos Firewall) that map directly to the vulnerabilities exploited in the narrative.";

/// Build the scenario prompt for a profile and its vendor advisory.
///
/// Pure interpolation; every decision that depends on profile values has
/// already been made by the recommendation rules and the advisory lookup.
pub fn build_prompt(profile: &ClientProfile, advisory: &str) -> String {
    let customer = &profile.customer_name;
    let savviness = profile.savviness.as_str();
    let critical_infra = &profile.critical_infra;
    let firewall = profile.firewall.as_str();
    let team = profile.in_house_team.as_str();

    format!(
        "Based on the following client profile, generate a seamless 4-paragraph breach scenario and solutions summary.

ENGAGEMENT DETAILS:
- Customer: {customer}
- Consultant: {consultant}

CLIENT ENVIRONMENT:
- Industry: {industry}
- Total Users: {users} (Security Savviness: {savviness})
- Infrastructure: {endpoints} Endpoints | {servers} Servers
- Physical Locations: {locations}
- Public-Facing Web Applications: {web_apps}
- Critical Asset: {critical_infra}
- In-House Security Team: {team}
- Current Stack: {firewall} Firewall, {other_tools}

ADDITIONAL CONTEXT:
- Recent vulnerabilities/trends to weave in: {advisory}

SCENARIO REQUIREMENTS:
- Paragraph 1 (Initial Access & The Human Element): Describe how attackers bypassed the perimeter using the context above alongside wider real-world news/trends. Explicitly exploit the {customer} users' '{savviness}' savviness level. Include real-world reported threat actor behaviors where possible.
- Paragraph 2 (Lateral Movement & Alert Fatigue): Detail how the attacker moved toward the {critical_infra}. Highlight the specific danger of this asset being compromised. Explain why the {firewall} firewall missed the lateral movement and how the in-house team ({team}) was overwhelmed or offline.
- Paragraph 3 (The Sophos MDR Differentiator): Explain exactly how Sophos MDR's 24/7 expert analysts, utilizing telemetry from the client's existing stack, would have neutralized the threat.
- Paragraph 4 (Recommended Solutions Summary): Summarize the defense strategy. Explicitly name 2-3 additional Sophos products (e.g., Sophos Intercept X Advanced with XDR, Sophos Email, Sophos Phish Threat, Sophos ZTNA) that would proactively prevent this specific attack path, and ensure additional and correct context is provided around the Sophos and Secureworks security testing recommendations.

FORMATTING CONSTRAINTS:
- Hide paragraph headings (e.g., do not write \"Paragraph 1:\", \"Initial Access:\", etc.). It must read like a continuous brief.
- Do not call out the source of the additional context. Integrate it, together with valid intelligence from wider sources, naturally into the narrative.",
        consultant = profile.consultant_name,
        industry = profile.industry.as_str(),
        users = profile.users,
        endpoints = profile.endpoints,
        servers = profile.servers,
        locations = profile.physical_locations,
        web_apps = profile.public_web_apps_label(),
        other_tools = profile.other_tools,
    )
}

/// Full request text sent to a provider: persona, blank line, prompt.
pub fn compose_request_text(prompt: &str) -> String {
    format!("{}\n\n{}", SYSTEM_PERSONA, prompt)
}
