//! Vendor threat advisories
//!
//! Canned advisory text per firewall vendor, with a generic fallback.

const VENDOR_ADVISORIES: &[(&str, &str)] = &[
    (
        "Fortinet",
        "Recent CVEs regarding SSL-VPN unauthorized execution.",
    ),
    (
        "Palo Alto",
        "Exploitation of unpatched PAN-OS vulnerabilities.",
    ),
    (
        "Cisco",
        "Vulnerabilities in AnyConnect allowing privilege escalation.",
    ),
];

/// Look up the advisory for a vendor name.
///
/// Exact, case-sensitive match. Anything unknown (including "Other") gets a
/// fallback that quotes the vendor verbatim.
pub fn lookup_advisory(vendor: &str) -> String {
    VENDOR_ADVISORIES
        .iter()
        .find(|(name, _)| *name == vendor)
        .map(|(_, advisory)| advisory.to_string())
        .unwrap_or_else(|| {
            format!(
                "General misconfigurations and unpatched internet-facing assets tied to {}.",
                vendor
            )
        })
}
