//! Rule-based insights
//!
//! Deterministic service recommendations and vendor advisories

pub mod recommendations;
pub mod threat_intel;

pub use recommendations::recommend;
pub use threat_intel::lookup_advisory;
