pub mod checklist;
pub mod config;
pub mod error;
pub mod git;
pub mod hygiene;
pub mod inspector;
pub mod report;
pub mod tools;
pub mod util;
pub mod version;

pub use inspector::Inspector;

pub const TOOL_NAME: &str = "release-guardian";

/// Version of the report contract (check ids, candidate lists, key sets).
/// Bump only when a tool's JSON shape or recognized file names change.
pub const CONTRACT_VERSION: &str = "1";
