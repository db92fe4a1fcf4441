//! Version detection and alignment.
//!
//! [`align`] answers "does the authoritative manifest carry the expected
//! version"; [`evidence`] gathers every readable source and requires all of
//! them to agree.

pub mod align;
pub mod evidence;
pub mod manifest;

/// Treat a blank expected tag as "not given".
pub fn expected_or_none(expected_tag: Option<&str>) -> Option<&str> {
    expected_tag.filter(|t| !t.trim().is_empty())
}

/// Strip exactly one leading `v` from an expected tag.
///
/// Only ever applied to the caller's expected value; versions read from
/// disk are compared verbatim.
pub fn normalize_expected(tag: &str) -> &str {
    tag.strip_prefix('v').unwrap_or(tag)
}

/// Whether a detected version satisfies an optional expectation.
pub fn satisfies(detected: &str, expected_tag: Option<&str>) -> bool {
    match expected_tag {
        Some(tag) => detected == normalize_expected(tag),
        None => true,
    }
}
