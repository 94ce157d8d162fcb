//! Division mapping — normalizes free-text division phrases to the
//! catalogue's canonical codes.
//!
//! Unrecognized terms resolve to `None` and the engine treats them as no
//! constraint: a misrecognized division term must not zero out a search.

/// Alias table. Canonical codes are included so they pass through directly.
const DIVISION_ALIASES: &[(&str, &str)] = &[
    ("mainboard", "ima"),
    ("main", "ima"),
    ("ima", "ima"),
    ("development", "dev"),
    ("dev", "dev"),
    ("commercial", "mai"),
    ("editorial", "mai"),
    ("mai", "mai"),
];

/// Resolves a free-text division phrase to a canonical code.
pub fn resolve(term: &str) -> Option<&'static str> {
    let term = term.trim().to_lowercase();
    DIVISION_ALIASES
        .iter()
        .find(|(alias, _)| *alias == term)
        .map(|(_, code)| *code)
}
