//! Attribute matching — fuzzy hair/eye color comparison with synonym groups.
//!
//! Matching is case-insensitive and whitespace-trimmed. An absent or
//! malformed stored attribute simply fails to match; it never aborts a
//! filter pass.

/// Which synonym table to match against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    Hair,
    Eye,
}

/// How strongly a target value matched a stored attribute.
///
/// `Exact` is case-insensitive trimmed equality; `Partial` is substring
/// containment in either direction; `Synonym` means both terms belong to
/// the same synonym group. The ranking pass credits `Exact` above the
/// fuzzy qualities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchQuality {
    None,
    Synonym,
    Partial,
    Exact,
}

impl MatchQuality {
    pub fn is_match(self) -> bool {
        self != MatchQuality::None
    }

    pub fn is_exact(self) -> bool {
        self == MatchQuality::Exact
    }
}

/// Interchangeable descriptive terms for one hair color value.
const HAIR_SYNONYMS: &[(&str, &[&str])] = &[
    ("blonde", &["blonde", "light", "golden", "fair"]),
    ("brown", &["brown", "brunette", "dark brown", "chestnut"]),
    ("black", &["black", "jet", "dark", "raven"]),
    ("red", &["red", "auburn", "ginger", "copper"]),
    ("gray", &["gray", "grey", "silver"]),
    ("white", &["white", "platinum"]),
];

/// Interchangeable descriptive terms for one eye color value.
const EYE_SYNONYMS: &[(&str, &[&str])] = &[
    ("blue", &["blue", "aqua", "azure", "sapphire"]),
    ("brown", &["brown", "hazel", "amber", "chocolate"]),
    ("green", &["green", "emerald", "jade"]),
    ("gray", &["gray", "grey", "silver"]),
    ("black", &["black", "dark"]),
];

/// Classifies how `target` (the value being searched for) matches `stored`
/// (the record's attribute value).
pub fn match_quality(target: &str, stored: &str, kind: AttributeKind) -> MatchQuality {
    let target = target.trim().to_lowercase();
    let stored = stored.trim().to_lowercase();

    if target.is_empty() || stored.is_empty() {
        return MatchQuality::None;
    }

    if target == stored {
        return MatchQuality::Exact;
    }

    if stored.contains(&target) || target.contains(&stored) {
        return MatchQuality::Partial;
    }

    let table = match kind {
        AttributeKind::Hair => HAIR_SYNONYMS,
        AttributeKind::Eye => EYE_SYNONYMS,
    };
    for (canonical, synonyms) in table {
        if in_group(&target, canonical, synonyms) && in_group(&stored, canonical, synonyms) {
            return MatchQuality::Synonym;
        }
    }

    MatchQuality::None
}

/// True when `target` matches `stored` at any quality.
pub fn matches(target: &str, stored: &str, kind: AttributeKind) -> bool {
    match_quality(target, stored, kind).is_match()
}

fn in_group(term: &str, canonical: &str, synonyms: &[&str]) -> bool {
    term == canonical || synonyms.contains(&term)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_is_case_insensitive_and_trimmed() {
        assert_eq!(
            match_quality("  Blonde ", "blonde", AttributeKind::Hair),
            MatchQuality::Exact
        );
    }

    #[test]
    fn test_substring_match_either_direction() {
        assert_eq!(
            match_quality("blonde", "light ash blonde", AttributeKind::Hair),
            MatchQuality::Partial
        );
        assert_eq!(
            match_quality("light ash blonde", "blonde", AttributeKind::Hair),
            MatchQuality::Partial
        );
    }

    #[test]
    fn test_brunette_matches_brown_group_synonyms() {
        assert_eq!(
            match_quality("brunette", "dark brown", AttributeKind::Hair),
            MatchQuality::Synonym
        );
        assert_eq!(
            match_quality("brunette", "chestnut", AttributeKind::Hair),
            MatchQuality::Synonym
        );
        assert!(!matches("brunette", "blonde", AttributeKind::Hair));
    }

    #[test]
    fn test_eye_synonyms() {
        assert!(matches("aqua", "blue", AttributeKind::Eye));
        assert!(matches("hazel", "amber", AttributeKind::Eye));
        assert!(!matches("aqua", "green", AttributeKind::Eye));
    }

    #[test]
    fn test_empty_values_never_match() {
        assert!(!matches("", "blonde", AttributeKind::Hair));
        assert!(!matches("blonde", "", AttributeKind::Hair));
        assert!(!matches("  ", "  ", AttributeKind::Hair));
    }

    #[test]
    fn test_unrelated_terms_do_not_match() {
        assert!(!matches("red", "black", AttributeKind::Hair));
        assert!(!matches("blue", "brown", AttributeKind::Eye));
    }
}
