//! FilterEngine — reduces the full record set to the subset matching a
//! FilterSpec.
//!
//! `apply` is a pure, deterministic, single-pass reduction: AND across all
//! present keys, OR within a multiselect key, stable input order preserved.
//! An empty spec returns the input unchanged. Contradictory numeric bounds
//! yield an empty result, never an error.

use crate::catalogue::division;
use crate::catalogue::height::{self, HeightRange, DEFAULT_HEIGHT_TOLERANCE_CM};
use crate::catalogue::matcher::{self, AttributeKind};
use crate::catalogue::record::ModelRecord;
use crate::catalogue::spec::FilterSpec;

#[derive(Debug, Clone, Copy)]
pub struct FilterEngine {
    tolerance_cm: i64,
}

impl Default for FilterEngine {
    fn default() -> Self {
        Self {
            tolerance_cm: DEFAULT_HEIGHT_TOLERANCE_CM,
        }
    }
}

impl FilterEngine {
    pub fn new(tolerance_cm: i64) -> Self {
        Self { tolerance_cm }
    }

    pub(crate) fn tolerance_cm(&self) -> i64 {
        self.tolerance_cm
    }

    /// Filters `records` down to those matching every present key in
    /// `spec`. The relative-height mean is computed over `records` on each
    /// call, so it stays correct if the dataset changes.
    pub fn apply<'a>(&self, records: &'a [ModelRecord], spec: &FilterSpec) -> Vec<&'a ModelRecord> {
        if spec.is_empty() {
            return records.iter().collect();
        }

        let height = height::resolve(spec, records, self.tolerance_cm);
        let division_codes = resolve_divisions(&spec.division);

        records
            .iter()
            .filter(|r| keep(r, spec, height.as_ref(), &division_codes))
            .collect()
    }
}

/// Resolves division terms to canonical codes. Terms that fail to resolve
/// are dropped; if none resolve, the division key imposes no constraint.
pub(crate) fn resolve_divisions(terms: &[String]) -> Vec<&'static str> {
    terms.iter().filter_map(|t| division::resolve(t)).collect()
}

fn keep(
    record: &ModelRecord,
    spec: &FilterSpec,
    height: Option<&HeightRange>,
    division_codes: &[&str],
) -> bool {
    if !spec.hair_color.is_empty()
        && !spec
            .hair_color
            .iter()
            .any(|t| matcher::matches(t, &record.hair_color, AttributeKind::Hair))
    {
        return false;
    }

    if !spec.eye_color.is_empty()
        && !spec
            .eye_color
            .iter()
            .any(|t| matcher::matches(t, &record.eye_color, AttributeKind::Eye))
    {
        return false;
    }

    if let Some(range) = height {
        if !range.contains(record.height_cm) {
            return false;
        }
    }

    if !division_codes.is_empty()
        && !division_codes
            .iter()
            .any(|code| record.division.contains(code))
    {
        return false;
    }

    for (desired, stored) in [
        (&spec.bust, &record.bust),
        (&spec.waist, &record.waist),
        (&spec.hips, &record.hips),
        (&spec.shoes, &record.shoes),
    ] {
        if let Some(desired) = desired {
            if !measurement_matches(desired, stored) {
                return false;
            }
        }
    }

    if let Some(needle) = spec.text_search.as_deref() {
        let needle = needle.trim().to_lowercase();
        if !needle.is_empty() && !text_matches(record, &needle) {
            return false;
        }
    }

    true
}

/// Measurement filters compare the first integer of the desired value
/// against the stored string's digits. An unparsable desired value degrades
/// to no constraint; an empty stored value fails to match.
pub(crate) fn measurement_matches(desired: &str, stored: &str) -> bool {
    match leading_int(desired) {
        Some(n) => stored.contains(&n.to_string()),
        None => true,
    }
}

/// First run of ASCII digits in a string, if any.
pub(crate) fn leading_int(s: &str) -> Option<i64> {
    let digits: String = s
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

fn text_matches(record: &ModelRecord, needle: &str) -> bool {
    [
        &record.name,
        &record.model_id,
        &record.division,
        &record.hair_color,
        &record.eye_color,
        &record.profile_url,
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(needle))
}
