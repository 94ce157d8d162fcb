//! Ranking pass — orders a filtered subset by relevance to the spec.
//!
//! Used only by the pitch workflow; plain catalogue browsing keeps the
//! engine's stable order. Each present predicate contributes its full
//! weight on an exact match and half on a fuzzy one (synonym, substring,
//! within-tolerance, alias). Ties preserve the input order.

use serde::Serialize;

use crate::catalogue::engine::{leading_int, resolve_divisions, FilterEngine};
use crate::catalogue::height;
use crate::catalogue::matcher::{self, AttributeKind, MatchQuality};
use crate::catalogue::record::ModelRecord;
use crate::catalogue::spec::FilterSpec;

const HAIR_WEIGHT: f64 = 2.0;
const EYE_WEIGHT: f64 = 2.0;
const HEIGHT_WEIGHT: f64 = 1.5;
const DIVISION_WEIGHT: f64 = 1.0;
const MEASUREMENT_WEIGHT: f64 = 0.5;

/// Half credit for matches that hold only via synonym, substring,
/// tolerance band, or division alias containment.
const FUZZY_FACTOR: f64 = 0.5;

/// A record with its relevance score.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredRecord<'a> {
    pub record: &'a ModelRecord,
    pub score: f64,
}

impl FilterEngine {
    /// Scores and sorts a filtered subset. `records` supplies the live
    /// dataset for the relative-height mean, exactly as in `apply`.
    pub fn rank<'a>(
        &self,
        subset: Vec<&'a ModelRecord>,
        spec: &FilterSpec,
        records: &[ModelRecord],
    ) -> Vec<ScoredRecord<'a>> {
        let strict_height = height::resolve(spec, records, 0);
        let wide_height = height::resolve(spec, records, self.tolerance_cm());
        let division_codes = resolve_divisions(&spec.division);

        let mut scored: Vec<ScoredRecord<'a>> = subset
            .into_iter()
            .map(|record| ScoredRecord {
                score: score(record, spec, strict_height, wide_height, &division_codes),
                record,
            })
            .collect();

        // Vec::sort_by is stable, so ties keep the input order.
        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored
    }
}

fn score(
    record: &ModelRecord,
    spec: &FilterSpec,
    strict_height: Option<height::HeightRange>,
    wide_height: Option<height::HeightRange>,
    division_codes: &[&str],
) -> f64 {
    let mut total = 0.0;

    if !spec.hair_color.is_empty() {
        total += attribute_points(&spec.hair_color, &record.hair_color, AttributeKind::Hair)
            * HAIR_WEIGHT;
    }

    if !spec.eye_color.is_empty() {
        total +=
            attribute_points(&spec.eye_color, &record.eye_color, AttributeKind::Eye) * EYE_WEIGHT;
    }

    if let Some(wide) = wide_height {
        if strict_height.is_some_and(|r| r.contains(record.height_cm)) {
            total += HEIGHT_WEIGHT;
        } else if wide.contains(record.height_cm) {
            total += HEIGHT_WEIGHT * FUZZY_FACTOR;
        }
    }

    if !division_codes.is_empty() {
        if division_codes.iter().any(|code| record.division == *code) {
            total += DIVISION_WEIGHT;
        } else if division_codes
            .iter()
            .any(|code| record.division.contains(code))
        {
            total += DIVISION_WEIGHT * FUZZY_FACTOR;
        }
    }

    for (desired, stored) in [
        (&spec.bust, &record.bust),
        (&spec.waist, &record.waist),
        (&spec.hips, &record.hips),
        (&spec.shoes, &record.shoes),
    ] {
        if let Some(desired) = desired {
            total += measurement_points(desired, stored) * MEASUREMENT_WEIGHT;
        }
    }

    total
}

/// Best quality across the multiselect's acceptable values: exact earns
/// full credit, synonym/substring half.
fn attribute_points(targets: &[String], stored: &str, kind: AttributeKind) -> f64 {
    let mut best = 0.0_f64;
    for target in targets {
        match matcher::match_quality(target, stored, kind) {
            MatchQuality::Exact => best = best.max(1.0),
            MatchQuality::Partial | MatchQuality::Synonym => best = best.max(FUZZY_FACTOR),
            MatchQuality::None => {}
        }
    }
    best
}

fn measurement_points(desired: &str, stored: &str) -> f64 {
    let Some(n) = leading_int(desired) else {
        return 0.0;
    };
    if leading_int(stored) == Some(n) {
        1.0
    } else if stored.contains(&n.to_string()) {
        FUZZY_FACTOR
    } else {
        0.0
    }
}
