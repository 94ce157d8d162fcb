//! Height resolution — turns absolute bounds and relative descriptors into
//! a concrete numeric range.
//!
//! Absolute bounds are widened by the engine's tolerance in the permissive
//! direction before testing membership. Relative descriptors derive their
//! range from the arithmetic mean over the record set passed to the current
//! filter call — recomputed live, never cached.

use serde::{Deserialize, Serialize};

use crate::catalogue::record::ModelRecord;
use crate::catalogue::spec::FilterSpec;

/// Default tolerance applied to absolute height bounds, in centimeters.
/// Overridable via `HEIGHT_TOLERANCE_CM`.
pub const DEFAULT_HEIGHT_TOLERANCE_CM: i64 = 3;

/// Margin around the dataset mean for taller/shorter resolution.
const RELATIVE_MARGIN_CM: f64 = 3.0;

/// Upper bound for the petite descriptor.
const PETITE_MAX_CM: f64 = 165.0;

/// A relative height descriptor extracted from free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelativeHeight {
    Taller,
    Shorter,
    Petite,
}

impl RelativeHeight {
    /// Parses a free-text descriptor, accepting the "above/below average"
    /// aliases. Unknown terms yield `None` (no constraint).
    pub fn from_term(term: &str) -> Option<Self> {
        match term.trim().to_lowercase().as_str() {
            "taller" | "above average" => Some(Self::Taller),
            "shorter" | "below average" => Some(Self::Shorter),
            "petite" => Some(Self::Petite),
            _ => None,
        }
    }

    fn range(self, mean: f64) -> HeightRange {
        match self {
            Self::Taller => HeightRange {
                min: Some(mean + RELATIVE_MARGIN_CM),
                max: None,
            },
            Self::Shorter => HeightRange {
                min: None,
                max: Some(mean - RELATIVE_MARGIN_CM),
            },
            Self::Petite => HeightRange {
                min: None,
                max: Some(PETITE_MAX_CM),
            },
        }
    }
}

/// An inclusive height range. `None` bounds are unbounded. A range whose
/// min exceeds its max contains nothing — the defined outcome for a
/// contradictory spec.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl HeightRange {
    pub fn contains(&self, height_cm: i64) -> bool {
        let h = height_cm as f64;
        if let Some(min) = self.min {
            if h < min {
                return false;
            }
        }
        if let Some(max) = self.max {
            if h > max {
                return false;
            }
        }
        true
    }

    fn intersect(self, other: Self) -> Self {
        Self {
            min: fold_bound(self.min, other.min, f64::max),
            max: fold_bound(self.max, other.max, f64::min),
        }
    }
}

fn fold_bound(a: Option<f64>, b: Option<f64>, pick: fn(f64, f64) -> f64) -> Option<f64> {
    match (a, b) {
        (Some(a), Some(b)) => Some(pick(a, b)),
        (bound, None) | (None, bound) => bound,
    }
}

/// Arithmetic mean height over a record set.
pub fn mean_height(records: &[ModelRecord]) -> Option<f64> {
    if records.is_empty() {
        return None;
    }
    let total: i64 = records.iter().map(|r| r.height_cm).sum();
    Some(total as f64 / records.len() as f64)
}

/// Resolves the spec's height constraints against the live record set.
/// Returns `None` when the spec carries no height constraint.
///
/// When both an absolute range and a relative descriptor are present, the
/// two ranges are intersected — both must hold.
pub fn resolve(spec: &FilterSpec, records: &[ModelRecord], tolerance_cm: i64) -> Option<HeightRange> {
    let absolute = if spec.height_min.is_some() || spec.height_max.is_some() {
        Some(HeightRange {
            min: spec.height_min.map(|m| (m - tolerance_cm) as f64),
            max: spec.height_max.map(|m| (m + tolerance_cm) as f64),
        })
    } else {
        None
    };

    let relative = spec
        .height_relative
        .and_then(|rel| mean_height(records).map(|mean| rel.range(mean)));

    match (absolute, relative) {
        (Some(a), Some(r)) => Some(a.intersect(r)),
        (Some(a), None) => Some(a),
        (None, Some(r)) => Some(r),
        (None, None) => None,
    }
}
