//! FilterSpec — the normalized, structured representation of what the
//! client wants, produced from manual controls or parsed from an AI
//! response.
//!
//! Absent keys impose no constraint. All present keys combine with AND;
//! multiselect keys (hair, eye, division) OR within themselves. A key with
//! an empty or invalid value behaves as absent — degradation is per-key,
//! never per-request.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::catalogue::height::RelativeHeight;

/// Request-scoped filter. Created fresh per filter operation, never
/// persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSpec {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hair_color: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub eye_color: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height_min: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height_max: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height_relative: Option<RelativeHeight>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub division: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bust: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waist: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hips: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shoes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_search: Option<String>,
}

impl FilterSpec {
    /// True when no key imposes a constraint.
    pub fn is_empty(&self) -> bool {
        self.hair_color.is_empty()
            && self.eye_color.is_empty()
            && self.height_min.is_none()
            && self.height_max.is_none()
            && self.height_relative.is_none()
            && self.division.is_empty()
            && self.bust.is_none()
            && self.waist.is_none()
            && self.hips.is_none()
            && self.shoes.is_none()
            && self.text_search.is_none()
    }

    /// Validates a raw JSON object from the AI response against the closed
    /// key set. Unrecognized keys are dropped, malformed values are treated
    /// as absent. Never fails; the worst case is the empty spec.
    ///
    /// `text_search` is a manual-sidebar key and is not accepted from the
    /// AI boundary.
    pub fn from_llm_value(value: &Value) -> FilterSpec {
        let mut spec = FilterSpec::default();
        let Some(map) = value.as_object() else {
            return spec;
        };

        for (key, v) in map {
            match key.as_str() {
                "hair_color" => spec.hair_color = coerce_terms(v),
                "eye_color" => spec.eye_color = coerce_terms(v),
                "height_min" => spec.height_min = coerce_cm(v),
                "height_max" => spec.height_max = coerce_cm(v),
                "height_relative" => {
                    spec.height_relative = v.as_str().and_then(RelativeHeight::from_term);
                }
                "division" => spec.division = coerce_terms(v),
                "bust" => spec.bust = coerce_measure(v),
                "waist" => spec.waist = coerce_measure(v),
                "hips" => spec.hips = coerce_measure(v),
                "shoes" | "shoe" => spec.shoes = coerce_measure(v),
                other => debug!("Dropping unrecognized filter key from AI response: {other}"),
            }
        }

        spec
    }

    /// Merges a manual spec with an AI-derived one. Manual values take
    /// precedence on conflict; keys present in only one side carry over.
    pub fn merge(manual: &FilterSpec, ai: &FilterSpec) -> FilterSpec {
        FilterSpec {
            hair_color: pick_terms(&manual.hair_color, &ai.hair_color),
            eye_color: pick_terms(&manual.eye_color, &ai.eye_color),
            height_min: manual.height_min.or(ai.height_min),
            height_max: manual.height_max.or(ai.height_max),
            height_relative: manual.height_relative.or(ai.height_relative),
            division: pick_terms(&manual.division, &ai.division),
            bust: pick_text(&manual.bust, &ai.bust),
            waist: pick_text(&manual.waist, &ai.waist),
            hips: pick_text(&manual.hips, &ai.hips),
            shoes: pick_text(&manual.shoes, &ai.shoes),
            text_search: pick_text(&manual.text_search, &ai.text_search),
        }
    }
}

fn pick_terms(manual: &[String], ai: &[String]) -> Vec<String> {
    if manual.is_empty() {
        ai.to_vec()
    } else {
        manual.to_vec()
    }
}

fn pick_text(manual: &Option<String>, ai: &Option<String>) -> Option<String> {
    manual.clone().or_else(|| ai.clone())
}

/// Accepts a scalar string or an array of strings for multiselect keys.
fn coerce_terms(value: &Value) -> Vec<String> {
    let collect = |s: &str| {
        let t = s.trim().to_lowercase();
        (!t.is_empty()).then_some(t)
    };

    match value {
        Value::String(s) => collect(s).into_iter().collect(),
        Value::Array(items) => items
            .iter()
            .filter_map(|v| v.as_str().and_then(collect))
            .collect(),
        _ => Vec::new(),
    }
}

/// Accepts integer, float, or numeric-string centimeter values.
fn coerce_cm(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => {
            let t = s.trim();
            if t.is_empty() {
                return None;
            }
            t.parse::<i64>()
                .ok()
                .or_else(|| t.parse::<f64>().ok().map(|f| f as i64))
        }
        _ => None,
    }
}

/// Measurement terms arrive as strings or bare numbers.
fn coerce_measure(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let t = s.trim();
            (!t.is_empty()).then(|| t.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_default_spec_is_empty() {
        assert!(FilterSpec::default().is_empty());
    }

    #[test]
    fn test_from_llm_value_happy_path() {
        let value = json!({
            "hair_color": "Blonde",
            "eye_color": ["blue", "green"],
            "height_relative": "taller",
            "division": "dev"
        });
        let spec = FilterSpec::from_llm_value(&value);
        assert_eq!(spec.hair_color, vec!["blonde"]);
        assert_eq!(spec.eye_color, vec!["blue", "green"]);
        assert_eq!(spec.height_relative, Some(RelativeHeight::Taller));
        assert_eq!(spec.division, vec!["dev"]);
        assert!(!spec.is_empty());
    }

    #[test]
    fn test_from_llm_value_coerces_numeric_strings() {
        let value = json!({"height_min": "170", "height_max": 180.9, "bust": 34});
        let spec = FilterSpec::from_llm_value(&value);
        assert_eq!(spec.height_min, Some(170));
        assert_eq!(spec.height_max, Some(180));
        assert_eq!(spec.bust.as_deref(), Some("34"));
    }

    #[test]
    fn test_from_llm_value_drops_unrecognized_and_malformed_keys() {
        let value = json!({
            "hair_color": "red",
            "vibe": "mysterious",
            "height_min": "tall-ish",
            "height_relative": "gigantic",
            "text_search": "should be ignored"
        });
        let spec = FilterSpec::from_llm_value(&value);
        assert_eq!(spec.hair_color, vec!["red"]);
        assert_eq!(spec.height_min, None);
        assert_eq!(spec.height_relative, None);
        assert_eq!(spec.text_search, None);
    }

    #[test]
    fn test_from_llm_value_non_object_is_empty() {
        assert!(FilterSpec::from_llm_value(&json!("just text")).is_empty());
        assert!(FilterSpec::from_llm_value(&json!([1, 2, 3])).is_empty());
    }

    #[test]
    fn test_merge_manual_wins_on_conflict() {
        let manual = FilterSpec {
            hair_color: vec!["red".to_string()],
            height_min: Some(175),
            ..FilterSpec::default()
        };
        let ai = FilterSpec {
            hair_color: vec!["blonde".to_string()],
            height_min: Some(160),
            eye_color: vec!["blue".to_string()],
            ..FilterSpec::default()
        };

        let merged = FilterSpec::merge(&manual, &ai);
        assert_eq!(merged.hair_color, vec!["red"]);
        assert_eq!(merged.height_min, Some(175));
        // Keys present only on the AI side carry over.
        assert_eq!(merged.eye_color, vec!["blue"]);
    }

    #[test]
    fn test_request_body_deserializes_with_defaults() {
        let spec: FilterSpec =
            serde_json::from_value(json!({"hair_color": ["blonde"], "height_relative": "petite"}))
                .unwrap();
        assert_eq!(spec.hair_color, vec!["blonde"]);
        assert_eq!(spec.height_relative, Some(RelativeHeight::Petite));
        assert!(spec.division.is_empty());
    }
}
