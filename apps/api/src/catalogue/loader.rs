//! Catalogue loading — reads the newline-delimited model dataset and
//! normalizes each row into a [`ModelRecord`].
//!
//! The catalogue is loaded once at startup and held read-only for the
//! process lifetime. Load failure is fatal for the session: `main` exits
//! rather than serving a partial dataset. Individual malformed lines are
//! skipped with a warning.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::catalogue::record::ModelRecord;

/// Height assigned when a source row's height string cannot be parsed.
const FALLBACK_HEIGHT_CM: i64 = 170;

/// The full, immutable record collection. Explicitly passed to the filter
/// engine on every call — never ambient global state.
#[derive(Debug, Clone)]
pub struct Catalogue {
    records: Vec<ModelRecord>,
}

/// One raw row of the JSONL dataset, before normalization.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(default)]
    model_id: Value,
    #[serde(default)]
    name: String,
    #[serde(default)]
    division: String,
    #[serde(default)]
    profile_url: String,
    #[serde(default)]
    thumbnail: String,
    #[serde(default)]
    images: Vec<String>,
    #[serde(default)]
    attributes: RawAttributes,
}

#[derive(Debug, Default, Deserialize)]
struct RawAttributes {
    #[serde(default)]
    height: String,
    #[serde(default)]
    hair: String,
    #[serde(default)]
    eyes: String,
    #[serde(default)]
    bust: String,
    #[serde(default)]
    waist: String,
    #[serde(default)]
    hips: String,
    #[serde(default)]
    shoes: String,
}

impl Catalogue {
    /// Loads the dataset from a JSONL file. Malformed lines are skipped;
    /// zero valid rows is a load failure.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open catalogue dataset at {}", path.display()))?;

        let mut records = Vec::new();
        for (line_num, line) in BufReader::new(file).lines().enumerate() {
            let line = line.with_context(|| format!("Failed to read line {}", line_num + 1))?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match serde_json::from_str::<RawRow>(line) {
                Ok(row) => records.push(normalize_row(row)),
                Err(e) => warn!("Skipping invalid JSON on line {}: {e}", line_num + 1),
            }
        }

        if records.is_empty() {
            bail!("No valid models found in {}", path.display());
        }

        info!("Loaded {} models from {}", records.len(), path.display());
        Ok(Self { records })
    }

    /// Builds a catalogue from already-normalized records (test fixtures).
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn from_records(records: Vec<ModelRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[ModelRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, model_id: &str) -> Option<&ModelRecord> {
        self.records.iter().find(|r| r.model_id == model_id)
    }
}

/// Normalizes one raw dataset row, enforcing the record invariants:
/// integer centimeter height, lowercase trimmed colors and division.
fn normalize_row(row: RawRow) -> ModelRecord {
    let height_cm = parse_height_to_cm(&row.attributes.height).unwrap_or_else(|| {
        if !row.attributes.height.trim().is_empty() {
            warn!(
                "Could not parse height '{}' for model '{}', using {FALLBACK_HEIGHT_CM}cm",
                row.attributes.height, row.name
            );
        }
        FALLBACK_HEIGHT_CM
    });

    let images = row.images;
    let thumbnail = if row.thumbnail.is_empty() {
        images.first().cloned().unwrap_or_default()
    } else {
        row.thumbnail
    };

    ModelRecord {
        model_id: id_to_string(&row.model_id),
        name: row.name.trim().to_string(),
        division: row.division.trim().to_lowercase(),
        height_cm,
        hair_color: normalize_attribute(&row.attributes.hair),
        eye_color: normalize_attribute(&row.attributes.eyes),
        bust: row.attributes.bust.trim().to_string(),
        waist: row.attributes.waist.trim().to_string(),
        hips: row.attributes.hips.trim().to_string(),
        shoes: row.attributes.shoes.trim().to_string(),
        thumbnail,
        images,
        profile_url: row.profile_url,
    }
}

/// Model ids appear as strings or bare numbers in the dataset.
fn id_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

fn normalize_attribute(attr: &str) -> String {
    attr.trim().to_lowercase()
}

/// Parses a source height string to integer centimeters.
///
/// Accepts the dataset's `5' 10" - 178` form (trailing centimeter value
/// wins) and bare feet/inches (`5' 10"`, converted at 2.54 cm/inch).
pub(crate) fn parse_height_to_cm(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    // Trailing integer is the centimeter value.
    let tail: String = trimmed
        .chars()
        .rev()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if !tail.is_empty() {
        let digits: String = tail.chars().rev().collect();
        if let Ok(cm) = digits.parse::<i64>() {
            return Some(cm);
        }
    }

    // Fall back to feet/inches.
    let apostrophe = trimmed.find('\'')?;
    let feet: i64 = trimmed[..apostrophe]
        .chars()
        .rev()
        .take_while(|c| c.is_ascii_digit())
        .collect::<String>()
        .chars()
        .rev()
        .collect::<String>()
        .parse()
        .ok()?;

    let rest = trimmed[apostrophe + 1..].trim_start();
    let inches_str: String = rest
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let inches: f64 = inches_str.parse().ok()?;

    Some((((feet * 12) as f64 + inches) * 2.54) as i64)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_parse_height_trailing_cm_wins() {
        assert_eq!(parse_height_to_cm("5' 10\" - 178"), Some(178));
        assert_eq!(parse_height_to_cm("180"), Some(180));
    }

    #[test]
    fn test_parse_height_feet_inches_fallback() {
        // 5'10" = 70 inches = 177.8 cm, truncated
        assert_eq!(parse_height_to_cm("5' 10\""), Some(177));
    }

    #[test]
    fn test_parse_height_unparsable_is_none() {
        assert_eq!(parse_height_to_cm(""), None);
        assert_eq!(parse_height_to_cm("tall"), None);
    }

    #[test]
    fn test_load_normalizes_and_skips_bad_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{"model_id": "m1", "name": "  Ava Quinn ", "division": "IMA", "attributes": {{"height": "5' 10\" - 178", "hair": " Light Ash Blonde ", "eyes": "Blue"}}, "images": ["https://cdn.example/ava-1.jpg", "https://cdn.example/ava-2.jpg"]}}"#
        )
        .unwrap();
        writeln!(file, "not json at all").unwrap();
        writeln!(
            file,
            r#"{{"model_id": 42, "name": "Mira Sole", "division": "dev", "attributes": {{"height": "165", "hair": "Brown", "eyes": "Green", "bust": "34\""}}}}"#
        )
        .unwrap();

        let catalogue = Catalogue::load(file.path()).unwrap();
        assert_eq!(catalogue.len(), 2);

        let ava = catalogue.get("m1").unwrap();
        assert_eq!(ava.name, "Ava Quinn");
        assert_eq!(ava.division, "ima");
        assert_eq!(ava.height_cm, 178);
        assert_eq!(ava.hair_color, "light ash blonde");
        assert_eq!(ava.eye_color, "blue");
        // Thumbnail defaults to the first image when absent.
        assert_eq!(ava.thumbnail, "https://cdn.example/ava-1.jpg");

        let mira = catalogue.get("42").unwrap();
        assert_eq!(mira.height_cm, 165);
        assert_eq!(mira.bust, "34\"");
        assert!(mira.thumbnail.is_empty());
    }

    #[test]
    fn test_load_empty_dataset_is_an_error() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(Catalogue::load(file.path()).is_err());
    }

    #[test]
    fn test_unparsable_height_falls_back() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{"model_id": "m1", "name": "Ada", "division": "mai", "attributes": {{"height": "unknown", "hair": "red", "eyes": "green"}}}}"#
        )
        .unwrap();

        let catalogue = Catalogue::load(file.path()).unwrap();
        assert_eq!(catalogue.get("m1").unwrap().height_cm, FALLBACK_HEIGHT_CM);
    }
}
