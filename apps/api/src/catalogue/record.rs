//! ModelRecord — one catalogue entry, constructed once at load time.

use serde::{Deserialize, Serialize};

/// A single model in the catalogue.
///
/// Invariants (enforced by the loader, relied on everywhere else):
/// - `height_cm` is always centimeters, integer.
/// - `hair_color`, `eye_color`, and `division` are lowercase and trimmed.
///
/// Records are immutable for the lifetime of a session — the catalogue is a
/// read-only table, not a CRUD store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelRecord {
    pub model_id: String,
    pub name: String,
    pub division: String,
    pub height_cm: i64,
    pub hair_color: String,
    pub eye_color: String,
    #[serde(default)]
    pub bust: String,
    #[serde(default)]
    pub waist: String,
    #[serde(default)]
    pub hips: String,
    #[serde(default)]
    pub shoes: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub profile_url: String,
}
