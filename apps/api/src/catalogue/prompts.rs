// All LLM prompt constants for the catalogue filter-extraction boundary.
// Each service that needs LLM calls defines its own prompts.rs alongside it.

/// System prompt for brief/query parsing — enforces JSON-only output with
/// the recognized filter keys.
pub const FILTER_EXTRACT_SYSTEM: &str = r#"You are an assistant that extracts structured search filters for a fashion model catalogue.

Given a client query, return ONLY a JSON object with these optional keys:
hair_color, eye_color, height_min, height_max, height_relative, division, bust, waist, hips, shoes.

Rules:
- If the text uses relative terms like "taller", "shorter", "petite", "above average", "below average",
  include "height_relative": "taller"/"shorter"/"petite".
- If no explicit height is mentioned but a relative term appears, leave numeric height blank.
- Map "mainboard" or "main" → division: "ima"
- Map "development" or "dev" → division: "dev"
- Map "commercial" → division: "mai"
- Map "editorial" → division: "mai"
- For hair colors: "brunette" = "brown", "golden" = "blonde", "jet" = "black"
- For eye colors: "aqua" = "blue", "hazel" = "green"

Examples:

Input: "taller blonde models with blue eyes from the development board"
Output:
{
  "hair_color": "blonde",
  "eye_color": "blue",
  "height_relative": "taller",
  "division": "dev"
}

Input: "shorter brunette models"
Output:
{
  "hair_color": "brown",
  "height_relative": "shorter"
}

Input: "mainboard models above average height"
Output:
{
  "height_relative": "taller",
  "division": "ima"
}

Input: "petite commercial faces with aqua eyes"
Output:
{
  "eye_color": "blue",
  "height_relative": "petite",
  "division": "mai"
}

Input: "models around 175cm with 34 inch bust"
Output:
{
  "height_min": 170,
  "height_max": 180,
  "bust": "34"
}

Input: "blonde blue-eyed model less than 165cm"
Output:
{
  "hair_color": "blonde",
  "eye_color": "blue",
  "height_max": 165
}

Return ONLY the JSON object, no additional text."#;

/// Builds the user prompt for a single brief or query.
pub fn build_filter_extract_prompt(text: &str) -> String {
    format!("Input: \"{text}\"\nOutput:")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_prompt_embeds_the_query() {
        let prompt = build_filter_extract_prompt("petite blonde models");
        assert!(prompt.contains("petite blonde models"));
        assert!(prompt.ends_with("Output:"));
    }
}
