//! Pitch email generation — formats the selected models into a prompt and
//! asks the LLM for a short client-facing email.

use tracing::debug;

use crate::catalogue::record::ModelRecord;
use crate::llm_client::{LlmClient, LlmError};
use crate::pitch::prompts::{AGENT_NAME_PLACEHOLDER, PITCH_SYSTEM};

/// Generates an email pitch for the selected models. One LLM round-trip;
/// failures surface to the caller, which returns the ranked matches
/// without a pitch.
pub async fn generate_pitch(
    llm: &LlmClient,
    brief: &str,
    models: &[&ModelRecord],
    agent_name: &str,
) -> Result<String, LlmError> {
    let prompt = build_pitch_prompt(brief, models);
    debug!("Generating pitch for {} models", models.len());

    let email = llm.chat(PITCH_SYSTEM, &prompt).await?;
    Ok(fill_agent_name(&email, agent_name))
}

/// Builds the user prompt: the client brief plus one attribute line per
/// selected model.
fn build_pitch_prompt(brief: &str, models: &[&ModelRecord]) -> String {
    let model_details: Vec<String> = models.iter().map(|m| format_model_line(m)).collect();

    format!(
        "Client Brief: \"{brief}\"\n\nSelected Models:\n{}\n\nGenerate the email pitch now.",
        model_details.join("\n")
    )
}

fn format_model_line(model: &ModelRecord) -> String {
    let mut line = format!(
        "- {} ({}): {}cm, {} hair, {} eyes",
        model.name,
        model.division.to_uppercase(),
        model.height_cm,
        model.hair_color,
        model.eye_color
    );
    if !model.bust.is_empty() && !model.waist.is_empty() {
        line.push_str(&format!(", {} bust, {} waist", model.bust, model.waist));
    }
    line
}

fn fill_agent_name(email: &str, agent_name: &str) -> String {
    email.replace(AGENT_NAME_PLACEHOLDER, agent_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(name: &str, bust: &str, waist: &str) -> ModelRecord {
        ModelRecord {
            model_id: "m1".to_string(),
            name: name.to_string(),
            division: "ima".to_string(),
            height_cm: 178,
            hair_color: "blonde".to_string(),
            eye_color: "blue".to_string(),
            bust: bust.to_string(),
            waist: waist.to_string(),
            hips: String::new(),
            shoes: String::new(),
            thumbnail: String::new(),
            images: vec![],
            profile_url: String::new(),
        }
    }

    #[test]
    fn test_prompt_contains_brief_and_model_lines() {
        let m = model("Ava Quinn", "", "");
        let prompt = build_pitch_prompt("blonde models for a beauty campaign", &[&m]);
        assert!(prompt.contains("blonde models for a beauty campaign"));
        assert!(prompt.contains("- Ava Quinn (IMA): 178cm, blonde hair, blue eyes"));
    }

    #[test]
    fn test_model_line_includes_measurements_when_both_present() {
        let m = model("Mira Sole", "34\"", "24\"");
        assert!(format_model_line(&m).ends_with(", 34\" bust, 24\" waist"));

        let partial = model("Mira Sole", "34\"", "");
        assert!(!format_model_line(&partial).contains("bust"));
    }

    #[test]
    fn test_agent_name_replaces_placeholder() {
        let email = "Subject: Talent\n\nBody\n\nBest regards,\n[Agent Name]\nElysium Agency";
        let filled = fill_agent_name(email, "Iris");
        assert!(filled.contains("Iris\nElysium Agency"));
        assert!(!filled.contains(AGENT_NAME_PLACEHOLDER));
    }
}
