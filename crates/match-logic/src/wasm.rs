//! WASM bindings for frontend match replay

#![cfg(feature = "wasm")]

use wasm_bindgen::prelude::*;

use crate::{describe_agent, parse_agent, run_match, Agent, MatchConfig, Preset, SeededRng};

fn parse_side(text: &str, side: char) -> Result<Agent, JsError> {
    parse_agent(text).map_err(|e| JsError::new(&format!("Invalid agent {}: {}", side, e)))
}

/// Replay a match with full round-by-round details
///
/// # Arguments
/// * `agent_a_text` - Agent file contents for player A
/// * `agent_b_text` - Agent file contents for player B
/// * `rounds` - Number of rounds to play
/// * `noise` - Observation noise probability in [0, 1]
/// * `seed` - 32-byte randomness seed
/// * `match_index` - Index of this match (selects the RNG stream)
///
/// # Returns
/// JSON serialized MatchResult
#[wasm_bindgen]
pub fn replay_match(
    agent_a_text: &str,
    agent_b_text: &str,
    rounds: u32,
    noise: f64,
    seed: &[u8],
    match_index: u32,
) -> Result<JsValue, JsError> {
    let agent_a = parse_side(agent_a_text, 'A')?;
    let agent_b = parse_side(agent_b_text, 'B')?;

    let config = MatchConfig::new(rounds)
        .with_noise(noise)
        .map_err(|e| JsError::new(&e.to_string()))?;

    let seed_arr: [u8; 32] = seed
        .try_into()
        .map_err(|_| JsError::new("Seed must be exactly 32 bytes"))?;

    let result = run_match(&agent_a, &agent_b, &config, SeededRng::new(&seed_arr, match_index));

    serde_wasm_bindgen::to_value(&result)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

#[derive(serde::Serialize)]
struct ValidationResult {
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<usize>,
}

/// Validate agent file contents
///
/// Returns `{valid: true}` or `{valid: false, error, category, line}`.
/// Never throws; validation errors are returned as structured data.
#[wasm_bindgen]
pub fn validate_agent(text: &str) -> JsValue {
    let result = match parse_agent(text) {
        Ok(_) => ValidationResult { valid: true, error: None, category: None, line: None },
        Err(e) => ValidationResult {
            valid: false,
            error: Some(e.to_string()),
            category: Some(e.category()),
            line: e.line(),
        },
    };
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

/// Get human-readable description of an agent
#[wasm_bindgen]
pub fn get_agent_description(text: &str) -> Result<String, JsError> {
    let agent = parse_agent(text).map_err(|e| JsError::new(&format!("Invalid agent: {}", e)))?;
    Ok(describe_agent(&agent))
}

#[derive(serde::Serialize)]
struct PresetInfo {
    id: &'static str,
    description: &'static str,
    text: String,
}

/// Get all built-in agents with their file text
#[wasm_bindgen]
pub fn get_preset_agents() -> Result<JsValue, JsError> {
    let presets: Vec<PresetInfo> = Preset::ALL
        .into_iter()
        .map(|p| PresetInfo {
            id: p.name(),
            description: p.description(),
            text: p.agent().to_agent_text(),
        })
        .collect();

    serde_wasm_bindgen::to_value(&presets)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// Serialize a built-in agent's state table as JSON
#[wasm_bindgen]
pub fn preset_states_json(name: &str) -> Result<String, JsError> {
    let preset: Preset = name.parse().map_err(|e: crate::UnknownPreset| JsError::new(&e.to_string()))?;
    serde_json::to_string(preset.agent().states())
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}
