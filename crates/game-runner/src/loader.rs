//! Agent loading from files or built-in presets

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use noisy_match_logic::{parse_agent, Agent, Preset};

/// Prefix selecting a built-in agent instead of a file, e.g. `builtin:pavlov`
pub const BUILTIN_PREFIX: &str = "builtin:";

/// An agent plus the name shown in traces
#[derive(Clone, Debug)]
pub struct LoadedAgent {
    pub name: String,
    pub agent: Agent,
}

/// Load an agent from a path or a `builtin:` name.
pub fn load_agent(source: &str) -> Result<LoadedAgent> {
    if let Some(name) = source.strip_prefix(BUILTIN_PREFIX) {
        let preset: Preset = name.parse()?;
        return Ok(LoadedAgent {
            name: preset.name().to_string(),
            agent: preset.agent(),
        });
    }

    tracing::info!(path = source, "loading agent");
    let text = fs::read_to_string(source)
        .with_context(|| format!("could not read agent file '{}'", source))?;
    let agent = parse_agent(&text).with_context(|| format!("invalid agent file '{}'", source))?;

    Ok(LoadedAgent {
        name: agent_name(source),
        agent,
    })
}

/// File name without directories or the `.agent` extension
pub fn agent_name(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}
