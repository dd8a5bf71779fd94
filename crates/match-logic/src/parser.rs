//! Agent file parsing and validation.
//!
//! One state per line:
//!
//! ```text
//! # Tit-for-Tat
//! 0: 1.0 0 1 0 1
//! 1: 0.0 0 1 0 1
//! ```
//!
//! Columns after the probability are the next state on CC, CD, DC and DD,
//! read as (own move, observed opponent move). Lines starting with `#` are
//! comments; blank lines are skipped. A malformed agent never runs.

use core::str::FromStr;

use thiserror::Error;

use crate::strategy::{Agent, State, StateId, MAX_STATES};

/// Tokens per state line: id, probability and four transition targets.
const TOKENS_PER_LINE: usize = 6;

/// Errors raised while reading an agent definition.
///
/// `line` is 1-based and counts comment and blank lines.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum AgentError {
    #[error("malformed line {line} ({reason}): '{content}'")]
    MalformedLine {
        line: usize,
        content: String,
        reason: &'static str,
    },

    #[error("out-of-order or missing state id on line {line}: expected state {expected}, saw {found}: '{content}'")]
    StateOrder {
        line: usize,
        content: String,
        expected: StateId,
        found: usize,
    },

    #[error("too many states on line {line}: at most {max} are allowed: '{content}'", max = MAX_STATES)]
    TooManyStates { line: usize, content: String },

    #[error("too few states: agent defines no states")]
    NoStates,

    #[error("invalid probability {value} on line {line}, must be in [0,1]: '{content}'")]
    InvalidProbability {
        line: usize,
        content: String,
        value: f64,
    },

    #[error("invalid jump from state {state} on {column} to {target} (line {line}), agent has {state_count} states: '{content}'")]
    InvalidTransition {
        line: usize,
        content: String,
        state: StateId,
        column: &'static str,
        target: String,
        state_count: usize,
    },
}

impl AgentError {
    /// Short category name, stable across messages.
    pub fn category(&self) -> &'static str {
        match self {
            AgentError::MalformedLine { .. } => "malformed line",
            AgentError::StateOrder { .. } => "out-of-order state",
            AgentError::TooManyStates { .. } => "too many states",
            AgentError::NoStates => "too few states",
            AgentError::InvalidProbability { .. } => "invalid probability",
            AgentError::InvalidTransition { .. } => "invalid jump",
        }
    }

    /// 1-based source line, when the error is tied to one.
    pub fn line(&self) -> Option<usize> {
        match self {
            AgentError::MalformedLine { line, .. }
            | AgentError::StateOrder { line, .. }
            | AgentError::TooManyStates { line, .. }
            | AgentError::InvalidProbability { line, .. }
            | AgentError::InvalidTransition { line, .. } => Some(*line),
            AgentError::NoStates => None,
        }
    }
}

const COLUMN_NAMES: [&str; 4] = ["on_cc", "on_cd", "on_dc", "on_dd"];

/// A state line that passed the per-line checks. Targets are range-checked
/// once the final state count is known.
struct RawState<'a> {
    line: usize,
    content: &'a str,
    probability: f64,
    targets: [&'a str; 4],
}

fn is_digits(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

/// Plain integer, optionally negative. Negative and oversized values are
/// still integers and fail the range check rather than the syntax check.
fn is_integer(token: &str) -> bool {
    is_digits(token.strip_prefix('-').unwrap_or(token))
}

/// Plain decimal such as `1`, `0.25` or `.5`, optionally negative.
fn is_decimal(token: &str) -> bool {
    let unsigned = token.strip_prefix('-').unwrap_or(token);
    let (whole, frac) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    (is_digits(whole) || is_digits(frac))
        && whole.bytes().chain(frac.bytes()).all(|b| b.is_ascii_digit())
}

/// Parse and validate an agent definition.
pub fn parse_agent(text: &str) -> Result<Agent, AgentError> {
    let mut raw: Vec<RawState<'_>> = Vec::with_capacity(MAX_STATES);

    for (idx, content) in text.lines().enumerate() {
        let line = idx + 1;
        let trimmed = content.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let malformed = |reason| AgentError::MalformedLine {
            line,
            content: trimmed.to_string(),
            reason,
        };

        let tokens: Vec<&str> = trimmed.split_whitespace().collect();
        if tokens.len() != TOKENS_PER_LINE {
            return Err(malformed("expected 6 fields"));
        }

        let id_token = tokens[0]
            .strip_suffix(':')
            .ok_or_else(|| malformed("state id must end with ':'"))?;
        if !is_digits(id_token) {
            return Err(malformed("non-numeric state id"));
        }
        let id = id_token.parse::<usize>().unwrap_or(usize::MAX);

        let expected = raw.len();
        if id != expected {
            return Err(AgentError::StateOrder {
                line,
                content: trimmed.to_string(),
                expected,
                found: id,
            });
        }
        if expected >= MAX_STATES {
            return Err(AgentError::TooManyStates {
                line,
                content: trimmed.to_string(),
            });
        }

        if !is_decimal(tokens[1]) {
            return Err(malformed("non-numeric probability"));
        }
        let probability: f64 = tokens[1]
            .parse()
            .map_err(|_| malformed("non-numeric probability"))?;
        if !(0.0..=1.0).contains(&probability) {
            return Err(AgentError::InvalidProbability {
                line,
                content: trimmed.to_string(),
                value: probability,
            });
        }

        let mut targets = [""; 4];
        for (slot, &token) in targets.iter_mut().zip(&tokens[2..]) {
            if !is_integer(token) {
                return Err(malformed("non-integer transition target"));
            }
            *slot = token;
        }

        raw.push(RawState {
            line,
            content: trimmed,
            probability,
            targets,
        });
    }

    if raw.is_empty() {
        return Err(AgentError::NoStates);
    }

    let state_count = raw.len();
    let mut states = Vec::with_capacity(state_count);
    for (id, entry) in raw.iter().enumerate() {
        let mut transitions = [0 as StateId; 4];
        for (column, &target) in entry.targets.iter().enumerate() {
            transitions[column] = target
                .parse::<StateId>()
                .ok()
                .filter(|&t| t < state_count)
                .ok_or_else(|| AgentError::InvalidTransition {
                    line: entry.line,
                    content: entry.content.to_string(),
                    state: id,
                    column: COLUMN_NAMES[column],
                    target: target.to_string(),
                    state_count,
                })?;
        }
        states.push(State::new(id, entry.probability, transitions));
    }

    tracing::debug!(states = state_count, "parsed agent");
    Ok(Agent::from_validated(&states))
}

impl FromStr for Agent {
    type Err = AgentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_agent(s)
    }
}
