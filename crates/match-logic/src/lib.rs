//! Match Logic for the noisy-automaton Prisoner's Dilemma
//!
//! Core game logic for Iterated Prisoner's Dilemma matches between
//! finite-state stochastic agents that see each other through noise.
//! This crate is compiled to:
//! - Native (for the command-line runner)
//! - WASM (for frontend match replay)

mod random;
mod strategy;
mod parser;
mod noise;
mod game;
mod presets;

#[cfg(feature = "wasm")]
mod wasm;

pub use random::SeededRng;
pub use strategy::{describe_agent, Agent, Automaton, Move, Outcome, State, StateId, MAX_STATES};
pub use parser::{parse_agent, AgentError};
pub use noise::{NoiseModel, DEFAULT_NOISE};
pub use game::{run_match, ConfigError, Match, MatchConfig, MatchResult, RoundRecord, DEFAULT_ROUNDS};
pub use presets::{Preset, UnknownPreset};

/// Payoff matrix for the Prisoner's Dilemma
/// Returns (score_a, score_b)
pub fn payoff(a: Move, b: Move) -> (u8, u8) {
    match (a, b) {
        (Move::Cooperate, Move::Cooperate) => (3, 3),
        (Move::Cooperate, Move::Defect) => (0, 5),
        (Move::Defect, Move::Cooperate) => (5, 0),
        (Move::Defect, Move::Defect) => (1, 1),
    }
}
