//! Match execution engine

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::noise::{NoiseModel, DEFAULT_NOISE};
use crate::payoff;
use crate::random::SeededRng;
use crate::strategy::{Agent, Automaton, Move, Outcome, StateId};

/// Round count used when none is given.
pub const DEFAULT_ROUNDS: u32 = 20;

/// Result of a single round
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// 1-based
    pub round: u32,
    pub move_a: Move,
    pub move_b: Move,
    /// B's move as A saw it
    pub observed_a: Move,
    /// A's move as B saw it
    pub observed_b: Move,
    pub score_a: u8,
    pub score_b: u8,
    pub cumulative_a: u32,
    pub cumulative_b: u32,
    /// A's state after this round's transition
    pub state_a: StateId,
    pub state_b: StateId,
}

impl RoundRecord {
    /// Category that drove A's transition this round
    pub fn perceived_a(&self) -> Outcome {
        Outcome::from_moves(self.move_a, self.observed_a)
    }

    /// Category that drove B's transition this round
    pub fn perceived_b(&self) -> Outcome {
        Outcome::from_moves(self.move_b, self.observed_b)
    }
}

/// Result of a complete match
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub rounds: Vec<RoundRecord>,
    pub total_score_a: u32,
    pub total_score_b: u32,
    pub round_count: u32,
}

/// Rejected match configuration
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("noise probability {0} must be in [0,1]")]
    InvalidNoise(f64),
}

/// Configuration for a single match
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatchConfig {
    pub rounds: u32,
    noise: f64,
}

impl MatchConfig {
    /// `rounds` rounds with the default 5% observation noise
    pub fn new(rounds: u32) -> Self {
        Self {
            rounds,
            noise: DEFAULT_NOISE,
        }
    }

    pub fn with_noise(mut self, noise: f64) -> Result<Self, ConfigError> {
        if !(0.0..=1.0).contains(&noise) {
            return Err(ConfigError::InvalidNoise(noise));
        }
        self.noise = noise;
        Ok(self)
    }

    pub fn noise(&self) -> f64 {
        self.noise
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ROUNDS)
    }
}

/// Upper bound on the trace space reserved before the first round.
const TRACE_RESERVE: usize = 1024;

/// A match in progress.
///
/// Owns both players' current-state cursors, the RNG and the trace; the
/// agents themselves are only borrowed. Once `rounds` records exist the
/// match is finished and `play_round` returns `None`.
#[derive(Debug)]
pub struct Match<'a> {
    player_a: Automaton<'a>,
    player_b: Automaton<'a>,
    noise: NoiseModel,
    rng: SeededRng,
    round_count: u32,
    rounds: Vec<RoundRecord>,
    total_a: u32,
    total_b: u32,
}

impl<'a> Match<'a> {
    pub fn new(agent_a: &'a Agent, agent_b: &'a Agent, config: &MatchConfig, rng: SeededRng) -> Self {
        Self {
            player_a: Automaton::new(agent_a),
            player_b: Automaton::new(agent_b),
            noise: NoiseModel::new(config.noise()),
            rng,
            round_count: config.rounds,
            rounds: Vec::with_capacity((config.rounds as usize).min(TRACE_RESERVE)),
            total_a: 0,
            total_b: 0,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.rounds.len() as u32 >= self.round_count
    }

    /// Current state of each player
    pub fn states(&self) -> (StateId, StateId) {
        (self.player_a.current(), self.player_b.current())
    }

    pub fn scores(&self) -> (u32, u32) {
        (self.total_a, self.total_b)
    }

    pub fn records(&self) -> &[RoundRecord] {
        &self.rounds
    }

    /// Play the next round, or return `None` once the match is over.
    pub fn play_round(&mut self) -> Option<&RoundRecord> {
        if self.is_finished() {
            return None;
        }
        let round = self.rounds.len() as u32 + 1;

        // Moves are chosen simultaneously
        let move_a = self.player_a.act(&mut self.rng);
        let move_b = self.player_b.act(&mut self.rng);

        // Payoffs come from true moves only
        let (score_a, score_b) = payoff(move_a, move_b);
        self.total_a += score_a as u32;
        self.total_b += score_b as u32;

        // One independent draw per observer
        let observed_a = self.noise.observe(move_b, &mut self.rng);
        let observed_b = self.noise.observe(move_a, &mut self.rng);

        self.player_a.transition(move_a, observed_a);
        self.player_b.transition(move_b, observed_b);

        tracing::debug!(
            round,
            %move_a,
            %move_b,
            %observed_a,
            %observed_b,
            score_a,
            score_b,
            state_a = self.player_a.current(),
            state_b = self.player_b.current(),
            "round played"
        );

        self.rounds.push(RoundRecord {
            round,
            move_a,
            move_b,
            observed_a,
            observed_b,
            score_a,
            score_b,
            cumulative_a: self.total_a,
            cumulative_b: self.total_b,
            state_a: self.player_a.current(),
            state_b: self.player_b.current(),
        });
        self.rounds.last()
    }

    /// Play any remaining rounds and hand back the trace
    pub fn finish(mut self) -> MatchResult {
        while self.play_round().is_some() {}

        MatchResult {
            round_count: self.rounds.len() as u32,
            rounds: self.rounds,
            total_score_a: self.total_a,
            total_score_b: self.total_b,
        }
    }
}

/// Run a complete match between two agents
///
/// # Arguments
/// * `agent_a` - Row player
/// * `agent_b` - Column player
/// * `config` - Round count and noise probability
/// * `rng` - Generator owned by this match; seed it for reproducible runs
///
/// # Returns
/// Complete match result with round-by-round details
pub fn run_match(agent_a: &Agent, agent_b: &Agent, config: &MatchConfig, rng: SeededRng) -> MatchResult {
    Match::new(agent_a, agent_b, config, rng).finish()
}
