//! Automaton definitions and execution

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::random::SeededRng;

/// Maximum number of states an agent may declare.
pub const MAX_STATES: usize = 5;

/// Index into an agent's state table.
pub type StateId = usize;

/// A move in the Prisoner's Dilemma
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Cooperate,
    Defect,
}

impl Move {
    /// The opposite move.
    pub fn flipped(self) -> Self {
        match self {
            Move::Cooperate => Move::Defect,
            Move::Defect => Move::Cooperate,
        }
    }

    /// Single-letter form used in traces: `C` or `D`.
    pub fn letter(self) -> char {
        match self {
            Move::Cooperate => 'C',
            Move::Defect => 'D',
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Move::Cooperate => "C",
            Move::Defect => "D",
        })
    }
}

/// Joint outcome as one agent perceives it.
///
/// First letter is the agent's own (true) move, second letter is the
/// opponent move it observed. Declaration order matches the column order
/// of the agent file format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    CC,
    CD,
    DC,
    DD,
}

impl Outcome {
    pub const ALL: [Outcome; 4] = [Outcome::CC, Outcome::CD, Outcome::DC, Outcome::DD];

    pub fn from_moves(own: Move, observed: Move) -> Self {
        match (own, observed) {
            (Move::Cooperate, Move::Cooperate) => Outcome::CC,
            (Move::Cooperate, Move::Defect) => Outcome::CD,
            (Move::Defect, Move::Cooperate) => Outcome::DC,
            (Move::Defect, Move::Defect) => Outcome::DD,
        }
    }

    /// Column index in a state's transition table.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn own(self) -> Move {
        match self {
            Outcome::CC | Outcome::CD => Move::Cooperate,
            Outcome::DC | Outcome::DD => Move::Defect,
        }
    }

    pub fn observed(self) -> Move {
        match self {
            Outcome::CC | Outcome::DC => Move::Cooperate,
            Outcome::CD | Outcome::DD => Move::Defect,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.own(), self.observed())
    }
}

/// One node of an agent automaton
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct State {
    pub id: StateId,
    /// Probability of cooperating while in this state, in [0, 1]
    pub cooperate_probability: f64,
    /// Next state per perceived outcome, indexed by `Outcome::index`
    pub transitions: [StateId; 4],
}

impl State {
    pub fn new(id: StateId, cooperate_probability: f64, transitions: [StateId; 4]) -> Self {
        Self {
            id,
            cooperate_probability,
            transitions,
        }
    }

    pub fn next(&self, outcome: Outcome) -> StateId {
        self.transitions[outcome.index()]
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [cc, cd, dc, dd] = self.transitions;
        write!(
            f,
            "{}: {} {} {} {} {}",
            self.id, self.cooperate_probability, cc, cd, dc, dd
        )
    }
}

/// A validated finite-state stochastic agent.
///
/// Structurally immutable. The current state lives in an [`Automaton`]
/// cursor, never in the agent, so one definition can drive any number of
/// matches at once.
#[derive(Clone, Debug, PartialEq)]
pub struct Agent {
    states: [State; MAX_STATES],
    len: usize,
}

impl Agent {
    /// Build an agent from states already checked by the parser.
    pub(crate) fn from_validated(states: &[State]) -> Self {
        debug_assert!(!states.is_empty() && states.len() <= MAX_STATES);
        let mut table = [State::default(); MAX_STATES];
        table[..states.len()].copy_from_slice(states);
        Self {
            states: table,
            len: states.len(),
        }
    }

    pub fn states(&self) -> &[State] {
        &self.states[..self.len]
    }

    pub fn state_count(&self) -> usize {
        self.len
    }

    /// # Panics
    ///
    /// Panics if `id` is not below `state_count()`.
    pub fn state(&self, id: StateId) -> &State {
        &self.states()[id]
    }

    /// Choose this round's move while in `state`.
    ///
    /// Probabilities of exactly 0 and 1 are decided without a draw.
    ///
    /// # Panics
    ///
    /// Panics if `state` is not below `state_count()`.
    pub fn act(&self, state: StateId, rng: &mut SeededRng) -> Move {
        if rng.chance(self.state(state).cooperate_probability) {
            Move::Cooperate
        } else {
            Move::Defect
        }
    }

    /// Target state after `own` was played and `observed` was seen.
    ///
    /// # Panics
    ///
    /// Panics if `state` is not below `state_count()`.
    pub fn transition(&self, state: StateId, own: Move, observed: Move) -> StateId {
        self.state(state).next(Outcome::from_moves(own, observed))
    }

    /// Render the agent back into the file format.
    pub fn to_agent_text(&self) -> String {
        self.states()
            .iter()
            .map(|s| format!("{}\n", s))
            .collect()
    }
}

/// Execution cursor over an [`Agent`]: the agent plus its current state.
#[derive(Clone, Debug)]
pub struct Automaton<'a> {
    agent: &'a Agent,
    current: StateId,
}

impl<'a> Automaton<'a> {
    /// Start at the entry state (state 0).
    pub fn new(agent: &'a Agent) -> Self {
        Self { agent, current: 0 }
    }

    pub fn agent(&self) -> &'a Agent {
        self.agent
    }

    pub fn current(&self) -> StateId {
        self.current
    }

    pub fn act(&self, rng: &mut SeededRng) -> Move {
        self.agent.act(self.current, rng)
    }

    /// Move to the next state and return the outcome that drove it.
    pub fn transition(&mut self, own: Move, observed: Move) -> Outcome {
        let outcome = Outcome::from_moves(own, observed);
        self.current = self.agent.state(self.current).next(outcome);
        outcome
    }

    pub fn reset(&mut self) {
        self.current = 0;
    }
}

/// Short human-readable summary of an agent's structure
pub fn describe_agent(agent: &Agent) -> String {
    let n = agent.state_count();
    let mut desc = format!("{} state{}.", n, if n == 1 { "" } else { "s" });

    for state in agent.states() {
        let p = state.cooperate_probability;
        let mode = if p >= 1.0 {
            "always cooperates".to_string()
        } else if p <= 0.0 {
            "always defects".to_string()
        } else {
            // Mixed states never read as 0% or 100%
            let percent = (p * 100.0).round().clamp(1.0, 99.0);
            format!("cooperates {:.0}% of the time", percent)
        };
        desc.push_str(&format!(" State {} {}.", state.id, mode));
    }

    desc
}
