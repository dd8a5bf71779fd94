//! Built-in agents for the classic strategies, expressed as automata.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::strategy::{Agent, State};

/// Named built-in agent
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Preset {
    /// Always cooperate, never defect.
    AlwaysCooperate,
    /// Always defect, never cooperate.
    AlwaysDefect,
    /// Copy the opponent's last observed move. Start with cooperate.
    TitForTat,
    /// Tit-for-Tat but start with defect.
    SuspiciousTitForTat,
    /// Cooperate until a defection is observed, then always defect.
    GrimTrigger,
    /// Win-stay, lose-switch.
    Pavlov,
    /// Defect only after two observed defections in a row.
    TitForTwoTats,
    /// Coin flip every round.
    Random,
}

impl Preset {
    pub const ALL: [Preset; 8] = [
        Preset::AlwaysCooperate,
        Preset::AlwaysDefect,
        Preset::TitForTat,
        Preset::SuspiciousTitForTat,
        Preset::GrimTrigger,
        Preset::Pavlov,
        Preset::TitForTwoTats,
        Preset::Random,
    ];

    /// Identifier accepted by `FromStr`, e.g. `tit_for_tat`.
    pub fn name(self) -> &'static str {
        match self {
            Preset::AlwaysCooperate => "always_cooperate",
            Preset::AlwaysDefect => "always_defect",
            Preset::TitForTat => "tit_for_tat",
            Preset::SuspiciousTitForTat => "suspicious_tit_for_tat",
            Preset::GrimTrigger => "grim_trigger",
            Preset::Pavlov => "pavlov",
            Preset::TitForTwoTats => "tit_for_two_tats",
            Preset::Random => "random",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Preset::AlwaysCooperate => "Never defects. Always cooperates.",
            Preset::AlwaysDefect => "Never cooperates. Always defects.",
            Preset::TitForTat => "Copies opponent's last observed move. Starts by cooperating.",
            Preset::SuspiciousTitForTat => "Like Tit-for-Tat, but starts with defect.",
            Preset::GrimTrigger => "Cooperates until it sees a defection, then always defects.",
            Preset::Pavlov => "Repeats its move after CC or DC, switches after CD or DD.",
            Preset::TitForTwoTats => "Only retaliates after two consecutive observed defections.",
            Preset::Random => "Cooperates or defects with equal probability.",
        }
    }

    /// State table, in (cooperate probability, [cc, cd, dc, dd]) form.
    fn table(self) -> &'static [(f64, [usize; 4])] {
        match self {
            Preset::AlwaysCooperate => &[(1.0, [0, 0, 0, 0])],
            Preset::AlwaysDefect => &[(0.0, [0, 0, 0, 0])],
            Preset::TitForTat => &[(1.0, [0, 1, 0, 1]), (0.0, [0, 1, 0, 1])],
            // State 0 defects, state 1 cooperates
            Preset::SuspiciousTitForTat => &[(0.0, [1, 0, 1, 0]), (1.0, [1, 0, 1, 0])],
            Preset::GrimTrigger => &[(1.0, [0, 1, 0, 1]), (0.0, [1, 1, 1, 1])],
            // State 0 cooperates, state 1 defects
            Preset::Pavlov => &[(1.0, [0, 1, 1, 0]), (0.0, [0, 1, 1, 0])],
            Preset::TitForTwoTats => &[
                (1.0, [0, 1, 0, 1]),
                (1.0, [0, 2, 0, 2]),
                (0.0, [0, 2, 0, 2]),
            ],
            Preset::Random => &[(0.5, [0, 0, 0, 0])],
        }
    }

    pub fn agent(self) -> Agent {
        let states: Vec<State> = self
            .table()
            .iter()
            .enumerate()
            .map(|(id, &(p, transitions))| State::new(id, p, transitions))
            .collect();
        Agent::from_validated(&states)
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown preset name
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown built-in agent: {0}")]
pub struct UnknownPreset(pub String);

impl FromStr for Preset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        Preset::ALL
            .into_iter()
            .find(|p| p.name() == wanted)
            .ok_or_else(|| UnknownPreset(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_agent;
    use crate::strategy::Move;

    #[test]
    fn test_presets_survive_validation() {
        for preset in Preset::ALL {
            let agent = preset.agent();
            let reparsed = parse_agent(&agent.to_agent_text())
                .unwrap_or_else(|e| panic!("{} invalid: {}", preset, e));
            assert_eq!(reparsed, agent);
        }
    }

    #[test]
    fn test_preset_names_parse() {
        for preset in Preset::ALL {
            assert_eq!(preset.name().parse::<Preset>().unwrap(), preset);
        }
        assert_eq!("Tit-For-Tat".parse::<Preset>().unwrap(), Preset::TitForTat);
        assert!("nice_guy".parse::<Preset>().is_err());
    }

    #[test]
    fn test_tit_for_tat_matches_reference_text() {
        let reference = parse_agent("0: 1.0 0 1 0 1\n1: 0.0 0 1 0 1\n").unwrap();
        assert_eq!(Preset::TitForTat.agent(), reference);
    }

    #[test]
    fn test_grim_trigger_never_forgives() {
        let agent = Preset::GrimTrigger.agent();
        let after = agent.transition(0, Move::Cooperate, Move::Defect);
        assert_eq!(after, 1);
        for own in [Move::Cooperate, Move::Defect] {
            for seen in [Move::Cooperate, Move::Defect] {
                assert_eq!(agent.transition(1, own, seen), 1);
            }
        }
    }

    #[test]
    fn test_pavlov_win_stay_lose_switch() {
        let agent = Preset::Pavlov.agent();
        // CC: stay cooperating
        assert_eq!(agent.transition(0, Move::Cooperate, Move::Cooperate), 0);
        // CD: switch to defect
        assert_eq!(agent.transition(0, Move::Cooperate, Move::Defect), 1);
        // DC: stay defecting
        assert_eq!(agent.transition(1, Move::Defect, Move::Cooperate), 1);
        // DD: switch to cooperate
        assert_eq!(agent.transition(1, Move::Defect, Move::Defect), 0);
    }

    #[test]
    fn test_tit_for_two_tats() {
        let agent = Preset::TitForTwoTats.agent();
        let once = agent.transition(0, Move::Cooperate, Move::Defect);
        assert_eq!(agent.state(once).cooperate_probability, 1.0);
        let twice = agent.transition(once, Move::Cooperate, Move::Defect);
        assert_eq!(agent.state(twice).cooperate_probability, 0.0);
    }
}
