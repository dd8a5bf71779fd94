//! Human-readable match trace

use std::io::{self, Write};

use noisy_match_logic::{MatchResult, RoundRecord};

const RULE_WIDTH: usize = 70;

/// What the trace header shows about a match
#[derive(Clone, Debug)]
pub struct TraceHeader<'a> {
    pub rounds: u32,
    pub name_a: &'a str,
    pub name_b: &'a str,
    pub noise: f64,
    pub seed: u64,
}

pub fn write_header(out: &mut impl Write, header: &TraceHeader<'_>) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(
        out,
        "Starting game: {} rounds (noise {}, seed {})",
        header.rounds, header.noise, header.seed
    )?;
    writeln!(out, "Agent 1: {}", header.name_a)?;
    writeln!(out, "Agent 2: {}", header.name_b)?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(
        out,
        "{:<6} {:<8} {:<8} {:<7} {:<7} {:<12} {:<12} {:<10}",
        "Round", "A1 Move", "A2 Move", "A1 Obs", "A2 Obs", "Payoff", "Score", "States"
    )?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))
}

pub fn write_round(out: &mut impl Write, record: &RoundRecord) -> io::Result<()> {
    writeln!(
        out,
        "{:<6} {:<8} {:<8} {:<7} {:<7} {:<12} {:<12} {}",
        record.round,
        record.move_a,
        record.move_b,
        record.observed_a,
        record.observed_b,
        format!("({},{})", record.score_a, record.score_b),
        format!("({},{})", record.cumulative_a, record.cumulative_b),
        format!("({},{})", record.state_a, record.state_b),
    )
}

pub fn write_footer(out: &mut impl Write, result: &MatchResult) -> io::Result<()> {
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(
        out,
        "Final Score: Agent 1 = {}, Agent 2 = {}",
        result.total_score_a, result.total_score_b
    )?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))
}

#[cfg(test)]
mod tests {
    use super::*;
    use noisy_match_logic::Move;

    fn record() -> RoundRecord {
        RoundRecord {
            round: 1,
            move_a: Move::Cooperate,
            move_b: Move::Defect,
            observed_a: Move::Defect,
            observed_b: Move::Defect,
            score_a: 0,
            score_b: 5,
            cumulative_a: 0,
            cumulative_b: 5,
            state_a: 1,
            state_b: 0,
        }
    }

    #[test]
    fn test_round_line() {
        let mut out = Vec::new();
        write_round(&mut out, &record()).unwrap();
        let line = String::from_utf8(out).unwrap();

        let fields: Vec<&str> = line.split_whitespace().collect();
        assert_eq!(fields, ["1", "C", "D", "D", "D", "(0,5)", "(0,5)", "(1,0)"]);
        assert!(line.starts_with("1      C        D"));
    }

    #[test]
    fn test_header_names_agents() {
        let mut out = Vec::new();
        let header = TraceHeader {
            rounds: 20,
            name_a: "answer",
            name_b: "opponent",
            noise: 0.05,
            seed: 7,
        };
        write_header(&mut out, &header).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Starting game: 20 rounds (noise 0.05, seed 7)"));
        assert!(text.contains("Agent 1: answer"));
        assert!(text.contains("Agent 2: opponent"));
        assert!(text.contains("Round  A1 Move"));
    }

    #[test]
    fn test_footer_totals() {
        let result = MatchResult {
            rounds: vec![record()],
            total_score_a: 0,
            total_score_b: 5,
            round_count: 1,
        };
        let mut out = Vec::new();
        write_footer(&mut out, &result).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Final Score: Agent 1 = 0, Agent 2 = 5"));
    }
}
