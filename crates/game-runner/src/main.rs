//! Game Runner CLI
//!
//! Plays one iterated Prisoner's Dilemma match between two automaton agents
//! and prints the round-by-round trace.

use std::io::{self, Write};

use anyhow::Result;
use clap::Parser;
use noisy_match_logic::{Match, MatchConfig, SeededRng, DEFAULT_NOISE, DEFAULT_ROUNDS};
use tracing_subscriber::EnvFilter;

mod loader;
mod report;

use loader::load_agent;
use report::TraceHeader;

#[derive(Parser, Debug)]
#[command(name = "game_runner")]
#[command(about = "Run an iterated Prisoner's Dilemma match between two automaton agents", long_about = None)]
struct Cli {
    /// Agent file for player 1, or builtin:<name>
    agent_a: String,

    /// Agent file for player 2, or builtin:<name>
    agent_b: String,

    /// Number of rounds to play
    #[arg(default_value_t = DEFAULT_ROUNDS)]
    rounds: u32,

    /// Chance that a player misreads the opponent's move
    #[arg(long, env = "IPD_NOISE", default_value_t = DEFAULT_NOISE)]
    noise: f64,

    /// Seed for a reproducible run; drawn at random when omitted
    #[arg(long, env = "IPD_SEED")]
    seed: Option<u64>,

    /// Print the match result as JSON instead of a trace
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let stdout = io::stdout();
    run(&cli, &mut stdout.lock())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn run(cli: &Cli, out: &mut impl Write) -> Result<()> {
    let agent_a = load_agent(&cli.agent_a)?;
    let agent_b = load_agent(&cli.agent_b)?;
    let config = MatchConfig::new(cli.rounds).with_noise(cli.noise)?;
    let seed = cli.seed.unwrap_or_else(rand::random);

    tracing::info!(
        agent_a = %agent_a.name,
        agent_b = %agent_b.name,
        rounds = config.rounds,
        noise = config.noise(),
        seed,
        "starting match"
    );

    let mut game = Match::new(&agent_a.agent, &agent_b.agent, &config, SeededRng::from_u64(seed));

    if cli.json {
        let result = game.finish();
        serde_json::to_writer_pretty(&mut *out, &result)?;
        writeln!(out)?;
        return Ok(());
    }

    let header = TraceHeader {
        rounds: config.rounds,
        name_a: &agent_a.name,
        name_b: &agent_b.name,
        noise: config.noise(),
        seed,
    };
    report::write_header(out, &header)?;
    while let Some(record) = game.play_round() {
        report::write_round(out, record)?;
    }
    let result = game.finish();
    report::write_footer(out, &result)?;

    tracing::info!(
        score_a = result.total_score_a,
        score_b = result.total_score_b,
        "match finished"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use noisy_match_logic::MatchResult;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("game_runner").chain(args.iter().copied())).unwrap()
    }

    fn run_to_string(cli: &Cli) -> Result<String> {
        let mut out = Vec::new();
        run(cli, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn test_defaults() {
        let cli = cli(&["a.agent", "b.agent", "--noise", "0.05"]);
        assert_eq!(cli.rounds, 20);
        assert_eq!(cli.noise, 0.05);
        assert!(!cli.json);
    }

    #[test]
    fn test_trace_output() {
        let cli = cli(&[
            "builtin:tit_for_tat",
            "builtin:always_defect",
            "5",
            "--noise",
            "0",
            "--seed",
            "1",
        ]);
        let text = run_to_string(&cli).unwrap();

        assert!(text.contains("Agent 1: tit_for_tat"));
        assert!(text.contains("Agent 2: always_defect"));

        let rounds: Vec<Vec<&str>> = text
            .lines()
            .filter(|l| l.chars().next().is_some_and(|c| c.is_ascii_digit()))
            .map(|l| l.split_whitespace().collect())
            .collect();
        assert_eq!(rounds.len(), 5);
        assert_eq!(rounds[0], ["1", "C", "D", "D", "C", "(0,5)", "(0,5)", "(1,0)"]);
        assert_eq!(rounds[4], ["5", "D", "D", "D", "D", "(1,1)", "(4,9)", "(1,0)"]);

        assert!(text.contains("Final Score: Agent 1 = 4, Agent 2 = 9"));
    }

    #[test]
    fn test_json_output() {
        let cli = cli(&[
            "builtin:pavlov",
            "builtin:random",
            "12",
            "--seed",
            "3",
            "--json",
        ]);
        let text = run_to_string(&cli).unwrap();
        let result: MatchResult = serde_json::from_str(&text).unwrap();
        assert_eq!(result.round_count, 12);

        // Same seed, same match
        assert_eq!(run_to_string(&cli).unwrap(), text);
    }

    #[test]
    fn test_invalid_noise_fails() {
        let cli = cli(&["builtin:pavlov", "builtin:pavlov", "--noise", "2"]);
        let err = run_to_string(&cli).unwrap_err();
        assert!(err.to_string().contains("noise probability 2 must be in [0,1]"));
    }

    #[test]
    fn test_missing_agent_fails() {
        let cli = cli(&["missing.agent", "builtin:pavlov", "--noise", "0.05"]);
        assert!(run_to_string(&cli).is_err());
    }
}
