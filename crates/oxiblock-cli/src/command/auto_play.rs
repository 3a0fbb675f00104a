use std::path::PathBuf;

use oxiblock_advisor::{
    move_advisor::{MoveAdvisor, SessionSummary},
    placement_evaluator::HeuristicPlacementEvaluator,
};
use oxiblock_engine::{GameSession, PieceSeed, SessionConfig, ShapeLibrary};
use rand::Rng as _;
use serde::Serialize;

use crate::util;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct AutoPlayArg {
    /// Number of sessions to play
    #[clap(long, default_value_t = 1)]
    pub(crate) games: usize,
    /// Stop a session after this many placements
    #[clap(long, default_value_t = 10_000)]
    max_turns: usize,
    /// Seed of the first session as 32 hex digits; later sessions use the
    /// following seeds. Random if omitted.
    #[clap(long, value_parser = util::parse_seed)]
    pub(crate) seed: Option<PieceSeed>,
    /// Session config file (JSON)
    #[clap(long)]
    config: Option<PathBuf>,
    /// Heuristic weights file (JSON)
    #[clap(long)]
    weights: Option<PathBuf>,
    /// Write the report to this file instead of stdout
    #[clap(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct AutoPlayReport {
    config: SessionConfig,
    sessions: Vec<SessionSummary>,
    aggregate: Aggregate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct Aggregate {
    games: usize,
    game_overs: usize,
    mean_score: f64,
    max_score: usize,
    mean_turns: f64,
    total_cleared_lines: usize,
}

impl Aggregate {
    #[expect(clippy::cast_precision_loss)]
    fn from_sessions(sessions: &[SessionSummary]) -> Self {
        let games = sessions.len();
        let mean = |sum: usize| {
            if games == 0 {
                0.0
            } else {
                sum as f64 / games as f64
            }
        };
        Self {
            games,
            game_overs: sessions.iter().filter(|s| s.game_over).count(),
            mean_score: mean(sessions.iter().map(|s| s.statistics.score).sum()),
            max_score: sessions
                .iter()
                .map(|s| s.statistics.score)
                .max()
                .unwrap_or(0),
            mean_turns: mean(sessions.iter().map(|s| s.turns).sum()),
            total_cleared_lines: sessions
                .iter()
                .map(|s| s.statistics.total_cleared_lines)
                .sum(),
        }
    }
}

pub(crate) fn run(arg: &AutoPlayArg) -> anyhow::Result<()> {
    let AutoPlayArg {
        games,
        max_turns,
        seed,
        config,
        weights,
        output,
    } = arg;

    let config = util::read_session_config(config.as_deref())?;
    let weights = util::read_weights(weights.as_deref())?;
    let advisor = MoveAdvisor::new(Box::new(HeuristicPlacementEvaluator::new(weights)));

    let report = play_games(&advisor, config, *games, *max_turns, *seed);
    eprintln!(
        "Played {} games: mean score {:.1}, max score {}",
        report.aggregate.games, report.aggregate.mean_score, report.aggregate.max_score
    );
    util::save_json(&report, output.as_deref())
}

fn play_games(
    advisor: &MoveAdvisor<'_>,
    config: SessionConfig,
    games: usize,
    max_turns: usize,
    first_seed: Option<PieceSeed>,
) -> AutoPlayReport {
    let sessions = (0..games)
        .map(|i| {
            let seed = first_seed.map_or_else(
                || rand::rng().random(),
                |seed| PieceSeed::from_u128(seed.to_u128().wrapping_add(i as u128)),
            );
            let mut session = GameSession::with_config(ShapeLibrary::standard(), config, seed);
            let summary = advisor.play_session(&mut session, max_turns);
            tracing::info!(
                game = i,
                seed = %seed.to_hex(),
                score = summary.statistics.score,
                turns = summary.turns,
                "session finished"
            );
            summary
        })
        .collect::<Vec<_>>();

    AutoPlayReport {
        config,
        aggregate: Aggregate::from_sessions(&sessions),
        sessions,
    }
}
