use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::Context as _;
use oxiblock_advisor::move_advisor::MoveAdvisor;
use oxiblock_engine::{BOARD_SIZE, GameSession, PieceSeed, ShapeLibrary};
use rand::Rng as _;

use crate::util::{self, BestScoreFile};

use self::input::PlayCommand;

mod input;

const HELP: &str = "\
commands:
  place <piece> <row> <col>   place a piece with its top-left offset at (row, col) (alias: p)
  hint                        suggest a move (alias: h)
  reset                       start a new game
  stats                       show statistics (alias: s)
  quit                        leave (alias: q)";

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ManualPlayArg {
    /// Piece seed as 32 hex digits; random if omitted
    #[clap(long, value_parser = util::parse_seed)]
    seed: Option<PieceSeed>,
    /// Session config file (JSON)
    #[clap(long)]
    config: Option<PathBuf>,
    /// File the best score is loaded from and saved to
    #[clap(long)]
    best_score_file: Option<PathBuf>,
}

pub(crate) fn run(arg: &ManualPlayArg) -> anyhow::Result<()> {
    let ManualPlayArg {
        seed,
        config,
        best_score_file,
    } = arg;

    let config = util::read_session_config(config.as_deref())?;
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    let best_score_file = best_score_file.clone().map(BestScoreFile::new);
    let best_score = match &best_score_file {
        Some(file) => file.load()?,
        None => 0,
    };

    let session = GameSession::with_config(ShapeLibrary::standard(), config, seed)
        .with_best_score(best_score);
    let mut game = ManualGame::new(session, best_score_file);
    game.run(io::stdin().lock(), io::stdout().lock())
}

struct ManualGame<'a> {
    session: GameSession,
    advisor: MoveAdvisor<'a>,
    best_score_file: Option<BestScoreFile>,
}

impl ManualGame<'_> {
    fn new(session: GameSession, best_score_file: Option<BestScoreFile>) -> Self {
        Self {
            session,
            advisor: MoveAdvisor::default(),
            best_score_file,
        }
    }

    fn run<R, W>(&mut self, input: R, mut out: W) -> anyhow::Result<()>
    where
        R: BufRead,
        W: Write,
    {
        writeln!(out, "seed: {}", self.session.seed().to_hex())?;
        writeln!(out, "type 'help' for commands")?;
        self.render(&mut out)?;
        prompt(&mut out)?;

        for line in input.lines() {
            let line = line.context("Failed to read command")?;
            if line.trim().is_empty() {
                prompt(&mut out)?;
                continue;
            }
            match line.parse::<PlayCommand>() {
                Ok(PlayCommand::Quit) => break,
                Ok(command) => self.execute(command, &mut out)?,
                Err(e) => writeln!(out, "error: {e}")?,
            }
            prompt(&mut out)?;
        }

        let stats = self.session.statistics();
        writeln!(
            out,
            "final score: {} (best {})",
            stats.score, stats.best_score
        )?;
        Ok(())
    }

    fn execute<W>(&mut self, command: PlayCommand, out: &mut W) -> anyhow::Result<()>
    where
        W: Write,
    {
        match command {
            PlayCommand::Place { piece, row, col } => {
                match self.session.try_place(piece, row, col) {
                    Ok(result) => {
                        write!(out, "+{} points", result.score_delta)?;
                        if result.lines_cleared > 0 {
                            write!(out, ", {} lines cleared", result.lines_cleared)?;
                        }
                        writeln!(out)?;
                        if let (Some(best), Some(file)) =
                            (result.new_best_score, &self.best_score_file)
                        {
                            file.store(best)?;
                        }
                        self.render(out)?;
                        if result.game_over {
                            writeln!(out, "game over! type 'reset' to play again")?;
                        }
                    }
                    Err(e) => writeln!(out, "rejected: {e}")?,
                }
            }
            PlayCommand::Hint => match self.advisor.suggest_for(&self.session) {
                Some(hint) => writeln!(
                    out,
                    "hint: place {} {} {} (score {}, confidence {:.0}%)",
                    hint.best.piece_index,
                    hint.best.row,
                    hint.best.col,
                    hint.best.score,
                    hint.confidence * 100.0
                )?,
                None => writeln!(out, "no piece fits anywhere")?,
            },
            PlayCommand::Reset => {
                self.session.reset();
                self.render(out)?;
            }
            PlayCommand::Stats => {
                let stats = serde_json::to_string(&self.session.statistics())?;
                writeln!(out, "{stats}")?;
            }
            PlayCommand::Help => writeln!(out, "{HELP}")?,
            PlayCommand::Quit => {}
        }
        Ok(())
    }

    fn render<W>(&self, out: &mut W) -> anyhow::Result<()>
    where
        W: Write,
    {
        let header = (0..BOARD_SIZE).map(|c| c.to_string()).collect::<String>();
        writeln!(out)?;
        writeln!(out, "  {header}")?;
        for (r, line) in self.session.board().to_string().lines().enumerate() {
            writeln!(out, "{r} {line}")?;
        }
        writeln!(out)?;

        for (i, piece) in self.session.pieces().iter().enumerate() {
            writeln!(out, "piece {i}:")?;
            for line in piece.shape().to_string().lines() {
                writeln!(out, "  {line}")?;
            }
        }

        let stats = self.session.statistics();
        let fill = MoveAdvisor::fill_ratio(self.session.board());
        writeln!(
            out,
            "score: {}  best: {}  combo: {}  filled: {:.0}%",
            stats.score,
            stats.best_score,
            stats.combo,
            fill * 100.0
        )?;
        Ok(())
    }
}

fn prompt<W>(out: &mut W) -> anyhow::Result<()>
where
    W: Write,
{
    write!(out, "> ")?;
    out.flush()?;
    Ok(())
}
