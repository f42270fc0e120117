mod policy;
mod summary;

pub use policy::{FirstLegalPolicy, Policy, PolicyContext, RandomPolicy, spawn_policy};
pub use summary::SummaryCollector;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use euchre_core::error::EngineError;
use euchre_core::game::config::GameConfigError;
use euchre_core::game::state::Game;
use euchre_core::model::player::{Seat, Team};
use euchre_core::model::round::RoundResult;
use rand::{RngCore, SeedableRng, rngs::StdRng};
use serde::Serialize;
use thiserror::Error;
use tracing::{Level, event};

use crate::config::{PolicyKind, ResolvedOutputs, SimulationConfig};

/// A game that keeps misdealing this long is treated as stuck.
const MAX_ROUNDS_PER_GAME: u32 = 500;

/// Plays configured games seat by seat through the engine's public API.
pub struct SimulationRunner {
    config: SimulationConfig,
    outputs: ResolvedOutputs,
}

/// Summary details returned after a run.
pub struct RunSummary {
    pub games_played: usize,
    pub rounds_played: usize,
    pub rows_written: usize,
    pub jsonl_path: PathBuf,
    pub summary_path: PathBuf,
}

/// Everything recorded about one finished game.
pub struct GameOutcome {
    pub game_index: usize,
    pub seed: u64,
    pub winner: Team,
    pub scores: [u32; 2],
    pub rounds: Vec<RoundResult>,
    pub decisions: u32,
}

impl SimulationRunner {
    /// Build a runner from a validated configuration.
    pub fn new(config: SimulationConfig, outputs: ResolvedOutputs) -> Result<Self, RunnerError> {
        if config.seats.len() != Seat::LOOP.len() {
            return Err(RunnerError::SeatCount {
                found: config.seats.len(),
            });
        }
        Ok(Self { config, outputs })
    }

    /// Play every game, streaming one JSONL row per game to disk.
    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        ensure_parent(self.outputs.jsonl.parent())?;
        ensure_parent(self.outputs.summary_md.parent())?;

        let mut writer = BufWriter::new(File::create(&self.outputs.jsonl)?);
        let mut rng = StdRng::seed_from_u64(self.config.games.seed.unwrap_or(0));
        let mut summary = SummaryCollector::new(&self.config);
        let mut rows_written = 0usize;

        for game_index in 0..self.config.games.count {
            let game_seed = rng.next_u64();
            let outcome = self.play_game(game_index, game_seed)?;
            summary.record(&outcome);
            write_game_row(&mut writer, &self.config, &outcome)?;
            rows_written += 1;
        }

        writer.flush()?;
        summary.write_markdown(&self.outputs.summary_md)?;

        Ok(RunSummary {
            games_played: summary.games(),
            rounds_played: summary.rounds(),
            rows_written,
            jsonl_path: self.outputs.jsonl.clone(),
            summary_path: self.outputs.summary_md.clone(),
        })
    }

    fn play_game(&self, game_index: usize, seed: u64) -> Result<GameOutcome, RunnerError> {
        let mut game = Game::with_seed(self.config.games.game, seed)?;
        let mut policies: Vec<Box<dyn Policy>> = self
            .config
            .seats
            .iter()
            .zip(0u64..)
            .map(|(seat, offset)| spawn_policy(seat.kind, seed.wrapping_add(offset)))
            .collect();
        let mut decisions = 0u32;

        while !game.is_over() {
            if game.needs_new_round() {
                if game.round_number() >= MAX_ROUNDS_PER_GAME {
                    return Err(RunnerError::game(format!(
                        "game {game_index} (seed {seed}) still undecided after {MAX_ROUNDS_PER_GAME} rounds"
                    )));
                }
                game.start_round()?;
                continue;
            }

            let seat = game.current_player().ok_or_else(|| {
                RunnerError::game(format!("no seat to act in phase {}", game.phase()))
            })?;
            let legal = game.legal_actions();
            let ctx = PolicyContext {
                seat,
                legal: &legal,
            };
            let action = policies[seat.index()].choose(&ctx).ok_or_else(|| {
                RunnerError::game(format!("{seat} had no legal action in phase {}", game.phase()))
            })?;

            event!(
                target: "euchre_bench::action",
                Level::DEBUG,
                game_index = game_index as u64,
                round = game.round_number(),
                %action
            );
            let settled = game.round_history().len();
            game.apply_action(action)?;
            decisions += 1;

            if game.round_history().len() > settled
                && let Some(result) = game.round_history().last()
            {
                log_round(game_index, game.round_number(), result);
            }
        }

        let winner = game
            .winner()
            .ok_or_else(|| RunnerError::game("finished game has no winner".to_string()))?;
        event!(
            target: "euchre_bench::game",
            Level::INFO,
            game_index = game_index as u64,
            seed,
            winner = team_label(winner),
            rounds = game.round_number(),
            north_south = game.score(Team::NorthSouth),
            east_west = game.score(Team::EastWest)
        );

        Ok(GameOutcome {
            game_index,
            seed,
            winner,
            scores: [game.score(Team::NorthSouth), game.score(Team::EastWest)],
            rounds: game.round_history().to_vec(),
            decisions,
        })
    }
}

fn log_round(game_index: usize, round: u32, result: &RoundResult) {
    event!(
        target: "euchre_bench::round",
        Level::INFO,
        game_index = game_index as u64,
        round,
        makers = result.makers.map(team_label).unwrap_or("none"),
        maker_tricks = result.maker_tricks,
        euchred = result.euchred,
        alone = result.alone,
        maker_points = result.maker_points,
        defender_points = result.defender_points
    );
}

fn ensure_parent(path: Option<&Path>) -> Result<(), RunnerError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

fn write_game_row(
    writer: &mut BufWriter<File>,
    config: &SimulationConfig,
    outcome: &GameOutcome,
) -> Result<(), RunnerError> {
    let seating = Seat::LOOP
        .iter()
        .zip(&config.seats)
        .map(|(seat, cfg)| SeatSnapshot {
            seat: seat_label(*seat),
            name: cfg.name.clone(),
            policy: cfg.kind,
        })
        .collect();
    let scored = || outcome.rounds.iter().filter(|round| !round.is_misdeal());

    let row = GameLogRow {
        run_id: config.run_id.clone(),
        game_id: format!("G{:05}", outcome.game_index),
        game_index: outcome.game_index,
        game_seed: outcome.seed,
        winner: team_label(outcome.winner),
        north_south: outcome.scores[Team::NorthSouth.index()],
        east_west: outcome.scores[Team::EastWest.index()],
        rounds: outcome.rounds.len(),
        misdeals: outcome.rounds.len() - scored().count(),
        euchres: scored().filter(|round| round.euchred).count(),
        marches: scored().filter(|round| round.is_march()).count(),
        alone_calls: scored().filter(|round| round.alone).count(),
        decisions: outcome.decisions,
        seating,
    };

    serde_json::to_writer(&mut *writer, &row)?;
    writer.write_all(b"\n")?;
    Ok(())
}

pub(crate) fn team_label(team: Team) -> &'static str {
    match team {
        Team::NorthSouth => "north_south",
        Team::EastWest => "east_west",
    }
}

fn seat_label(seat: Seat) -> &'static str {
    match seat {
        Seat::North => "north",
        Seat::East => "east",
        Seat::South => "south",
        Seat::West => "west",
    }
}

#[derive(Serialize)]
struct SeatSnapshot {
    seat: &'static str,
    name: String,
    policy: PolicyKind,
}

#[derive(Serialize)]
struct GameLogRow {
    run_id: String,
    game_id: String,
    game_index: usize,
    game_seed: u64,
    winner: &'static str,
    north_south: u32,
    east_west: u32,
    rounds: usize,
    misdeals: usize,
    euchres: usize,
    marches: usize,
    alone_calls: usize,
    decisions: u32,
    seating: Vec<SeatSnapshot>,
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("failed to serialize log row: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
    #[error("engine rejected an action: {0}")]
    Engine(#[from] EngineError),
    #[error("invalid game settings: {0}")]
    Config(#[from] GameConfigError),
    #[error("game execution failed: {message}")]
    Game { message: String },
    #[error("configuration requires exactly 4 seats but found {found}")]
    SeatCount { found: usize },
}

impl RunnerError {
    fn game(message: String) -> Self {
        RunnerError::Game { message }
    }
}
