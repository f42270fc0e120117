use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use euchre_core::model::player::{Seat, Team};

use crate::config::SimulationConfig;
use crate::runner::{GameOutcome, team_label};

/// Aggregates finished games into the Markdown summary table.
pub struct SummaryCollector {
    target_score: u32,
    deck: String,
    seating: Vec<(Seat, String, String)>,
    games: usize,
    wins: [usize; 2],
    points: [u64; 2],
    rounds: usize,
    misdeals: usize,
    euchres: usize,
    marches: usize,
    alone_calls: usize,
    decisions: u64,
}

impl SummaryCollector {
    pub fn new(config: &SimulationConfig) -> Self {
        let seating = Seat::LOOP
            .iter()
            .zip(&config.seats)
            .map(|(seat, cfg)| (*seat, cfg.name.clone(), format!("{:?}", cfg.kind)))
            .collect();
        Self {
            target_score: config.games.game.target_score,
            deck: format!("{:?}", config.games.game.deck),
            seating,
            games: 0,
            wins: [0; 2],
            points: [0; 2],
            rounds: 0,
            misdeals: 0,
            euchres: 0,
            marches: 0,
            alone_calls: 0,
            decisions: 0,
        }
    }

    pub fn record(&mut self, outcome: &GameOutcome) {
        self.games += 1;
        self.wins[outcome.winner.index()] += 1;
        for team in Team::BOTH {
            self.points[team.index()] += u64::from(outcome.scores[team.index()]);
        }
        self.rounds += outcome.rounds.len();
        self.decisions += u64::from(outcome.decisions);
        for round in &outcome.rounds {
            if round.is_misdeal() {
                self.misdeals += 1;
                continue;
            }
            if round.euchred {
                self.euchres += 1;
            }
            if round.is_march() {
                self.marches += 1;
            }
            if round.alone {
                self.alone_calls += 1;
            }
        }
    }

    pub fn games(&self) -> usize {
        self.games
    }

    pub fn rounds(&self) -> usize {
        self.rounds
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("# Self-Play Summary\n\n");
        let _ = writeln!(
            out,
            "{} games to {} points with the {} deck\n",
            self.games, self.target_score, self.deck
        );

        out.push_str("| Seat | Name | Policy | Team | Wins | Win % | Avg points |\n");
        out.push_str("|------|------|--------|------|------|-------|------------|\n");
        for (seat, name, kind) in &self.seating {
            let team = seat.team();
            let _ = writeln!(
                out,
                "| {seat} | {name} | {kind} | {team} | {wins} | {win:.1}% | {avg:.2} |",
                team = team_label(team),
                wins = self.wins[team.index()],
                win = percent(self.wins[team.index()], self.games),
                avg = ratio(self.points[team.index()] as f64, self.games),
            );
        }

        out.push_str("\n| Rounds | Rounds/game | Misdeal % | Euchre % | March % | Alone % | Decisions/game |\n");
        out.push_str("|--------|-------------|-----------|----------|---------|---------|----------------|\n");
        let scored = self.rounds - self.misdeals;
        let _ = writeln!(
            out,
            "| {rounds} | {per_game:.2} | {misdeal:.1}% | {euchre:.1}% | {march:.1}% | {alone:.1}% | {decisions:.1} |",
            rounds = self.rounds,
            per_game = ratio(self.rounds as f64, self.games),
            misdeal = percent(self.misdeals, self.rounds),
            euchre = percent(self.euchres, scored),
            march = percent(self.marches, scored),
            alone = percent(self.alone_calls, scored),
            decisions = ratio(self.decisions as f64, self.games),
        );
        out
    }

    pub fn write_markdown(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        fs::write(path.as_ref(), self.render())
    }
}

fn ratio(total: f64, count: usize) -> f64 {
    if count == 0 { 0.0 } else { total / count as f64 }
}

fn percent(part: usize, whole: usize) -> f64 {
    ratio(part as f64 * 100.0, whole)
}
