use crate::error::EngineError;
use crate::game::config::{GameConfig, GameConfigError};
use crate::model::action::Action;
use crate::model::deck::Deck;
use crate::model::phase::Phase;
use crate::model::player::{Seat, Team};
use crate::model::round::{RoundResult, RoundState};
use crate::model::score::ScoreBoard;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

/// A sequence of rounds played to `config.target_score`. The dealer starts
/// at North and moves one seat clockwise after every round, misdeals
/// included.
#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    scores: ScoreBoard,
    dealer: Seat,
    round_number: u32,
    current_round: Option<RoundState>,
    round_history: Vec<RoundResult>,
    rng: StdRng,
    seed: u64,
}

impl Game {
    pub fn new(config: GameConfig) -> Result<Self, GameConfigError> {
        let seed: u64 = rand::random();
        Self::with_seed(config, seed)
    }

    /// Every shuffle of the game is drawn from one RNG seeded here, so equal
    /// seeds and equal action sequences replay identically.
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, GameConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            scores: ScoreBoard::new(),
            dealer: Seat::North,
            round_number: 0,
            current_round: None,
            round_history: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
            seed,
        })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn scores(&self) -> &ScoreBoard {
        &self.scores
    }

    pub fn score(&self, team: Team) -> u32 {
        self.scores.score(team)
    }

    /// Dealer of the current round, or of the next one once it has ended.
    pub fn dealer(&self) -> Seat {
        self.dealer
    }

    /// 1-based count of rounds dealt so far.
    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn round(&self) -> Option<&RoundState> {
        self.current_round.as_ref()
    }

    pub fn round_history(&self) -> &[RoundResult] {
        &self.round_history
    }

    pub fn is_over(&self) -> bool {
        self.winner().is_some()
    }

    pub fn winner(&self) -> Option<Team> {
        self.scores.reached(self.config.target_score)
    }

    /// True when no round is in progress and the game can continue.
    pub fn needs_new_round(&self) -> bool {
        !self.is_over()
            && self
                .current_round
                .as_ref()
                .is_none_or(RoundState::is_complete)
    }

    pub fn phase(&self) -> Phase {
        if self.is_over() {
            return Phase::GameEnd;
        }
        match self.current_round.as_ref() {
            Some(round) => round.phase(),
            None => Phase::Deal,
        }
    }

    pub fn current_player(&self) -> Option<Seat> {
        if self.is_over() {
            return None;
        }
        self.current_round
            .as_ref()
            .and_then(RoundState::current_player)
    }

    pub fn legal_actions(&self) -> Vec<Action> {
        if self.is_over() {
            return Vec::new();
        }
        self.current_round
            .as_ref()
            .map(RoundState::legal_actions)
            .unwrap_or_default()
    }

    /// Shuffles a fresh deck and deals the next round to the current dealer.
    pub fn start_round(&mut self) -> Result<(), EngineError> {
        if self.is_over() {
            return Err(EngineError::GameOver);
        }
        if !self.needs_new_round() {
            return Err(EngineError::RoundInProgress);
        }

        let deck = Deck::for_kind(self.config.deck);
        let round = RoundState::deal(self.dealer, deck, &mut self.rng)?;
        self.round_number += 1;
        debug!(round = self.round_number, dealer = %self.dealer, "starting round");
        self.current_round = Some(round);
        Ok(())
    }

    /// Forwards `action` to the current round and settles the score once the
    /// round ends. A rejected action leaves the game untouched.
    pub fn apply_action(&mut self, action: Action) -> Result<(), EngineError> {
        if self.is_over() {
            return Err(EngineError::GameOver);
        }
        let round = match self.current_round.as_mut() {
            Some(round) if !round.is_complete() => round,
            _ => return Err(EngineError::NoRoundInProgress),
        };

        round.apply_action(action)?;
        if let Some(result) = round.result() {
            self.settle_round(result);
        }
        Ok(())
    }

    fn settle_round(&mut self, result: RoundResult) {
        self.scores.apply(result.score_update());
        info!(
            round = self.round_number,
            dealer = %self.dealer,
            makers = ?result.makers,
            maker_tricks = result.maker_tricks,
            euchred = result.euchred,
            alone = result.alone,
            north_south = self.scores.score(Team::NorthSouth),
            east_west = self.scores.score(Team::EastWest),
            "round scored"
        );
        self.round_history.push(result);
        self.dealer = self.dealer.next();

        if let Some(winner) = self.winner() {
            info!(%winner, rounds = self.round_number, "game over");
        }
    }
}
