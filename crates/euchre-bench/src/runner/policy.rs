use euchre_core::model::action::Action;
use euchre_core::model::player::Seat;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::trace;

use crate::config::PolicyKind;

/// What a seat sees when asked to act.
pub struct PolicyContext<'a> {
    pub seat: Seat,
    /// Never empty while the game wants a decision.
    pub legal: &'a [Action],
}

/// Picks one of the engine's legal actions. Policies never build actions of
/// their own, so anything they return is accepted by `apply_action`.
pub trait Policy: Send {
    fn choose(&mut self, ctx: &PolicyContext<'_>) -> Option<Action>;
}

pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn choose(&mut self, ctx: &PolicyContext<'_>) -> Option<Action> {
        let choice = ctx.legal.choose(&mut self.rng).copied();
        trace!(seat = %ctx.seat, options = ctx.legal.len(), ?choice, "random pick");
        choice
    }
}

/// Always takes the first action offered: passes whenever passing is legal
/// and otherwise plays the first card in hand order.
pub struct FirstLegalPolicy;

impl Policy for FirstLegalPolicy {
    fn choose(&mut self, ctx: &PolicyContext<'_>) -> Option<Action> {
        let choice = ctx.legal.first().copied();
        trace!(seat = %ctx.seat, ?choice, "first legal pick");
        choice
    }
}

pub fn spawn_policy(kind: PolicyKind, seed: u64) -> Box<dyn Policy> {
    match kind {
        PolicyKind::Random => Box::new(RandomPolicy::new(seed)),
        PolicyKind::FirstLegal => Box::new(FirstLegalPolicy),
    }
}
