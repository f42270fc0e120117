use core::fmt;
use serde::{Deserialize, Serialize};

/// Where a deal stands. A round moves
/// `BidRound1 -> (Discard -> Play) | BidRound2 -> (Play | RoundEnd) -> RoundEnd`;
/// `Deal` and `GameEnd` are only ever reported by the game around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Deal,
    BidRound1,
    BidRound2,
    Discard,
    Play,
    RoundEnd,
    GameEnd,
}

impl Phase {
    pub const fn is_bidding(self) -> bool {
        matches!(self, Phase::BidRound1 | Phase::BidRound2)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Phase::Deal => "Deal",
            Phase::BidRound1 => "Bid Round 1",
            Phase::BidRound2 => "Bid Round 2",
            Phase::Discard => "Discard",
            Phase::Play => "Play",
            Phase::RoundEnd => "Round End",
            Phase::GameEnd => "Game End",
        };
        f.write_str(label)
    }
}
