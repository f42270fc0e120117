use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::fmt;
use serde::{Deserialize, Serialize};

/// A playing card. Suit membership for following and trumping is never
/// stored here: it depends on the trump in effect and is recomputed by
/// [`Card::effective_suit`] on every query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    /// Printed suit. `None` only for the Joker.
    pub suit: Option<Suit>,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self {
            rank,
            suit: Some(suit),
        }
    }

    pub const fn joker() -> Self {
        Self {
            rank: Rank::Joker,
            suit: None,
        }
    }

    pub const fn is_joker(self) -> bool {
        matches!(self.rank, Rank::Joker)
    }

    pub fn is_right_bower(self, trump: Suit) -> bool {
        self.rank == Rank::Jack && self.suit == Some(trump)
    }

    pub fn is_left_bower(self, trump: Suit) -> bool {
        match self.suit {
            Some(suit) => self.rank == Rank::Jack && suit != trump && suit.same_color(trump),
            None => false,
        }
    }

    pub fn is_bower(self, trump: Suit) -> bool {
        self.is_right_bower(trump) || self.is_left_bower(trump)
    }

    /// The suit this card counts as under `trump`. The left bower and the
    /// Joker both belong to trump; every other card keeps its printed suit.
    pub fn effective_suit(self, trump: Suit) -> Suit {
        if self.is_left_bower(trump) {
            return trump;
        }
        self.suit.unwrap_or(trump)
    }

    pub fn is_trump(self, trump: Suit) -> bool {
        self.effective_suit(trump) == trump
    }

    /// Strength among trump cards only; 0 when the card is not trump.
    pub fn trump_value(self, trump: Suit) -> u8 {
        if !self.is_trump(trump) {
            return 0;
        }
        if self.is_joker() {
            return 8;
        }
        if self.is_right_bower(trump) {
            return 7;
        }
        if self.is_left_bower(trump) {
            return 6;
        }
        match self.rank {
            Rank::Ace => 5,
            Rank::King => 4,
            Rank::Queen => 3,
            Rank::Ten => 2,
            Rank::Nine => 1,
            Rank::Jack | Rank::Joker => 0,
        }
    }

    /// Strength within a plain (non-trump) suit, independent of trump.
    pub fn off_suit_value(self) -> u8 {
        match self.rank {
            Rank::Ace => 6,
            Rank::King => 5,
            Rank::Queen => 4,
            Rank::Jack => 3,
            Rank::Ten => 2,
            Rank::Nine => 1,
            Rank::Joker => 0,
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.suit {
            Some(suit) => write!(f, "{}{}", self.rank, suit.symbol()),
            None => write!(f, "{}", self.rank),
        }
    }
}
