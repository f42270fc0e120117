use crate::error::EngineError;
use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::player::Seat;
use crate::model::suit::Suit;
use serde::{Deserialize, Serialize};

/// One round of card play under a fixed trump. Recording a play does no
/// legality checking; callers go through [`validate_play`] first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trick {
    trump: Suit,
    lead_suit: Option<Suit>,
    plays: Vec<Play>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Play {
    pub seat: Seat,
    pub card: Card,
}

/// Outcome of a finished trick, kept in the round's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrickResult {
    pub winner: Seat,
    pub plays: Vec<Play>,
    pub lead_suit: Suit,
    pub trump: Suit,
    /// The winning card is trump and trump was not led.
    pub was_trumped: bool,
}

impl Trick {
    pub fn new(trump: Suit) -> Self {
        Self {
            trump,
            lead_suit: None,
            plays: Vec::with_capacity(4),
        }
    }

    pub fn trump(&self) -> Suit {
        self.trump
    }

    /// Effective suit of the first card; fixed once set.
    pub fn lead_suit(&self) -> Option<Suit> {
        self.lead_suit
    }

    pub fn plays(&self) -> &[Play] {
        &self.plays
    }

    pub fn len(&self) -> usize {
        self.plays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plays.is_empty()
    }

    pub fn leader(&self) -> Option<Seat> {
        self.plays.first().map(|play| play.seat)
    }

    pub fn has_played(&self, seat: Seat) -> bool {
        self.plays.iter().any(|play| play.seat == seat)
    }

    /// `active_seats` is 4, or 3 while someone plays alone.
    pub fn is_complete(&self, active_seats: usize) -> bool {
        self.plays.len() >= active_seats
    }

    pub fn play(&mut self, seat: Seat, card: Card) {
        if self.plays.is_empty() {
            self.lead_suit = Some(card.effective_suit(self.trump));
        }
        self.plays.push(Play { seat, card });
    }

    pub fn winner(&self) -> Option<Seat> {
        self.winning_play().map(|play| play.seat)
    }

    pub fn winning_card(&self) -> Option<Card> {
        self.winning_play().map(|play| play.card)
    }

    /// Whether `card` would take the lead from the card currently winning.
    /// Anything beats an empty trick.
    pub fn can_beat(&self, card: Card) -> bool {
        match self.winning_card() {
            Some(best) => self.strength(card) > self.strength(best),
            None => true,
        }
    }

    pub fn result(&self) -> Option<TrickResult> {
        let winning = self.winning_play()?;
        let lead_suit = self.lead_suit?;
        Some(TrickResult {
            winner: winning.seat,
            plays: self.plays.clone(),
            lead_suit,
            trump: self.trump,
            was_trumped: winning.card.is_trump(self.trump) && lead_suit != self.trump,
        })
    }

    fn winning_play(&self) -> Option<Play> {
        let (first, rest) = self.plays.split_first()?;
        let mut best = *first;
        let mut best_strength = self.strength(first.card);
        for play in rest {
            let strength = self.strength(play.card);
            if strength > best_strength {
                best = *play;
                best_strength = strength;
            }
        }
        Some(best)
    }

    // Any trump beats any card of the lead suit, which beats everything else.
    // Cards that neither follow nor trump are worth nothing.
    fn strength(&self, card: Card) -> u16 {
        if card.is_trump(self.trump) {
            return 1000 + u16::from(card.trump_value(self.trump));
        }
        if Some(card.effective_suit(self.trump)) == self.lead_suit {
            return 100 + u16::from(card.off_suit_value());
        }
        0
    }
}

pub fn validate_play(hand: &Hand, card: Card, trick: &Trick) -> Result<(), EngineError> {
    if !hand.contains(card) {
        return Err(EngineError::CardNotInHand(card));
    }
    let Some(lead) = trick.lead_suit() else {
        return Ok(());
    };
    let trump = trick.trump();
    if hand.has_suit(lead, trump) && card.effective_suit(trump) != lead {
        return Err(EngineError::MustFollowSuit(lead));
    }
    Ok(())
}

pub fn legal_plays(hand: &Hand, trick: &Trick) -> Vec<Card> {
    if let Some(lead) = trick.lead_suit() {
        let following = hand.cards_of_suit(lead, trick.trump());
        if !following.is_empty() {
            return following;
        }
    }
    hand.cards().to_vec()
}
