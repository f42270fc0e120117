use crate::model::card::Card;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Which pack a game is dealt from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeckKind {
    /// Nine through Ace in four suits, 24 cards.
    #[default]
    Standard,
    /// The standard pack plus one Joker, 25 cards.
    WithJoker,
}

impl DeckKind {
    pub const fn card_count(self) -> usize {
        match self {
            DeckKind::Standard => 24,
            DeckKind::WithJoker => 25,
        }
    }
}

/// Ordered pile of cards. The top of the deck is the end of the vector.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(DeckKind::WithJoker.card_count());
        for suit in Suit::ALL.iter().copied() {
            for rank in Rank::STANDARD.iter().copied() {
                cards.push(Card::new(rank, suit));
            }
        }
        Self { cards }
    }

    pub fn with_joker() -> Self {
        let mut deck = Self::standard();
        deck.cards.push(Card::joker());
        deck
    }

    pub fn for_kind(kind: DeckKind) -> Self {
        match kind {
            DeckKind::Standard => Self::standard(),
            DeckKind::WithJoker => Self::with_joker(),
        }
    }

    pub fn shuffled_with_seed(kind: DeckKind, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut deck = Self::for_kind(kind);
        deck.shuffle(&mut rng);
        deck
    }

    pub fn shuffle<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Removes up to `n` cards from the top. Returns fewer than `n` when the
    /// deck runs short; callers check the length.
    pub fn draw_n(&mut self, n: usize) -> Vec<Card> {
        let start = self.cards.len().saturating_sub(n);
        self.cards.split_off(start)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

#[cfg(test)]
mod tests {
    use super::{Deck, DeckKind};
    use crate::model::card::Card;
    use std::collections::HashSet;

    #[test]
    fn standard_deck_has_24_unique_cards() {
        let deck = Deck::standard();
        assert_eq!(deck.len(), DeckKind::Standard.card_count());
        let unique: HashSet<Card> = deck.cards().iter().copied().collect();
        assert_eq!(unique.len(), 24);
        assert!(!deck.cards().iter().any(|c| c.is_joker()));
    }

    #[test]
    fn joker_deck_adds_one_card() {
        let deck = Deck::for_kind(DeckKind::WithJoker);
        assert_eq!(deck.len(), 25);
        assert_eq!(deck.cards().iter().filter(|c| c.is_joker()).count(), 1);
    }

    #[test]
    fn draw_n_returns_short_when_deck_runs_out() {
        let mut deck = Deck::standard();
        let top = *deck.cards().last().unwrap();
        assert_eq!(deck.draw(), Some(top));
        assert_eq!(deck.draw_n(20).len(), 20);
        assert_eq!(deck.draw_n(10).len(), 3);
        assert!(deck.is_empty());
        assert!(deck.draw_n(2).is_empty());
        assert_eq!(deck.draw(), None);
    }

    #[test]
    fn shuffle_with_seed_is_deterministic() {
        let deck_a = Deck::shuffled_with_seed(DeckKind::Standard, 42);
        let deck_b = Deck::shuffled_with_seed(DeckKind::Standard, 42);
        assert_eq!(deck_a.cards(), deck_b.cards());
    }

    #[test]
    fn shuffle_with_different_seeds_differs() {
        let deck_a = Deck::shuffled_with_seed(DeckKind::Standard, 1);
        let deck_b = Deck::shuffled_with_seed(DeckKind::Standard, 2);
        assert_ne!(deck_a.cards(), deck_b.cards());
    }
}
