use crate::model::card::Card;
use crate::model::suit::Suit;
use std::cmp::{Ordering, Reverse};
use std::vec::Vec;

/// Cards held by one seat. Every suit query takes the trump in effect,
/// since the left bower changes suit with it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self {
            cards: Vec::with_capacity(6),
        }
    }

    pub fn with_cards(cards: Vec<Card>) -> Self {
        let mut hand = Self { cards };
        hand.sort();
        hand
    }

    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
        self.sort();
    }

    pub fn add_all(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.cards.extend(cards);
        self.sort();
    }

    /// Removes one copy of `card`. Returns false and leaves the hand alone
    /// when it is not held.
    pub fn remove(&mut self, card: Card) -> bool {
        if let Some(index) = self.cards.iter().position(|&c| c == card) {
            self.cards.remove(index);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    pub fn has_suit(&self, suit: Suit, trump: Suit) -> bool {
        self.cards.iter().any(|c| c.effective_suit(trump) == suit)
    }

    pub fn cards_of_suit(&self, suit: Suit, trump: Suit) -> Vec<Card> {
        self.cards
            .iter()
            .copied()
            .filter(|c| c.effective_suit(trump) == suit)
            .collect()
    }

    pub fn trumps(&self, trump: Suit) -> Vec<Card> {
        self.cards_of_suit(trump, trump)
    }

    pub fn count_trumps(&self, trump: Suit) -> usize {
        self.cards.iter().filter(|c| c.is_trump(trump)).count()
    }

    pub fn highest_trump(&self, trump: Suit) -> Option<Card> {
        self.cards
            .iter()
            .copied()
            .filter(|c| c.is_trump(trump))
            .max_by_key(|c| c.trump_value(trump))
    }

    /// Display order once trump is known: trumps first from the strongest
    /// down, then the plain suits grouped together with high cards first.
    pub fn sort_by_trump(&mut self, trump: Suit) {
        self.cards.sort_by(|a, b| match (a.is_trump(trump), b.is_trump(trump)) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (true, true) => b.trump_value(trump).cmp(&a.trump_value(trump)),
            (false, false) => a.suit.cmp(&b.suit).then(b.rank.cmp(&a.rank)),
        });
    }

    fn sort(&mut self) {
        self.cards.sort_by_key(|c| (c.suit, Reverse(c.rank)));
    }
}
