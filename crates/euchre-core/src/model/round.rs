use crate::error::{EngineError, InvariantViolation};
use crate::model::action::{Action, ActionKind};
use crate::model::card::Card;
use crate::model::deck::Deck;
use crate::model::hand::Hand;
use crate::model::phase::Phase;
use crate::model::player::{Seat, Team};
use crate::model::score::ScoreUpdate;
use crate::model::suit::Suit;
use crate::model::trick::{Trick, TrickResult, legal_plays, validate_play};
use serde::{Deserialize, Serialize};
use std::{array, iter};
use tracing::{debug, error};

pub const HAND_SIZE: usize = 5;
pub const TRICKS_PER_ROUND: usize = 5;

/// One deal: bidding, the dealer's discard, and five tricks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundState {
    dealer: Seat,
    phase: Phase,
    bid_round: u8,
    bidder: Seat,
    hands: [Hand; 4],
    turned_card: Card,
    undealt: Vec<Card>,
    trump: Option<Suit>,
    maker: Option<Seat>,
    alone: bool,
    current_trick: Option<Trick>,
    tricks_won: [u8; 4],
    trick_history: Vec<TrickResult>,
}

/// Scoring summary of a finished round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    /// `None` when every seat passed twice.
    pub maker: Option<Seat>,
    pub makers: Option<Team>,
    pub maker_tricks: u8,
    pub defender_tricks: u8,
    pub alone: bool,
    pub euchred: bool,
    pub maker_points: u32,
    pub defender_points: u32,
}

impl RoundResult {
    fn misdeal() -> Self {
        Self {
            maker: None,
            makers: None,
            maker_tricks: 0,
            defender_tricks: 0,
            alone: false,
            euchred: false,
            maker_points: 0,
            defender_points: 0,
        }
    }

    fn scored(maker: Seat, maker_tricks: u8, defender_tricks: u8, alone: bool) -> Self {
        let euchred = maker_tricks < 3;
        let (maker_points, defender_points) = if euchred {
            (0, 2)
        } else if usize::from(maker_tricks) == TRICKS_PER_ROUND {
            (if alone { 4 } else { 2 }, 0)
        } else {
            (1, 0)
        };
        Self {
            maker: Some(maker),
            makers: Some(maker.team()),
            maker_tricks,
            defender_tricks,
            alone,
            euchred,
            maker_points,
            defender_points,
        }
    }

    pub fn is_misdeal(&self) -> bool {
        self.maker.is_none()
    }

    pub fn is_march(&self) -> bool {
        usize::from(self.maker_tricks) == TRICKS_PER_ROUND
    }

    pub fn score_update(&self) -> ScoreUpdate {
        match self.makers {
            Some(team) if self.euchred => ScoreUpdate::award(team.other(), self.defender_points),
            Some(team) => ScoreUpdate::award(team, self.maker_points),
            None => ScoreUpdate::none(),
        }
    }
}

impl RoundState {
    /// Shuffles `deck` and deals three then two cards to each seat, starting
    /// left of the dealer, then turns up the next card.
    pub fn deal<R: rand::Rng + ?Sized>(
        dealer: Seat,
        mut deck: Deck,
        rng: &mut R,
    ) -> Result<Self, EngineError> {
        deck.shuffle(rng);
        let mut hands: [Hand; 4] = array::from_fn(|_| Hand::new());

        for packet in [3, 2] {
            let mut seat = dealer.next();
            for _ in 0..Seat::LOOP.len() {
                let cards = deck.draw_n(packet);
                if cards.len() != packet {
                    return Err(violation(InvariantViolation::ShortDeck {
                        needed: packet,
                        available: cards.len(),
                    }));
                }
                hands[seat.index()].add_all(cards);
                seat = seat.next();
            }
        }

        let turned_card = deck.draw().ok_or_else(|| {
            violation(InvariantViolation::ShortDeck {
                needed: 1,
                available: 0,
            })
        })?;

        debug!(%dealer, %turned_card, undealt = deck.len(), "dealt round");
        let mut round = Self::from_hands(dealer, hands, turned_card);
        round.undealt = deck.cards().to_vec();
        Ok(round)
    }

    /// A round that has just been dealt `hands`, waiting on the first bid.
    pub fn from_hands(dealer: Seat, hands: [Hand; 4], turned_card: Card) -> Self {
        Self {
            dealer,
            phase: Phase::BidRound1,
            bid_round: 1,
            bidder: dealer.next(),
            hands,
            turned_card,
            undealt: Vec::new(),
            trump: None,
            maker: None,
            alone: false,
            current_trick: None,
            tricks_won: [0; 4],
            trick_history: Vec::with_capacity(TRICKS_PER_ROUND),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn dealer(&self) -> Seat {
        self.dealer
    }

    /// 1 until every seat has passed once, then 2.
    pub fn bid_round(&self) -> u8 {
        self.bid_round
    }

    pub fn trump(&self) -> Option<Suit> {
        self.trump
    }

    pub fn turned_card(&self) -> Card {
        self.turned_card
    }

    pub fn undealt(&self) -> &[Card] {
        &self.undealt
    }

    pub fn maker(&self) -> Option<Seat> {
        self.maker
    }

    pub fn makers(&self) -> Option<Team> {
        self.maker.map(Seat::team)
    }

    pub fn is_alone(&self) -> bool {
        self.alone
    }

    /// The lone maker's partner, who takes no part in the tricks.
    pub fn sitting_out(&self) -> Option<Seat> {
        if self.alone {
            self.maker.map(Seat::partner)
        } else {
            None
        }
    }

    pub fn is_sitting_out(&self, seat: Seat) -> bool {
        self.sitting_out() == Some(seat)
    }

    pub fn hand(&self, seat: Seat) -> &Hand {
        &self.hands[seat.index()]
    }

    pub fn hands(&self) -> &[Hand; 4] {
        &self.hands
    }

    pub fn tricks_won(&self, seat: Seat) -> u8 {
        self.tricks_won[seat.index()]
    }

    pub fn team_tricks(&self, team: Team) -> u8 {
        team.seats().iter().map(|seat| self.tricks_won(*seat)).sum()
    }

    pub fn current_trick(&self) -> Option<&Trick> {
        self.current_trick.as_ref()
    }

    pub fn trick_history(&self) -> &[TrickResult] {
        &self.trick_history
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::RoundEnd
    }

    /// Whose move it is, derived from bidding, trick and dealer state on
    /// every call. `None` once the round has ended.
    pub fn current_player(&self) -> Option<Seat> {
        match self.phase {
            Phase::BidRound1 | Phase::BidRound2 => Some(self.bidder),
            Phase::Discard => Some(self.dealer),
            Phase::Play => Some(self.next_to_play()),
            Phase::Deal | Phase::RoundEnd | Phase::GameEnd => None,
        }
    }

    fn active_seats(&self) -> usize {
        if self.alone { 3 } else { 4 }
    }

    fn first_active_from(&self, start: Seat, taken: impl Fn(Seat) -> bool) -> Option<Seat> {
        iter::successors(Some(start), |seat| Some(seat.next()))
            .take(Seat::LOOP.len())
            .find(|&seat| !self.is_sitting_out(seat) && !taken(seat))
    }

    fn next_to_play(&self) -> Seat {
        let opening = self.dealer.next();
        let trick = match self.current_trick.as_ref() {
            Some(trick) if !trick.is_empty() => trick,
            _ => {
                return match self.trick_history.last() {
                    Some(previous) => previous.winner,
                    None => self.first_active_from(opening, |_| false).unwrap_or(opening),
                };
            }
        };
        let leader = trick.leader().unwrap_or(opening);
        self.first_active_from(leader, |seat| trick.has_played(seat))
            .unwrap_or(leader)
    }

    /// Every action the current player may submit right now. Never lists an
    /// action for any other seat.
    pub fn legal_actions(&self) -> Vec<Action> {
        let Some(seat) = self.current_player() else {
            return Vec::new();
        };
        let turned_suit = self.turned_card.suit;
        let mut actions = Vec::new();

        match self.phase {
            Phase::BidRound1 => {
                actions.push(Action::Pass { seat });
                if turned_suit.is_some() {
                    for alone in [false, true] {
                        actions.push(Action::OrderUp { seat, alone });
                    }
                }
            }
            Phase::BidRound2 => {
                actions.push(Action::Pass { seat });
                for suit in Suit::ALL.iter().copied() {
                    if Some(suit) == turned_suit {
                        continue;
                    }
                    for alone in [false, true] {
                        actions.push(Action::CallTrump { seat, suit, alone });
                    }
                }
            }
            Phase::Discard => {
                actions.extend(
                    self.hand(seat)
                        .iter()
                        .map(|&card| Action::Discard { seat, card }),
                );
            }
            Phase::Play => {
                if let Some(trick) = self.current_trick.as_ref() {
                    actions.extend(
                        legal_plays(self.hand(seat), trick)
                            .into_iter()
                            .map(|card| Action::PlayCard { seat, card }),
                    );
                }
            }
            Phase::Deal | Phase::RoundEnd | Phase::GameEnd => {}
        }

        actions
    }

    /// Applies `action` or rejects it without touching any state.
    pub fn apply_action(&mut self, action: Action) -> Result<(), EngineError> {
        match action {
            Action::Pass { seat } => self.pass(seat),
            Action::OrderUp { seat, alone } => self.order_up(seat, alone),
            Action::CallTrump { seat, suit, alone } => self.call_trump(seat, suit, alone),
            Action::Discard { seat, card } => self.discard(seat, card),
            Action::PlayCard { seat, card } => self.play_card(seat, card),
        }
    }

    pub fn result(&self) -> Option<RoundResult> {
        if !self.is_complete() {
            return None;
        }
        let result = match self.maker {
            Some(maker) => RoundResult::scored(
                maker,
                self.team_tricks(maker.team()),
                self.team_tricks(maker.team().other()),
                self.alone,
            ),
            None => RoundResult::misdeal(),
        };
        Some(result)
    }

    fn expect_phase(&self, action: ActionKind, allowed: &[Phase]) -> Result<(), EngineError> {
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            Err(EngineError::WrongPhase {
                action,
                phase: self.phase,
            })
        }
    }

    fn expect_turn(expected: Seat, actual: Seat) -> Result<(), EngineError> {
        if expected == actual {
            Ok(())
        } else {
            Err(EngineError::NotYourTurn { expected, actual })
        }
    }

    fn check_hand_sizes(&self, dealer_size: usize) -> Result<(), EngineError> {
        for seat in Seat::LOOP {
            let expected = if seat == self.dealer {
                dealer_size
            } else {
                HAND_SIZE
            };
            let actual = self.hand(seat).len();
            if actual != expected {
                return Err(violation(InvariantViolation::HandSize {
                    seat,
                    expected,
                    actual,
                }));
            }
        }
        Ok(())
    }

    fn pass(&mut self, seat: Seat) -> Result<(), EngineError> {
        self.expect_phase(ActionKind::Pass, &[Phase::BidRound1, Phase::BidRound2])?;
        Self::expect_turn(self.bidder, seat)?;

        debug!(%seat, round = self.bid_round, "pass");
        self.bidder = self.bidder.next();
        if self.bidder == self.dealer.next() {
            if self.phase == Phase::BidRound1 {
                self.phase = Phase::BidRound2;
                self.bid_round = 2;
            } else {
                debug!(dealer = %self.dealer, "all seats passed twice, misdeal");
                self.phase = Phase::RoundEnd;
            }
        }
        Ok(())
    }

    fn order_up(&mut self, seat: Seat, alone: bool) -> Result<(), EngineError> {
        self.expect_phase(ActionKind::OrderUp, &[Phase::BidRound1])?;
        Self::expect_turn(self.bidder, seat)?;
        let trump = self.turned_card.suit.ok_or(EngineError::NoTurnedSuit)?;
        self.check_hand_sizes(HAND_SIZE)?;

        debug!(%seat, %trump, alone, "ordered up");
        self.trump = Some(trump);
        self.maker = Some(seat);
        self.alone = alone;
        self.hands[self.dealer.index()].add(self.turned_card);
        self.phase = Phase::Discard;
        Ok(())
    }

    fn call_trump(&mut self, seat: Seat, suit: Suit, alone: bool) -> Result<(), EngineError> {
        self.expect_phase(ActionKind::CallTrump, &[Phase::BidRound2])?;
        Self::expect_turn(self.bidder, seat)?;
        if self.turned_card.suit == Some(suit) {
            return Err(EngineError::TurnedSuitRejected(suit));
        }
        self.check_hand_sizes(HAND_SIZE)?;

        debug!(%seat, trump = %suit, alone, "called trump");
        self.maker = Some(seat);
        self.alone = alone;
        self.start_play(suit);
        Ok(())
    }

    fn discard(&mut self, seat: Seat, card: Card) -> Result<(), EngineError> {
        self.expect_phase(ActionKind::Discard, &[Phase::Discard])?;
        Self::expect_turn(self.dealer, seat)?;
        if !self.hand(seat).contains(card) {
            return Err(EngineError::CardNotInHand(card));
        }
        let trump = self.trump.ok_or(EngineError::WrongPhase {
            action: ActionKind::Discard,
            phase: self.phase,
        })?;
        // Removing one card must leave every hand at exactly five.
        self.check_hand_sizes(HAND_SIZE + 1)?;

        debug!(%seat, %card, "dealer discarded");
        self.hands[seat.index()].remove(card);
        self.start_play(trump);
        Ok(())
    }

    fn start_play(&mut self, trump: Suit) {
        self.trump = Some(trump);
        self.current_trick = Some(Trick::new(trump));
        self.phase = Phase::Play;
    }

    fn play_card(&mut self, seat: Seat, card: Card) -> Result<(), EngineError> {
        self.expect_phase(ActionKind::PlayCard, &[Phase::Play])?;
        Self::expect_turn(self.next_to_play(), seat)?;

        let expected = HAND_SIZE - self.trick_history.len();
        let actual = self.hand(seat).len();
        if actual != expected {
            return Err(violation(InvariantViolation::HandSize {
                seat,
                expected,
                actual,
            }));
        }

        let active = self.active_seats();
        let hand = &mut self.hands[seat.index()];
        let Some(trick) = self.current_trick.as_mut() else {
            return Err(EngineError::WrongPhase {
                action: ActionKind::PlayCard,
                phase: self.phase,
            });
        };
        validate_play(hand, card, trick)?;

        hand.remove(card);
        trick.play(seat, card);
        let finished = if trick.is_complete(active) {
            trick.result()
        } else {
            None
        };

        if let Some(result) = finished {
            self.finish_trick(result);
        }
        Ok(())
    }

    fn finish_trick(&mut self, result: TrickResult) {
        let winner = result.winner;
        self.tricks_won[winner.index()] += 1;
        debug!(
            %winner,
            trick = self.trick_history.len() + 1,
            was_trumped = result.was_trumped,
            "trick complete"
        );
        self.trick_history.push(result);

        if self.trick_history.len() >= TRICKS_PER_ROUND {
            self.current_trick = None;
            self.phase = Phase::RoundEnd;
            debug!(
                makers = ?self.makers(),
                maker_tricks = ?self.makers().map(|team| self.team_tricks(team)),
                "round complete"
            );
        } else if let Some(trump) = self.trump {
            self.current_trick = Some(Trick::new(trump));
        }
    }
}

fn violation(violation: InvariantViolation) -> EngineError {
    error!(%violation, "engine invariant violated");
    EngineError::Invariant(violation)
}

#[cfg(test)]
mod tests {
    use super::{HAND_SIZE, RoundState};
    use crate::error::{EngineError, InvariantViolation};
    use crate::model::action::{Action, ActionKind};
    use crate::model::card::Card;
    use crate::model::deck::{Deck, DeckKind};
    use crate::model::hand::Hand;
    use crate::model::phase::Phase;
    use crate::model::player::{Seat, Team};
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn suit_hand(suit: Suit, ranks: [Rank; 5]) -> Hand {
        Hand::with_cards(ranks.iter().map(|&rank| Card::new(rank, suit)).collect())
    }

    // East holds five hearts and nobody else holds any; the jack of spades
    // is turned up with North dealing.
    fn one_suit_each() -> RoundState {
        let low = [Rank::Nine, Rank::Ten, Rank::Queen, Rank::King, Rank::Ace];
        let hands = [
            suit_hand(Suit::Diamonds, low),
            suit_hand(
                Suit::Hearts,
                [Rank::Jack, Rank::Ace, Rank::King, Rank::Queen, Rank::Ten],
            ),
            suit_hand(Suit::Spades, low),
            suit_hand(Suit::Clubs, low),
        ];
        RoundState::from_hands(Seat::North, hands, Card::new(Rank::Jack, Suit::Spades))
    }

    fn pass_around(round: &mut RoundState) {
        for _ in 0..4 {
            let seat = round.current_player().unwrap();
            round.apply_action(Action::Pass { seat }).unwrap();
        }
    }

    fn play_out(round: &mut RoundState) {
        while let Some(action) = round.legal_actions().first().copied() {
            round.apply_action(action).unwrap();
        }
    }

    #[test]
    fn dealing_gives_five_cards_and_turns_one() {
        let mut rng = StdRng::seed_from_u64(7);
        let round = RoundState::deal(Seat::West, Deck::standard(), &mut rng).unwrap();

        for seat in Seat::LOOP {
            assert_eq!(round.hand(seat).len(), HAND_SIZE, "{seat} should have 5 cards");
        }
        assert_eq!(round.undealt().len(), 3);
        assert_eq!(round.phase(), Phase::BidRound1);
        assert_eq!(round.current_player(), Some(Seat::North));
        assert_eq!(round.trump(), None);
        assert_eq!(round.maker(), None);
    }

    #[test]
    fn dealing_conserves_every_card() {
        for kind in [DeckKind::Standard, DeckKind::WithJoker] {
            let mut rng = StdRng::seed_from_u64(99);
            let round = RoundState::deal(Seat::North, Deck::for_kind(kind), &mut rng).unwrap();
            let mut seen = HashSet::new();
            for hand in round.hands() {
                seen.extend(hand.iter().copied());
            }
            seen.insert(round.turned_card());
            seen.extend(round.undealt().iter().copied());
            assert_eq!(seen.len(), kind.card_count());
        }
    }

    #[test]
    fn short_deck_is_an_invariant_violation() {
        let mut deck = Deck::standard();
        deck.draw_n(6);
        let mut rng = StdRng::seed_from_u64(1);
        let err = RoundState::deal(Seat::North, deck, &mut rng).unwrap_err();
        assert!(err.is_fatal());
        assert!(matches!(
            err,
            EngineError::Invariant(InvariantViolation::ShortDeck { .. })
        ));
    }

    fn assert_hand_size_violation(
        round: &mut RoundState,
        action: Action,
        seat: Seat,
        expected: usize,
        actual: usize,
    ) {
        let before = round.clone();
        let err = round.apply_action(action).unwrap_err();
        assert!(err.is_fatal(), "{action} should be fatal");
        assert_eq!(
            err,
            EngineError::Invariant(InvariantViolation::HandSize {
                seat,
                expected,
                actual,
            })
        );
        assert_eq!(*round, before, "{action} must not mutate the round");
    }

    #[test]
    fn short_hand_blocks_bidding() {
        let dealt = one_suit_each();
        let mut hands = dealt.hands().clone();
        hands[Seat::South.index()].remove(Card::new(Rank::Ace, Suit::Spades));
        let mut round = RoundState::from_hands(Seat::North, hands, dealt.turned_card());

        assert_hand_size_violation(
            &mut round,
            Action::OrderUp {
                seat: Seat::East,
                alone: false,
            },
            Seat::South,
            HAND_SIZE,
            4,
        );

        // Passing moves no cards, so it is not checked.
        pass_around(&mut round);
        assert_hand_size_violation(
            &mut round,
            Action::CallTrump {
                seat: Seat::East,
                suit: Suit::Hearts,
                alone: true,
            },
            Seat::South,
            HAND_SIZE,
            4,
        );
    }

    #[test]
    fn dealer_without_the_turned_card_cannot_discard() {
        let mut round = one_suit_each();
        round
            .apply_action(Action::OrderUp {
                seat: Seat::East,
                alone: false,
            })
            .unwrap();
        let turned = round.turned_card();
        round.hands[Seat::North.index()].remove(turned);

        assert_hand_size_violation(
            &mut round,
            Action::Discard {
                seat: Seat::North,
                card: Card::new(Rank::Nine, Suit::Diamonds),
            },
            Seat::North,
            HAND_SIZE + 1,
            HAND_SIZE,
        );
    }

    #[test]
    fn short_hand_blocks_play() {
        let mut round = one_suit_each();
        pass_around(&mut round);
        round
            .apply_action(Action::CallTrump {
                seat: Seat::East,
                suit: Suit::Hearts,
                alone: false,
            })
            .unwrap();
        round.hands[Seat::East.index()].remove(Card::new(Rank::Ten, Suit::Hearts));

        assert_hand_size_violation(
            &mut round,
            Action::PlayCard {
                seat: Seat::East,
                card: Card::new(Rank::Ace, Suit::Hearts),
            },
            Seat::East,
            HAND_SIZE,
            4,
        );
    }

    #[test]
    fn four_passes_open_second_round() {
        let mut round = one_suit_each();
        pass_around(&mut round);
        assert_eq!(round.phase(), Phase::BidRound2);
        assert_eq!(round.bid_round(), 2);
        assert_eq!(round.current_player(), Some(Seat::East));
    }

    #[test]
    fn eight_passes_is_a_misdeal() {
        let mut round = one_suit_each();
        pass_around(&mut round);
        pass_around(&mut round);
        assert!(round.is_complete());
        assert_eq!(round.current_player(), None);
        assert!(round.legal_actions().is_empty());
        let result = round.result().unwrap();
        assert!(result.is_misdeal());
        assert_eq!(result.maker_points + result.defender_points, 0);
        assert!(result.score_update().is_empty());
    }

    #[test]
    fn order_up_hands_dealer_the_turned_card() {
        let mut round = one_suit_each();
        round
            .apply_action(Action::OrderUp {
                seat: Seat::East,
                alone: false,
            })
            .unwrap();

        assert_eq!(round.trump(), Some(Suit::Spades));
        assert_eq!(round.maker(), Some(Seat::East));
        assert_eq!(round.makers(), Some(Team::EastWest));
        assert_eq!(round.phase(), Phase::Discard);
        assert_eq!(round.current_player(), Some(Seat::North));
        assert_eq!(round.hand(Seat::North).len(), 6);
        assert_eq!(round.legal_actions().len(), 6);
    }

    #[test]
    fn discard_returns_dealer_to_five_and_starts_play() {
        let mut round = one_suit_each();
        round
            .apply_action(Action::OrderUp {
                seat: Seat::East,
                alone: false,
            })
            .unwrap();

        let missing = Card::new(Rank::Ace, Suit::Hearts);
        assert_eq!(
            round.apply_action(Action::Discard {
                seat: Seat::North,
                card: missing,
            }),
            Err(EngineError::CardNotInHand(missing))
        );
        assert!(matches!(
            round.apply_action(Action::Discard {
                seat: Seat::East,
                card: missing,
            }),
            Err(EngineError::NotYourTurn { .. })
        ));

        let card = Card::new(Rank::Nine, Suit::Diamonds);
        round
            .apply_action(Action::Discard {
                seat: Seat::North,
                card,
            })
            .unwrap();
        assert_eq!(round.phase(), Phase::Play);
        for seat in Seat::LOOP {
            assert_eq!(round.hand(seat).len(), HAND_SIZE);
        }
        assert!(!round.hand(Seat::North).contains(card));
        assert!(round.hand(Seat::North).contains(round.turned_card()));
        assert_eq!(round.current_player(), Some(Seat::East));
    }

    #[test]
    fn turned_suit_cannot_be_called_in_second_round() {
        let mut round = one_suit_each();
        pass_around(&mut round);
        assert_eq!(
            round.apply_action(Action::CallTrump {
                seat: Seat::East,
                suit: Suit::Spades,
                alone: false,
            }),
            Err(EngineError::TurnedSuitRejected(Suit::Spades))
        );
        assert!(
            round
                .legal_actions()
                .iter()
                .all(|action| !matches!(action, Action::CallTrump { suit: Suit::Spades, .. }))
        );
        assert_eq!(round.legal_actions().len(), 7);
    }

    #[test]
    fn actions_outside_their_phase_are_rejected() {
        let mut round = one_suit_each();
        let card = Card::new(Rank::Ace, Suit::Hearts);
        assert_eq!(
            round.apply_action(Action::PlayCard {
                seat: Seat::East,
                card,
            }),
            Err(EngineError::WrongPhase {
                action: ActionKind::PlayCard,
                phase: Phase::BidRound1,
            })
        );
        assert!(matches!(
            round.apply_action(Action::CallTrump {
                seat: Seat::East,
                suit: Suit::Hearts,
                alone: false,
            }),
            Err(EngineError::WrongPhase { .. })
        ));
        assert!(matches!(
            round.apply_action(Action::Pass { seat: Seat::South }),
            Err(EngineError::NotYourTurn {
                expected: Seat::East,
                actual: Seat::South,
            })
        ));
        assert_eq!(round.phase(), Phase::BidRound1);
        assert_eq!(round.current_player(), Some(Seat::East));
    }

    #[test]
    fn legal_actions_only_name_current_player() {
        let mut round = one_suit_each();
        for _ in 0..40 {
            let Some(seat) = round.current_player() else {
                break;
            };
            let actions = round.legal_actions();
            assert!(!actions.is_empty());
            assert!(actions.iter().all(|action| action.seat() == seat));
            round.apply_action(actions[actions.len() - 1]).unwrap();
        }
        assert!(round.is_complete());
    }

    #[test]
    fn march_scores_two_points() {
        let mut round = one_suit_each();
        pass_around(&mut round);
        round
            .apply_action(Action::CallTrump {
                seat: Seat::East,
                suit: Suit::Hearts,
                alone: false,
            })
            .unwrap();
        assert_eq!(round.phase(), Phase::Play);
        play_out(&mut round);

        let result = round.result().unwrap();
        assert_eq!(result.maker_tricks, 5);
        assert_eq!(result.defender_tricks, 0);
        assert!(result.is_march());
        assert_eq!(result.maker_points, 2);
        assert_eq!(round.tricks_won(Seat::East), 5);
        assert_eq!(round.trick_history().len(), 5);
    }

    #[test]
    fn alone_partner_is_skipped_in_rotation() {
        let mut round = one_suit_each();
        pass_around(&mut round);
        round
            .apply_action(Action::CallTrump {
                seat: Seat::East,
                suit: Suit::Hearts,
                alone: true,
            })
            .unwrap();
        assert_eq!(round.sitting_out(), Some(Seat::West));

        let mut order = Vec::new();
        for _ in 0..3 {
            let action = round.legal_actions()[0];
            order.push(action.seat());
            round.apply_action(action).unwrap();
        }
        assert_eq!(order, vec![Seat::East, Seat::South, Seat::North]);
        assert_eq!(round.trick_history().len(), 1);
        assert_eq!(round.hand(Seat::West).len(), HAND_SIZE);

        play_out(&mut round);
        let result = round.result().unwrap();
        assert!(result.alone);
        assert_eq!(result.maker_points, 4);
    }

    #[test]
    fn alone_dealer_partner_still_discards() {
        let mut round = one_suit_each();
        round.apply_action(Action::Pass { seat: Seat::East }).unwrap();
        round
            .apply_action(Action::OrderUp {
                seat: Seat::South,
                alone: true,
            })
            .unwrap();
        assert_eq!(round.sitting_out(), Some(Seat::North));
        assert_eq!(round.current_player(), Some(Seat::North));
        round
            .apply_action(Action::Discard {
                seat: Seat::North,
                card: Card::new(Rank::Nine, Suit::Diamonds),
            })
            .unwrap();
        assert_eq!(round.current_player(), Some(Seat::East));
    }

    #[test]
    fn partner_left_of_dealer_is_skipped_on_opening_lead() {
        let mut round = one_suit_each();
        pass_around(&mut round);
        round.apply_action(Action::Pass { seat: Seat::East }).unwrap();
        round.apply_action(Action::Pass { seat: Seat::South }).unwrap();
        round
            .apply_action(Action::CallTrump {
                seat: Seat::West,
                suit: Suit::Clubs,
                alone: true,
            })
            .unwrap();
        assert_eq!(round.sitting_out(), Some(Seat::East));
        assert_eq!(round.current_player(), Some(Seat::South));
    }

    #[test]
    fn joker_turned_up_cannot_be_ordered() {
        let dealt = one_suit_each();
        let mut round =
            RoundState::from_hands(dealt.dealer(), dealt.hands().clone(), Card::joker());
        assert_eq!(round.legal_actions(), vec![Action::Pass { seat: Seat::East }]);
        assert_eq!(
            round.apply_action(Action::OrderUp {
                seat: Seat::East,
                alone: false,
            }),
            Err(EngineError::NoTurnedSuit)
        );
        pass_around(&mut round);
        assert_eq!(round.legal_actions().len(), 9);
    }
}
