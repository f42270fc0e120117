use crate::model::card::Card;
use crate::model::player::Seat;
use crate::model::suit::Suit;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Everything a seat can do. Submitting one of these is the only way to
/// change a round or game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Pass { seat: Seat },
    /// Round one: accept the turned card's suit as trump.
    OrderUp { seat: Seat, alone: bool },
    /// Round two: name any suit except the one turned down.
    CallTrump { seat: Seat, suit: Suit, alone: bool },
    Discard { seat: Seat, card: Card },
    PlayCard { seat: Seat, card: Card },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Pass,
    OrderUp,
    CallTrump,
    Discard,
    PlayCard,
}

impl Action {
    pub const fn seat(&self) -> Seat {
        match *self {
            Action::Pass { seat }
            | Action::OrderUp { seat, .. }
            | Action::CallTrump { seat, .. }
            | Action::Discard { seat, .. }
            | Action::PlayCard { seat, .. } => seat,
        }
    }

    pub const fn kind(&self) -> ActionKind {
        match self {
            Action::Pass { .. } => ActionKind::Pass,
            Action::OrderUp { .. } => ActionKind::OrderUp,
            Action::CallTrump { .. } => ActionKind::CallTrump,
            Action::Discard { .. } => ActionKind::Discard,
            Action::PlayCard { .. } => ActionKind::PlayCard,
        }
    }

    /// True for the bidding actions that send the maker's partner out.
    pub const fn is_alone(&self) -> bool {
        matches!(
            self,
            Action::OrderUp { alone: true, .. } | Action::CallTrump { alone: true, .. }
        )
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ActionKind::Pass => "pass",
            ActionKind::OrderUp => "order up",
            ActionKind::CallTrump => "call trump",
            ActionKind::Discard => "discard",
            ActionKind::PlayCard => "play a card",
        };
        f.write_str(label)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let alone = if self.is_alone() { " alone" } else { "" };
        match self {
            Action::Pass { seat } => write!(f, "{seat} passes"),
            Action::OrderUp { seat, .. } => write!(f, "{seat} orders it up{alone}"),
            Action::CallTrump { seat, suit, .. } => write!(f, "{seat} calls {suit}{alone}"),
            Action::Discard { seat, card } => write!(f, "{seat} discards {card}"),
            Action::PlayCard { seat, card } => write!(f, "{seat} plays {card}"),
        }
    }
}
