use crate::model::player::Team;
use serde::{Deserialize, Serialize};

/// Points a finished round awards to each team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreUpdate {
    deltas: [u32; 2],
}

impl ScoreUpdate {
    pub const fn none() -> Self {
        Self { deltas: [0; 2] }
    }

    pub fn award(team: Team, points: u32) -> Self {
        let mut update = Self::none();
        update.deltas[team.index()] = points;
        update
    }

    pub fn delta(&self, team: Team) -> u32 {
        self.deltas[team.index()]
    }

    pub fn is_empty(&self) -> bool {
        self.deltas == [0; 2]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreBoard {
    totals: [u32; 2],
}

impl ScoreBoard {
    pub const fn new() -> Self {
        Self { totals: [0; 2] }
    }

    pub fn apply(&mut self, update: ScoreUpdate) {
        for team in Team::BOTH {
            self.totals[team.index()] += update.delta(team);
        }
    }

    pub fn score(&self, team: Team) -> u32 {
        self.totals[team.index()]
    }

    pub fn standings(&self) -> &[u32; 2] {
        &self.totals
    }

    /// The team ahead, or `None` while level.
    pub fn leader(&self) -> Option<Team> {
        let [ns, ew] = self.totals;
        match ns.cmp(&ew) {
            std::cmp::Ordering::Greater => Some(Team::NorthSouth),
            std::cmp::Ordering::Less => Some(Team::EastWest),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// First team at or past `target`. Rounds are scored one at a time, so
    /// at most one team can cross on any update.
    pub fn reached(&self, target: u32) -> Option<Team> {
        Team::BOTH
            .iter()
            .copied()
            .find(|team| self.score(*team) >= target)
    }
}
