use crate::model::deck::DeckKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_TARGET_SCORE: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Points a team needs to win. Checked after every round.
    pub target_score: u32,
    pub deck: DeckKind,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            target_score: DEFAULT_TARGET_SCORE,
            deck: DeckKind::Standard,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameConfigError {
    #[error("target score must be at least 1")]
    ZeroTargetScore,
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), GameConfigError> {
        if self.target_score == 0 {
            return Err(GameConfigError::ZeroTargetScore);
        }
        Ok(())
    }

    pub fn with_target_score(mut self, target_score: u32) -> Self {
        self.target_score = target_score;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{GameConfig, GameConfigError};
    use crate::model::deck::DeckKind;

    #[test]
    fn defaults_to_ten_points_standard_deck() {
        let config = GameConfig::default();
        assert_eq!(config.target_score, 10);
        assert_eq!(config.deck, DeckKind::Standard);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_target_is_rejected() {
        let config = GameConfig::default().with_target_score(0);
        assert_eq!(config.validate(), Err(GameConfigError::ZeroTargetScore));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{"deck":"with_joker"}"#).unwrap();
        assert_eq!(config.target_score, 10);
        assert_eq!(config.deck, DeckKind::WithJoker);
    }
}
