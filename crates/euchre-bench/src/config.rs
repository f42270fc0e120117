use euchre_core::game::config::GameConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

const SEAT_COUNT: usize = 4;
const RUN_ID_ALLOWED: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789._-";

/// Root self-play configuration loaded from YAML.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SimulationConfig {
    pub run_id: String,
    pub games: GamesConfig,
    /// Exactly four entries, seated North, East, South, West in order.
    pub seats: Vec<SeatConfig>,
    pub outputs: OutputsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: SimulationConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        validate_run_id(&self.run_id)?;
        self.games.validate()?;
        validate_seats(&self.seats)?;
        self.outputs.validate(&self.run_id)?;
        self.logging.normalize();
        Ok(())
    }

    /// Resolve `{run_id}` placeholders into concrete paths.
    pub fn resolved_outputs(&self) -> ResolvedOutputs {
        ResolvedOutputs {
            jsonl: resolve_template(&self.run_id, &self.outputs.jsonl),
            summary_md: resolve_template(&self.run_id, &self.outputs.summary_md),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GamesConfig {
    /// Master seed; each game draws its own seed from it. Missing means 0.
    pub seed: Option<u64>,
    pub count: usize,
    #[serde(default)]
    pub game: GameConfig,
}

impl GamesConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.count == 0 {
            return Err(ValidationError::InvalidField {
                field: "games.count".to_string(),
                message: "number of games must be greater than zero".to_string(),
            });
        }

        self.game
            .validate()
            .map_err(|err| ValidationError::InvalidField {
                field: "games.game.target_score".to_string(),
                message: err.to_string(),
            })
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SeatConfig {
    pub name: String,
    pub kind: PolicyKind,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    Random,
    FirstLegal,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OutputsConfig {
    pub jsonl: String,
    pub summary_md: String,
}

impl OutputsConfig {
    fn validate(&self, run_id: &str) -> Result<(), ValidationError> {
        for (label, value) in [
            ("outputs.jsonl", &self.jsonl),
            ("outputs.summary_md", &self.summary_md),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::InvalidField {
                    field: label.to_string(),
                    message: "path must not be empty".to_string(),
                });
            }

            let resolved = resolve_template(run_id, value);
            if resolved.components().count() == 0 {
                return Err(ValidationError::InvalidField {
                    field: label.to_string(),
                    message: "resolved path is invalid".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Logging configuration defaults to disabled structured logs.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: default_tracing_level(),
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "info".to_string()
}

fn validate_run_id(run_id: &str) -> Result<(), ValidationError> {
    if run_id.trim().is_empty() {
        return Err(ValidationError::InvalidField {
            field: "run_id".to_string(),
            message: "run_id must not be empty".to_string(),
        });
    }

    if !run_id.chars().all(|c| RUN_ID_ALLOWED.contains(c)) {
        return Err(ValidationError::InvalidField {
            field: "run_id".to_string(),
            message: "run_id may only contain alphanumeric characters, '.', '_' or '-'".to_string(),
        });
    }

    Ok(())
}

fn validate_seats(seats: &[SeatConfig]) -> Result<(), ValidationError> {
    if seats.len() != SEAT_COUNT {
        return Err(ValidationError::InvalidField {
            field: "seats".to_string(),
            message: format!("exactly {SEAT_COUNT} seats are required, found {}", seats.len()),
        });
    }

    let mut seen = HashSet::new();
    for seat in seats {
        if seat.name.trim().is_empty() {
            return Err(ValidationError::InvalidField {
                field: "seats.name".to_string(),
                message: "seat name must not be empty".to_string(),
            });
        }

        if !seat.name.chars().all(|c| RUN_ID_ALLOWED.contains(c)) {
            return Err(ValidationError::InvalidField {
                field: format!("seats[{}].name", seat.name),
                message: "seat name contains invalid characters".to_string(),
            });
        }

        if !seen.insert(seat.name.as_str()) {
            return Err(ValidationError::InvalidField {
                field: "seats".to_string(),
                message: format!("seat name '{}' defined more than once", seat.name),
            });
        }
    }

    // First-legal seats always pass while bidding, so an all first-legal
    // table misdeals every round and never finishes a game.
    if !seats.iter().any(|seat| seat.kind == PolicyKind::Random) {
        return Err(ValidationError::InvalidField {
            field: "seats".to_string(),
            message: "at least one seat must use the random policy".to_string(),
        });
    }

    Ok(())
}

fn resolve_template(run_id: &str, template: &str) -> PathBuf {
    let replaced = template.replace("{run_id}", run_id);
    PathBuf::from(replaced)
}

/// Fully resolved output paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutputs {
    pub jsonl: PathBuf,
    pub summary_md: PathBuf,
}

impl ResolvedOutputs {
    /// Structured telemetry lands next to the summary.
    pub fn telemetry_dir(&self) -> PathBuf {
        self.summary_md
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Errors surfaced when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Invalid { path, .. } => path.as_path(),
        }
    }
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use euchre_core::model::deck::DeckKind;

    const BASIC_YAML: &str = r#"
run_id: "selfplay_smoke"
games:
  seed: 123
  count: 16
seats:
  - name: "north"
    kind: "random"
  - name: "east"
    kind: "first_legal"
  - name: "south"
    kind: "random"
  - name: "west"
    kind: "first_legal"
outputs:
  jsonl: "bench/out/{run_id}/games.jsonl"
  summary_md: "bench/out/{run_id}/summary.md"
"#;

    fn parse(yaml: &str) -> SimulationConfig {
        serde_yaml::from_str(yaml).expect("parse")
    }

    fn field_of(err: ValidationError) -> String {
        let ValidationError::InvalidField { field, .. } = err;
        field
    }

    #[test]
    fn parses_basic_config_with_defaults() {
        let mut cfg = parse(BASIC_YAML);
        cfg.validate().expect("valid");
        assert_eq!(cfg.games.count, 16);
        assert_eq!(cfg.games.game, GameConfig::default());
        assert_eq!(cfg.seats[1].kind, PolicyKind::FirstLegal);
        assert!(!cfg.logging.enable_structured);
        assert_eq!(cfg.logging.level(), Some(Level::INFO));

        let outputs = cfg.resolved_outputs();
        assert_eq!(
            outputs.jsonl,
            PathBuf::from("bench/out/selfplay_smoke/games.jsonl")
        );
        assert_eq!(
            outputs.telemetry_dir(),
            PathBuf::from("bench/out/selfplay_smoke")
        );
    }

    #[test]
    fn game_block_overrides_engine_defaults() {
        let yaml = BASIC_YAML.replace(
            "  count: 16\n",
            "  count: 16\n  game:\n    target_score: 5\n    deck: with_joker\n",
        );
        let mut cfg = parse(&yaml);
        cfg.validate().expect("valid");
        assert_eq!(cfg.games.game.target_score, 5);
        assert_eq!(cfg.games.game.deck, DeckKind::WithJoker);
    }

    #[test]
    fn rejects_zero_games() {
        let yaml = BASIC_YAML.replace("count: 16", "count: 0");
        let err = parse(&yaml).validate().expect_err("zero games");
        assert_eq!(field_of(err), "games.count");
    }

    #[test]
    fn rejects_zero_target_score() {
        let yaml = BASIC_YAML.replace(
            "  count: 16\n",
            "  count: 16\n  game:\n    target_score: 0\n",
        );
        let err = parse(&yaml).validate().expect_err("zero target");
        assert_eq!(field_of(err), "games.game.target_score");
    }

    #[test]
    fn rejects_wrong_seat_count() {
        let yaml = BASIC_YAML.replace("  - name: \"west\"\n    kind: \"first_legal\"\n", "");
        let err = parse(&yaml).validate().expect_err("three seats");
        assert_eq!(field_of(err), "seats");
    }

    #[test]
    fn rejects_duplicate_seat_names() {
        let yaml = BASIC_YAML.replace("name: \"west\"", "name: \"east\"");
        let err = parse(&yaml).validate().expect_err("duplicate seat");
        assert_eq!(field_of(err), "seats");
    }

    #[test]
    fn rejects_table_without_random_seat() {
        let yaml = BASIC_YAML.replace("kind: \"random\"", "kind: \"first_legal\"");
        let err = parse(&yaml).validate().expect_err("all first_legal");
        let ValidationError::InvalidField { field, message } = err;
        assert_eq!(field, "seats");
        assert!(message.contains("random"));

        let one_random = BASIC_YAML
            .replace("kind: \"random\"", "kind: \"first_legal\"")
            .replacen("kind: \"first_legal\"", "kind: \"random\"", 1);
        parse(&one_random).validate().expect("one random seat is enough");
    }

    #[test]
    fn rejects_invalid_run_id() {
        let yaml = BASIC_YAML.replace("selfplay_smoke", "self play");
        let err = parse(&yaml).validate().expect_err("invalid run id");
        assert_eq!(field_of(err), "run_id");
    }

    #[test]
    fn unknown_policy_kind_fails_to_parse() {
        let yaml = BASIC_YAML.replace("kind: \"random\"", "kind: \"heuristic\"");
        assert!(serde_yaml::from_str::<SimulationConfig>(&yaml).is_err());
    }

    #[test]
    fn blank_tracing_level_falls_back_to_info() {
        let yaml = format!(
            "{BASIC_YAML}logging:\n  enable_structured: true\n  tracing_level: \"\"\n"
        );
        let mut cfg = parse(&yaml);
        cfg.validate().expect("valid");
        assert_eq!(cfg.logging.tracing_level, "info");
    }
}
