use serde::Deserialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

use hearts_core::game::match_state::DEFAULT_TARGET_SCORE;

const DEFAULT_ROUNDS: usize = 1;
const OPPONENT_COUNT: usize = 3;

/// Table setup loaded from YAML; every field has a default.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TableConfig {
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_rounds")]
    pub rounds: usize,
    #[serde(default = "default_target_score")]
    pub target_score: u32,
    /// Name of the human seat. Absent means four computer players.
    #[serde(default)]
    pub human: Option<String>,
    #[serde(default)]
    pub opponents: Option<Vec<String>>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            seed: None,
            rounds: DEFAULT_ROUNDS,
            target_score: DEFAULT_TARGET_SCORE,
            human: None,
            opponents: None,
            logging: LoggingConfig::default(),
        }
    }
}

impl TableConfig {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let mut cfg: TableConfig = serde_yaml::from_reader(BufReader::new(file)).map_err(
            |source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            },
        )?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    pub fn validate(&mut self) -> Result<(), ValidationError> {
        if self.rounds == 0 {
            return Err(invalid("rounds", "at least one round must be played"));
        }
        if self.target_score == 0 {
            return Err(invalid("target_score", "target score must be greater than zero"));
        }
        if let Some(name) = self.human.as_mut() {
            *name = name.trim().to_string();
            if name.is_empty() {
                return Err(invalid("human", "name must not be empty"));
            }
        }
        if let Some(opponents) = self.opponents.as_ref() {
            validate_opponents(opponents, self.human.as_deref())?;
        }
        self.logging.normalize();
        if self.logging.level().is_none() {
            return Err(invalid(
                "logging.tracing_level",
                format!("unknown level '{}'", self.logging.tracing_level),
            ));
        }
        Ok(())
    }
}

fn validate_opponents(opponents: &[String], human: Option<&str>) -> Result<(), ValidationError> {
    if opponents.len() != OPPONENT_COUNT {
        return Err(invalid(
            "opponents",
            format!("exactly {OPPONENT_COUNT} names required, got {}", opponents.len()),
        ));
    }
    let mut seen: HashSet<&str> = human.into_iter().collect();
    for name in opponents {
        if name.trim().is_empty() {
            return Err(invalid("opponents", "name must not be empty"));
        }
        if !seen.insert(name.as_str()) {
            return Err(invalid("opponents", format!("name '{name}' used more than once")));
        }
    }
    Ok(())
}

fn default_rounds() -> usize {
    DEFAULT_ROUNDS
}

fn default_target_score() -> u32 {
    DEFAULT_TARGET_SCORE
}

fn invalid(field: &str, message: impl Into<String>) -> ValidationError {
    ValidationError::InvalidField {
        field: field.to_string(),
        message: message.into(),
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
    /// Structured JSON log file; console logging only when absent.
    #[serde(default)]
    pub json_path: Option<PathBuf>,
    /// Round events as JSON lines.
    #[serde(default)]
    pub events_path: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            tracing_level: default_tracing_level(),
            json_path: None,
            events_path: None,
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
        match self.tracing_level.trim().to_ascii_lowercase().as_str() {
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
    "warn".to_string()
}

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

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const BASIC_YAML: &str = r#"
seed: 42
rounds: 3
human: "  Ada "
opponents: ["Alfie", "Mercy", "Tobi"]
logging:
  tracing_level: "debug"
  events_path: "out/events.jsonl"
"#;

    #[test]
    fn loads_and_validates_basic_config() {
        let mut cfg: TableConfig = serde_yaml::from_str(BASIC_YAML).expect("parse yaml");
        cfg.validate().expect("validate");

        assert_eq!(cfg.seed, Some(42));
        assert_eq!(cfg.rounds, 3);
        assert_eq!(cfg.target_score, DEFAULT_TARGET_SCORE);
        assert_eq!(cfg.human.as_deref(), Some("Ada"));
        assert_eq!(cfg.logging.level(), Some(Level::DEBUG));
        assert_eq!(
            cfg.logging.events_path,
            Some(PathBuf::from("out/events.jsonl"))
        );
    }

    #[test]
    fn empty_document_uses_defaults() {
        let mut cfg: TableConfig = serde_yaml::from_str("{}").expect("parse");
        cfg.validate().expect("validate");
        assert_eq!(cfg, TableConfig::default());
    }

    #[test]
    fn rejects_wrong_opponent_count() {
        let yaml = BASIC_YAML.replace("\"Mercy\", ", "");
        let mut cfg: TableConfig = serde_yaml::from_str(&yaml).expect("parse");
        let err = cfg.validate().expect_err("two opponents");
        assert!(matches!(
            err,
            ValidationError::InvalidField { field, .. } if field == "opponents"
        ));
    }

    #[test]
    fn rejects_opponent_named_like_human() {
        let yaml = BASIC_YAML.replace("\"Tobi\"", "\"Ada\"");
        let mut cfg: TableConfig = serde_yaml::from_str(&yaml).expect("parse");
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_zero_rounds_and_unknown_level() {
        let mut cfg: TableConfig = serde_yaml::from_str("rounds: 0").expect("parse");
        assert!(matches!(
            cfg.validate(),
            Err(ValidationError::InvalidField { field, .. }) if field == "rounds"
        ));

        let mut cfg: TableConfig =
            serde_yaml::from_str("logging:\n  tracing_level: loud").expect("parse");
        assert!(matches!(
            cfg.validate(),
            Err(ValidationError::InvalidField { field, .. }) if field == "logging.tracing_level"
        ));
    }

    #[test]
    fn from_path_reports_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        writeln!(file, "rounds: 0").expect("write");
        let err = TableConfig::from_path(file.path()).expect_err("invalid");
        assert!(matches!(err, ConfigError::Invalid { .. }));

        let err = TableConfig::from_path("does/not/exist.yaml").expect_err("missing");
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
