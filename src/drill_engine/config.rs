use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::drill_engine::{error::ConfigError, input::MAX_INPUT_DIGITS};

/// Tunables for a game. Every field has a default, so a partial JSON file is
/// enough.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrillConfig {
    /// Problems per session
    pub problem_count: usize,
    /// Countdown length in seconds
    pub time_limit_secs: u64,
    /// How often the driver should send `Event::Tick`
    pub poll_interval_ms: u64,
    /// Smallest selectable table
    pub min_table: u8,
    /// Largest selectable table
    pub max_table: u8,
    /// Each table runs `1..=max_multiplier`
    pub max_multiplier: u8,
    /// Keypad buffer length, `1..=9`
    pub max_input_digits: usize,
    /// Fixed seed for problems and card draws; entropy when absent
    pub rng_seed: Option<u64>,
}

impl Default for DrillConfig {
    fn default() -> Self {
        Self {
            problem_count: 20,
            time_limit_secs: 60,
            poll_interval_ms: 100,
            min_table: 2,
            max_table: 9,
            max_multiplier: 10,
            max_input_digits: 3,
            rng_seed: None,
        }
    }
}

impl DrillConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: DrillConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::from_json_str(&fs::read_to_string(path)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.problem_count == 0 {
            return Err(ConfigError::Invalid("problem_count must be at least 1".into()));
        }
        if self.time_limit_secs == 0 {
            return Err(ConfigError::Invalid("time_limit_secs must be at least 1".into()));
        }
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid("poll_interval_ms must be at least 1".into()));
        }
        if self.min_table == 0 || self.min_table > self.max_table {
            return Err(ConfigError::Invalid(format!(
                "table range {}..={} is empty or starts at zero",
                self.min_table, self.max_table
            )));
        }
        if self.max_multiplier == 0 {
            return Err(ConfigError::Invalid("max_multiplier must be at least 1".into()));
        }
        if !(1..=MAX_INPUT_DIGITS).contains(&self.max_input_digits) {
            return Err(ConfigError::Invalid(format!(
                "max_input_digits must be between 1 and {}",
                MAX_INPUT_DIGITS
            )));
        }
        Ok(())
    }

    pub fn time_limit(&self) -> Duration {
        Duration::from_secs(self.time_limit_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn accepts_table(&self, table: u8) -> bool {
        (self.min_table..=self.max_table).contains(&table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drill_engine::input::AnswerBuffer;

    #[test]
    fn defaults_match_the_classic_game() {
        let config = DrillConfig::default();
        assert_eq!(config.problem_count, 20);
        assert_eq!(config.time_limit(), Duration::from_secs(60));
        assert_eq!(config.poll_interval(), Duration::from_millis(100));
        assert!(config.accepts_table(2) && config.accepts_table(9));
        assert!(!config.accepts_table(1) && !config.accepts_table(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config =
            DrillConfig::from_json_str(r#"{ "problem_count": 5, "rng_seed": 3 }"#).unwrap();
        assert_eq!(config.problem_count, 5);
        assert_eq!(config.rng_seed, Some(3));
        assert_eq!(config.time_limit_secs, 60);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            DrillConfig::from_json_str(r#"{ "problem_count": 0 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            DrillConfig::from_json_str(r#"{ "min_table": 8, "max_table": 3 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(DrillConfig::from_json_str("[1]"), Err(ConfigError::Json(_))));
    }

    #[test]
    fn input_digits_are_capped_so_a_full_buffer_parses() {
        assert!(matches!(
            DrillConfig::from_json_str(r#"{ "max_input_digits": 10 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            DrillConfig::from_json_str(r#"{ "max_input_digits": 0 }"#),
            Err(ConfigError::Invalid(_))
        ));

        let config = DrillConfig::from_json_str(r#"{ "max_input_digits": 9 }"#).unwrap();
        let mut buf = AnswerBuffer::new(config.max_input_digits);
        for _ in 0..config.max_input_digits {
            buf.push('9');
        }
        assert!(buf.parse().is_some());
    }

    #[test]
    fn load_reads_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("drill.json");
        fs::write(&path, r#"{ "time_limit_secs": 90 }"#).unwrap();
        assert_eq!(DrillConfig::load(&path).unwrap().time_limit_secs, 90);
        assert!(matches!(
            DrillConfig::load(&dir.path().join("missing.json")),
            Err(ConfigError::Io(_))
        ));
    }
}
