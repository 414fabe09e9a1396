//! Process configuration
//!
//! Settings are resolved once at start-up and passed explicitly to the parts
//! that need them. Priority: `SIMPCALC_*` env > plain env > built-in default.
//!
//! | Setting | Environment | Default |
//! |---------|-------------|---------|
//! | `history_file` | `SIMPCALC_HISTORY_FILE` | `data/history.json` |
//! | `log_level` | `LOG_LEVEL` or `SIMPCALC_LOG_LEVEL` | `info` |
//! | `max_expression_length` | `MAX_EXPRESSION_LENGTH` or `SIMPCALC_MAX_EXPRESSION_LENGTH` | `1000` |

use figment::{
    providers::{Env, Serialized},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

pub const DEFAULT_HISTORY_FILE: &str = "data/history.json";
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_MAX_EXPRESSION_LENGTH: usize = 1000;

pub const ENV_PREFIX: &str = "SIMPCALC_";
pub const ENV_HISTORY_FILE: &str = "SIMPCALC_HISTORY_FILE";
pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";
pub const ENV_MAX_EXPRESSION_LENGTH: &str = "MAX_EXPRESSION_LENGTH";

/// Calculator settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// JSON history log location
    pub history_file: PathBuf,
    /// Log filter level (`trace`, `debug`, `info`, `warn`, `error`)
    pub log_level: String,
    /// Longest accepted expression, in characters
    pub max_expression_length: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            history_file: PathBuf::from(DEFAULT_HISTORY_FILE),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            max_expression_length: DEFAULT_MAX_EXPRESSION_LENGTH,
        }
    }
}

impl Settings {
    /// Provider chain: defaults, then plain env names, then prefixed env names
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Settings::default()))
            .merge(Env::raw().only(&[ENV_LOG_LEVEL, ENV_MAX_EXPRESSION_LENGTH]))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// Load settings from the environment
    pub fn load() -> Result<Self, figment::Error> {
        let settings: Settings = Self::figment().extract()?;
        debug!(
            "Settings: history_file={:?}, log_level={}, max_expression_length={}",
            settings.history_file, settings.log_level, settings.max_expression_length
        );
        Ok(settings)
    }

    pub fn with_history_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.history_file = path.into();
        self
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.history_file, PathBuf::from("data/history.json"));
        assert_eq!(settings.log_level, "info");
        assert_eq!(settings.max_expression_length, 1000);
    }

    #[test]
    fn test_env_overrides() {
        Jail::expect_with(|jail| {
            jail.set_env(ENV_HISTORY_FILE, "/var/lib/simpcalc/history.json");
            jail.set_env(ENV_LOG_LEVEL, "DEBUG");
            jail.set_env(ENV_MAX_EXPRESSION_LENGTH, "50");

            let settings: Settings = Settings::figment().extract()?;
            assert_eq!(
                settings.history_file,
                PathBuf::from("/var/lib/simpcalc/history.json")
            );
            assert_eq!(settings.log_level, "DEBUG");
            assert_eq!(settings.max_expression_length, 50);
            Ok(())
        });
    }

    #[test]
    fn test_prefixed_env_wins() {
        Jail::expect_with(|jail| {
            jail.set_env(ENV_MAX_EXPRESSION_LENGTH, "50");
            jail.set_env("SIMPCALC_MAX_EXPRESSION_LENGTH", "75");

            let settings: Settings = Settings::figment().extract()?;
            assert_eq!(settings.max_expression_length, 75);
            Ok(())
        });
    }

    #[test]
    fn test_invalid_length_is_an_error() {
        Jail::expect_with(|jail| {
            jail.set_env(ENV_MAX_EXPRESSION_LENGTH, "lots");
            assert!(Settings::figment().extract::<Settings>().is_err());
            Ok(())
        });
    }

    #[test]
    fn test_with_history_file() {
        let settings = Settings::default().with_history_file("/tmp/h.json");
        assert_eq!(settings.history_file, PathBuf::from("/tmp/h.json"));
    }
}
