use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_DB_PATH: &str = "todos.db";
const DEFAULT_LOG_FILE: &str = "todos.log";
const DEFAULT_TICK_MS: u64 = 250;

// Runtime settings, read from the environment with defaults
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    pub log_file: PathBuf,
    pub tick_rate: Duration,
}

impl Config {
    pub fn from_env() -> Config {
        Config::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Config {
        let db_path = lookup("TODO_DB_PATH")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_DB_PATH.to_string());
        let log_file = lookup("TODO_LOG_FILE")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());
        let tick_ms = lookup("TODO_TICK_MS")
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .unwrap_or(DEFAULT_TICK_MS);

        Config {
            db_path: PathBuf::from(db_path),
            log_file: PathBuf::from(log_file),
            tick_rate: Duration::from_millis(tick_ms),
        }
    }
}
