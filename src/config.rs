use std::{env, path::PathBuf, time::Duration};
use tracing::warn;

const DEFAULT_DATA_PATH: &str = "data/ledger.json";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_UNDO_WINDOW_SECS: u64 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_path: PathBuf,
    pub port: u16,
    pub undo_window: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            port: DEFAULT_PORT,
            undo_window: Duration::from_secs(DEFAULT_UNDO_WINDOW_SECS),
        }
    }
}

impl Config {
    /// Reads `APP_DATA_PATH`, `PORT` and `UNDO_WINDOW_SECS`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let data_path = lookup("APP_DATA_PATH")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.data_path);

        let port = parse_or(&lookup, "PORT", defaults.port);
        let undo_window = Duration::from_secs(parse_or(
            &lookup,
            "UNDO_WINDOW_SECS",
            DEFAULT_UNDO_WINDOW_SECS,
        ));

        Self {
            data_path,
            port,
            undo_window,
        }
    }
}

fn parse_or<T: std::str::FromStr + Copy + std::fmt::Display>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> T {
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("ignoring invalid {key}={raw:?}, using {default}");
            default
        }),
        None => default,
    }
}
