//! Runtime configuration from environment variables.
//!
//! | Variable             | Meaning                              | Default          |
//! |----------------------|--------------------------------------|------------------|
//! | `BLOCKFALL_SEED`     | RNG seed                             | system clock     |
//! | `BLOCKFALL_FRAME_MS` | display frame period in milliseconds | 16               |
//! | `BLOCKFALL_BELL`     | terminal bell on tetris / game over  | on               |
//! | `BLOCKFALL_LOG_PATH` | JSON-lines event log file            | none             |
//!
//! Values that do not parse fall back to the default.

use std::env;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::types::FRAME_MS;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub seed: u32,
    pub frame_ms: u64,
    pub bell: bool,
    pub log_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: clock_seed(),
            frame_ms: FRAME_MS,
            bell: true,
            log_path: None,
        }
    }
}

impl Config {
    /// Create from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let seed = lookup("BLOCKFALL_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_else(clock_seed);

        let frame_ms = lookup("BLOCKFALL_FRAME_MS")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|&ms| ms > 0)
            .unwrap_or(FRAME_MS);

        let bell = lookup("BLOCKFALL_BELL")
            .and_then(|s| parse_flag(&s))
            .unwrap_or(true);

        let log_path = lookup("BLOCKFALL_LOG_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        Self {
            seed,
            frame_ms,
            bell,
            log_path,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
