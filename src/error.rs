use std::path::PathBuf;

use thiserror::Error;

/// Problems with the grid configuration or the file it was read from.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("slot length must be positive, got {0} minutes")]
    ZeroSlot(u32),

    #[error("slot height must be positive, got {0}px")]
    SlotPx(f64),

    #[error("minimum visible height must not be negative, got {0}px")]
    NegativeMinimum(f64),

    #[error("visible window {start}..{end} is empty")]
    EmptyWindow { start: u32, end: u32 },

    #[error("visible window ends at minute {0}, past midnight")]
    PastMidnight(u32),

    #[error("invalid clock time '{0}', expected H:MM or minutes since midnight")]
    Clock(String),

    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Problems loading a section list from disk.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid schedule JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid section CSV: {0}")]
    Csv(#[from] csv::Error),
}
