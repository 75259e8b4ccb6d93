//! Setup errors
//!
//! Only session setup can fail. Once a session exists, ticks and frames are
//! total functions.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("no display surface available")]
    MissingSurface,

    #[error("display area {width}x{height} is too small to host a field")]
    DegenerateDisplay { width: u32, height: u32 },

    #[error("base image has degenerate size {width}x{height}")]
    DegenerateImage { width: u32, height: u32 },

    #[error("invalid settings: {reason}")]
    InvalidSettings { reason: String },

    #[error("failed to read settings from {path}")]
    SettingsIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings from {path}")]
    SettingsParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
