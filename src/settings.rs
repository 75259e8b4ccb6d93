//! Game settings
//!
//! Loaded from a JSON file. Nothing here changes difficulty: the stage only
//! picks the artwork set and whether the character bobs.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::TICK_LENGTH_MS;
use crate::error::SetupError;

/// Artwork set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Stage {
    #[default]
    Default,
    /// The 2021 edition: separate asset folder, no bob, no dedicated game-over art
    Year2021,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Default => "default",
            Stage::Year2021 => "2021",
        }
    }

    /// Asset folder relative to the asset root
    fn dir(&self) -> &'static str {
        match self {
            Stage::Default => "",
            Stage::Year2021 => "2021",
        }
    }

    /// Whether the character bob runs by default
    pub fn animation(&self) -> bool {
        match self {
            Stage::Default => true,
            Stage::Year2021 => false,
        }
    }

    /// Paths of every image the stage needs, under `root`
    pub fn assets(&self, root: &Path) -> StageAssets {
        let dir = root.join(self.dir());
        let gameover = match self {
            Stage::Default => "gameover.png",
            Stage::Year2021 => "clear.png",
        };
        StageAssets {
            base: dir.join("base.png"),
            diff: dir.join("diff.png"),
            mask: dir.join("mask.png"),
            clear: dir.join("clear.png"),
            gameover: dir.join(gameover),
        }
    }
}

impl FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "default" | "" => Ok(Stage::Default),
            "2021" => Ok(Stage::Year2021),
            other => Err(format!("unknown stage '{other}'")),
        }
    }
}

/// Image paths for one stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageAssets {
    pub base: PathBuf,
    /// Shown once fewer than half of the blocks remain
    pub diff: PathBuf,
    /// Alpha mask the block field is carved from
    pub mask: PathBuf,
    pub clear: PathBuf,
    pub gameover: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub stage: Stage,
    /// Overrides the stage's bob setting when present
    pub animation: Option<bool>,
    /// Tick length in milliseconds
    pub tick_length_ms: f64,
    /// Cap on ticks simulated per frame (none = catch up fully)
    pub max_catch_up_ticks: Option<u32>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            stage: Stage::Default,
            animation: None,
            tick_length_ms: TICK_LENGTH_MS,
            max_catch_up_ticks: None,
        }
    }
}

impl Settings {
    pub fn for_stage(stage: Stage) -> Self {
        Self {
            stage,
            ..Self::default()
        }
    }

    /// Effective bob setting
    pub fn animation(&self) -> bool {
        self.animation.unwrap_or_else(|| self.stage.animation())
    }

    /// Load settings from a JSON file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, SetupError> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(SetupError::SettingsIo {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let settings = Self::from_json(&json).map_err(|source| SetupError::SettingsParse {
            path: path.to_path_buf(),
            source,
        })?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Reject tunables the scheduler can't run with
    pub fn validate(&self) -> Result<(), SetupError> {
        if !self.tick_length_ms.is_finite() || self.tick_length_ms <= 0.0 {
            return Err(SetupError::InvalidSettings {
                reason: format!("tick_length_ms must be positive, got {}", self.tick_length_ms),
            });
        }
        if self.max_catch_up_ticks == Some(0) {
            return Err(SetupError::InvalidSettings {
                reason: "max_catch_up_ticks must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
