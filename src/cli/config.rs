//! Shared configuration types for CLI commands
//!
//! Every section can be given in a TOML file passed with `--config`;
//! command-line flags take precedence over file values.
//!
//! ```toml
//! [common]
//! progress = false
//!
//! [evaluate]
//! size = 6
//! pruning = true
//! format = "ascii"
//!
//! [generate]
//! size = 4
//! samples = 5000
//! seed = 42
//! first_player = "O"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    config::EngineConfig,
    dataset::RecordFormat,
    tictactoe::{GridSize, Player},
};

/// Common configuration shared across commands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommonConfig {
    /// Whether to show progress bars
    pub progress: bool,

    /// Verbose logging
    pub verbose: bool,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            progress: true,
            verbose: false,
        }
    }
}

/// Evaluation configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    /// Board side length
    pub size: GridSize,

    /// Alpha-beta pruning
    pub pruning: bool,

    /// Dataset encoding
    pub format: RecordFormat,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            size: GridSize::CLASSIC,
            pruning: true,
            format: RecordFormat::Ascii,
        }
    }
}

impl EvaluationConfig {
    /// Engine settings with command-line overrides applied
    pub fn engine(&self, size: Option<usize>, no_pruning: bool) -> Result<EngineConfig> {
        Ok(EngineConfig {
            grid_size: resolve_size(size, self.size)?,
            ..EngineConfig::default()
        }
        .with_pruning(self.pruning && !no_pruning))
    }
}

/// Dataset generation configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Board side length
    pub size: GridSize,

    /// Maximum number of positions visited
    pub samples: usize,

    /// Random seed for reproducibility
    pub seed: Option<u64>,

    /// Side to move on the empty board
    pub first_player: Player,

    /// Dataset encoding
    pub format: RecordFormat,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            size: GridSize::CLASSIC,
            samples: 100_000,
            seed: None,
            first_player: Player::X,
            format: RecordFormat::Ascii,
        }
    }
}

/// Contents of a `--config` file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub common: CommonConfig,
    pub evaluate: EvaluationConfig,
    pub generate: GenerationConfig,
}

impl FileConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::io(format!("read config {}", path.display()), e))?;
        Self::from_toml_str(&text)
    }
}

/// Resolve a board size flag against a configured default
pub fn resolve_size(flag: Option<usize>, configured: GridSize) -> Result<GridSize> {
    flag.map_or(Ok(configured), GridSize::new)
}
