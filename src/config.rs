//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    batch::BatchConfig,
    search::{MinimaxSelector, SearchConfig},
    tictactoe::GridSize,
};

/// Configuration shared by everything that plays games: the board size,
/// fixed for the whole run, and the search settings.
///
/// # Examples
///
/// ```
/// use ttt_eval::config::EngineConfig;
///
/// let config = EngineConfig::new()
///     .with_grid_size(4)?
///     .with_pruning(false);
/// assert_eq!(config.grid_size.get(), 4);
/// assert!(!config.search.pruning);
/// # Ok::<(), ttt_eval::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub grid_size: GridSize,
    pub search: SearchConfig,
}

impl EngineConfig {
    /// 3x3 board with alpha-beta pruning
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the board size.
    ///
    /// # Errors
    ///
    /// Returns error if the size is outside the supported range.
    pub fn with_grid_size(mut self, size: usize) -> Result<Self> {
        self.grid_size = GridSize::new(size)?;
        Ok(self)
    }

    pub fn with_pruning(mut self, pruning: bool) -> Self {
        self.search.pruning = pruning;
        self
    }

    pub fn selector(&self) -> MinimaxSelector {
        MinimaxSelector::new(self.search)
    }

    pub fn batch(&self) -> BatchConfig {
        BatchConfig {
            search: self.search,
        }
    }
}
