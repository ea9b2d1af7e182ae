use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::input::Direction;
use crate::snake::Position;

/// Base tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;

/// Edge length of one segment in playfield units.
pub const DEFAULT_SEGMENT_SIZE: u16 = 10;

/// Score granted per food item eaten.
pub const FOOD_REWARD: u32 = 10;

/// Cell the snake starts on.
pub const DEFAULT_START: Position = Position::new(50, 50);

pub const DEFAULT_PLAYFIELD_WIDTH: u16 = 400;
pub const DEFAULT_PLAYFIELD_HEIGHT: u16 = 300;

/// Playfield extent in playfield units.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Number of whole segment columns that fit horizontally.
    #[must_use]
    pub fn columns(self, segment_size: u16) -> u16 {
        self.width / segment_size.max(1)
    }

    /// Number of whole segment rows that fit vertically.
    #[must_use]
    pub fn rows(self, segment_size: u16) -> u16 {
        self.height / segment_size.max(1)
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self, segment_size: u16) -> usize {
        usize::from(self.columns(segment_size)) * usize::from(self.rows(segment_size))
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_PLAYFIELD_WIDTH,
            height: DEFAULT_PLAYFIELD_HEIGHT,
        }
    }
}

/// Rules and tuning for one simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub bounds: GridSize,
    pub segment_size: u16,
    pub start: Position,
    pub start_direction: Direction,
    pub food_reward: u32,
    /// Number of food items kept on the board.
    pub food_count: usize,
    /// Accept a request for the exact opposite of the current heading.
    pub allow_reversal: bool,
    /// Only spawn food on cells the snake does not occupy.
    pub avoid_occupied_cells: bool,
    pub tick_interval_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            bounds: GridSize::default(),
            segment_size: DEFAULT_SEGMENT_SIZE,
            start: DEFAULT_START,
            start_direction: Direction::Right,
            food_reward: FOOD_REWARD,
            food_count: 1,
            allow_reversal: false,
            avoid_occupied_cells: false,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
        }
    }
}

/// Failure to load or accept a [`SimulationConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("segment size must be greater than zero")]
    ZeroSegmentSize,
    #[error("playfield {width}x{height} cannot hold a {segment_size}-unit segment")]
    PlayfieldTooSmall {
        width: u16,
        height: u16,
        segment_size: u16,
    },
    #[error("start cell ({x}, {y}) lies outside the playfield")]
    StartOutOfBounds { x: i32, y: i32 },
    #[error("start cell ({x}, {y}) is not aligned to the {segment_size}-unit grid")]
    StartMisaligned { x: i32, y: i32, segment_size: u16 },
    #[error("food count must be at least one")]
    ZeroFoodCount,
    #[error("tick interval must be greater than zero")]
    ZeroTickInterval,
}

impl SimulationConfig {
    /// Reads a JSON config file. Missing fields fall back to defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Checks that a simulation can be built from this config.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let segment_size = self.segment_size;
        if segment_size == 0 {
            return Err(ConfigError::ZeroSegmentSize);
        }

        if self.bounds.width < segment_size || self.bounds.height < segment_size {
            return Err(ConfigError::PlayfieldTooSmall {
                width: self.bounds.width,
                height: self.bounds.height,
                segment_size,
            });
        }

        let Position { x, y } = self.start;
        if !self.start.is_within_bounds(self.bounds) {
            return Err(ConfigError::StartOutOfBounds { x, y });
        }

        let pitch = i32::from(segment_size);
        if x % pitch != 0 || y % pitch != 0 {
            return Err(ConfigError::StartMisaligned { x, y, segment_size });
        }

        if self.food_count == 0 {
            return Err(ConfigError::ZeroFoodCount);
        }

        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }

        Ok(())
    }

    /// Config with the given playfield and defaults elsewhere.
    #[must_use]
    pub fn with_bounds(width: u16, height: u16) -> Self {
        Self {
            bounds: GridSize { width, height },
            ..Self::default()
        }
    }
}
