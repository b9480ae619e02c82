//! High-score persistence
//!
//! The only thing that survives between runs is a single integer, stored
//! under [`HIGH_SCORE_KEY`].

pub mod file;
pub mod memory;

use anyhow::Result;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

/// Fixed identifier the high score is stored under
pub const HIGH_SCORE_KEY: &str = "snakeHighScore";

/// Synchronous key-value access to the stored high score
pub trait HighScoreStore {
    /// Stored high score, or 0 when nothing has been stored yet
    fn read_high_score(&self) -> Result<u32>;

    /// Replace the stored high score
    fn write_high_score(&mut self, score: u32) -> Result<()>;
}
