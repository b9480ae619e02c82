use anyhow::{Result, bail};

use super::HighScoreStore;

/// In-memory store, for tests and for running without a writable disk
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    high_score: Option<u32>,
    writes: Vec<u32>,
    fail: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that already holds `score`
    pub fn with_high_score(score: u32) -> Self {
        Self {
            high_score: Some(score),
            ..Self::default()
        }
    }

    /// Store whose reads and writes always fail
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Every value written, oldest first
    pub fn writes(&self) -> &[u32] {
        &self.writes
    }
}

impl HighScoreStore for MemoryStore {
    fn read_high_score(&self) -> Result<u32> {
        if self.fail {
            bail!("high score storage unavailable");
        }
        Ok(self.high_score.unwrap_or(0))
    }

    fn write_high_score(&mut self, score: u32) -> Result<()> {
        if self.fail {
            bail!("high score storage unavailable");
        }
        self.high_score = Some(score);
        self.writes.push(score);
        Ok(())
    }
}
