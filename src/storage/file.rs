use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::HighScoreStore;

/// On-disk layout: `{"snakeHighScore": 120}`, keyed by [`super::HIGH_SCORE_KEY`]
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
struct ScoreRecord {
    #[serde(rename = "snakeHighScore")]
    high_score: u32,
}

/// High score kept in a small JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$HOME/<file_name>`, or the working directory when `HOME` is unset
    pub fn in_home(file_name: &str) -> Self {
        let dir = std::env::var_os("HOME")
            .map(PathBuf::from)
            .unwrap_or_default();
        Self::new(dir.join(file_name))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for JsonFileStore {
    fn read_high_score(&self) -> Result<u32> {
        if !self.path.exists() {
            return Ok(0);
        }

        let json = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read high score from {:?}", self.path))?;
        let record: ScoreRecord = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse high score in {:?}", self.path))?;

        Ok(record.high_score)
    }

    fn write_high_score(&mut self, score: u32) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        let record = ScoreRecord { high_score: score };
        let json = serde_json::to_string(&record).context("Failed to serialize high score")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write high score to {:?}", self.path))?;

        Ok(())
    }
}
