use anyhow::{Context, Result, anyhow};
use clap::Parser;
use log::{LevelFilter, info};
use simplelog::{Config, WriteLogger};
use snake_arcade::game::GameConfig;
use snake_arcade::modes::HumanMode;
use snake_arcade::storage::JsonFileStore;
use std::fs::File;
use std::path::PathBuf;

const HIGH_SCORE_FILE: &str = ".snake_arcade_high_score.json";

#[derive(Parser)]
#[command(name = "snake_arcade")]
#[command(version, about = "Grid snake for the terminal")]
struct Cli {
    /// JSON file with game settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Side of the play surface
    #[arg(long)]
    canvas_size: Option<u32>,

    /// Side of one tile; the board has canvas_size / grid_size cells per axis
    #[arg(long)]
    grid_size: Option<u32>,

    /// Where the high score is kept [default: ~/.snake_arcade_high_score.json]
    #[arg(long)]
    high_score_file: Option<PathBuf>,

    /// Log destination; the terminal itself is taken by the game
    #[arg(long, default_value = "snake_arcade.log")]
    log_file: PathBuf,

    /// Log verbosity (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,

    /// Ring the terminal bell on eating, steering by pointer, and game over
    #[arg(long)]
    haptics: bool,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(canvas_size) = self.canvas_size {
            config.canvas_size = canvas_size;
        }
        if let Some(grid_size) = self.grid_size {
            config.grid_size = grid_size;
        }

        config
            .validate()
            .map_err(|e| anyhow!("Invalid game configuration: {}", e))?;
        Ok(config)
    }

    fn store(&self) -> JsonFileStore {
        match &self.high_score_file {
            Some(path) => JsonFileStore::new(path),
            None => JsonFileStore::in_home(HIGH_SCORE_FILE),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging before anything else
    let log_file = File::create(&cli.log_file)
        .with_context(|| format!("Failed to create log file {:?}", cli.log_file))?;
    WriteLogger::init(cli.log_level, Config::default(), log_file)
        .context("Failed to initialize logger")?;

    let config = cli.game_config()?;
    let store = cli.store();
    info!(
        "Starting snake_arcade: {0}x{0} board, high score file {1:?}",
        config.tile_count(),
        store.path()
    );

    let mut human_mode = HumanMode::new(config, store, cli.haptics);
    human_mode.run().await?;

    Ok(())
}
