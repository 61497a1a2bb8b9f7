use anyhow::Result;
use clap::Parser;
use grid_snake::game::GameConfig;
use grid_snake::modes::HumanMode;
use grid_snake::storage::{HighScoreStore, JsonFileStore, MemoryStore};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Snake on a grid, in your terminal")]
struct Cli {
    /// JSON game configuration; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Canvas width in pixels [default: 600]
    #[arg(long)]
    canvas_width: Option<u32>,

    /// Canvas height in pixels [default: 400]
    #[arg(long)]
    canvas_height: Option<u32>,

    /// Size of one grid cell in pixels [default: 20]
    #[arg(long)]
    cell_size: Option<u32>,

    /// Milliseconds between game ticks [default: 150]
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Frames drawn per second [default: 30]
    #[arg(long)]
    fps: Option<u32>,

    /// Where the high score is kept
    #[arg(long, default_value = "snake_high_score.json")]
    high_score_file: PathBuf,

    /// Keep the high score in memory only
    #[arg(long)]
    ephemeral: bool,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    grid_snake::logging::init(cli.log_file.as_deref())?;

    // Create game configuration from the config file and CLI arguments
    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(width) = cli.canvas_width {
        config.canvas_width_px = width;
    }
    if let Some(height) = cli.canvas_height {
        config.canvas_height_px = height;
    }
    if let Some(cell_size) = cli.cell_size {
        config.cell_size_px = cell_size;
    }
    if let Some(tick_ms) = cli.tick_ms {
        config.tick_interval_ms = tick_ms;
    }
    if let Some(fps) = cli.fps {
        config.frames_per_second = fps;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    config.validate()?;

    let store: Box<dyn HighScoreStore> = if cli.ephemeral {
        Box::new(MemoryStore::default())
    } else {
        info!(path = ?cli.high_score_file, "Using high score file");
        Box::new(JsonFileStore::new(cli.high_score_file))
    };

    let mut human_mode = HumanMode::new(config, store);
    human_mode.run().await?;

    Ok(())
}
