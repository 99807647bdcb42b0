use anyhow::{Result, anyhow};
use clap::{Parser, ValueEnum};
use grid_snake::game::{GameConfig, PlacementStrategy};
use grid_snake::logging;
use grid_snake::modes::HumanMode;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Snake on a square grid in your terminal")]
struct Cli {
    /// JSON file with a game configuration; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Side length of the square grid
    #[arg(long)]
    grid_size: Option<usize>,

    /// Milliseconds between simulation ticks
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Starting length of the snake
    #[arg(long)]
    initial_length: Option<usize>,

    /// Terminal columns per grid cell
    #[arg(long)]
    cell_width: Option<u16>,

    /// Fruit placement strategy
    #[arg(long)]
    placement: Option<Placement>,

    /// Seed for fruit placement
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Placement {
    /// Retry random cells until a free one comes up
    Rejection,
    /// Pick among the free cells directly
    Complement,
}

impl From<Placement> for PlacementStrategy {
    fn from(placement: Placement) -> Self {
        match placement {
            Placement::Rejection => PlacementStrategy::Rejection,
            Placement::Complement => PlacementStrategy::Complement,
        }
    }
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(grid_size) = self.grid_size {
            config.grid_size = grid_size;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_interval_ms = tick_ms;
        }
        if let Some(length) = self.initial_length {
            config.initial_snake_length = length;
        }
        if let Some(cell_width) = self.cell_width {
            config.cell_width = cell_width;
        }
        if let Some(placement) = self.placement {
            config.fruit_placement = placement.into();
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config
            .validate()
            .map_err(|msg| anyhow!("Invalid game configuration: {msg}"))?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        logging::init_file_logging(path)?;
    }

    let config = cli.game_config()?;

    let mut human_mode = HumanMode::new(config);
    human_mode.run().await?;

    Ok(())
}
