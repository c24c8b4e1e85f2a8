//! CLI for replaying a robot path on the terminal

use std::io;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use mazellm::{generate_maze, Cell, Playback, Renderer};

/// Animate a robot moving along a sequence of cells
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Board height (rows)
    #[arg(short = 'n', long, alias = "n", default_value_t = 8)]
    rows: usize,

    /// Board width (columns)
    #[arg(short = 'm', long, alias = "m", default_value_t = 8)]
    cols: usize,

    /// Milliseconds between steps
    #[arg(short, long, default_value_t = 100)]
    interval: u64,

    /// Draw a maze generated with this seed; every cell of the path must
    /// then be walkable
    #[arg(long, env = "MAZELLM_SEED")]
    seed: Option<u64>,

    /// Sequence of cells, e.g. `0,0 0,1 1,1`
    #[arg(required = true)]
    path: Vec<Cell>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let playback = match args.seed {
        Some(seed) => {
            let grid = generate_maze(args.rows, args.cols, Some(seed))
                .with_context(|| format!("Could not generate a {}x{} maze", args.rows, args.cols))?;
            Playback::on_grid(&grid, args.path)?
        }
        None => Playback::new(args.rows, args.cols, args.path)?,
    };

    Renderer::new(io::stdout().lock(), Duration::from_millis(args.interval))
        .play(&playback)
        .context("Could not draw on the terminal")
}
