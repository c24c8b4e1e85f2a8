//! CLI for maze generation and solving

use anyhow::Context;
use clap::Parser;
use mazellm::{generate_maze, Solution, Solver};

/// Generate a random solvable maze and walk from start to the farthest cell
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Maze height (rows)
    #[arg(short = 'n', long, alias = "n", default_value_t = 15)]
    rows: usize,

    /// Maze width (columns)
    #[arg(short = 'm', long, alias = "m", default_value_t = 15)]
    cols: usize,

    /// Random seed
    #[arg(long, env = "MAZELLM_SEED")]
    seed: Option<u64>,

    /// Path finding algorithm
    #[arg(long, value_enum, default_value_t = Solver::Bfs)]
    solver: Solver,

    /// Animate the robot walking the path on the terminal
    #[arg(short, long)]
    playback: bool,

    /// Playback frame length in milliseconds
    #[arg(short, long, default_value_t = 300)]
    frame_length: u64,

    /// Print the coordinates of the path
    #[arg(long)]
    print_path: bool,
}

/// Generate maze, print output
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let grid = generate_maze(args.rows, args.cols, args.seed)
        .with_context(|| format!("Could not generate a {}x{} maze", args.rows, args.cols))?;
    let solution = Solution::solve(&grid, args.solver).context("Could not solve the maze")?;

    if args.playback {
        playback(&grid, &solution, args.frame_length)?;
    } else {
        println!("{grid}");
    }
    solution.print_report();
    if args.print_path {
        println!("{}", solution.path_string());
    }
    Ok(())
}

#[cfg(feature = "tui")]
fn playback(grid: &mazellm::Grid, solution: &Solution, frame_length: u64) -> anyhow::Result<()> {
    use std::{io, time::Duration};

    let playback = mazellm::Playback::on_grid(grid, solution.path.clone())?;
    mazellm::Renderer::new(io::stdout().lock(), Duration::from_millis(frame_length))
        .play(&playback)
        .context("Could not draw on the terminal")
}

#[cfg(not(feature = "tui"))]
fn playback(_: &mazellm::Grid, _: &Solution, _: u64) -> anyhow::Result<()> {
    anyhow::bail!("Playback needs the `tui` feature")
}
