//! Generate a random maze that is guaranteed to be solvable and find the
//! way through it
//!
//! The maze is carved by a randomized depth-first search from the top-left
//! start cell, so every open cell can be reached. The end is the open cell
//! farthest from the start, found with a breadth-first search; a second
//! breadth-first search gives the shortest path between the two.
//!
//! # Examples
//! ## Seeded maze
//! ```
//! use mazellm::{find_path, generate_maze, select_goal};
//!
//! let grid = generate_maze(9, 9, Some(7)).unwrap();
//! println!("{grid}");
//!
//! let (end, distances) = select_goal(&grid, grid.start()).unwrap();
//! assert_eq!(end, grid.end());
//!
//! let path = find_path(&grid, grid.start(), end).unwrap();
//! assert_eq!(Some(path.len() - 1), distances.get(end));
//! ```
//!
//! ## Hand-made maze
//! ```
//! use mazellm::{Grid, Solution, Solver};
//!
//! let maze_emojis = "
//! 🤖🟫🟩🟩🟩
//! 🟩🟫🟩🟫🟩
//! 🟩🟫🟩🟫🟩
//! 🟩🟫🟩🟫🟩
//! 🟩🟩🟩🟫❎";
//! let grid = Grid::parse_emojis(maze_emojis.trim()).unwrap();
//! let solution = Solution::solve(&grid, Solver::Bfs).unwrap();
//! solution.print_report();
//! assert_eq!(solution.steps(), 16);
//! ```

pub mod bfs;
pub mod error;
pub mod grid;
pub mod maze_generator;
pub mod playback;
#[cfg(feature = "tui")]
pub mod render;
pub mod robot;
pub mod solver;

pub use bfs::{distance_map, find_path, select_goal, DistanceMap};
pub use error::{MazeError, Result};
pub use grid::{Cell, Direction, Grid};
pub use maze_generator::MazeGenerator;
pub use playback::{Frame, Playback, Tile};
#[cfg(feature = "tui")]
pub use render::Renderer;
pub use robot::{Robot, Sensor};
pub use solver::{Solution, Solver};

/// Generate a `rows` x `cols` maze with start (0,0) and the farthest open
/// cell as end.
///
/// The same `seed` always gives the same maze; without a seed the system
/// entropy source is used.
///
/// Returns [MazeError::InvalidDimension] if either dimension is 0.
pub fn generate_maze(rows: usize, cols: usize, seed: Option<u64>) -> Result<Grid> {
    MazeGenerator::new(seed).generate_maze(rows, cols)
}
