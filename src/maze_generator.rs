//! Maze generation

use log::{debug, trace};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::bfs;
use crate::error::Result;
use crate::grid::{Cell, Direction, Grid};

/// Randomized depth-first maze carver.
///
/// Rooms sit on the lattice of even (row, col) coordinates; the cells
/// between two rooms are walls until the carver passes through them.
pub struct MazeGenerator {
    random: StdRng,
}

impl MazeGenerator {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            random: if let Some(state) = seed {
                StdRng::seed_from_u64(state)
            } else {
                StdRng::from_entropy()
            },
        }
    }

    /// Generate a perfect maze (exactly one route between any two open
    /// cells) of `rows` x `cols` cells.
    ///
    /// Start is the top-left cell. End is the open cell farthest from the
    /// start, see [bfs::select_goal].
    ///
    /// Returns [crate::MazeError::InvalidDimension] if either dimension is 0.
    pub fn generate_maze(&mut self, rows: usize, cols: usize) -> Result<Grid> {
        let mut grid = Grid::new(rows, cols)?;
        let start = grid.start();

        self.carve_passages(&mut grid, start);
        Self::open_trailing_strip(&mut grid);

        let (end, distances) = bfs::select_goal(&grid, start)?;
        debug!(
            "Generated {}x{} maze: {} open cells, end {} at distance {}",
            rows,
            cols,
            grid.open_count(),
            end,
            distances.get(end).unwrap_or_default()
        );
        grid.with_end(end)
    }

    /// Carve passages from `start` with an explicit stack.
    ///
    /// The top of the stack is the current room. It moves to a random
    /// unvisited room two cells away, opening the wall in between, or is
    /// popped when no such room is left.
    fn carve_passages(&mut self, grid: &mut Grid, start: Cell) {
        let mut stack = vec![start];

        while let Some(&current) = stack.last() {
            let candidates = Self::unvisited_rooms(grid, current);
            match candidates.choose(&mut self.random) {
                Some(&(wall, next)) => {
                    trace!("Carve {} -> {}", current, next);
                    grid.carve(wall);
                    grid.carve(next);
                    stack.push(next);
                }
                None => {
                    stack.pop();
                }
            }
        }
    }

    /// Rooms two steps away from `room` that are still walls, paired with
    /// the wall cell in between. Listed in [Direction::ALL] order.
    fn unvisited_rooms(grid: &Grid, room: Cell) -> Vec<(Cell, Cell)> {
        Direction::ALL
            .into_iter()
            .filter_map(|d| {
                let wall = room.step(d)?;
                let next = wall.step(d)?;
                (grid.contains(next) && grid.is_wall(next)).then_some((wall, next))
            })
            .collect()
    }

    /// With an even number of rows (columns) the last row (column) has no
    /// rooms. Give every room next to it a one-cell dead end into the strip.
    ///
    /// Dead ends only touch their own room, so the maze stays a tree.
    fn open_trailing_strip(grid: &mut Grid) {
        let (rows, cols) = (grid.rows(), grid.cols());
        if rows % 2 == 0 {
            for col in (0..cols).step_by(2) {
                grid.carve(Cell::new(rows - 1, col));
            }
        }
        if cols % 2 == 0 {
            for row in (0..rows).step_by(2) {
                grid.carve(Cell::new(row, cols - 1));
            }
        }
    }
}
