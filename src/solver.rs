//! Path finding strategies and the solution report

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use itertools::Itertools;
use log::debug;

use crate::bfs::{self, reconstruct};
use crate::error::Result;
use crate::grid::{Cell, Grid};

/// Search algorithm used to walk from start to end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Solver {
    /// Breadth-first search, shortest path
    #[default]
    Bfs,
    /// Depth-first search, some path
    Dfs,
    /// A* with Manhattan heuristic, shortest path
    Astar,
}

impl Solver {
    /// Whether the returned paths are guaranteed to be shortest
    pub fn is_shortest(self) -> bool {
        !matches!(self, Solver::Dfs)
    }

    /// Path from `start` to `end`, both included.
    ///
    /// Every strategy fails with [crate::MazeError::InvalidCoordinate] for an
    /// endpoint outside the grid or on a wall and with
    /// [crate::MazeError::Unreachable] if no path exists.
    pub fn solve(self, grid: &Grid, start: Cell, end: Cell) -> Result<Vec<Cell>> {
        match self {
            Solver::Bfs => bfs::find_path(grid, start, end),
            Solver::Dfs => dfs_path(grid, start, end),
            Solver::Astar => astar_path(grid, start, end),
        }
    }
}

/// Depth-first search with an explicit stack.
///
/// Neighbours are pushed in canonical order, so the last one (left) is
/// explored first. The result is a simple path but usually not the
/// shortest.
fn dfs_path(grid: &Grid, start: Cell, end: Cell) -> Result<Vec<Cell>> {
    grid.require_open(start)?;
    grid.require_open(end)?;
    if start == end {
        return Ok(vec![start]);
    }

    let mut parent: Vec<Option<Cell>> = vec![None; grid.cell_count()];
    let mut seen = vec![false; grid.cell_count()];
    let mut stack = vec![start];
    if let Some(si) = grid.index(start) {
        seen[si] = true;
    }

    while let Some(current) = stack.pop() {
        if current == end {
            break;
        }
        for next in grid.neighbors(current) {
            let Some(ni) = grid.index(next) else {
                continue;
            };
            if seen[ni] {
                continue;
            }
            seen[ni] = true;
            parent[ni] = Some(current);
            stack.push(next);
        }
    }

    let path = reconstruct(grid, &parent, start, end)?;
    debug!("DFS path {} -> {}: {} steps", start, end, path.len() - 1);
    Ok(path)
}

/// A* search with the Manhattan distance as heuristic.
///
/// Open-set ties on `f` go to the entry pushed first.
fn astar_path(grid: &Grid, start: Cell, end: Cell) -> Result<Vec<Cell>> {
    grid.require_open(start)?;
    grid.require_open(end)?;
    if start == end {
        return Ok(vec![start]);
    }

    let mut parent: Vec<Option<Cell>> = vec![None; grid.cell_count()];
    let mut g_score: Vec<Option<usize>> = vec![None; grid.cell_count()];
    let mut closed = vec![false; grid.cell_count()];
    let mut open = BinaryHeap::new();
    let mut pushed = 0usize;

    if let Some(si) = grid.index(start) {
        g_score[si] = Some(0);
    }
    open.push(Reverse((start.manhattan(end), pushed, start)));

    while let Some(Reverse((_, _, current))) = open.pop() {
        let Some(ci) = grid.index(current) else {
            continue;
        };
        // Stale entry
        if closed[ci] {
            continue;
        }
        if current == end {
            break;
        }
        closed[ci] = true;

        let Some(current_g) = g_score[ci] else {
            continue;
        };
        for next in grid.neighbors(current) {
            let Some(ni) = grid.index(next) else {
                continue;
            };
            let tentative_g = current_g + 1;
            if g_score[ni].is_some_and(|g| tentative_g >= g) {
                continue;
            }
            g_score[ni] = Some(tentative_g);
            parent[ni] = Some(current);
            pushed += 1;
            open.push(Reverse((tentative_g + next.manhattan(end), pushed, next)));
        }
    }

    let path = reconstruct(grid, &parent, start, end)?;
    debug!("A* path {} -> {}: {} steps", start, end, path.len() - 1);
    Ok(path)
}

/// Route from the maze's start to its end
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// Strategy that produced the path
    pub solver: Solver,
    /// The cells walked, including start & end
    pub path: Vec<Cell>,
}

impl Solution {
    /// Solve `grid` from its start to its end cell.
    pub fn solve(grid: &Grid, solver: Solver) -> Result<Self> {
        let path = solver.solve(grid, grid.start(), grid.end())?;
        Ok(Solution { solver, path })
    }

    /// Number of moves
    pub fn steps(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// `(r,c) -> (r,c) -> ...`
    pub fn path_string(&self) -> String {
        self.path.iter().join(" -> ")
    }

    pub fn report(&self) -> String {
        if self.solver.is_shortest() {
            format!("The shortest path is {} steps.", self.steps())
        } else {
            format!("Depth-first search found a path of {} steps.", self.steps())
        }
    }

    /// Print report
    pub fn print_report(&self) {
        println!("{}", self.report());
    }
}
