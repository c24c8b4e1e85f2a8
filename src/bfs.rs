//! Breadth-first search: distance maps, goal selection and shortest paths
//!
//! Neighbours are always expanded in [Direction::ALL] order (up, right,
//! down, left), so for a given grid every function here returns the same
//! answer on every call.
//!
//! [Direction::ALL]: crate::Direction::ALL

use std::collections::VecDeque;
use std::iter;

use log::debug;

use crate::error::{MazeError, Result};
use crate::grid::{Cell, Grid};

/// Hop counts from a source cell, recorded in visiting order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMap {
    source: Cell,
    rows: usize,
    cols: usize,
    distances: Vec<Option<usize>>,
    order: Vec<Cell>,
}

impl DistanceMap {
    pub fn source(&self) -> Cell {
        self.source
    }

    /// Distance of `cell` from the source, `None` if it was not reached.
    pub fn get(&self, cell: Cell) -> Option<usize> {
        if cell.row >= self.rows || cell.col >= self.cols {
            return None;
        }
        self.distances
            .get(cell.row * self.cols + cell.col)
            .copied()
            .flatten()
    }

    /// Cells in the order the search dequeued them
    pub fn order(&self) -> &[Cell] {
        &self.order
    }

    /// Number of cells reached, the source included
    pub fn reached(&self) -> usize {
        self.order.len()
    }

    /// `(cell, distance)` pairs in visiting order
    pub fn iter(&self) -> impl Iterator<Item = (Cell, usize)> + '_ {
        self.order
            .iter()
            .filter_map(|&cell| self.get(cell).map(|d| (cell, d)))
    }

    /// The cell with the largest distance. On ties the one visited first
    /// wins.
    pub fn farthest(&self) -> (Cell, usize) {
        self.iter()
            .fold((self.source, 0), |best, (cell, d)| {
                if d > best.1 {
                    (cell, d)
                } else {
                    best
                }
            })
    }
}

/// Breadth-first search from `start`, recording the distance of every
/// reachable open cell.
///
/// Returns [MazeError::InvalidCoordinate] if `start` is outside the grid or
/// a wall.
pub fn distance_map(grid: &Grid, start: Cell) -> Result<DistanceMap> {
    grid.require_open(start)?;

    let mut distances = vec![None; grid.cell_count()];
    let mut order = Vec::with_capacity(grid.open_count());
    let mut queue = VecDeque::from([start]);
    if let Some(si) = grid.index(start) {
        distances[si] = Some(0);
    }

    while let Some(current) = queue.pop_front() {
        order.push(current);
        let Some(current_dist) = grid.index(current).and_then(|i| distances[i]) else {
            continue;
        };

        for next in grid.neighbors(current) {
            let Some(ni) = grid.index(next) else {
                continue;
            };
            if distances[ni].is_some() {
                continue;
            }
            distances[ni] = Some(current_dist + 1);
            queue.push_back(next);
        }
    }

    Ok(DistanceMap {
        source: start,
        rows: grid.rows(),
        cols: grid.cols(),
        distances,
        order,
    })
}

/// Pick the end cell: the open cell farthest from `start`.
///
/// Ties go to the cell dequeued first. The grid must be fully connected
/// from `start`; an open cell the search never reached is reported as
/// [MazeError::Unreachable].
///
/// # Examples
/// ```
/// use mazellm::{select_goal, Cell, Grid};
///
/// let grid = Grid::parse_emojis("🤖🟩🟩\n🟫🟫❎").unwrap();
/// let (end, distances) = select_goal(&grid, grid.start()).unwrap();
/// assert_eq!(end, Cell::new(1, 2));
/// assert_eq!(distances.get(end), Some(3));
/// ```
pub fn select_goal(grid: &Grid, start: Cell) -> Result<(Cell, DistanceMap)> {
    let distances = distance_map(grid, start)?;

    if let Some(orphan) = grid.open_cells().find(|&c| distances.get(c).is_none()) {
        return Err(MazeError::Unreachable {
            from: start,
            to: orphan,
        });
    }

    let (end, distance) = distances.farthest();
    debug!("Goal {} at distance {} from {}", end, distance, start);
    Ok((end, distances))
}

/// Shortest 4-connected path from `start` to `end`, both included.
///
/// Each cell records the neighbour it was discovered from; the path is read
/// back from `end`. Start == end yields a single-cell path.
///
/// Returns [MazeError::InvalidCoordinate] for an endpoint outside the grid or
/// on a wall and [MazeError::Unreachable] if no path exists.
///
/// # Examples
/// ```
/// use mazellm::{find_path, Cell, Grid};
///
/// let grid = Grid::parse_emojis("🤖🟩🟩\n🟫🟫❎").unwrap();
/// let path = find_path(&grid, grid.start(), grid.end()).unwrap();
/// assert_eq!(
///     path,
///     vec![Cell::new(0, 0), Cell::new(0, 1), Cell::new(0, 2), Cell::new(1, 2)]
/// );
/// ```
pub fn find_path(grid: &Grid, start: Cell, end: Cell) -> Result<Vec<Cell>> {
    grid.require_open(start)?;
    grid.require_open(end)?;
    if start == end {
        return Ok(vec![start]);
    }

    let mut parent: Vec<Option<Cell>> = vec![None; grid.cell_count()];
    let mut seen = vec![false; grid.cell_count()];
    let mut queue = VecDeque::from([start]);
    if let Some(si) = grid.index(start) {
        seen[si] = true;
    }

    while let Some(current) = queue.pop_front() {
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
            queue.push_back(next);
        }
    }

    let path = reconstruct(grid, &parent, start, end)?;
    debug!("BFS path {} -> {}: {} steps", start, end, path.len() - 1);
    Ok(path)
}

/// Follow `parent` links back from `end` and return the path start-first.
pub(crate) fn reconstruct(
    grid: &Grid,
    parent: &[Option<Cell>],
    start: Cell,
    end: Cell,
) -> Result<Vec<Cell>> {
    let unreachable = MazeError::Unreachable {
        from: start,
        to: end,
    };
    if end != start && grid.index(end).and_then(|i| parent[i]).is_none() {
        return Err(unreachable);
    }

    let mut path: Vec<Cell> =
        iter::successors(Some(end), |&c| grid.index(c).and_then(|i| parent[i])).collect();
    path.reverse();

    if path.first() != Some(&start) {
        return Err(unreachable);
    }
    Ok(path)
}

#[cfg(test)]
pub(crate) mod tests {
    use itertools::Itertools;

    use super::*;
    use crate::grid::tests::SAMPLE;
    use crate::maze_generator::MazeGenerator;

    fn sample() -> Grid {
        Grid::parse_emojis(SAMPLE.trim()).unwrap()
    }

    pub(crate) fn assert_valid_path(grid: &Grid, path: &[Cell], start: Cell, end: Cell) {
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&end));
        assert!(path.iter().all(|&c| grid.is_open(c)));
        for (a, b) in path.iter().tuple_windows() {
            assert_eq!(a.manhattan(*b), 1, "{a} -> {b} is not a single step");
        }
        assert_eq!(path.iter().unique().count(), path.len(), "path revisits a cell");
    }

    #[test]
    fn shortest_path_on_sample_maze() {
        let grid = sample();
        let path = find_path(&grid, grid.start(), grid.end()).unwrap();

        assert_valid_path(&grid, &path, grid.start(), grid.end());
        // Down the left side, up the middle and down the right side
        assert_eq!(path.len(), 17);
        assert_eq!(path[4], Cell::new(4, 0));
        assert_eq!(path[10], Cell::new(0, 2));
    }

    #[test]
    fn unreachable_end_is_an_error() {
        let grid = Grid::parse_emojis(
            "
🤖🟫🟩🟩🟩
🟩🟫🟩🟫🟩
🟩🟫🟩🟫🟩
🟩🟫🟩🟫🟫
🟩🟩🟩🟫❎"
                .trim(),
        )
        .unwrap();

        assert_eq!(
            find_path(&grid, grid.start(), grid.end()),
            Err(MazeError::Unreachable {
                from: Cell::new(0, 0),
                to: Cell::new(4, 4)
            })
        );
    }

    #[test]
    fn endpoints_must_be_open_and_in_bounds() {
        let grid = sample();
        assert!(matches!(
            find_path(&grid, grid.start(), Cell::new(0, 1)),
            Err(MazeError::InvalidCoordinate { .. })
        ));
        assert!(matches!(
            find_path(&grid, Cell::new(7, 0), grid.end()),
            Err(MazeError::InvalidCoordinate { .. })
        ));
        assert!(matches!(
            distance_map(&grid, Cell::new(1, 1)),
            Err(MazeError::InvalidCoordinate { .. })
        ));
    }

    #[test]
    fn same_start_and_end() {
        let grid = Grid::open(1, 1).unwrap();
        let (end, distances) = select_goal(&grid, grid.start()).unwrap();

        assert_eq!(end, Cell::new(0, 0));
        assert_eq!(distances.get(end), Some(0));
        assert_eq!(find_path(&grid, end, end).unwrap(), vec![Cell::new(0, 0)]);
    }

    #[test]
    fn distance_map_on_sample_maze() {
        let grid = sample();
        let distances = distance_map(&grid, grid.start()).unwrap();

        assert_eq!(distances.reached(), 17);
        assert_eq!(distances.get(Cell::new(0, 0)), Some(0));
        assert_eq!(distances.get(Cell::new(4, 2)), Some(6));
        assert_eq!(distances.get(Cell::new(4, 4)), Some(16));
        assert_eq!(distances.get(Cell::new(0, 1)), None);
        assert_eq!(distances.get(Cell::new(0, 9)), None);
        assert_eq!(distances.get(Cell::new(5, 0)), None);
        assert_eq!(distances.order()[0], grid.start());
    }

    #[test]
    fn rows_past_the_grid_have_no_distance() {
        let grid = Grid::open(3, 2).unwrap();
        let distances = distance_map(&grid, grid.start()).unwrap();

        assert_eq!(distances.get(Cell::new(2, 1)), Some(3));
        assert_eq!(distances.get(Cell::new(3, 0)), None);
        // Would wrap to index 0 without the row check
        assert_eq!(distances.get(Cell::new(1 << (usize::BITS - 1), 0)), None);
    }

    #[test]
    fn goal_ties_go_to_first_visited() {
        // Visiting order from (0,1): (0,2) (1,1) (0,0), then (1,2) (1,0)
        let grid = Grid::open(2, 3).unwrap();
        let (end, distances) = select_goal(&grid, Cell::new(0, 1)).unwrap();

        assert_eq!(end, Cell::new(1, 2));
        assert_eq!(distances.get(Cell::new(1, 0)), Some(2));

        let corridor = Grid::open(1, 3).unwrap();
        let (end, _) = select_goal(&corridor, Cell::new(0, 1)).unwrap();
        assert_eq!(end, Cell::new(0, 2));
    }

    #[test]
    fn orphaned_open_cell_is_detected() {
        let grid = Grid::parse_emojis("🤖🟫🟩\n🟩🟫❎").unwrap();
        assert_eq!(
            select_goal(&grid, grid.start()).map(|(end, _)| end),
            Err(MazeError::Unreachable {
                from: Cell::new(0, 0),
                to: Cell::new(0, 2)
            })
        );
    }

    #[test]
    fn path_ties_follow_neighbour_order() {
        let grid = Grid::open(2, 2).unwrap();
        let path = find_path(&grid, Cell::new(0, 0), Cell::new(1, 1)).unwrap();
        assert_eq!(
            path,
            vec![Cell::new(0, 0), Cell::new(0, 1), Cell::new(1, 1)]
        );
    }

    #[test]
    fn path_length_matches_goal_distance() {
        for seed in 0..30 {
            for (rows, cols) in [(1, 1), (2, 2), (4, 4), (8, 8), (7, 12), (20, 20)] {
                let grid = MazeGenerator::new(Some(seed))
                    .generate_maze(rows, cols)
                    .unwrap();
                let (end, distances) = select_goal(&grid, grid.start()).unwrap();
                assert_eq!(end, grid.end());

                let path = find_path(&grid, grid.start(), end).unwrap();
                assert_valid_path(&grid, &path, grid.start(), end);
                assert_eq!(Some(path.len() - 1), distances.get(end));
            }
        }
    }

    #[test]
    fn find_path_is_idempotent() {
        let grid = MazeGenerator::new(Some(5)).generate_maze(12, 12).unwrap();
        let first = find_path(&grid, grid.start(), grid.end()).unwrap();
        let second = find_path(&grid, grid.start(), grid.end()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn eight_by_eight_path_respects_lower_bound() {
        let grid = MazeGenerator::new(Some(8)).generate_maze(8, 8).unwrap();
        let path = find_path(&grid, Cell::new(0, 0), grid.end()).unwrap();

        assert_valid_path(&grid, &path, grid.start(), grid.end());
        assert!(path.len() - 1 >= grid.start().manhattan(grid.end()));
        assert!(path.len() - 1 >= grid.start().chebyshev(grid.end()));
    }
}
