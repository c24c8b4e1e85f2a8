//! Grid model: walls, open cells and the two designated cells

use std::fmt;
use std::str::FromStr;

use itertools::Itertools;

use crate::error::{MazeError, Result};

/// Location in the maze, 0-indexed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Cell { row, col }
    }

    /// Neighbouring cell one step towards `direction`.
    ///
    /// Returns `None` when the step would leave the non-negative quadrant;
    /// the upper bounds are checked by [Grid::contains].
    pub fn step(self, direction: Direction) -> Option<Cell> {
        let (dr, dc) = direction.delta();
        Some(Cell {
            row: self.row.checked_add_signed(dr)?,
            col: self.col.checked_add_signed(dc)?,
        })
    }

    /// Manhattan (L1) distance between two cells.
    pub fn manhattan(self, other: Cell) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// Chebyshev (L∞) distance between two cells.
    pub fn chebyshev(self, other: Cell) -> usize {
        self.row.abs_diff(other.row).max(self.col.abs_diff(other.col))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// Parse a `row,col` literal, e.g. `"2,3"`. Surrounding parentheses are
/// accepted so that [Cell]'s `Display` output parses back.
impl FromStr for Cell {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self> {
        let literal = s.trim().trim_start_matches('(').trim_end_matches(')');
        let (row, col) = literal
            .split_once(',')
            .ok_or_else(|| MazeError::InvalidLiteral(s.to_string()))?;
        let parse = |part: &str| {
            part.trim()
                .parse::<usize>()
                .map_err(|_| MazeError::InvalidLiteral(s.to_string()))
        };
        Ok(Cell::new(parse(row)?, parse(col)?))
    }
}

/// The four grid moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Canonical visiting order. Every search in this crate expands
    /// neighbours in this order, which makes tie-breaking reproducible.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// (row, col) offset of a single step
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
        }
    }

    /// Direction of the single step `from -> to`, if the cells are 4-adjacent.
    pub fn between(from: Cell, to: Cell) -> Option<Direction> {
        Self::ALL.into_iter().find(|&d| from.step(d) == Some(to))
    }

    pub const fn name(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Right => "right",
            Direction::Down => "down",
            Direction::Left => "left",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Rectangular maze of wall and open cells
///
/// Cells are stored row-major. The start and end cells are always open.
/// A grid handed out by [crate::MazeGenerator] is never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    open: Vec<bool>,
    start: Cell,
    end: Cell,
}

impl Grid {
    pub const S_WALL: char = '🟫';
    pub const S_OPEN: char = '🟩';
    pub const S_START: char = '🤖';
    pub const S_END: char = '❎';

    /// All-wall grid with only the top-left start cell open.
    ///
    /// Start and end both sit at (0,0) until an end is chosen.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        Self::filled(rows, cols, false)
    }

    /// Grid without any walls.
    pub fn open(rows: usize, cols: usize) -> Result<Self> {
        Self::filled(rows, cols, true)
    }

    fn filled(rows: usize, cols: usize, open: bool) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(MazeError::InvalidDimension { rows, cols });
        }
        let mut grid = Grid {
            rows,
            cols,
            open: vec![open; rows * cols],
            start: Cell::new(0, 0),
            end: Cell::new(0, 0),
        };
        grid.carve(grid.start);
        Ok(grid)
    }

    /// Parse maze representation from string
    ///
    /// - `emojis`: one line per row; `🟫` wall, `🟩` open, `🤖` start and
    ///   `❎` end. Start and end must appear exactly once.
    ///
    /// # Examples
    /// ```
    /// use mazellm::{Cell, Grid};
    ///
    /// let grid = Grid::parse_emojis("🤖🟩\n🟫❎").unwrap();
    /// assert_eq!(grid.end(), Cell::new(1, 1));
    /// ```
    pub fn parse_emojis(emojis: &str) -> Result<Self> {
        let squares: Vec<Vec<char>> = emojis.lines().map(|row| row.chars().collect()).collect();
        let rows = squares.len();
        let cols = squares.first().map_or(0, Vec::len);
        if rows == 0 || cols == 0 {
            return Err(MazeError::InvalidDimension { rows, cols });
        }

        let mut open = Vec::with_capacity(rows * cols);
        let mut start = None;
        let mut end = None;

        for (row, line) in squares.iter().enumerate() {
            if line.len() != cols {
                return Err(MazeError::RaggedRow {
                    line: row + 1,
                    found: line.len(),
                    expected: cols,
                });
            }
            for (col, c) in line.iter().enumerate() {
                match *c {
                    Self::S_WALL => open.push(false),
                    Self::S_OPEN => open.push(true),
                    Self::S_START if start.is_none() => {
                        start = Some(Cell::new(row, col));
                        open.push(true);
                    }
                    Self::S_END if end.is_none() => {
                        end = Some(Cell::new(row, col));
                        open.push(true);
                    }
                    val => {
                        return Err(MazeError::Parse {
                            line: row + 1,
                            column: col + 1,
                            found: val.to_string(),
                        })
                    }
                }
            }
        }

        Ok(Grid {
            rows,
            cols,
            open,
            start: start.ok_or(MazeError::MissingMarker("Start"))?,
            end: end.ok_or(MazeError::MissingMarker("End"))?,
        })
    }

    /// Emoji representation, the inverse of [Self::parse_emojis].
    ///
    /// When start and end coincide the start marker wins.
    pub fn to_emojis(&self) -> String {
        (0..self.rows)
            .map(|row| {
                (0..self.cols)
                    .map(|col| self.symbol(Cell::new(row, col)))
                    .join("")
            })
            .join("\n")
    }

    fn symbol(&self, cell: Cell) -> char {
        if cell == self.start {
            Self::S_START
        } else if cell == self.end {
            Self::S_END
        } else if self.is_open(cell) {
            Self::S_OPEN
        } else {
            Self::S_WALL
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn start(&self) -> Cell {
        self.start
    }

    pub fn end(&self) -> Cell {
        self.end
    }

    /// Total number of cells, walls included
    pub fn cell_count(&self) -> usize {
        self.open.len()
    }

    pub fn open_count(&self) -> usize {
        self.open.iter().filter(|&&o| o).count()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    /// Row-major index of `cell`, `None` when out of bounds.
    pub fn index(&self, cell: Cell) -> Option<usize> {
        self.contains(cell).then(|| cell.row * self.cols + cell.col)
    }

    pub fn is_open(&self, cell: Cell) -> bool {
        self.index(cell).is_some_and(|i| self.open[i])
    }

    /// Out-of-bounds cells count as walls.
    pub fn is_wall(&self, cell: Cell) -> bool {
        !self.is_open(cell)
    }

    /// Open, in-bounds neighbours of `cell` in [Direction::ALL] order.
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |d| cell.step(d))
            .filter(|&n| self.is_open(n))
    }

    /// Every cell with its walkable flag, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, bool)> + '_ {
        (0..self.rows)
            .cartesian_product(0..self.cols)
            .map(|(row, col)| Cell::new(row, col))
            .zip(self.open.iter().copied())
    }

    pub fn open_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.iter().filter_map(|(cell, open)| open.then_some(cell))
    }

    /// Check that `cell` lies inside the grid and is walkable.
    pub fn require_open(&self, cell: Cell) -> Result<()> {
        if !self.contains(cell) {
            Err(MazeError::invalid_coordinate(
                cell,
                format!("outside the {}x{} grid", self.rows, self.cols),
            ))
        } else if !self.is_open(cell) {
            Err(MazeError::invalid_coordinate(cell, "cell is a wall"))
        } else {
            Ok(())
        }
    }

    /// Same grid with a different end cell. The end must be open.
    pub fn with_end(mut self, end: Cell) -> Result<Self> {
        self.require_open(end)?;
        self.end = end;
        Ok(self)
    }

    /// Move both markers without checks; callers make sure they are open.
    pub(crate) fn with_markers(mut self, start: Cell, end: Cell) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    /// Mark `cell` open. Out-of-bounds cells are ignored.
    pub(crate) fn carve(&mut self, cell: Cell) {
        if let Some(i) = self.index(cell) {
            self.open[i] = true;
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_emojis())
    }
}
