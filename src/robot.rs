//! Robot bound to a maze: range sensor and straight-line moves

use std::iter;

use log::{trace, warn};

use crate::error::{MazeError, Result};
use crate::grid::{Cell, Direction, Grid};

/// Free cells in each direction before the first wall or the grid edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sensor {
    pub up: usize,
    pub right: usize,
    pub down: usize,
    pub left: usize,
}

impl Sensor {
    pub fn get(&self, direction: Direction) -> usize {
        match direction {
            Direction::Up => self.up,
            Direction::Right => self.right,
            Direction::Down => self.down,
            Direction::Left => self.left,
        }
    }
}

/// Robot walking an immutable grid
#[derive(Debug, Clone)]
pub struct Robot<'a> {
    grid: &'a Grid,
    position: Cell,
}

impl<'a> Robot<'a> {
    /// Place a robot on `position`, which must be an open cell.
    pub fn new(grid: &'a Grid, position: Cell) -> Result<Self> {
        grid.require_open(position)?;
        Ok(Robot { grid, position })
    }

    /// Robot standing on the grid's start cell
    pub fn at_start(grid: &'a Grid) -> Self {
        Robot {
            grid,
            position: grid.start(),
        }
    }

    pub fn position(&self) -> Cell {
        self.position
    }

    /// How far the robot could move in every direction.
    pub fn sensor(&self) -> Sensor {
        Sensor {
            up: self.scan(Direction::Up),
            right: self.scan(Direction::Right),
            down: self.scan(Direction::Down),
            left: self.scan(Direction::Left),
        }
    }

    fn scan(&self, direction: Direction) -> usize {
        iter::successors(self.position.step(direction), |c| c.step(direction))
            .take_while(|&c| self.grid.is_open(c))
            .count()
    }

    /// Move `cells` steps towards `direction`.
    ///
    /// Every cell on the way must be walkable. The move is all or nothing:
    /// on error the robot stays where it was. Zero cells is a no-op.
    pub fn move_by(&mut self, direction: Direction, cells: usize) -> Result<Cell> {
        let mut target = self.position;
        for _ in 0..cells {
            target = match target.step(direction) {
                Some(next) if self.grid.is_open(next) => next,
                Some(next) => {
                    warn!(
                        "Move {} {} from {} blocked at {}",
                        direction, cells, self.position, next
                    );
                    let reason = if self.grid.contains(next) {
                        "cell is a wall"
                    } else {
                        "outside the grid"
                    };
                    return Err(MazeError::invalid_coordinate(next, reason));
                }
                // Only up and left can step below zero; `target` is the
                // last cell on the grid, the rejected one lies beyond it.
                None => {
                    warn!(
                        "Move {} {} from {} leaves the grid",
                        direction, cells, self.position
                    );
                    let side = match direction {
                        Direction::Up => "above",
                        Direction::Right => "right of",
                        Direction::Down => "below",
                        Direction::Left => "left of",
                    };
                    return Err(MazeError::invalid_coordinate(
                        target,
                        format!("moving {direction} leaves the grid {side} this edge cell"),
                    ));
                }
            };
        }

        trace!("Move {} {}: {} -> {}", direction, cells, self.position, target);
        self.position = target;
        Ok(target)
    }

    /// Walk `path` one step at a time. The path must begin at the robot's
    /// position and consist of 4-adjacent cells.
    ///
    /// On error the robot stays on the last cell it reached.
    pub fn follow(&mut self, path: &[Cell]) -> Result<()> {
        match path.first() {
            None => return Err(MazeError::EmptyPath),
            Some(&first) if first != self.position => {
                return Err(MazeError::invalid_coordinate(
                    first,
                    format!("path does not begin at the robot position {}", self.position),
                ))
            }
            Some(_) => (),
        }

        for &next in &path[1..] {
            let direction = Direction::between(self.position, next).ok_or_else(|| {
                MazeError::invalid_coordinate(next, format!("not adjacent to {}", self.position))
            })?;
            self.move_by(direction, 1)?;
        }
        Ok(())
    }
}
