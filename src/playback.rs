//! Frame stepper replaying a sequence of cells
//!
//! Rendering is left to the caller: a [Playback] only says where the robot
//! is, what to tell the user and which tile to draw where.

use std::collections::HashSet;
use std::iter;

use itertools::Itertools;

use crate::error::{MazeError, Result};
use crate::grid::{Cell, Grid};

/// One redraw of the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Robot position
    pub position: Cell,
    /// Index into the path of the cell the robot stands on
    pub step: usize,
    /// Line for the info panel
    pub message: String,
    /// Wait one interval after drawing this frame
    pub pause: bool,
}

impl Frame {
    fn arrived(step: usize, position: Cell) -> Self {
        Frame {
            position,
            step,
            message: format!("Current location {position}"),
            pause: false,
        }
    }
}

/// What to draw on a single board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Wall,
    Open,
    Start,
    End,
    /// Already walked by the robot
    Trail,
    Robot,
}

/// Precomputed replay of a path over a board
#[derive(Debug, Clone)]
pub struct Playback {
    board: Grid,
    path: Vec<Cell>,
}

impl Playback {
    /// Replay `path` on an open `rows` x `cols` board.
    ///
    /// The cells need not be adjacent; only bounds are checked. Start and end
    /// markers go on the first and last cell of the path.
    pub fn new(rows: usize, cols: usize, path: Vec<Cell>) -> Result<Self> {
        let (&first, &last) = path.first().zip(path.last()).ok_or(MazeError::EmptyPath)?;
        let board = Grid::open(rows, cols)?;
        for &cell in &path {
            board.require_open(cell)?;
        }
        Ok(Playback {
            board: board.with_markers(first, last),
            path,
        })
    }

    /// Replay `path` on a maze. Every cell of the path must be walkable.
    pub fn on_grid(grid: &Grid, path: Vec<Cell>) -> Result<Self> {
        if path.is_empty() {
            return Err(MazeError::EmptyPath);
        }
        for &cell in &path {
            grid.require_open(cell)?;
        }
        Ok(Playback {
            board: grid.clone(),
            path,
        })
    }

    pub fn board(&self) -> &Grid {
        &self.board
    }

    pub fn path(&self) -> &[Cell] {
        &self.path
    }

    /// Frames in display order.
    ///
    /// The robot first reports its location. Each following cell takes three
    /// frames: a pause while the next step is "found", the announced move
    /// and the arrival.
    pub fn frames(&self) -> impl Iterator<Item = Frame> + '_ {
        let first = Frame::arrived(0, self.path[0]);
        let moves = self
            .path
            .iter()
            .tuple_windows()
            .enumerate()
            .flat_map(|(step, (&from, &to))| {
                [
                    Frame {
                        position: from,
                        step,
                        message: "Finding next step ...".to_string(),
                        pause: true,
                    },
                    Frame {
                        position: from,
                        step,
                        message: format!("Moving to {to} ..."),
                        pause: false,
                    },
                    Frame::arrived(step + 1, to),
                ]
            });
        iter::once(first).chain(moves)
    }

    /// Cells walked so far when showing `frame`.
    pub fn trail(&self, frame: &Frame) -> HashSet<Cell> {
        self.path
            .iter()
            .take(frame.step + 1)
            .copied()
            .collect()
    }

    /// Tile at `cell` while showing `frame`. The robot covers everything,
    /// the end marker covers the trail.
    pub fn tile(&self, frame: &Frame, trail: &HashSet<Cell>, cell: Cell) -> Tile {
        if cell == frame.position {
            Tile::Robot
        } else if cell == self.board.end() {
            Tile::End
        } else if trail.contains(&cell) {
            Tile::Trail
        } else if cell == self.board.start() {
            Tile::Start
        } else if self.board.is_open(cell) {
            Tile::Open
        } else {
            Tile::Wall
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::tests::SAMPLE;

    fn cells(pairs: &[(usize, usize)]) -> Vec<Cell> {
        pairs.iter().map(|&(r, c)| Cell::new(r, c)).collect()
    }

    #[test]
    fn frames_announce_each_move() {
        let playback = Playback::new(8, 8, cells(&[(1, 1), (1, 2), (2, 2)])).unwrap();
        let frames = playback.frames().collect::<Vec<_>>();

        let messages = frames.iter().map(|f| f.message.as_str()).collect::<Vec<_>>();
        assert_eq!(
            messages,
            vec![
                "Current location (1,1)",
                "Finding next step ...",
                "Moving to (1,2) ...",
                "Current location (1,2)",
                "Finding next step ...",
                "Moving to (2,2) ...",
                "Current location (2,2)",
            ]
        );
        assert_eq!(frames.iter().filter(|f| f.pause).count(), 2);
        assert_eq!(frames[2].position, Cell::new(1, 1));
        assert_eq!(frames[3].position, Cell::new(1, 2));
        assert_eq!(frames.last().map(|f| f.step), Some(2));
    }

    #[test]
    fn single_cell_path_has_one_frame() {
        let playback = Playback::new(1, 1, cells(&[(0, 0)])).unwrap();
        assert_eq!(playback.frames().count(), 1);
    }

    #[test]
    fn arbitrary_sequences_only_need_to_be_on_the_board() {
        // Not adjacent, still fine on an open board
        assert!(Playback::new(4, 4, cells(&[(0, 0), (3, 3), (0, 3)])).is_ok());

        assert!(matches!(
            Playback::new(4, 4, cells(&[(0, 0), (4, 0)])),
            Err(MazeError::InvalidCoordinate { .. })
        ));
        assert_eq!(Playback::new(4, 4, vec![]).err(), Some(MazeError::EmptyPath));
        assert!(matches!(
            Playback::new(0, 4, cells(&[(0, 0)])),
            Err(MazeError::InvalidDimension { .. })
        ));
    }

    #[test]
    fn maze_playback_rejects_walls() {
        let grid = Grid::parse_emojis(SAMPLE.trim()).unwrap();
        assert!(matches!(
            Playback::on_grid(&grid, cells(&[(0, 0), (0, 1)])),
            Err(MazeError::InvalidCoordinate { .. })
        ));
        assert!(Playback::on_grid(&grid, cells(&[(0, 0), (1, 0)])).is_ok());
    }

    #[test]
    fn tiles_show_robot_trail_and_markers() {
        let grid = Grid::parse_emojis(SAMPLE.trim()).unwrap();
        let playback = Playback::on_grid(&grid, cells(&[(0, 0), (1, 0), (2, 0)])).unwrap();
        let frame = playback.frames().nth(3).unwrap();
        let trail = playback.trail(&frame);

        assert_eq!(frame.position, Cell::new(1, 0));
        assert_eq!(playback.tile(&frame, &trail, Cell::new(1, 0)), Tile::Robot);
        assert_eq!(playback.tile(&frame, &trail, Cell::new(0, 0)), Tile::Trail);
        assert_eq!(playback.tile(&frame, &trail, Cell::new(2, 0)), Tile::Open);
        assert_eq!(playback.tile(&frame, &trail, Cell::new(0, 1)), Tile::Wall);
        assert_eq!(playback.tile(&frame, &trail, Cell::new(4, 4)), Tile::End);

        let first = playback.frames().next().unwrap();
        let trail = playback.trail(&first);
        assert_eq!(playback.tile(&first, &trail, Cell::new(1, 0)), Tile::Open);
    }

    #[test]
    fn open_board_marks_path_ends() {
        let playback = Playback::new(3, 3, cells(&[(1, 1), (1, 2), (2, 2)])).unwrap();
        assert_eq!(playback.board().start(), Cell::new(1, 1));
        assert_eq!(playback.board().end(), Cell::new(2, 2));

        let first = playback.frames().next().unwrap();
        let trail = playback.trail(&first);
        assert_eq!(playback.tile(&first, &trail, Cell::new(2, 2)), Tile::End);
        assert_eq!(playback.tile(&first, &trail, Cell::new(0, 0)), Tile::Open);
    }
}
