//! Terminal renderer for a [Playback]

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use crossterm::QueueableCommand;

use crate::grid::Cell;
use crate::playback::{Frame, Playback, Tile};

/// Lines of history kept in the info panel
const INFO_LINES: usize = 20;
/// Columns between the board and the info panel
const GAP: u16 = 3;

/// Draws frames in place, the board on the left and the message log on
/// the right.
pub struct Renderer<W: Write> {
    out: W,
    interval: Duration,
    history: Vec<String>,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W, interval: Duration) -> Self {
        Renderer {
            out,
            interval,
            history: Vec::new(),
        }
    }

    /// Show every frame of `playback`, waiting one interval after the
    /// frames that ask for it. The last frame stays on screen.
    ///
    /// Boards whose layout does not fit terminal coordinates are rejected
    /// with [io::ErrorKind::InvalidInput] before anything is drawn.
    pub fn play(&mut self, playback: &Playback) -> io::Result<()> {
        let board = playback.board();
        let bottom = coord(board.rows().max(INFO_LINES + 1) + 1)?;
        Self::info_x(board.cols())?;

        self.out.queue(Hide)?;
        let result = playback
            .frames()
            .try_for_each(|frame| self.show(playback, &frame));
        self.out.queue(MoveTo(0, bottom))?.queue(Show)?;
        self.out.flush()?;
        result
    }

    fn show(&mut self, playback: &Playback, frame: &Frame) -> io::Result<()> {
        self.history.push(frame.message.clone());
        self.draw(playback, frame)?;
        if frame.pause {
            thread::sleep(self.interval);
        }
        Ok(())
    }

    fn draw(&mut self, playback: &Playback, frame: &Frame) -> io::Result<()> {
        let board = playback.board();
        let trail = playback.trail(frame);

        self.out.queue(Clear(ClearType::All))?.queue(MoveTo(0, 0))?;
        for row in 0..board.rows() {
            self.out.queue(MoveTo(0, coord(row)?))?;
            for col in 0..board.cols() {
                let tile = playback.tile(frame, &trail, Cell::new(row, col));
                let (symbol, color) = Self::glyph(tile);
                self.out
                    .queue(SetForegroundColor(color))?
                    .queue(Print(symbol))?;
            }
        }

        let info_x = Self::info_x(board.cols())?;
        self.out
            .queue(MoveTo(info_x, 0))?
            .queue(SetForegroundColor(Color::Magenta))?
            .queue(Print(format!("Info ({}x{} maze)", board.rows(), board.cols())))?
            .queue(ResetColor)?;
        let skip = self.history.len().saturating_sub(INFO_LINES);
        for (i, line) in self.history.iter().skip(skip).enumerate() {
            self.out
                .queue(MoveTo(info_x, coord(i + 1)?))?
                .queue(Print(line))?;
        }

        self.out.queue(ResetColor)?;
        self.out.flush()
    }

    /// Left edge of the info panel. Every board symbol is two columns wide.
    fn info_x(cols: usize) -> io::Result<u16> {
        coord(cols)?
            .checked_mul(2)
            .and_then(|x| x.checked_add(GAP))
            .ok_or_else(|| too_large(cols))
    }

    fn glyph(tile: Tile) -> (&'static str, Color) {
        match tile {
            Tile::Wall => ("██", Color::DarkYellow),
            Tile::Open => ("  ", Color::Reset),
            Tile::Start => ("S ", Color::Green),
            Tile::End => ("❎", Color::Green),
            Tile::Trail => ("··", Color::Cyan),
            Tile::Robot => ("🤖", Color::Red),
        }
    }
}

/// Terminal coordinate for a board row or column
fn coord(value: usize) -> io::Result<u16> {
    u16::try_from(value).map_err(|_| too_large(value))
}

fn too_large(value: usize) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidInput,
        format!("board dimension {value} does not fit on a terminal"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_board_and_log_into_any_writer() {
        let path = vec![Cell::new(0, 0), Cell::new(0, 1), Cell::new(1, 1)];
        let playback = Playback::new(2, 2, path).unwrap();

        let mut out = Vec::new();
        let mut renderer = Renderer::new(&mut out, Duration::ZERO);
        renderer.play(&playback).unwrap();
        assert_eq!(renderer.history.len(), playback.frames().count());

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Info (2x2 maze)"));
        assert!(text.contains("Moving to (1,1) ..."));
        assert!(text.contains("🤖"));
    }

    #[test]
    fn oversized_board_is_rejected_before_drawing() {
        // 40000 columns need 80003 terminal columns for the info panel
        let wide = Playback::new(1, 40_000, vec![Cell::new(0, 0)]).unwrap();
        let mut out = Vec::new();
        let err = Renderer::new(&mut out, Duration::ZERO)
            .play(&wide)
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(out.is_empty());

        let tall = Playback::new(70_000, 1, vec![Cell::new(0, 0)]).unwrap();
        let mut out = Vec::new();
        let err = Renderer::new(&mut out, Duration::ZERO)
            .play(&tall)
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(out.is_empty());
    }

    #[test]
    fn info_panel_sits_right_of_the_board() {
        assert_eq!(Renderer::<Vec<u8>>::info_x(2).unwrap(), 7);
        assert_eq!(Renderer::<Vec<u8>>::info_x(32_766).unwrap(), 65_535);
        assert!(Renderer::<Vec<u8>>::info_x(32_767).is_err());
        assert_eq!(coord(65_535).unwrap(), u16::MAX);
        assert!(coord(65_536).is_err());
    }
}
