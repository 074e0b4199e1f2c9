//! Player: replays a recorded lizard run.
//!
//! Treats a `PlayablePresentation` as an immutable script of cell frames and
//! plays it back at its recorded rate, with pause, stepping and seeking.

use std::time::{Duration, Instant};

use anyhow::{Result, bail, ensure};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};

use crate::menubar::render_menubar;
use crate::screen::{CANVAS_OFFSET, Screen, draw_frame, draw_grid, draw_status};
use crate::types::{Cell, CellChange, Frame, PlayablePresentation};

const MENU: &[&str] = &["[Space] play/pause", "[←][→] step", "[Home][End] jump", "[q][Esc] quit"];

/// What a key press asks the player to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    TogglePlay,
    Step,
    Back,
    First,
    Last,
}

impl Command {
    pub fn from_key(code: KeyCode) -> Option<Command> {
        Some(match code {
            KeyCode::Char('q') | KeyCode::Esc => Command::Quit,
            KeyCode::Char(' ') => Command::TogglePlay,
            KeyCode::Right => Command::Step,
            KeyCode::Left => Command::Back,
            KeyCode::Home => Command::First,
            KeyCode::End => Command::Last,
            _ => return None,
        })
    }
}

pub struct Player {
    recording: PlayablePresentation,
    position: usize,
    grid: Vec<Vec<Cell>>,
    playing: bool,
}

impl Player {
    pub fn new(recording: PlayablePresentation) -> Self {
        let grid = blank_grid(&recording);
        Player { recording, position: 0, grid, playing: true }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn grid(&self) -> &[Vec<Cell>] {
        &self.grid
    }

    fn last_index(&self) -> usize {
        self.recording.frames.len().saturating_sub(1)
    }

    pub fn play(&mut self) -> Result<()> {
        ensure!(!self.recording.frames.is_empty(), "Recording has no frames");
        let (term_w, term_h) = crossterm::terminal::size()?;
        let contract = self.recording.contract;
        // Menu bar above the canvas, status line below it.
        let need_h = contract.height + CANVAS_OFFSET + 1;
        if term_w < contract.width || term_h < need_h {
            bail!(
                "Terminal too small: recording needs {}x{}, have {}x{}",
                contract.width,
                need_h,
                term_w,
                term_h,
            );
        }
        log::info!(
            "playing {} frames at {} fps",
            self.recording.frames.len(),
            self.recording.fps
        );

        let mut screen = Screen::enter(false)?;
        self.event_loop(&mut screen)
    }

    fn event_loop(&mut self, screen: &mut Screen) -> Result<()> {
        let interval = Duration::from_secs_f64(1.0 / self.recording.fps.max(1) as f64);
        self.seek(0);
        self.redraw(screen)?;

        let mut next_tick = Instant::now() + interval;
        loop {
            let timeout = next_tick.saturating_duration_since(Instant::now());
            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        let Some(command) = Command::from_key(key.code) else {
                            continue;
                        };
                        if command == Command::Quit {
                            break;
                        }
                        let before = self.position;
                        let seeked = self.apply(command);
                        if seeked {
                            draw_grid(screen.out(), &self.grid)?;
                        } else if self.position != before {
                            draw_frame(screen.out(), &self.recording.frames[self.position])?;
                        }
                        self.draw_status(screen)?;
                    }
                    Event::Resize(_, _) => {
                        screen.clear()?;
                        self.redraw(screen)?;
                    }
                    _ => {}
                }
                continue;
            }

            next_tick += interval;
            if self.playing {
                if self.advance() {
                    draw_frame(screen.out(), &self.recording.frames[self.position])?;
                } else {
                    self.playing = false;
                }
                self.draw_status(screen)?;
            }
        }
        Ok(())
    }

    /// Apply a navigation command. Returns true when the grid was rebuilt
    /// from scratch rather than advanced by one diff.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::Quit => false,
            Command::TogglePlay => {
                // Playing from the last frame restarts.
                if !self.playing && self.position == self.last_index() {
                    self.seek(0);
                    self.playing = true;
                    return true;
                }
                self.playing = !self.playing;
                false
            }
            Command::Step => {
                self.playing = false;
                self.advance();
                false
            }
            Command::Back => {
                self.playing = false;
                self.seek(self.position.saturating_sub(1));
                true
            }
            Command::First => {
                self.seek(0);
                true
            }
            Command::Last => {
                self.seek(self.last_index());
                true
            }
        }
    }

    /// Move one frame forward; false at the end of the recording.
    fn advance(&mut self) -> bool {
        if self.position >= self.last_index() {
            return false;
        }
        self.position += 1;
        apply_frame(&mut self.grid, &self.recording.frames[self.position]);
        true
    }

    /// Rebuild the grid by replaying frames `0..=target`.
    pub fn seek(&mut self, target: usize) {
        let target = target.min(self.last_index());
        self.grid = blank_grid(&self.recording);
        for frame in self.recording.frames.iter().take(target + 1) {
            apply_frame(&mut self.grid, frame);
        }
        self.position = target;
    }

    fn redraw(&self, screen: &mut Screen) -> Result<()> {
        render_menubar(screen.out(), 0, MENU)?;
        draw_grid(screen.out(), &self.grid)?;
        self.draw_status(screen)
    }

    pub fn status_line(&self) -> String {
        let state = if self.playing { "playing" } else { "paused" };
        format!(
            " Frame {}/{} @ {} fps | {state} ",
            self.position + 1,
            self.recording.frames.len(),
            self.recording.fps,
        )
    }

    fn draw_status(&self, screen: &mut Screen) -> Result<()> {
        let row = self.recording.contract.height + CANVAS_OFFSET;
        draw_status(screen.out(), row, &self.status_line())
    }
}

fn blank_grid(recording: &PlayablePresentation) -> Vec<Vec<Cell>> {
    let w = recording.contract.width as usize;
    let h = recording.contract.height as usize;
    vec![vec![Cell::default(); w]; h]
}

fn apply_frame(grid: &mut Vec<Vec<Cell>>, frame: &Frame) {
    match frame {
        Frame::Full { cells } => grid.clone_from(cells),
        Frame::Diff { changes } => apply_changes(grid, changes),
    }
}

fn apply_changes(grid: &mut [Vec<Cell>], changes: &[CellChange]) {
    for change in changes {
        let slot = grid
            .get_mut(change.y as usize)
            .and_then(|row| row.get_mut(change.x as usize));
        if let Some(cell) = slot {
            cell.clone_from(&change.cell);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Style, TerminalContract};

    fn cell(ch: char) -> Cell {
        Cell { ch, style: Style::default() }
    }

    fn recording() -> PlayablePresentation {
        PlayablePresentation {
            contract: TerminalContract { width: 2, height: 1 },
            fps: 10,
            frames: vec![
                Frame::Full { cells: vec![vec![cell('a'), cell('b')]] },
                Frame::Diff { changes: vec![CellChange { x: 1, y: 0, cell: cell('c') }] },
                Frame::Diff {
                    changes: vec![
                        CellChange { x: 0, y: 0, cell: cell('d') },
                        CellChange { x: 9, y: 9, cell: cell('!') },
                    ],
                },
            ],
        }
    }

    #[test]
    fn seek_replays_diffs_in_order() {
        let mut p = Player::new(recording());
        p.seek(0);
        assert_eq!(p.grid()[0], vec![cell('a'), cell('b')]);
        p.seek(2);
        assert_eq!(p.grid()[0], vec![cell('d'), cell('c')]);
        // Past the end clamps to the last frame.
        p.seek(99);
        assert_eq!(p.position(), 2);
        assert_eq!(p.grid()[0], vec![cell('d'), cell('c')]);
    }

    #[test]
    fn stepping_pauses_and_stops_at_the_end() {
        let mut p = Player::new(recording());
        p.seek(0);
        assert!(p.is_playing());
        assert!(!p.apply(Command::Step));
        assert!(!p.is_playing());
        assert_eq!(p.grid()[0], vec![cell('a'), cell('c')]);
        p.apply(Command::Step);
        p.apply(Command::Step);
        assert_eq!(p.position(), 2);

        assert!(p.apply(Command::Back));
        assert_eq!(p.position(), 1);
        assert_eq!(p.grid()[0], vec![cell('a'), cell('c')]);
    }

    #[test]
    fn play_at_end_restarts() {
        let mut p = Player::new(recording());
        p.apply(Command::Last);
        p.apply(Command::TogglePlay);
        assert!(!p.is_playing());
        assert!(p.apply(Command::TogglePlay));
        assert!(p.is_playing());
        assert_eq!(p.position(), 0);
        assert!(p.status_line().contains("Frame 1/3"));
    }

    #[test]
    fn keys_map_to_commands() {
        assert_eq!(Command::from_key(KeyCode::Esc), Some(Command::Quit));
        assert_eq!(Command::from_key(KeyCode::Char(' ')), Some(Command::TogglePlay));
        assert_eq!(Command::from_key(KeyCode::End), Some(Command::Last));
        assert_eq!(Command::from_key(KeyCode::Char('x')), None);
    }
}
