//! Terminal surface shared by the live demo and the player.
//!
//! `Screen` owns raw mode and the alternate screen for its lifetime and puts
//! the terminal back when dropped, so an early `?` return cannot leave the
//! shell in raw mode. The free functions write cells to any `Write`.

use std::io::{self, Write};

use anyhow::{Context, Result};
use crossterm::terminal::{BeginSynchronizedUpdate, EndSynchronizedUpdate};
use crossterm::{cursor, event, execute, queue, style, terminal};

use crate::types::{Cell, Color, Frame, Style};

/// Rows reserved above the canvas for the menu bar.
pub const CANVAS_OFFSET: u16 = 1;

pub struct Screen {
    out: io::Stdout,
    mouse: bool,
    fullscreen: bool,
}

impl Screen {
    /// Enter raw mode on the alternate screen, optionally capturing the mouse.
    pub fn enter(mouse: bool) -> Result<Self> {
        terminal::enable_raw_mode().context("Failed to enable raw mode")?;
        // From here on, dropping `screen` restores the terminal.
        let mut screen = Screen { out: io::stdout(), mouse, fullscreen: false };
        execute!(
            screen.out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(terminal::ClearType::All),
        )?;
        if mouse {
            execute!(screen.out, event::EnableMouseCapture)?;
        }
        Ok(screen)
    }

    pub fn out(&mut self) -> &mut io::Stdout {
        &mut self.out
    }

    pub fn clear(&mut self) -> Result<()> {
        execute!(self.out, terminal::Clear(terminal::ClearType::All))?;
        Ok(())
    }

    /// Ask the emulator to maximise (xterm window op 10).
    pub fn toggle_fullscreen(&mut self) -> Result<()> {
        self.fullscreen = !self.fullscreen;
        let seq: &[u8] = if self.fullscreen { b"\x1b[10;1t" } else { b"\x1b[10;0t" };
        self.out.write_all(seq)?;
        self.out.flush()?;
        Ok(())
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        if self.fullscreen {
            let _ = self.out.write_all(b"\x1b[10;0t");
        }
        if self.mouse {
            let _ = execute!(self.out, event::DisableMouseCapture);
        }
        let _ = execute!(self.out, cursor::Show, terminal::LeaveAlternateScreen);
        if let Err(e) = terminal::disable_raw_mode() {
            log::error!("failed to disable raw mode: {e}");
        }
    }
}

// ---------------------------------------------------------------------------
// Cell output
// ---------------------------------------------------------------------------

fn queue_cell(out: &mut impl Write, x: u16, y: u16, cell: &Cell) -> Result<()> {
    let cs = to_content_style(&cell.style);
    queue!(
        out,
        cursor::MoveTo(x, y + CANVAS_OFFSET),
        style::PrintStyledContent(style::StyledContent::new(cs, cell.ch)),
    )?;
    Ok(())
}

/// Draw every cell of `grid` below the menu bar.
pub fn draw_grid(out: &mut impl Write, grid: &[Vec<Cell>]) -> Result<()> {
    queue!(out, BeginSynchronizedUpdate)?;
    for (y, row) in grid.iter().enumerate() {
        for (x, cell) in row.iter().enumerate() {
            queue_cell(out, x as u16, y as u16, cell)?;
        }
    }
    queue!(out, style::ResetColor, EndSynchronizedUpdate)?;
    out.flush()?;
    Ok(())
}

/// Draw a frame. A diff touches only its changed cells.
pub fn draw_frame(out: &mut impl Write, frame: &Frame) -> Result<()> {
    match frame {
        Frame::Full { cells } => draw_grid(out, cells),
        Frame::Diff { changes } => {
            queue!(out, BeginSynchronizedUpdate)?;
            for change in changes {
                queue_cell(out, change.x, change.y, &change.cell)?;
            }
            queue!(out, style::ResetColor, EndSynchronizedUpdate)?;
            out.flush()?;
            Ok(())
        }
    }
}

/// Dimmed one-line status at terminal row `row`.
pub fn draw_status(out: &mut impl Write, row: u16, text: &str) -> Result<()> {
    let mut cs = style::ContentStyle::default();
    cs.attributes.set(style::Attribute::Dim);
    queue!(
        out,
        cursor::MoveTo(0, row),
        terminal::Clear(terminal::ClearType::CurrentLine),
        style::PrintStyledContent(style::StyledContent::new(cs, text)),
    )?;
    out.flush()?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Style conversion
// ---------------------------------------------------------------------------

pub fn to_content_style(s: &Style) -> style::ContentStyle {
    style::ContentStyle {
        foreground_color: s.fg.map(truecolor),
        background_color: s.bg.map(truecolor),
        ..Default::default()
    }
}

pub fn truecolor(c: Color) -> style::Color {
    style::Color::Rgb { r: c.r, g: c.g, b: c.b }
}
