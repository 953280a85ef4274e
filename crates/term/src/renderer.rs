//! TerminalRenderer: puts frames on a real terminal.
//!
//! The renderer owns two framebuffers. Views draw into the back buffer from
//! [`TerminalRenderer::frame`]; [`TerminalRenderer::present`] compares it with
//! what is on screen and rewrites, per row, the span between the first and last
//! changed cell. A snake tick usually touches the head, the tail, a food cell
//! and a few HUD digits, so most rows are skipped entirely.

use std::io::{self, Write};
use std::mem;

use anyhow::{Context, Result};
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::{
    Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal::{
    self, Clear, ClearType, DisableLineWrap, EnableLineWrap, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::{queue, QueueableCommand};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb, Weight};

pub struct TerminalRenderer<W: Write = io::Stdout> {
    out: W,
    /// What the terminal currently shows
    front: FrameBuffer,
    /// Frame being drawn
    back: FrameBuffer,
    stale: bool,
    buf: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            front: FrameBuffer::new(0, 0),
            back: FrameBuffer::new(0, 0),
            stale: true,
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    /// Raw mode and the alternate screen, cursor hidden.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("enable raw mode")?;
        self.buf.clear();
        queue!(self.buf, EnterAlternateScreen, Hide, DisableLineWrap)?;
        self.flush()
    }

    /// Undo [`TerminalRenderer::enter`].
    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        queue!(
            self.buf,
            ResetColor,
            SetAttribute(Attribute::Reset),
            EnableLineWrap,
            Show,
            LeaveAlternateScreen
        )?;
        self.flush()?;
        terminal::disable_raw_mode().context("disable raw mode")
    }

    /// Redraw everything on the next `present`, e.g. after a resize event.
    pub fn invalidate(&mut self) {
        self.stale = true;
    }

    /// Back buffer for the next frame. Views resize and clear it themselves.
    pub fn frame(&mut self) -> &mut FrameBuffer {
        &mut self.back
    }

    /// Write the back buffer to the terminal and make it the front buffer.
    pub fn present(&mut self) -> Result<()> {
        let resized = (self.front.width(), self.front.height())
            != (self.back.width(), self.back.height());

        self.buf.clear();
        if self.stale || resized {
            encode_full_into(&self.back, &mut self.buf)?;
            self.stale = false;
        } else {
            encode_diff_into(&self.front, &self.back, &mut self.buf)?;
        }
        self.flush()?;

        mem::swap(&mut self.front, &mut self.back);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        self.out
            .write_all(&self.buf)
            .context("write frame to terminal")?;
        self.out.flush().context("flush terminal")
    }
}

/// Clear the screen and print every row of `fb`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(Clear(ClearType::All))?;
    let mut painter = Painter::new(out);
    for y in 0..fb.height() {
        painter.run(0, y, fb.row(y))?;
    }
    painter.finish()
}

/// Print only the changed span of each row of `next`.
///
/// Frames of different sizes are treated as entirely changed.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let same_size = (prev.width(), prev.height()) == (next.width(), next.height());
    let mut painter = Painter::new(out);
    for y in 0..next.height() {
        let row = next.row(y);
        let span = if same_size {
            changed_span(prev.row(y), row)
        } else {
            Some((0, row.len()))
        };
        if let Some((start, end)) = span {
            painter.run(start as u16, y, &row[start..end])?;
        }
    }
    painter.finish()
}

/// Half-open range of columns between the first and last differing cell.
fn changed_span(prev: &[Cell], next: &[Cell]) -> Option<(usize, usize)> {
    let differs = |(a, b): (&Cell, &Cell)| a != b;
    let start = prev.iter().zip(next).position(differs)?;
    let end = prev.iter().zip(next).rposition(differs)? + 1;
    Some((start, end))
}

/// Emits cells, switching colors only when the style changes.
struct Painter<'a> {
    out: &'a mut Vec<u8>,
    style: Option<CellStyle>,
    wrote: bool,
}

impl<'a> Painter<'a> {
    fn new(out: &'a mut Vec<u8>) -> Self {
        Self {
            out,
            style: None,
            wrote: false,
        }
    }

    fn run(&mut self, x: u16, y: u16, cells: &[Cell]) -> Result<()> {
        if cells.is_empty() {
            return Ok(());
        }
        self.out.queue(MoveTo(x, y))?;
        for cell in cells {
            if self.style != Some(cell.style) {
                apply_style(self.out, cell.style)?;
                self.style = Some(cell.style);
            }
            self.out.queue(Print(cell.ch))?;
        }
        self.wrote = true;
        Ok(())
    }

    fn finish(self) -> Result<()> {
        if self.wrote {
            queue!(self.out, ResetColor, SetAttribute(Attribute::Reset))?;
        }
        Ok(())
    }
}

fn apply_style(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    queue!(
        out,
        SetAttribute(Attribute::Reset),
        SetForegroundColor(color(style.fg)),
        SetBackgroundColor(color(style.bg))
    )?;
    match style.weight {
        Weight::Normal => {}
        Weight::Bold => {
            out.queue(SetAttribute(Attribute::Bold))?;
        }
        Weight::Dim => {
            out.queue(SetAttribute(Attribute::Dim))?;
        }
    }
    Ok(())
}

fn color(Rgb { r, g, b }: Rgb) -> Color {
    Color::Rgb { r, g, b }
}
