//! GameView: maps a play [`Session`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{Level, LevelState, Session};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Direction, Vector};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Which run the level belongs to, shown in the side panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayMode {
    Campaign { number: usize, count: usize },
    Free,
}

/// Field position in the framebuffer (top-left border corner) and its size in cells
#[derive(Debug, Clone, Copy)]
struct FieldFrame {
    x: u16,
    y: u16,
    cols: i32,
    rows: i32,
}

const FIELD_BG: Rgb = Rgb::new(24, 28, 24);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

/// A lightweight terminal renderer for the snake field.
pub struct GameView {
    /// Field cell width in terminal columns.
    cell_w: u16,
    /// Field cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render a session into an existing framebuffer.
    ///
    /// Callers can reuse the framebuffer across frames and only resize when
    /// the terminal size changes.
    pub fn render_into(
        &self,
        session: &Session,
        mode: PlayMode,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let level = session.level();
        let field = level.field();
        let field_px_w = (field.width() as u16).saturating_mul(self.cell_w);
        let field_px_h = (field.height() as u16).saturating_mul(self.cell_h);
        let frame_w = field_px_w.saturating_add(2);
        let frame_h = field_px_h.saturating_add(2);

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };
        let frame = FieldFrame {
            x: start_x,
            y: start_y,
            cols: field.width(),
            rows: field.height(),
        };

        fb.fill_rect(
            start_x + 1,
            start_y + 1,
            field_px_w,
            field_px_h,
            ' ',
            CellStyle::plain(FIELD_BG, FIELD_BG),
        );
        draw_border(
            fb,
            start_x,
            start_y,
            frame_w,
            frame_h,
            CellStyle::plain(Rgb::new(200, 200, 200), PANEL_BG),
        );

        let empty = CellStyle::plain(Rgb::new(70, 80, 70), FIELD_BG).dim();
        for &cell in field.open_cells() {
            self.fill_cell(fb, frame, cell, ['·', ' '], empty);
        }

        let wall = CellStyle::plain(Rgb::new(150, 150, 160), FIELD_BG);
        for &cell in field.walls() {
            self.fill_cell(fb, frame, cell, ['▓', '▓'], wall);
        }

        let basic = level.basic_food();
        for (&cell, food) in field.foods() {
            let (fg, ch) = if *food == basic {
                (Rgb::new(220, 60, 60), '●')
            } else {
                (Rgb::new(240, 200, 60), '◆')
            };
            self.fill_cell(fb, frame, cell, [ch, ' '], CellStyle::plain(fg, FIELD_BG).bold());
        }

        self.draw_snake(fb, frame, level);
        self.draw_side_panel(fb, session, mode, viewport, start_x, start_y, frame_w);

        // Overlays.
        let overlay = match level.state() {
            LevelState::GameOver => Some("GAME OVER"),
            LevelState::Won => Some("LEVEL CLEAR"),
            LevelState::Playing if session.is_paused() => Some("PAUSED"),
            LevelState::Playing => None,
        };
        if let Some(text) = overlay {
            draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, text);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, session: &Session, mode: PlayMode, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(session, mode, viewport, &mut fb);
        fb
    }

    fn draw_snake(&self, fb: &mut FrameBuffer, frame: FieldFrame, level: &Level) {
        let body = CellStyle::plain(Rgb::new(100, 220, 120), FIELD_BG);
        let head = body.bold();

        let snake = level.field().snake();
        // Head last so it stays visible when segments overlap after a crash.
        for part in snake.iter().skip(1) {
            self.fill_cell(fb, frame, part.location, ['█', '█'], body);
        }
        if let Some(part) = snake.head() {
            self.fill_cell(
                fb,
                frame,
                part.location,
                [head_glyph(part.direction), ' '],
                head,
            );
        }
    }

    /// Paint one field cell; the first glyph goes in the left column, the
    /// second fills the rest of the cell. Cells outside the field are skipped.
    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        frame: FieldFrame,
        cell: Vector,
        glyphs: [char; 2],
        style: CellStyle,
    ) {
        if !(0..frame.cols).contains(&cell.x) || !(0..frame.rows).contains(&cell.y) {
            return;
        }
        let (Ok(col), Ok(row)) = (u16::try_from(cell.x), u16::try_from(cell.y)) else {
            return;
        };
        let px = frame.x.saturating_add(1).saturating_add(col.saturating_mul(self.cell_w));
        let py = frame.y.saturating_add(1).saturating_add(row.saturating_mul(self.cell_h));
        fb.fill_rect(px, py, self.cell_w, self.cell_h, glyphs[1], style);
        fb.fill_rect(px, py, 1, self.cell_h, glyphs[0], style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        session: &Session,
        mode: PlayMode,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 12 {
            return;
        }

        let label = CellStyle::plain(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::plain(Rgb::new(200, 200, 200), PANEL_BG);
        let level = session.level();

        let mut y = start_y;
        fb.put_str(panel_x, y, "LEVEL", label);
        y = y.saturating_add(1);
        match mode {
            PlayMode::Campaign { number, count } => {
                let x = fb.put_number(panel_x, y, number as i64, value);
                let x = fb.put_char(x, y, '/', value);
                fb.put_number(x, y, count as i64, value);
            }
            PlayMode::Free => {
                fb.put_str(panel_x, y, "FREE", value);
            }
        }
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        let x = fb.put_number(panel_x, y, level.score().into(), value);
        let x = fb.put_char(x, y, '/', value.dim());
        fb.put_number(x, y, level.max_score().into(), value.dim());
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "HEALTH", label);
        y = y.saturating_add(1);
        let heart = CellStyle::plain(Rgb::new(220, 60, 60), PANEL_BG);
        let shown = level.health().min(u32::from(panel_w));
        for i in 0..shown as u16 {
            fb.put_char(panel_x + i, y, '♥', heart);
        }
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "SPEED", label);
        y = y.saturating_add(1);
        // One decimal place
        let tenths = (level.field().snake().speed() * 10.0).round().max(0.0) as i64;
        let x = fb.put_number(panel_x, y, tenths / 10, value);
        let x = fb.put_char(x, y, '.', value);
        fb.put_number(x, y, tenths % 10, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "LENGTH", label);
        y = y.saturating_add(1);
        fb.put_number(panel_x, y, level.field().snake().len() as i64, value);
        y = y.saturating_add(2);

        if y < viewport.height {
            let hint = value.dim();
            fb.put_str(panel_x, y, "p pause", hint);
            fb.put_str(panel_x, y.saturating_add(1), "q quit", hint);
        }
    }
}

/// Arrow pointing where the head is moving
pub fn head_glyph(direction: Direction) -> char {
    match direction {
        Direction::Up => '▲',
        Direction::Down => '▼',
        Direction::Left => '◀',
        Direction::Right => '▶',
    }
}

pub(crate) fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn draw_overlay_text(
    fb: &mut FrameBuffer,
    start_x: u16,
    start_y: u16,
    frame_w: u16,
    frame_h: u16,
    text: &str,
) {
    let mid_y = start_y.saturating_add(frame_h / 2);
    let text_w = text.chars().count() as u16;
    let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
    let style = CellStyle::plain(Rgb::new(255, 255, 255), PANEL_BG).bold();
    fb.put_str(x, mid_y, text, style);
}
