//! Menu and result screens.
//!
//! Same drawing primitives as [`crate::game_view`]: a framed box centred in
//! the viewport with a title and a few lines of text.

use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::game_view::{draw_border, Viewport};

const BOX_BG: Rgb = Rgb::new(0, 0, 0);

/// Main menu entries, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Campaign,
    FreePlay,
    Quit,
}

impl MenuItem {
    pub const ALL: [MenuItem; 3] = [MenuItem::Campaign, MenuItem::FreePlay, MenuItem::Quit];

    pub fn label(self) -> &'static str {
        match self {
            MenuItem::Campaign => "Levels",
            MenuItem::FreePlay => "Free play",
            MenuItem::Quit => "Quit",
        }
    }
}

/// Cursor over [`MenuItem::ALL`], wrapping at both ends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuCursor {
    index: usize,
}

impl MenuCursor {
    pub fn selected(self) -> MenuItem {
        MenuItem::ALL[self.index]
    }

    pub fn up(&mut self) {
        self.index = (self.index + MenuItem::ALL.len() - 1) % MenuItem::ALL.len();
    }

    pub fn down(&mut self) {
        self.index = (self.index + 1) % MenuItem::ALL.len();
    }
}

#[derive(Debug, Default)]
pub struct ScreenView;

impl ScreenView {
    pub fn render_menu_into(&self, cursor: MenuCursor, viewport: Viewport, fb: &mut FrameBuffer) {
        let lines: Vec<(String, bool)> = MenuItem::ALL
            .iter()
            .map(|&item| {
                let selected = item == cursor.selected();
                let marker = if selected { "> " } else { "  " };
                (format!("{marker}{}", item.label()), selected)
            })
            .collect();
        self.render_box(fb, viewport, "SNAKE", &lines, "enter select  q quit");
    }

    /// Result or message screen; `lines` are shown centred under the title.
    pub fn render_message_into(
        &self,
        title: &str,
        lines: &[String],
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        let lines: Vec<(String, bool)> = lines.iter().map(|l| (l.clone(), false)).collect();
        self.render_box(fb, viewport, title, &lines, "enter continue");
    }

    fn render_box(
        &self,
        fb: &mut FrameBuffer,
        viewport: Viewport,
        title: &str,
        lines: &[(String, bool)],
        hint: &str,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let text_w = lines
            .iter()
            .map(|(line, _)| line.chars().count())
            .chain([title.chars().count(), hint.chars().count()])
            .max()
            .unwrap_or(0) as u16;
        let box_w = text_w.saturating_add(6);
        // title, blank, lines, blank, hint
        let box_h = (lines.len() as u16).saturating_add(6);
        let x = viewport.width.saturating_sub(box_w) / 2;
        let y = viewport.height.saturating_sub(box_h) / 2;

        draw_border(
            fb,
            x,
            y,
            box_w,
            box_h,
            CellStyle::plain(Rgb::new(200, 200, 200), BOX_BG),
        );

        let centred = |s: &str| x + box_w.saturating_sub(s.chars().count() as u16) / 2;
        let title_style = CellStyle::plain(Rgb::new(100, 220, 120), BOX_BG).bold();
        fb.put_str(centred(title), y + 1, title, title_style);

        let normal = CellStyle::plain(Rgb::new(200, 200, 200), BOX_BG);
        let highlight = CellStyle::plain(Rgb::new(255, 255, 255), BOX_BG).bold();
        for (i, (line, selected)) in lines.iter().enumerate() {
            let style = if *selected { highlight } else { normal };
            fb.put_str(centred(line), y + 3 + i as u16, line, style);
        }

        fb.put_str(centred(hint), y + box_h - 2, hint, normal.dim());
    }
}
