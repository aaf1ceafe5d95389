//! GameView: maps a `GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::pieces::{self, Matrix};
use crate::core::{GameSnapshot, PieceSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{GameStatus, Orientation, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, TICK_MS};

/// Shake intensity per column of horizontal offset.
const SHAKE_STEP: u32 = 30;
/// Largest horizontal shake offset in columns.
const MAX_SHAKE_COLUMNS: u32 = 3;
/// Width reserved for the side panel.
const PANEL_W: u16 = 12;
/// Gap between the playfield frame and the side panel.
const PANEL_GAP: u16 = 2;

const PLAYFIELD_BG: Rgb = Rgb::new(30, 30, 40);
const BORDER_FG: Rgb = Rgb::new(200, 200, 200);

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// A lightweight terminal renderer for the game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // Two columns per cell compensates for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            anchor_y: AnchorY::Center,
        }
    }
}

/// Top-left of the playfield frame in framebuffer coordinates.
#[derive(Debug, Clone, Copy)]
struct Origin {
    x: i32,
    y: i32,
}

impl GameView {
    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn frame_width(&self) -> u16 {
        (BOARD_WIDTH as u16) * self.cell_w + 2
    }

    pub fn frame_height(&self) -> u16 {
        BOARD_HEIGHT as u16 + 2
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames; it is only reallocated
    /// when the viewport grows.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let frame_w = self.frame_width();
        let frame_h = self.frame_height();
        let total_w = frame_w + PANEL_GAP + PANEL_W;

        let origin = Origin {
            x: (viewport.width.saturating_sub(total_w) / 2) as i32 + shake_offset(snap.shake),
            y: match self.anchor_y {
                AnchorY::Center => (viewport.height.saturating_sub(frame_h) / 2) as i32,
                AnchorY::Top => 0,
            },
        };

        let bg = CellStyle::new(Rgb::new(80, 80, 90), PLAYFIELD_BG);
        fb.fill_rect(
            origin.x + 1,
            origin.y + 1,
            frame_w - 2,
            frame_h - 2,
            ' ',
            bg,
        );
        self.draw_border(fb, origin, frame_w, frame_h, border_style(snap.flash_ms));

        for (y, row) in snap.board.iter().enumerate() {
            for (x, &code) in row.iter().enumerate() {
                match PieceKind::from_code(code) {
                    Some(kind) => self.draw_block(fb, origin, x as i8, y as i8, kind),
                    None => self.draw_empty_cell(fb, origin, x as i8, y as i8),
                }
            }
        }

        if let Some(current) = snap.current {
            if let Some(ghost_y) = snap.ghost_y {
                let ghost = CellStyle::new(Rgb::new(140, 140, 140), PLAYFIELD_BG).dim();
                for (x, y) in piece_cells(&current, ghost_y) {
                    self.fill_board_cell(fb, origin, x, y, '░', ghost);
                }
            }
            for (x, y) in piece_cells(&current, current.y) {
                self.draw_block(fb, origin, x, y, current.kind);
            }
        }

        self.draw_side_panel(fb, snap, origin, frame_w);

        match snap.status {
            GameStatus::Paused => self.draw_overlay_text(fb, origin, frame_w, frame_h, "PAUSED"),
            GameStatus::GameOver => {
                self.draw_overlay_text(fb, origin, frame_w, frame_h, "GAME OVER")
            }
            GameStatus::Active => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, o: Origin, w: u16, h: u16, style: CellStyle) {
        let (w, h) = (w as i32, h as i32);

        fb.put_char(o.x, o.y, '┌', style);
        fb.put_char(o.x + w - 1, o.y, '┐', style);
        fb.put_char(o.x, o.y + h - 1, '└', style);
        fb.put_char(o.x + w - 1, o.y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(o.x + dx, o.y, '─', style);
            fb.put_char(o.x + dx, o.y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(o.x, o.y + dy, '│', style);
            fb.put_char(o.x + w - 1, o.y + dy, '│', style);
        }
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, o: Origin, x: i8, y: i8) {
        let style = CellStyle::new(Rgb::new(90, 90, 100), PLAYFIELD_BG).dim();
        self.fill_board_cell(fb, o, x, y, '·', style);
    }

    fn draw_block(&self, fb: &mut FrameBuffer, o: Origin, x: i8, y: i8, kind: PieceKind) {
        let style = CellStyle::new(kind_color(kind), PLAYFIELD_BG).bold();
        self.fill_board_cell(fb, o, x, y, '█', style);
    }

    /// Fill one board cell; cells above or beside the board are skipped.
    fn fill_board_cell(
        &self,
        fb: &mut FrameBuffer,
        o: Origin,
        x: i8,
        y: i8,
        ch: char,
        style: CellStyle,
    ) {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return;
        }
        let px = o.x + 1 + (x as i32) * self.cell_w as i32;
        let py = o.y + 1 + y as i32;
        fb.fill_rect(px, py, self.cell_w, 1, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, o: Origin, frame_w: u16) {
        let x = o.x + (frame_w + PANEL_GAP) as i32;
        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        let mut y = o.y;
        for (name, n) in [("SCORE", snap.score), ("LEVEL", snap.level), ("LINES", snap.lines)] {
            fb.put_str(x, y, name, label);
            fb.put_u32(x, y + 1, n, value);
            y += 3;
        }

        fb.put_str(x, y, "HOLD", label);
        y += 1;
        match snap.hold {
            Some(kind) => {
                self.draw_mini(fb, x, y, kind, !snap.can_hold);
            }
            None => fb.put_str(x, y, "-", value),
        }
        y += 3;

        fb.put_str(x, y, "NEXT", label);
        y += 1;
        for &kind in &snap.preview {
            self.draw_mini(fb, x, y, kind, false);
            y += 3;
        }
    }

    /// Draw the filled rows of a kind's spawn matrix at (x, y)
    fn draw_mini(&self, fb: &mut FrameBuffer, x: i32, y: i32, kind: PieceKind, dim: bool) {
        let m: Matrix = pieces::matrix(kind, Orientation::North);
        let Some((first, last)) = m.filled_rows() else {
            return;
        };

        let mut style = CellStyle::new(kind_color(kind), Rgb::new(0, 0, 0));
        if dim {
            style = style.dim();
        }
        for (dy, row) in (first..=last).enumerate() {
            for col in 0..m.size() {
                if m.filled(row as usize, col as usize) {
                    let px = x + (col as i32) * self.cell_w as i32;
                    fb.fill_rect(px, y + dy as i32, self.cell_w, 1, '█', style);
                }
            }
        }
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        o: Origin,
        frame_w: u16,
        frame_h: u16,
        text: &str,
    ) {
        let text_w = text.chars().count() as i32;
        let x = o.x + (frame_w as i32 - text_w) / 2;
        let y = o.y + (frame_h / 2) as i32;
        let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
        fb.put_str(x, y, text, style);
    }
}

/// Horizontal frame offset for a shake intensity.
///
/// The amplitude grows with intensity and the sign alternates every frame
/// as the intensity decays.
pub fn shake_offset(shake: u32) -> i32 {
    if shake == 0 {
        return 0;
    }
    let amplitude = shake.div_ceil(SHAKE_STEP).min(MAX_SHAKE_COLUMNS) as i32;
    if (shake / TICK_MS) % 2 == 0 {
        amplitude
    } else {
        -amplitude
    }
}

fn border_style(flash_ms: u32) -> CellStyle {
    let style = CellStyle::new(BORDER_FG, Rgb::new(0, 0, 0));
    if flash_ms > 0 {
        CellStyle {
            fg: Rgb::new(255, 255, 255),
            bg: Rgb::new(0, 0, 0).brighten(60),
            ..style
        }
        .bold()
    } else {
        style
    }
}

fn piece_cells(piece: &PieceSnapshot, y: i8) -> impl Iterator<Item = (i8, i8)> {
    let x = piece.x;
    piece
        .matrix()
        .minos()
        .into_iter()
        .map(move |(dx, dy)| (x + dx, y + dy))
}

pub fn kind_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shake_offset_is_bounded_and_alternates() {
        assert_eq!(shake_offset(0), 0);
        assert_eq!(shake_offset(30).abs(), 1);
        assert_eq!(shake_offset(320).abs(), 3);
        // One frame of decay flips the direction.
        assert_eq!(shake_offset(56), -shake_offset(40));
    }

    #[test]
    fn flash_brightens_border() {
        assert_eq!(border_style(0).fg, BORDER_FG);
        assert!(border_style(10).bold);
        assert_ne!(border_style(10).fg, BORDER_FG);
    }
}
