//! GameView: composes a [`Screen`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{get_shape, piece_color, Piece};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::screen::Screen;
use crate::types::{PieceType, Rotation, BOARD_HEIGHT, BOARD_WIDTH, EMPTY_CELL_COLOR};

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

const BLACK: Rgb = Rgb::new(0, 0, 0);
const GRID_DOT: Rgb = Rgb::new(70, 70, 95);
const LABEL: CellStyle = CellStyle::new(Rgb::new(220, 220, 220), BLACK).bold();
const VALUE: CellStyle = CellStyle::new(Rgb::new(200, 200, 200), BLACK);

const HELP: [&str; 8] = [
    "<- ->  move",
    "down   soft drop",
    "up     rotate",
    "z      rotate ccw",
    "space  hard drop",
    "c      hold",
    "p      pause",
    "r      restart",
];

/// Lays out the playfield, side panel and overlays.
#[derive(Debug, Clone)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
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
            cell_w,
            cell_h,
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render the screen into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames; it is only reallocated
    /// when the viewport grows.
    pub fn render_into(&self, screen: &Screen, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let board_px_w = (BOARD_WIDTH as u16) * self.cell_w;
        let board_px_h = (BOARD_HEIGHT as u16) * self.cell_h;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };

        let border = CellStyle::new(Rgb::new(200, 200, 200), BLACK);
        self.draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        // Locked cells and empty grid.
        for (y, row) in screen.board().rows().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let (x, y) = (x as u16, y as u16);
                if cell.filled {
                    self.draw_block(fb, start_x, start_y, x, y, cell.color);
                } else {
                    let dot = CellStyle::new(GRID_DOT, EMPTY_CELL_COLOR).dim();
                    self.fill_cell_rect(fb, start_x, start_y, x, y, '·', dot);
                }
            }
        }

        if let Some(ghost) = screen.ghost() {
            let style = CellStyle::new(Rgb::new(140, 140, 140), EMPTY_CELL_COLOR).dim();
            for (x, y) in visible_cells(ghost) {
                self.fill_cell_rect(fb, start_x, start_y, x, y, '░', style);
            }
        }

        if let Some(piece) = screen.piece() {
            for (x, y) in visible_cells(piece) {
                self.draw_block(fb, start_x, start_y, x, y, piece.color);
            }
        }

        self.draw_side_panel(fb, screen, viewport, start_x, start_y, frame_w);

        // Overlays.
        if screen.is_game_over() {
            let lines = ["GAME OVER", "r to restart"];
            self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, &lines);
        } else if screen.is_paused() {
            let lines = ["PAUSED", "p to resume"];
            self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, &lines);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, screen: &Screen, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(screen, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
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

    fn draw_block(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        x: u16,
        y: u16,
        color: Rgb,
    ) {
        let style = CellStyle::new(color, EMPTY_CELL_COLOR).bold();
        self.fill_cell_rect(fb, start_x, start_y, x, y, '█', style);
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = start_x + 1 + cell_x * self.cell_w;
        let py = start_y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        screen: &Screen,
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

        let mut y = start_y;
        for (label, value) in [
            ("SCORE", screen.score()),
            ("LEVEL", screen.level()),
            ("LINES", screen.lines()),
        ] {
            fb.put_str(panel_x, y, label, LABEL);
            fb.put_u32(panel_x, y.saturating_add(1), value, VALUE);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "NEXT", LABEL);
        self.draw_preview(fb, panel_x, y.saturating_add(1), screen.next());
        y = y.saturating_add(4);

        fb.put_str(panel_x, y, "HOLD", LABEL);
        self.draw_preview(fb, panel_x, y.saturating_add(1), screen.hold());
        y = y.saturating_add(4);

        if panel_w >= 18 {
            let help = VALUE.dim();
            for line in HELP {
                if y >= viewport.height {
                    break;
                }
                fb.put_str(panel_x, y, line, help);
                y = y.saturating_add(1);
            }
        }
    }

    /// Two-row preview of a piece in spawn orientation, or a dash.
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, kind: Option<PieceType>) {
        let Some(kind) = kind else {
            fb.put_str(x, y, "-", VALUE);
            return;
        };

        let style = CellStyle::new(piece_color(kind), BLACK).bold();
        let shape = get_shape(kind, Rotation::North);
        // I sits on its second grid row; lift it so every preview starts at `y`.
        let top = shape.cells().map(|(_, dy)| dy).min().unwrap_or(0);
        for (dx, dy) in shape.cells() {
            let px = x + (dx as u16) * self.cell_w;
            let py = y + ((dy - top) as u16) * self.cell_h;
            fb.fill_rect(px, py, self.cell_w, self.cell_h, '█', style);
        }
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        lines: &[&str],
    ) {
        let style = CellStyle::new(Rgb::new(255, 255, 255), BLACK).bold();
        let mid_y = start_y.saturating_add(frame_h / 2);
        for (i, text) in lines.iter().enumerate() {
            let text_w = text.chars().count() as u16;
            let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
            let line_style = if i == 0 { style } else { VALUE };
            fb.put_str(x, mid_y.saturating_add(i as u16), text, line_style);
        }
    }
}

/// On-board cells of a piece; rows above the board are not drawn.
fn visible_cells(piece: &Piece) -> impl Iterator<Item = (u16, u16)> + '_ {
    piece.cells().filter_map(|(x, y)| {
        let on_board =
            (0..BOARD_WIDTH as i8).contains(&x) && (0..BOARD_HEIGHT as i8).contains(&y);
        on_board.then_some((x as u16, y as u16))
    })
}
