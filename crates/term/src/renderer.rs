//! TerminalRenderer: puts a [`Screen`] on a real terminal.
//!
//! [`TerminalRenderer::present`] is the whole frame path. It skips the frame
//! when the screen is clean, composes it through a [`GameView`], and writes
//! either a full redraw (first frame, after [`TerminalRenderer::resize`] or
//! [`TerminalRenderer::invalidate`]) or only the runs of cells that changed
//! since the frame on the terminal.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::game_view::{GameView, Viewport};
use crate::screen::Screen;

pub struct TerminalRenderer<W: Write = io::Stdout> {
    out: W,
    viewport: Viewport,
    /// What the terminal currently shows.
    shown: FrameBuffer,
    /// Scratch frame composed each present; swapped with `shown` afterwards.
    composed: FrameBuffer,
    stale: bool,
    buf: Vec<u8>,
}

impl TerminalRenderer {
    /// Renderer on stdout sized to the current terminal (80x24 if unknown).
    pub fn new() -> Self {
        let (width, height) = terminal::size().unwrap_or((80, 24));
        Self::with_writer(io::stdout(), Viewport::new(width, height))
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        self.stale = true;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn with_writer(out: W, viewport: Viewport) -> Self {
        Self {
            out,
            viewport,
            shown: FrameBuffer::new(0, 0),
            composed: FrameBuffer::new(viewport.width, viewport.height),
            stale: true,
            buf: Vec::with_capacity(64 * 1024),
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Adopt a new terminal size; the next present redraws everything.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.viewport = Viewport::new(width, height);
        self.stale = true;
    }

    /// Force the next present to redraw everything.
    pub fn invalidate(&mut self) {
        self.stale = true;
    }

    /// Draw `screen` if it changed (or the terminal needs a full redraw).
    ///
    /// Returns whether anything was written.
    pub fn present(&mut self, view: &GameView, screen: &mut Screen) -> Result<bool> {
        let dirty = screen.take_dirty();
        if !dirty && !self.stale {
            return Ok(false);
        }

        view.render_into(screen, self.viewport, &mut self.composed);

        let full = self.stale
            || self.shown.width() != self.composed.width()
            || self.shown.height() != self.composed.height();
        let prev = if full { None } else { Some(&self.shown) };

        self.buf.clear();
        encode_frame(prev, &self.composed, &mut self.buf)?;
        self.flush_buf()?;

        std::mem::swap(&mut self.shown, &mut self.composed);
        self.stale = false;
        Ok(true)
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.out.write_all(&self.buf)?;
        self.out.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode `next` into `out`: a full redraw when `prev` is `None`, otherwise
/// only the cells that differ from `prev` (which must have the same size).
pub fn encode_frame(prev: Option<&FrameBuffer>, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut pen = Pen::default();

    match prev {
        None => {
            out.queue(terminal::Clear(terminal::ClearType::All))?;
            for y in 0..next.height() {
                out.queue(cursor::MoveTo(0, y))?;
                pen.print(out, row(next, y))?;
            }
        }
        Some(prev) => {
            for run in ChangedRuns::new(prev, next) {
                out.queue(cursor::MoveTo(run.x, run.y))?;
                let start = run.x as usize;
                pen.print(out, &row(next, run.y)[start..start + run.len as usize])?;
            }
        }
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn row(fb: &FrameBuffer, y: u16) -> &[Cell] {
    let w = fb.width() as usize;
    let start = y as usize * w;
    &fb.cells()[start..start + w]
}

/// Tracks the terminal's current style so only changes are emitted.
#[derive(Default)]
struct Pen {
    current: Option<CellStyle>,
}

impl Pen {
    fn print(&mut self, out: &mut Vec<u8>, cells: &[Cell]) -> Result<()> {
        for cell in cells {
            self.set(out, cell.style)?;
            out.queue(Print(cell.ch))?;
        }
        Ok(())
    }

    fn set(&mut self, out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
        let prev = self.current.replace(style);
        if prev == Some(style) {
            return Ok(());
        }

        // An attribute reset also resets both colors.
        let attrs_changed = prev.map_or(true, |p| p.bold != style.bold || p.dim != style.dim);
        if attrs_changed {
            out.queue(SetAttribute(Attribute::Reset))?;
            if style.bold {
                out.queue(SetAttribute(Attribute::Bold))?;
            }
            if style.dim {
                out.queue(SetAttribute(Attribute::Dim))?;
            }
        }
        if attrs_changed || prev.map(|p| p.fg) != Some(style.fg) {
            out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
        }
        if attrs_changed || prev.map(|p| p.bg) != Some(style.bg) {
            out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
        }
        Ok(())
    }
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// A horizontal span of changed cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Run {
    x: u16,
    y: u16,
    len: u16,
}

/// Changed runs between two same-sized frames, top to bottom, left to right.
struct ChangedRuns<'a> {
    prev: &'a FrameBuffer,
    next: &'a FrameBuffer,
    x: u16,
    y: u16,
}

impl<'a> ChangedRuns<'a> {
    fn new(prev: &'a FrameBuffer, next: &'a FrameBuffer) -> Self {
        Self { prev, next, x: 0, y: 0 }
    }
}

impl Iterator for ChangedRuns<'_> {
    type Item = Run;

    fn next(&mut self) -> Option<Run> {
        let w = self.next.width();
        while self.y < self.next.height() {
            let (old, new) = (row(self.prev, self.y), row(self.next, self.y));
            let differs = |x: u16| old[x as usize] != new[x as usize];

            while self.x < w && !differs(self.x) {
                self.x += 1;
            }
            if self.x < w {
                let start = self.x;
                while self.x < w && differs(self.x) {
                    self.x += 1;
                }
                return Some(Run {
                    x: start,
                    y: self.y,
                    len: self.x - start,
                });
            }

            self.x = 0;
            self.y += 1;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Controller, GameState};

    const CLEAR_ALL: &str = "\x1b[2J";

    fn started() -> Controller<Screen, ()> {
        let mut controller = Controller::new(GameState::new(7), Screen::new(), ());
        controller.start(0);
        controller
    }

    fn offscreen() -> TerminalRenderer<Vec<u8>> {
        TerminalRenderer::with_writer(Vec::new(), Viewport::new(70, 24))
    }

    fn runs(a: &FrameBuffer, b: &FrameBuffer) -> Vec<(u16, u16, u16)> {
        ChangedRuns::new(a, b).map(|r| (r.x, r.y, r.len)).collect()
    }

    #[test]
    fn changed_runs_coalesce_adjacent_cells() {
        let style = CellStyle::default();
        let a = FrameBuffer::new(5, 2);
        let mut b = FrameBuffer::new(5, 2);
        for x in 1..=3 {
            b.put_char(x, 0, 'X', style);
        }
        b.put_char(0, 1, 'Y', style);
        b.put_char(4, 1, 'Z', style);

        assert_eq!(runs(&a, &b), vec![(1, 0, 3), (0, 1, 1), (4, 1, 1)]);
        assert!(runs(&a, &a.clone()).is_empty());
    }

    #[test]
    fn pen_only_emits_style_changes() {
        let mut fb = FrameBuffer::new(6, 1);
        fb.put_str(0, 0, "abcdef", CellStyle::default());

        let mut out = Vec::new();
        encode_frame(None, &fb, &mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert_eq!(text.matches("\x1b[38;2;").count(), 1);
        assert!(text.contains("abcdef"));
    }

    #[test]
    fn first_present_is_a_full_redraw() {
        let mut controller = started();
        let view = GameView::default();
        let mut term = offscreen();

        assert!(term.present(&view, controller.renderer_mut()).unwrap());
        let text = String::from_utf8_lossy(&term.out).into_owned();
        assert!(text.starts_with(CLEAR_ALL));
        assert!(text.contains("SCORE"));
    }

    #[test]
    fn clean_screen_writes_nothing() {
        let mut controller = started();
        let view = GameView::default();
        let mut term = offscreen();
        term.present(&view, controller.renderer_mut()).unwrap();
        let written = term.out.len();

        assert!(!term.present(&view, controller.renderer_mut()).unwrap());
        assert_eq!(term.out.len(), written);
    }

    #[test]
    fn move_writes_only_a_small_diff() {
        let mut controller = started();
        let view = GameView::default();
        let mut term = offscreen();
        term.present(&view, controller.renderer_mut()).unwrap();
        let full = term.out.len();

        assert!(controller.move_left());
        assert!(term.present(&view, controller.renderer_mut()).unwrap());
        let diff = String::from_utf8_lossy(&term.out[full..]).into_owned();
        assert!(!diff.contains(CLEAR_ALL));
        assert!(diff.len() < full / 4);
    }

    #[test]
    fn resize_forces_full_redraw_without_changes() {
        let mut controller = started();
        let view = GameView::default();
        let mut term = offscreen();
        term.present(&view, controller.renderer_mut()).unwrap();
        let written = term.out.len();

        term.resize(80, 30);
        assert_eq!(term.viewport(), Viewport::new(80, 30));
        assert!(term.present(&view, controller.renderer_mut()).unwrap());
        let text = String::from_utf8_lossy(&term.out[written..]).into_owned();
        assert!(text.starts_with(CLEAR_ALL));

        term.invalidate();
        let written = term.out.len();
        assert!(term.present(&view, controller.renderer_mut()).unwrap());
        assert!(String::from_utf8_lossy(&term.out[written..]).starts_with(CLEAR_ALL));
    }
}
