//! Terminal front end: the render and audio collaborators for a terminal.
//!
//! Rendering is split in three:
//! - [`Screen`] receives the core's push-style [`Renderer`](crate::core::Renderer) calls
//! - [`GameView`] composes a screen into a [`FrameBuffer`] (pure, testable)
//! - [`TerminalRenderer`] presents a dirty screen, diffing against the last frame
//!
//! Audio is [`Bell`], an [`EventSink`](crate::core::EventSink) on the terminal bell.

pub mod bell;
pub mod fb;
pub mod game_view;
pub mod renderer;
pub mod screen;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use bell::Bell;
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_frame, TerminalRenderer};
pub use screen::Screen;
