//! Terminal-bell audio: the only sound a plain terminal can make.

use std::io::{self, Write};

use crate::core::{EventSink, GameEvent};

const BEL: &[u8] = b"\x07";

/// Rings the terminal bell on a tetris and on game over.
pub struct Bell<W: Write = io::Stdout> {
    out: W,
    enabled: bool,
    rung: u32,
}

impl Bell {
    pub fn stdout(enabled: bool) -> Self {
        Self::new(io::stdout(), enabled)
    }
}

impl<W: Write> Bell<W> {
    pub fn new(out: W, enabled: bool) -> Self {
        Self {
            out,
            enabled,
            rung: 0,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// How many times the bell has rung.
    pub fn rung(&self) -> u32 {
        self.rung
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn ring(&mut self) {
        // A lost bell is not worth interrupting the game for.
        if self.out.write_all(BEL).and_then(|_| self.out.flush()).is_ok() {
            self.rung += 1;
        }
    }
}

impl<W: Write> EventSink for Bell<W> {
    fn notify(&mut self, event: GameEvent) {
        if !self.enabled {
            return;
        }
        match event {
            GameEvent::TetrisCleared | GameEvent::GameOver => self.ring(),
            GameEvent::RotateSucceeded
            | GameEvent::LinesCleared(_)
            | GameEvent::HardDropped { .. }
            | GameEvent::Held => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rings_on_tetris_and_game_over_only() {
        let mut bell = Bell::new(Vec::new(), true);
        bell.notify(GameEvent::RotateSucceeded);
        bell.notify(GameEvent::LinesCleared(3));
        bell.notify(GameEvent::TetrisCleared);
        bell.notify(GameEvent::HardDropped { distance: 12 });
        bell.notify(GameEvent::GameOver);

        assert_eq!(bell.rung(), 2);
        assert_eq!(bell.into_inner(), b"\x07\x07".to_vec());
    }

    #[test]
    fn disabled_bell_is_silent() {
        let mut bell = Bell::new(Vec::new(), false);
        bell.notify(GameEvent::GameOver);
        assert_eq!(bell.rung(), 0);
        assert!(bell.into_inner().is_empty());
    }
}
