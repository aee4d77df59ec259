//! Key-repeat handler for the movement keys.
//!
//! A movement key fires once on press, again after the initial delay, then
//! once per repeat interval while held. Terminals that never report key
//! releases are handled with a timeout: a held key with no fresh press event
//! for longer than the timeout counts as released.
//!
//! Time only advances through [`InputHandler::update`], so behaviour is fully
//! determined by the elapsed values the caller passes in.

use crossterm::event::KeyCode;

use arrayvec::ArrayVec;

use crate::map::repeat_action;
use crate::types::{GameAction, KEY_REPEAT_DELAY_MS, KEY_REPEAT_INTERVAL_MS};

// Without release events, a short timeout keeps a single tap from turning
// into a sustained hold.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// One repeating key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Repeater {
    action: Option<GameAction>,
    held_ms: u32,
    fired: u32,
}

impl Repeater {
    fn press(&mut self, action: GameAction) -> Option<GameAction> {
        if self.action == Some(action) {
            return None;
        }
        *self = Self {
            action: Some(action),
            ..Self::default()
        };
        Some(action)
    }

    fn release_if(&mut self, action: GameAction) {
        if self.action == Some(action) {
            *self = Self::default();
        }
    }

    fn advance(
        &mut self,
        elapsed_ms: u32,
        delay: u32,
        interval: u32,
        out: &mut ArrayVec<GameAction, 32>,
    ) {
        let Some(action) = self.action else {
            return;
        };

        self.held_ms = self.held_ms.saturating_add(elapsed_ms);
        if self.held_ms < delay {
            return;
        }

        let due = 1 + (self.held_ms - delay) / interval.max(1);
        while self.fired < due {
            if out.try_push(action).is_err() {
                // Drop the backlog rather than replay it later.
                self.fired = due;
                break;
            }
            self.fired += 1;
        }
    }
}

/// Tracks held movement keys and produces their repeats.
#[derive(Debug, Clone)]
pub struct InputHandler {
    horizontal: Repeater,
    down: Repeater,
    silence_ms: u32,
    repeat_delay: u32,
    repeat_interval: u32,
    key_release_timeout_ms: u32,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::with_config(KEY_REPEAT_DELAY_MS, KEY_REPEAT_INTERVAL_MS)
    }

    pub fn with_config(repeat_delay: u32, repeat_interval: u32) -> Self {
        Self {
            horizontal: Repeater::default(),
            down: Repeater::default(),
            silence_ms: 0,
            repeat_delay,
            repeat_interval,
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    /// Whether any movement key is currently considered held.
    pub fn is_holding(&self) -> bool {
        self.horizontal.action.is_some() || self.down.action.is_some()
    }

    /// Register a key press. Returns the action to apply immediately, if any.
    ///
    /// Pressing a key that is already held (terminal auto-repeat) only keeps
    /// it alive; the handler produces the repeats itself.
    pub fn handle_key_press(&mut self, code: KeyCode) -> Option<GameAction> {
        let action = repeat_action(code)?;
        self.silence_ms = 0;

        match action {
            GameAction::MoveDown => self.down.press(action),
            _ => self.horizontal.press(action),
        }
    }

    pub fn handle_key_release(&mut self, code: KeyCode) {
        match repeat_action(code) {
            Some(GameAction::MoveDown) => self.down.release_if(GameAction::MoveDown),
            Some(action) => self.horizontal.release_if(action),
            None => {}
        }
    }

    /// Advance time and collect the repeats that came due.
    pub fn update(&mut self, elapsed_ms: u32) -> ArrayVec<GameAction, 32> {
        let mut actions = ArrayVec::<GameAction, 32>::new();

        // Auto-release when the terminal does not emit release events.
        self.silence_ms = self.silence_ms.saturating_add(elapsed_ms);
        if self.silence_ms > self.key_release_timeout_ms {
            self.horizontal = Repeater::default();
            self.down = Repeater::default();
        }

        self.horizontal.advance(
            elapsed_ms,
            self.repeat_delay,
            self.repeat_interval,
            &mut actions,
        );
        self.down.advance(
            elapsed_ms,
            self.repeat_delay,
            self.repeat_interval,
            &mut actions,
        );

        actions
    }

    pub fn reset(&mut self) {
        self.horizontal = Repeater::default();
        self.down = Repeater::default();
        self.silence_ms = 0;
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
