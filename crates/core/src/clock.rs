//! Frame clock - the scheduler the host drives
//!
//! The core has no timer of its own. The host calls [`FrameClock::frame`]
//! once per display frame with a monotonic timestamp in milliseconds and gets
//! back the time elapsed since the previous frame, or `None` while the clock
//! is stopped.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameClock {
    last_frame_ms: Option<u64>,
    running: bool,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) counting from `now_ms`.
    pub fn start(&mut self, now_ms: u64) {
        self.running = true;
        self.last_frame_ms = Some(now_ms);
    }

    /// Stop producing ticks. Calling it again is a no-op.
    pub fn stop(&mut self) {
        self.running = false;
        self.last_frame_ms = None;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Elapsed milliseconds since the previous frame.
    ///
    /// A timestamp earlier than the previous one counts as zero elapsed time.
    pub fn frame(&mut self, now_ms: u64) -> Option<u32> {
        if !self.running {
            return None;
        }
        let last = self.last_frame_ms.replace(now_ms).unwrap_or(now_ms);
        let elapsed = now_ms.saturating_sub(last);
        Some(u32::try_from(elapsed).unwrap_or(u32::MAX))
    }
}
