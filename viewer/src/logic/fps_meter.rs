//! Once-per-second throughput readout ("grab fps" vs "display fps").

use std::fmt;
use std::time::{Duration, Instant};

/// Counts for one reporting window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FpsReading {
    /// Worker frame counter as last reported by a received frame
    pub grabbed: u64,
    /// Frames taken off the hand-off queue
    pub received: u32,
    /// Frames uploaded to the display texture
    pub rendered: u32,
}

impl fmt::Display for FpsReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Grab fps : {}  Display fps : {}",
            self.grabbed, self.rendered
        )
    }
}

pub struct FpsMeter {
    window: Duration,
    window_start: Instant,
    current: FpsReading,
}

impl FpsMeter {
    pub fn new(now: Instant) -> Self {
        Self::with_window(now, Duration::from_secs(1))
    }

    pub fn with_window(now: Instant, window: Duration) -> Self {
        Self {
            window,
            window_start: now,
            current: FpsReading::default(),
        }
    }

    pub fn record_received(&mut self, grabbed: u64) {
        self.current.received += 1;
        self.current.grabbed = grabbed;
    }

    pub fn record_rendered(&mut self) {
        self.current.rendered += 1;
    }

    /// Returns the finished window's counts and starts a new one once the
    /// window has elapsed; `None` before that.
    pub fn tick(&mut self, now: Instant) -> Option<FpsReading> {
        if now.duration_since(self.window_start) < self.window {
            return None;
        }
        self.window_start = now;
        Some(std::mem::take(&mut self.current))
    }
}
