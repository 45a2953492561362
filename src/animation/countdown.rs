//! Countdown animation
//!
//! Drops the leading character on every step and keeps the remainder
//! right-aligned, so `543210` counts down to `     0`.

use embassy_time::Duration;

use super::Animation;
use crate::frame::DisplayFrame;
use crate::script::{DISPLAY_WIDTH, DisplayText, right_align};

#[derive(Debug, Clone)]
pub struct CountdownAnimation {
    text: DisplayText,
    interval: Duration,
    hold: Duration,
    /// Number of leading characters dropped so far
    dropped: usize,
}

impl CountdownAnimation {
    pub fn new(text: &DisplayText, interval: Duration, hold: Duration) -> Self {
        Self {
            text: text.clone(),
            interval,
            hold,
            dropped: 0,
        }
    }
}

impl Animation for CountdownAnimation {
    fn step(&mut self, frame: &mut DisplayFrame) -> Option<Duration> {
        if self.dropped >= DISPLAY_WIDTH {
            return None;
        }

        if self.dropped == 0 {
            frame.set_all_visible(true);
        }
        frame.text = right_align(self.text.get(self.dropped..).unwrap_or(""));
        self.dropped += 1;

        if self.dropped == DISPLAY_WIDTH {
            Some(self.interval.checked_add(self.hold).unwrap_or(Duration::MAX))
        } else {
            Some(self.interval)
        }
    }

    fn reset(&mut self) {
        self.dropped = 0;
    }
}
