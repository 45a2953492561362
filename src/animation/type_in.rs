//! Type-in animation
//!
//! Reveals the text one character at a time, left to right, like someone
//! typing it. Each reveal both extends the shown text and lights the slot.

use embassy_time::Duration;

use super::Animation;
use crate::frame::DisplayFrame;
use crate::script::{DISPLAY_WIDTH, DisplayText, normalize_text};

#[derive(Debug, Clone)]
pub struct TypeInAnimation {
    text: DisplayText,
    /// Delay between two reveals
    interval: Duration,
    /// Pause after the last reveal
    hold: Duration,
    /// Number of characters revealed so far
    revealed: usize,
}

impl TypeInAnimation {
    pub fn new(text: &DisplayText, interval: Duration, hold: Duration) -> Self {
        Self {
            text: text.clone(),
            interval,
            hold,
            revealed: 0,
        }
    }
}

impl Animation for TypeInAnimation {
    fn lead_in(&self) -> Duration {
        self.interval
    }

    fn step(&mut self, frame: &mut DisplayFrame) -> Option<Duration> {
        if self.revealed >= DISPLAY_WIDTH {
            return None;
        }

        let slot = self.revealed;
        self.revealed += 1;

        frame.text = normalize_text(self.text.get(..self.revealed).unwrap_or(""));
        if let Some(visible) = frame.visible.get_mut(slot) {
            *visible = true;
        }

        if self.revealed == DISPLAY_WIDTH {
            Some(self.hold)
        } else {
            Some(self.interval)
        }
    }

    fn reset(&mut self) {
        self.revealed = 0;
    }
}
