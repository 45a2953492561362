//! Flash animation
//!
//! Shows the full text at once and blinks every slot together a fixed
//! number of times before settling on.

use embassy_time::Duration;

use super::Animation;
use crate::frame::DisplayFrame;
use crate::script::DisplayText;

/// Number of on/off toggles before the text settles
pub const FLASH_TOGGLES: usize = 6;

#[derive(Debug, Clone)]
pub struct FlashAnimation {
    text: DisplayText,
    interval: Duration,
    hold: Duration,
    /// Steps taken: toggles first, then the settle step
    position: usize,
}

impl FlashAnimation {
    pub fn new(text: &DisplayText, interval: Duration, hold: Duration) -> Self {
        Self {
            text: text.clone(),
            interval,
            hold,
            position: 0,
        }
    }
}

impl Animation for FlashAnimation {
    fn step(&mut self, frame: &mut DisplayFrame) -> Option<Duration> {
        let position = self.position;
        if position > FLASH_TOGGLES {
            return None;
        }
        self.position += 1;

        if position == 0 {
            frame.text = self.text.clone();
        }

        // Even toggles are "on"; the settle step always ends visible
        if position < FLASH_TOGGLES {
            frame.set_all_visible(position % 2 == 0);
            Some(self.interval)
        } else {
            frame.set_all_visible(true);
            Some(self.hold)
        }
    }

    fn reset(&mut self) {
        self.position = 0;
    }
}
