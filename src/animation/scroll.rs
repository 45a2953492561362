//! Scroll animation
//!
//! Slides a display-wide window over `blanks + text + blanks`, so the text
//! enters from the right and leaves on the left.

use core::iter;

use embassy_time::Duration;
use heapless::String;

use super::Animation;
use crate::frame::DisplayFrame;
use crate::script::{DISPLAY_WIDTH, DisplayText, normalize_text};

const SCROLL_BUFFER_LEN: usize = 3 * DISPLAY_WIDTH;

/// Offset of the last window, where it reaches the end of the buffer
pub const LAST_OFFSET: usize = SCROLL_BUFFER_LEN - DISPLAY_WIDTH;

#[derive(Debug, Clone)]
pub struct ScrollAnimation {
    buffer: String<SCROLL_BUFFER_LEN>,
    interval: Duration,
    /// Start of the next window
    offset: usize,
}

impl ScrollAnimation {
    pub fn new(text: &DisplayText, interval: Duration) -> Self {
        let mut buffer = String::new();
        let padding = iter::repeat_n(' ', DISPLAY_WIDTH);
        for ch in padding.clone().chain(text.chars()).chain(padding) {
            let _ = buffer.push(ch);
        }
        Self {
            buffer,
            interval,
            offset: 0,
        }
    }

    /// The whole padded buffer the window slides over
    pub fn buffer(&self) -> &str {
        &self.buffer
    }
}

impl Animation for ScrollAnimation {
    fn step(&mut self, frame: &mut DisplayFrame) -> Option<Duration> {
        if self.offset > LAST_OFFSET {
            return None;
        }

        let window = self
            .buffer
            .get(self.offset..self.offset + DISPLAY_WIDTH)
            .unwrap_or("");
        frame.text = normalize_text(window);
        frame.set_all_visible(true);
        self.offset += 1;

        Some(self.interval)
    }

    fn reset(&mut self) {
        self.offset = 0;
    }
}
