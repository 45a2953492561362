//! Wave animation
//!
//! A short window of lit slots travels left to right across the display,
//! several times, before the whole text settles on.

use embassy_time::Duration;

use super::Animation;
use crate::frame::DisplayFrame;
use crate::script::{DISPLAY_WIDTH, DisplayText};

/// Number of full passes across the display
pub const WAVE_SWEEPS: usize = 3;

/// Number of slots lit at once: the head plus the ones trailing it
pub const WAVE_WIDTH: usize = 3;

const WAVE_STEPS: usize = WAVE_SWEEPS * DISPLAY_WIDTH;

#[derive(Debug, Clone)]
pub struct WaveAnimation {
    text: DisplayText,
    interval: Duration,
    hold: Duration,
    position: usize,
}

impl WaveAnimation {
    pub fn new(text: &DisplayText, interval: Duration, hold: Duration) -> Self {
        Self {
            text: text.clone(),
            interval,
            hold,
            position: 0,
        }
    }
}

/// Visibility of a window whose head is at `head`
pub fn wave_window(head: usize) -> [bool; DISPLAY_WIDTH] {
    core::array::from_fn(|slot| slot <= head && head - slot < WAVE_WIDTH)
}

impl Animation for WaveAnimation {
    fn step(&mut self, frame: &mut DisplayFrame) -> Option<Duration> {
        let position = self.position;
        if position > WAVE_STEPS {
            return None;
        }
        self.position += 1;

        if position == 0 {
            frame.text = self.text.clone();
        }

        if position < WAVE_STEPS {
            frame.visible = wave_window(position % DISPLAY_WIDTH);
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
