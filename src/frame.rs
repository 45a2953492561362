//! Published display state and the stock sinks that consume it

use crate::DisplaySink;
use crate::color::{Rgb, rgb_from_u32};
use crate::script::{DISPLAY_WIDTH, DisplayText, blank_text};
use crate::segment::{Segments, lookup};

/// Color shown before the first entry sets its own
pub const INITIAL_COLOR: Rgb = rgb_from_u32(0x00FF00);

/// Snapshot of the display, as handed to a [`DisplaySink`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayFrame {
    /// Character per slot, always [`DISPLAY_WIDTH`] long
    pub text: DisplayText,
    /// Color of lit segments
    pub color: Rgb,
    /// Slot visibility gate; a hidden slot draws no segments
    pub visible: [bool; DISPLAY_WIDTH],
    /// Index of the script entry that produced this frame
    pub entry_index: usize,
}

impl Default for DisplayFrame {
    fn default() -> Self {
        Self {
            text: blank_text(),
            color: INITIAL_COLOR,
            visible: [false; DISPLAY_WIDTH],
            entry_index: 0,
        }
    }
}

impl DisplayFrame {
    /// Show or hide every slot at once
    pub fn set_all_visible(&mut self, visible: bool) {
        self.visible = [visible; DISPLAY_WIDTH];
    }

    pub fn all_visible(&self) -> bool {
        self.visible.iter().all(|visible| *visible)
    }

    pub fn none_visible(&self) -> bool {
        self.visible.iter().all(|visible| !*visible)
    }

    /// Character in `slot`, blank when out of range
    pub fn char_at(&self, slot: usize) -> char {
        self.text.chars().nth(slot).unwrap_or(' ')
    }

    /// Effective segments of `slot`: mapped pattern masked by visibility
    pub fn segments(&self, slot: usize) -> Segments {
        let visible = self.visible.get(slot).copied().unwrap_or(false);
        lookup(self.char_at(slot)).masked(visible)
    }

    /// Effective segments of every slot, left to right
    pub fn slot_segments(&self) -> [Segments; DISPLAY_WIDTH] {
        core::array::from_fn(|slot| self.segments(slot))
    }
}

/// Sink that forwards every frame to a closure
pub struct FnSink<F>(pub F);

impl<F: FnMut(&DisplayFrame)> DisplaySink for FnSink<F> {
    fn publish(&mut self, frame: &DisplayFrame) {
        (self.0)(frame);
    }
}

/// Sink that keeps only the most recent frame
///
/// Suitable for hosts that redraw at their own pace and only care about the
/// latest state.
#[derive(Debug, Clone, Default)]
pub struct LatestFrame {
    frame: Option<DisplayFrame>,
    updates: u32,
}

impl LatestFrame {
    pub const fn new() -> Self {
        Self {
            frame: None,
            updates: 0,
        }
    }

    /// Most recent frame, if any was published
    pub const fn frame(&self) -> Option<&DisplayFrame> {
        self.frame.as_ref()
    }

    /// Number of frames published so far
    pub const fn updates(&self) -> u32 {
        self.updates
    }

    /// Take the most recent frame, leaving the sink empty
    pub fn take(&mut self) -> Option<DisplayFrame> {
        self.frame.take()
    }
}

impl DisplaySink for LatestFrame {
    fn publish(&mut self, frame: &DisplayFrame) {
        self.frame = Some(frame.clone());
        self.updates = self.updates.wrapping_add(1);
    }
}
