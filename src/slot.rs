//! Per-character render state
//!
//! A published frame says which character each slot shows and whether the
//! slot is visible. Drawing it nicely needs a bit more: segments of a newly
//! shown character light up one after another, and lit segments glow with a
//! slight flicker. This module keeps that state on the consumer side so any
//! renderer can use it.

use embassy_time::{Duration, Instant};

use crate::color::{Rgb, rgb_from_u32};
use crate::frame::{DisplayFrame, INITIAL_COLOR};
use crate::script::DISPLAY_WIDTH;
use crate::segment::{SEGMENT_COUNT, Segment, Segments, lookup};

/// Delay between two consecutive segments lighting up
pub const DEFAULT_SEGMENT_STAGGER: Duration = Duration::from_millis(50);

/// Emissive intensity of a lit segment, before flicker
pub const LIT_INTENSITY: f32 = 0.5;

/// Emissive intensity of an unlit segment
pub const UNLIT_INTENSITY: f32 = 0.02;

/// Body color of an unlit segment
pub const UNLIT_COLOR: Rgb = rgb_from_u32(0x0A1A0A);

/// Flicker angular rate, radians per second
const FLICKER_RATE: f64 = 50.0;
/// Flicker depth as a fraction of the lit intensity
const FLICKER_DEPTH: f64 = 0.05;

/// Flicker factor at `now`, in `0.9..=1.0`
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn flicker(now: Instant) -> f32 {
    let seconds = now.as_millis() as f64 / 1000.0;
    let wave = libm::sin(seconds * FLICKER_RATE);
    (1.0 - FLICKER_DEPTH + wave * FLICKER_DEPTH) as f32
}

/// How a single segment should be drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentShade {
    pub color: Rgb,
    pub intensity: f32,
}

impl SegmentShade {
    pub const UNLIT: Self = Self {
        color: UNLIT_COLOR,
        intensity: UNLIT_INTENSITY,
    };

    pub fn lit(color: Rgb, now: Instant) -> Self {
        Self {
            color,
            intensity: LIT_INTENSITY * flicker(now),
        }
    }

    pub fn for_segment(is_on: bool, color: Rgb, now: Instant) -> Self {
        if is_on {
            Self::lit(color, now)
        } else {
            Self::UNLIT
        }
    }
}

/// Render state of one character slot
///
/// When the character or its visibility changes, the segments of the new
/// pattern replace the shown ones one at a time, `stagger` apart, starting
/// with segment `a`. Hiding a slot turns every segment off at once.
#[derive(Debug, Clone, Copy)]
pub struct CharacterSlot {
    ch: char,
    visible: bool,
    pattern: Segments,
    /// Segments shown when the current reveal started
    previous: Segments,
    changed_at: Instant,
    stagger: Duration,
}

impl CharacterSlot {
    pub const fn new(stagger: Duration) -> Self {
        Self {
            ch: ' ',
            visible: false,
            pattern: Segments::BLANK,
            previous: Segments::BLANK,
            changed_at: Instant::from_millis(0),
            stagger,
        }
    }

    /// Update the slot; restarts the reveal if anything changed
    ///
    /// Returns `true` if the slot changed.
    pub fn set(&mut self, ch: char, visible: bool, now: Instant) -> bool {
        if ch == self.ch && visible == self.visible {
            return false;
        }

        // A pending reveal is superseded; keep what is on screen right now
        self.previous = self.segments(now);
        self.ch = ch;
        self.visible = visible;
        self.pattern = lookup(ch);
        self.changed_at = now;
        true
    }

    /// Segments lit at `now`
    pub fn segments(&self, now: Instant) -> Segments {
        if !self.visible {
            return Segments::BLANK;
        }
        self.pattern.splice(self.previous, self.revealed(now))
    }

    /// Whether the reveal has finished
    pub fn is_settled(&self, now: Instant) -> bool {
        !self.visible || self.revealed(now) >= SEGMENT_COUNT
    }

    pub const fn char(&self) -> char {
        self.ch
    }

    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Number of segments of the current pattern already in place
    fn revealed(&self, now: Instant) -> usize {
        let stagger = self.stagger.as_ticks();
        if stagger == 0 {
            return SEGMENT_COUNT;
        }
        let elapsed = now
            .checked_duration_since(self.changed_at)
            .map_or(0, |elapsed| elapsed.as_ticks());
        // Segment k switches at k * stagger, the first one immediately
        usize::try_from(elapsed / stagger)
            .map_or(SEGMENT_COUNT, |steps| steps.saturating_add(1).min(SEGMENT_COUNT))
    }
}

impl Default for CharacterSlot {
    fn default() -> Self {
        Self::new(DEFAULT_SEGMENT_STAGGER)
    }
}

/// Render state of the whole display
#[derive(Debug, Clone)]
pub struct DisplaySlots {
    slots: [CharacterSlot; DISPLAY_WIDTH],
    color: Rgb,
}

impl DisplaySlots {
    pub const fn new(stagger: Duration) -> Self {
        Self {
            slots: [CharacterSlot::new(stagger); DISPLAY_WIDTH],
            color: INITIAL_COLOR,
        }
    }

    /// Take over a published frame
    pub fn apply(&mut self, frame: &DisplayFrame, now: Instant) {
        self.color = frame.color;
        for (index, slot) in self.slots.iter_mut().enumerate() {
            let visible = frame.visible.get(index).copied().unwrap_or(false);
            slot.set(frame.char_at(index), visible, now);
        }
    }

    /// Lit segments of every slot at `now`
    pub fn segments(&self, now: Instant) -> [Segments; DISPLAY_WIDTH] {
        core::array::from_fn(|index| self.slots[index].segments(now))
    }

    /// Shade of one segment of one slot
    pub fn shade(&self, slot: usize, segment: Segment, now: Instant) -> SegmentShade {
        let is_on = self
            .slots
            .get(slot)
            .is_some_and(|slot| slot.segments(now).is_on(segment));
        SegmentShade::for_segment(is_on, self.color, now)
    }

    /// Whether every slot has finished its reveal
    pub fn is_settled(&self, now: Instant) -> bool {
        self.slots.iter().all(|slot| slot.is_settled(now))
    }

    pub const fn color(&self) -> Rgb {
        self.color
    }

    pub const fn slots(&self) -> &[CharacterSlot; DISPLAY_WIDTH] {
        &self.slots
    }
}

impl Default for DisplaySlots {
    fn default() -> Self {
        Self::new(DEFAULT_SEGMENT_STAGGER)
    }
}
