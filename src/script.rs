//! Display script: the cyclic list of entries the sequencer plays
//!
//! Every entry text is shown on a fixed-width display, so texts are
//! normalized to [`DISPLAY_WIDTH`] characters before use: short texts are
//! padded with spaces on the right, long ones truncated.

use core::iter;

use heapless::String;

use crate::animation::AnimationMode;
use crate::color::{Rgb, parse_hex, rgb_from_u32};

/// Number of character slots on the display
pub const DISPLAY_WIDTH: usize = 6;

/// Fixed-width display text
pub type DisplayText = String<DISPLAY_WIDTH>;

/// Ordered, cyclic list of entries
pub type DisplaySequence<'a> = &'a [DisplayEntry<'a>];

/// Error returned when an entry cannot be built from strings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryError {
    /// Color is not a `#rrggbb` / `#rgb` hex value
    InvalidColor,
    /// Mode name is not one of the known animation modes
    UnknownMode,
}

/// One scripted step of the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayEntry<'a> {
    pub text: &'a str,
    pub color: Rgb,
    pub mode: AnimationMode,
}

impl<'a> DisplayEntry<'a> {
    pub const fn new(text: &'a str, color: Rgb, mode: AnimationMode) -> Self {
        Self { text, color, mode }
    }

    /// Build an entry from its textual form, e.g. `("HELLO", "#00ffff", "flash")`
    pub fn parse(text: &'a str, color: &str, mode: &str) -> Result<Self, EntryError> {
        let color = parse_hex(color).ok_or(EntryError::InvalidColor)?;
        let mode = AnimationMode::parse_from_str(mode).ok_or(EntryError::UnknownMode)?;
        Ok(Self::new(text, color, mode))
    }

    /// Entry text normalized to the display width
    pub fn padded_text(&self) -> DisplayText {
        normalize_text(self.text)
    }
}

/// Script played when no other sequence is configured
pub const DEFAULT_SEQUENCE: DisplaySequence<'static> = &[
    DisplayEntry::new("ACHEBE", rgb_from_u32(0x00FF00), AnimationMode::TypeIn),
    DisplayEntry::new("HELLO ", rgb_from_u32(0x00FFFF), AnimationMode::Flash),
    DisplayEntry::new("------", rgb_from_u32(0xFF0066), AnimationMode::Wave),
    DisplayEntry::new("543210", rgb_from_u32(0xFFAA00), AnimationMode::Countdown),
    DisplayEntry::new("CODE  ", rgb_from_u32(0xFF00FF), AnimationMode::Scroll),
    DisplayEntry::new("DESIGN", rgb_from_u32(0x00FF88), AnimationMode::TypeIn),
    DisplayEntry::new("  GO  ", rgb_from_u32(0xFFFF00), AnimationMode::Flash),
];

/// Characters outside ASCII have no glyph; store them as blanks so every
/// display text stays one byte per slot.
const fn display_char(ch: char) -> char {
    if ch.is_ascii() { ch } else { ' ' }
}

fn collect_text(chars: impl Iterator<Item = char>) -> DisplayText {
    let mut text = DisplayText::new();
    for ch in chars.take(DISPLAY_WIDTH) {
        // Capacity holds DISPLAY_WIDTH ascii chars
        let _ = text.push(display_char(ch));
    }
    text
}

/// Text of all blanks
pub fn blank_text() -> DisplayText {
    collect_text(iter::repeat_n(' ', DISPLAY_WIDTH))
}

/// Pad with spaces on the right and truncate to the display width
pub fn normalize_text(text: &str) -> DisplayText {
    collect_text(text.chars().chain(iter::repeat(' ')))
}

/// Pad with spaces on the left so the text ends at the last slot
///
/// Texts longer than the display keep their first characters.
pub fn right_align(text: &str) -> DisplayText {
    let count = text.chars().take(DISPLAY_WIDTH).count();
    let padding = DISPLAY_WIDTH - count;
    collect_text(iter::repeat_n(' ', padding).chain(text.chars()))
}
