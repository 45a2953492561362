//! Animation system with compile-time known animation variants
//!
//! All animations are stored in an enum to avoid heap allocations.
//! Each animation implements the `Animation` trait and is driven one step at
//! a time by the sequencer: a step mutates the frame and tells how long to
//! wait before the next one.

mod countdown;
mod flash;
mod scroll;
mod type_in;
mod wave;

pub use countdown::CountdownAnimation;
use embassy_time::Duration;
pub use flash::{FLASH_TOGGLES, FlashAnimation};
pub use scroll::{LAST_OFFSET as SCROLL_LAST_OFFSET, ScrollAnimation};
pub use type_in::TypeInAnimation;
pub use wave::{WAVE_SWEEPS, WAVE_WIDTH, WaveAnimation, wave_window};

use crate::frame::DisplayFrame;
use crate::script::DisplayText;
use crate::sequencer::SequencerTimings;

const MODE_NAME_TYPE_IN: &str = "typeIn";
const MODE_NAME_FLASH: &str = "flash";
const MODE_NAME_SCROLL: &str = "scroll";
const MODE_NAME_COUNTDOWN: &str = "countdown";
const MODE_NAME_WAVE: &str = "wave";

const MODE_ID_TYPE_IN: u8 = 0;
const MODE_ID_FLASH: u8 = 1;
const MODE_ID_SCROLL: u8 = 2;
const MODE_ID_COUNTDOWN: u8 = 3;
const MODE_ID_WAVE: u8 = 4;

pub trait Animation {
    /// Delay between entering the entry and the first step
    fn lead_in(&self) -> Duration {
        Duration::from_millis(0)
    }

    /// Apply the next step to the frame
    ///
    /// Returns the delay until the following step, or `None` once the
    /// animation has finished.
    fn step(&mut self, frame: &mut DisplayFrame) -> Option<Duration>;

    /// Rewind to the first step
    fn reset(&mut self);
}

/// Animation slot - enum containing all possible animations
#[derive(Debug, Clone)]
pub enum AnimationSlot {
    /// Reveal characters left to right
    TypeIn(TypeInAnimation),
    /// Blink the whole text
    Flash(FlashAnimation),
    /// Slide the text through the display
    Scroll(ScrollAnimation),
    /// Drop leading characters one by one
    Countdown(CountdownAnimation),
    /// Sweep a visibility window across the slots
    Wave(WaveAnimation),
}

/// Known animation modes that can be scripted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum AnimationMode {
    TypeIn = MODE_ID_TYPE_IN,
    Flash = MODE_ID_FLASH,
    Scroll = MODE_ID_SCROLL,
    Countdown = MODE_ID_COUNTDOWN,
    Wave = MODE_ID_WAVE,
}

impl AnimationMode {
    /// Every mode, in id order
    pub const ALL: [Self; 5] = [
        Self::TypeIn,
        Self::Flash,
        Self::Scroll,
        Self::Countdown,
        Self::Wave,
    ];

    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            MODE_ID_TYPE_IN => Self::TypeIn,
            MODE_ID_FLASH => Self::Flash,
            MODE_ID_SCROLL => Self::Scroll,
            MODE_ID_COUNTDOWN => Self::Countdown,
            MODE_ID_WAVE => Self::Wave,
            _ => return None,
        })
    }

    pub fn to_slot(self, text: &DisplayText, timings: &SequencerTimings) -> AnimationSlot {
        match self {
            Self::TypeIn => AnimationSlot::TypeIn(TypeInAnimation::new(
                text,
                timings.type_in_interval,
                timings.type_in_hold,
            )),
            Self::Flash => AnimationSlot::Flash(FlashAnimation::new(
                text,
                timings.flash_interval,
                timings.flash_hold,
            )),
            Self::Scroll => {
                AnimationSlot::Scroll(ScrollAnimation::new(text, timings.scroll_interval))
            }
            Self::Countdown => AnimationSlot::Countdown(CountdownAnimation::new(
                text,
                timings.countdown_interval,
                timings.countdown_hold,
            )),
            Self::Wave => AnimationSlot::Wave(WaveAnimation::new(
                text,
                timings.wave_interval,
                timings.wave_hold,
            )),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TypeIn => MODE_NAME_TYPE_IN,
            Self::Flash => MODE_NAME_FLASH,
            Self::Scroll => MODE_NAME_SCROLL,
            Self::Countdown => MODE_NAME_COUNTDOWN,
            Self::Wave => MODE_NAME_WAVE,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            MODE_NAME_TYPE_IN => Some(Self::TypeIn),
            MODE_NAME_FLASH => Some(Self::Flash),
            MODE_NAME_SCROLL => Some(Self::Scroll),
            MODE_NAME_COUNTDOWN => Some(Self::Countdown),
            MODE_NAME_WAVE => Some(Self::Wave),
            _ => None,
        }
    }
}

impl AnimationSlot {
    /// Delay before the first step of the current animation
    pub fn lead_in(&self) -> Duration {
        match self {
            Self::TypeIn(animation) => animation.lead_in(),
            Self::Flash(animation) => animation.lead_in(),
            Self::Scroll(animation) => animation.lead_in(),
            Self::Countdown(animation) => animation.lead_in(),
            Self::Wave(animation) => animation.lead_in(),
        }
    }

    /// Advance the current animation by one step
    pub fn step(&mut self, frame: &mut DisplayFrame) -> Option<Duration> {
        match self {
            Self::TypeIn(animation) => animation.step(frame),
            Self::Flash(animation) => animation.step(frame),
            Self::Scroll(animation) => animation.step(frame),
            Self::Countdown(animation) => animation.step(frame),
            Self::Wave(animation) => animation.step(frame),
        }
    }

    /// Reset the animation state
    pub fn reset(&mut self) {
        match self {
            Self::TypeIn(animation) => Animation::reset(animation),
            Self::Flash(animation) => Animation::reset(animation),
            Self::Scroll(animation) => Animation::reset(animation),
            Self::Countdown(animation) => Animation::reset(animation),
            Self::Wave(animation) => Animation::reset(animation),
        }
    }

    /// Get the animation mode for external observation
    pub fn mode(&self) -> AnimationMode {
        match self {
            Self::TypeIn(_) => AnimationMode::TypeIn,
            Self::Flash(_) => AnimationMode::Flash,
            Self::Scroll(_) => AnimationMode::Scroll,
            Self::Countdown(_) => AnimationMode::Countdown,
            Self::Wave(_) => AnimationMode::Wave,
        }
    }
}
