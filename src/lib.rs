#![no_std]

pub mod animation;
pub mod channel;
pub mod color;
pub mod controller;
pub mod frame;
pub mod frame_scheduler;
pub mod run_token;
pub mod script;
pub mod segment;
pub mod sequencer;
pub mod slot;

pub use animation::{Animation, AnimationMode, AnimationSlot};
pub use channel::{FrameChannel, FrameReceiver, FrameSender};
pub use controller::DisplayController;
pub use frame::{DisplayFrame, FnSink, LatestFrame};
pub use frame_scheduler::FrameScheduler;
pub use run_token::{RunSource, RunToken};
pub use script::{
    DEFAULT_SEQUENCE, DISPLAY_WIDTH, DisplayEntry, DisplaySequence, DisplayText, EntryError,
};
pub use segment::{SEGMENT_COUNT, Segment, Segments, lookup};
pub use sequencer::{ConfigError, DisplayConfig, Sequencer, SequencerTimings};
pub use slot::{CharacterSlot, DisplaySlots, SegmentShade};

pub use color::Rgb;
pub use embassy_time::{Duration, Instant};

/// Abstract display consumer trait
///
/// Implement this trait to draw the display on a concrete surface.
/// The sequencer publishes every state change through it, in order.
pub trait DisplaySink {
    /// Receive the next display state
    fn publish(&mut self, frame: &DisplayFrame);
}

impl<S: DisplaySink + ?Sized> DisplaySink for &mut S {
    fn publish(&mut self, frame: &DisplayFrame) {
        (**self).publish(frame);
    }
}
