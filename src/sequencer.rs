use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::DisplaySink;
use crate::animation::{AnimationMode, AnimationSlot};
use crate::frame::DisplayFrame;
use crate::script::{DEFAULT_SEQUENCE, DisplayEntry, DisplaySequence, blank_text};

/// Default drift before the step schedule is rebased onto the current time.
///
/// A host that stalls for longer than this (a suspended tab, a debugger
/// break) resumes the script where it was instead of replaying the backlog
/// as a burst of frames.
pub const DEFAULT_MAX_DRIFT: Duration = Duration::from_millis(250);

/// Configuration for animation timings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequencerTimings {
    /// Delay before and between type-in reveals
    pub type_in_interval: Duration,
    /// Pause after the text is fully typed
    pub type_in_hold: Duration,
    /// Delay between flash toggles
    pub flash_interval: Duration,
    /// Pause after the flash settles
    pub flash_hold: Duration,
    /// Delay between scroll windows
    pub scroll_interval: Duration,
    /// Delay between countdown steps
    pub countdown_interval: Duration,
    /// Pause after the last countdown step
    pub countdown_hold: Duration,
    /// Delay between wave positions
    pub wave_interval: Duration,
    /// Pause after the wave settles
    pub wave_hold: Duration,
    /// Blank gap between two entries
    pub blank_pause: Duration,
}

impl SequencerTimings {
    pub const DEFAULT: Self = Self {
        type_in_interval: Duration::from_millis(200),
        type_in_hold: Duration::from_millis(1500),
        flash_interval: Duration::from_millis(150),
        flash_hold: Duration::from_millis(1200),
        scroll_interval: Duration::from_millis(180),
        countdown_interval: Duration::from_millis(400),
        countdown_hold: Duration::from_millis(500),
        wave_interval: Duration::from_millis(100),
        wave_hold: Duration::from_millis(800),
        blank_pause: Duration::from_millis(300),
    };

    /// Check that every repeating interval is non-zero
    ///
    /// Holds may be zero; intervals and the blank pause may not, otherwise a
    /// single tick could spin through the script without time passing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let intervals = [
            ("type_in_interval", self.type_in_interval),
            ("flash_interval", self.flash_interval),
            ("scroll_interval", self.scroll_interval),
            ("countdown_interval", self.countdown_interval),
            ("wave_interval", self.wave_interval),
            ("blank_pause", self.blank_pause),
        ];
        for (name, interval) in intervals {
            if interval.as_ticks() == 0 {
                return Err(ConfigError::ZeroInterval(name));
            }
        }
        Ok(())
    }
}

impl Default for SequencerTimings {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Error returned when a display configuration is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The sequence has no entries to play
    EmptySequence,
    /// The named interval is zero
    ZeroInterval(&'static str),
}

/// Configuration for the display sequencer
#[derive(Debug, Clone, Copy)]
pub struct DisplayConfig<'a> {
    pub sequence: DisplaySequence<'a>,
    pub timings: SequencerTimings,
    pub max_drift: Duration,
}

impl DisplayConfig<'static> {
    pub const DEFAULT: Self = Self {
        sequence: DEFAULT_SEQUENCE,
        timings: SequencerTimings::DEFAULT,
        max_drift: DEFAULT_MAX_DRIFT,
    };
}

impl Default for DisplayConfig<'static> {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Next step enters the current entry
    Enter,
    /// Next step advances the running animation
    Animate,
    /// Blank gap; next step moves on to the following entry
    Pause,
}

/// Display sequencer - plays the script, one entry at a time
///
/// Every step mutates the frame and publishes it. Steps are scheduled on
/// deadlines accumulated from the previous deadline, so for a given start
/// instant the produced stream is fully deterministic.
pub struct Sequencer<'a> {
    // Configuration
    sequence: DisplaySequence<'a>,
    timings: SequencerTimings,
    max_drift: Duration,

    // Internal state
    index: usize,
    phase: Phase,
    animation: Option<AnimationSlot>,
    frame: DisplayFrame,
    next_step: Instant,
    passes: u32,
}

impl<'a> Sequencer<'a> {
    /// Create a sequencer positioned before the first entry
    ///
    /// The first step is due immediately; call [`Sequencer::reset`] to
    /// anchor the schedule at a specific instant.
    pub fn new(config: &DisplayConfig<'a>) -> Result<Self, ConfigError> {
        if config.sequence.is_empty() {
            return Err(ConfigError::EmptySequence);
        }
        config.timings.validate()?;

        Ok(Self {
            sequence: config.sequence,
            timings: config.timings,
            max_drift: config.max_drift,
            index: 0,
            phase: Phase::Enter,
            animation: None,
            frame: DisplayFrame::default(),
            next_step: Instant::from_millis(0),
            passes: 0,
        })
    }

    /// Rewind to the first entry, with the first step due at `now`
    pub fn reset(&mut self, now: Instant) {
        self.index = 0;
        self.phase = Phase::Enter;
        self.animation = None;
        self.frame = DisplayFrame::default();
        self.next_step = now;
        self.passes = 0;
    }

    /// Run every step that is due at `now`
    ///
    /// Returns the deadline of the next pending step.
    pub fn tick<S: DisplaySink + ?Sized>(&mut self, now: Instant, sink: &mut S) -> Instant {
        self.correct_drift(now);
        while self.next_step <= now {
            self.step(sink);
        }
        self.next_step
    }

    /// Rebase the schedule onto `now` if it has fallen too far behind
    pub fn correct_drift(&mut self, now: Instant) {
        let lag = now.checked_duration_since(self.next_step);
        if lag.is_some_and(|lag| lag > self.max_drift) {
            self.next_step = now;
        }
    }

    /// Run the step scheduled at [`Sequencer::next_deadline`]
    pub fn step<S: DisplaySink + ?Sized>(&mut self, sink: &mut S) {
        match self.phase {
            Phase::Enter => self.enter_entry(sink),
            Phase::Animate => self.animate(sink),
            Phase::Pause => {
                self.advance();
                self.enter_entry(sink);
            }
        }
    }

    /// Deadline of the next step
    pub const fn next_deadline(&self) -> Instant {
        self.next_step
    }

    /// Index of the entry being played
    pub const fn current_index(&self) -> usize {
        self.index
    }

    /// Entry being played
    pub fn current_entry(&self) -> DisplayEntry<'a> {
        self.sequence[self.index]
    }

    /// Mode of the running animation, `None` while entering or pausing
    pub fn current_mode(&self) -> Option<AnimationMode> {
        self.animation.as_ref().map(AnimationSlot::mode)
    }

    /// Number of completed passes over the whole sequence
    pub const fn passes(&self) -> u32 {
        self.passes
    }

    /// Last published display state
    pub const fn frame(&self) -> &DisplayFrame {
        &self.frame
    }

    pub const fn sequence(&self) -> DisplaySequence<'a> {
        self.sequence
    }

    pub const fn timings(&self) -> &SequencerTimings {
        &self.timings
    }

    /// Start the current entry: take its color, clear and hide every slot
    fn enter_entry<S: DisplaySink + ?Sized>(&mut self, sink: &mut S) {
        let entry = self.current_entry();
        let animation = entry.mode.to_slot(&entry.padded_text(), &self.timings);

        #[cfg(feature = "esp32-log")]
        println!(
            "[display] entry {}: '{}' ({})",
            self.index,
            entry.text,
            entry.mode.as_str()
        );

        self.frame.color = entry.color;
        self.frame.entry_index = self.index;
        self.frame.text = blank_text();
        self.frame.set_all_visible(false);

        self.delay(animation.lead_in());
        self.animation = Some(animation);
        self.phase = Phase::Animate;

        sink.publish(&self.frame);
    }

    /// Advance the running animation, blanking the display once it finishes
    fn animate<S: DisplaySink + ?Sized>(&mut self, sink: &mut S) {
        let delay = self
            .animation
            .as_mut()
            .and_then(|animation| animation.step(&mut self.frame));

        if let Some(delay) = delay {
            self.delay(delay);
        } else {
            self.frame.set_all_visible(false);
            self.animation = None;
            self.delay(self.timings.blank_pause);
            self.phase = Phase::Pause;
        }

        sink.publish(&self.frame);
    }

    /// Push the next deadline back, saturating at the end of time
    fn delay(&mut self, delay: Duration) {
        self.next_step = self.next_step.checked_add(delay).unwrap_or(Instant::MAX);
    }

    /// Move to the next entry, wrapping after the last one
    fn advance(&mut self) {
        self.index = (self.index + 1) % self.sequence.len();
        if self.index == 0 {
            self.passes = self.passes.wrapping_add(1);
        }
        self.phase = Phase::Enter;
    }
}
