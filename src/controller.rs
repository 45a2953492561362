//! Display lifecycle: create, start, stop.
//!
//! The controller owns the sequencer and the sink, and gates every step on a
//! [`RunToken`]. Once a run is stopped (or superseded by a newer `start`),
//! no further frame reaches the sink, even if the stop happened from inside
//! the sink while a tick was in progress.

use embassy_time::{Instant, Timer};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::DisplaySink;
use crate::run_token::{RunSource, RunToken};
use crate::sequencer::{ConfigError, DisplayConfig, Sequencer};

pub struct DisplayController<'a, S: DisplaySink> {
    sequencer: Sequencer<'a>,
    source: &'a RunSource,
    token: Option<RunToken<'a>>,
    sink: S,
}

impl<'a, S: DisplaySink> DisplayController<'a, S> {
    /// Create a stopped controller
    pub fn new(
        config: &DisplayConfig<'a>,
        source: &'a RunSource,
        sink: S,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            sequencer: Sequencer::new(config)?,
            source,
            token: None,
            sink,
        })
    }

    /// Start playing from the first entry at `now`
    ///
    /// Any earlier run is invalidated.
    pub fn start(&mut self, now: Instant) -> RunToken<'a> {
        self.sequencer.reset(now);
        let token = self.source.issue();
        self.token = Some(token);

        #[cfg(feature = "esp32-log")]
        println!("[display] started, run {}", token.generation());

        token
    }

    /// Stop the current run; no step runs after this returns
    pub fn stop(&mut self) {
        self.token = None;
        self.source.cancel();

        #[cfg(feature = "esp32-log")]
        println!("[display] stopped");
    }

    pub fn is_running(&self) -> bool {
        self.token.is_some_and(|token| token.is_current())
    }

    /// Run every step due at `now`
    ///
    /// Returns the deadline of the next step, or `None` if the display is
    /// not running.
    pub fn tick(&mut self, now: Instant) -> Option<Instant> {
        let token = self.token?;
        let next = self.drive(token, now);
        if next.is_none() {
            self.token = None;
        }
        next
    }

    /// Drive the display in real time until `token` is invalidated
    pub async fn run(&mut self, token: RunToken<'a>) {
        while let Some(deadline) = self.drive(token, Instant::now()) {
            Timer::at(deadline).await;
        }
    }

    fn drive(&mut self, token: RunToken<'a>, now: Instant) -> Option<Instant> {
        if !token.is_current() {
            return None;
        }

        self.sequencer.correct_drift(now);
        while self.sequencer.next_deadline() <= now {
            // The sink may stop the run from inside `publish`
            if !token.is_current() {
                return None;
            }
            self.sequencer.step(&mut self.sink);
        }

        token
            .is_current()
            .then(|| self.sequencer.next_deadline())
    }

    pub const fn sequencer(&self) -> &Sequencer<'a> {
        &self.sequencer
    }

    pub const fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}
