//! Frame scheduling and timing utilities.
//!
//! Provides portable frame pacing for hosts that poll the display instead of
//! awaiting it. The caller is responsible for sleeping/waiting between frames.

use embassy_time::{Duration, Instant};

use crate::DisplaySink;
use crate::controller::DisplayController;

/// Default target frame rate (60 FPS).
pub const DEFAULT_FPS: u32 = 60;

/// Default frame duration based on target FPS.
pub const DEFAULT_FRAME_DURATION: Duration = Duration::from_millis(1000 / DEFAULT_FPS as u64);

/// Result of a frame tick operation.
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// The earlier of the next redraw and the next sequencer step.
    pub next_deadline: Instant,
    /// How long to wait until `next_deadline` (may be zero if behind schedule).
    pub sleep_duration: Duration,
    /// Whether the display is still running.
    pub running: bool,
}

/// Portable frame scheduler that manages timing without async.
///
/// This scheduler:
/// - Runs every sequencer step that is due
/// - Paces redraws (segment reveals and flicker change between steps)
/// - Returns timing info so the caller can sleep appropriately
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = FrameScheduler::new(controller);
/// scheduler.controller_mut().start(Instant::from_millis(now_ms()));
///
/// loop {
///     let result = scheduler.tick(Instant::from_millis(now_ms()));
///     draw(scheduler.controller().sink());
///     sleep_ms(result.sleep_duration.as_millis());
/// }
/// ```
pub struct FrameScheduler<'a, S: DisplaySink> {
    controller: DisplayController<'a, S>,
    next_frame: Instant,
    frame_duration: Duration,
}

impl<'a, S: DisplaySink> FrameScheduler<'a, S> {
    /// Create a new frame scheduler.
    ///
    /// Uses `DEFAULT_FRAME_DURATION` (60 FPS) for frame timing.
    pub fn new(controller: DisplayController<'a, S>) -> Self {
        Self::with_frame_duration(controller, DEFAULT_FRAME_DURATION)
    }

    /// Create a new frame scheduler with custom frame duration.
    pub fn with_frame_duration(
        controller: DisplayController<'a, S>,
        frame_duration: Duration,
    ) -> Self {
        Self {
            controller,
            next_frame: Instant::from_millis(0),
            frame_duration,
        }
    }

    /// Process one frame and return timing information.
    ///
    /// This method:
    /// 1. Applies drift correction if we've fallen too far behind
    /// 2. Runs the due sequencer steps
    /// 3. Returns the deadline for the next frame or step, whichever is first
    pub fn tick(&mut self, now: Instant) -> FrameResult {
        // Skip the backlog after long stalls instead of bursting to catch up
        let max_drift = self
            .frame_duration
            .checked_add(self.frame_duration)
            .unwrap_or(Duration::MAX);
        let lag = now.checked_duration_since(self.next_frame);
        if lag.is_some_and(|lag| lag > max_drift) {
            self.next_frame = now;
        }

        let next_step = self.controller.tick(now);
        self.next_frame = self
            .next_frame
            .checked_add(self.frame_duration)
            .unwrap_or(Instant::MAX);

        let next_deadline = next_step.map_or(self.next_frame, |step| step.min(self.next_frame));
        let sleep_duration = next_deadline
            .checked_duration_since(now)
            .unwrap_or(Duration::from_millis(0));

        FrameResult {
            next_deadline,
            sleep_duration,
            running: next_step.is_some(),
        }
    }

    /// Get a reference to the controller.
    pub const fn controller(&self) -> &DisplayController<'a, S> {
        &self.controller
    }

    /// Get a mutable reference to the controller.
    pub fn controller_mut(&mut self) -> &mut DisplayController<'a, S> {
        &mut self.controller
    }
}
