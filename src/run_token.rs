//! Run tokens: explicit cancellation for a display run.
//!
//! A [`RunSource`] hands out [`RunToken`]s. Issuing a new token or
//! cancelling the source bumps its generation, which makes every token
//! issued earlier stale. Work scheduled under a token checks it before
//! touching shared state, so nothing from a superseded or stopped run can
//! mutate the display.

use core::cell::Cell;

use critical_section::Mutex;

/// Generation counter shared by a display and whoever may stop it.
pub struct RunSource {
    generation: Mutex<Cell<u32>>,
}

impl RunSource {
    pub const fn new() -> Self {
        Self {
            generation: Mutex::new(Cell::new(0)),
        }
    }

    /// Start a new run, invalidating all earlier tokens
    pub fn issue(&self) -> RunToken<'_> {
        let generation = self.bump();
        RunToken {
            source: self,
            generation,
        }
    }

    /// Invalidate all tokens without starting a new run
    pub fn cancel(&self) {
        self.bump();
    }

    /// Current generation
    pub fn generation(&self) -> u32 {
        critical_section::with(|cs| self.generation.borrow(cs).get())
    }

    fn bump(&self) -> u32 {
        critical_section::with(|cs| {
            let cell = self.generation.borrow(cs);
            let next = cell.get().wrapping_add(1);
            cell.set(next);
            next
        })
    }
}

impl Default for RunSource {
    fn default() -> Self {
        Self::new()
    }
}

/// Proof that a run is still the current one.
#[derive(Clone, Copy)]
pub struct RunToken<'a> {
    source: &'a RunSource,
    generation: u32,
}

impl RunToken<'_> {
    /// True until the source issues a newer token or is cancelled
    pub fn is_current(&self) -> bool {
        self.source.generation() == self.generation
    }

    pub const fn generation(&self) -> u32 {
        self.generation
    }
}
