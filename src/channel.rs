//! Portable bounded frame channel for `no_std` environments.
//!
//! Lets a render task subscribe to the frames produced by the sequencer
//! without sharing it. Built on `critical-section` and `heapless::Deque`;
//! thread/interrupt safe via critical sections.
//!
//! Frames are never reordered. When the queue is full the newest frame is
//! dropped and counted, so a slow consumer sees a gap rather than a
//! shuffled stream.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::DisplaySink;
use crate::frame::DisplayFrame;

/// Error returned when trying to send to a full channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrySendError<T>(pub T);

/// Error returned when trying to receive from an empty channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TryReceiveError;

struct Queue<const SIZE: usize> {
    frames: Deque<DisplayFrame, SIZE>,
    dropped: u32,
}

/// A bounded, thread-safe queue of display frames.
pub struct FrameChannel<const SIZE: usize> {
    inner: Mutex<RefCell<Queue<SIZE>>>,
}

impl<const SIZE: usize> FrameChannel<SIZE> {
    /// Create a new empty channel.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Queue {
                frames: Deque::new(),
                dropped: 0,
            })),
        }
    }

    /// Get a sender handle, usable as the sequencer's sink.
    pub const fn sender(&self) -> FrameSender<'_, SIZE> {
        FrameSender { channel: self }
    }

    /// Get a receiver handle for the render side.
    pub const fn receiver(&self) -> FrameReceiver<'_, SIZE> {
        FrameReceiver { channel: self }
    }

    /// Try to queue a frame.
    ///
    /// Returns `Err(TrySendError(frame))` and counts a drop if the channel
    /// is full.
    pub fn try_send(&self, frame: DisplayFrame) -> Result<(), TrySendError<DisplayFrame>> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.frames.push_back(frame).map_err(|frame| {
                queue.dropped = queue.dropped.wrapping_add(1);
                TrySendError(frame)
            })
        })
    }

    /// Try to take the oldest queued frame.
    pub fn try_receive(&self) -> Result<DisplayFrame, TryReceiveError> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.frames.pop_front().ok_or(TryReceiveError)
        })
    }

    /// Number of frames waiting to be received.
    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().frames.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of frames dropped because the channel was full.
    pub fn dropped(&self) -> u32 {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().dropped)
    }
}

impl<const SIZE: usize> Default for FrameChannel<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// A sender handle for a [`FrameChannel`].
#[derive(Clone, Copy)]
pub struct FrameSender<'a, const SIZE: usize> {
    channel: &'a FrameChannel<SIZE>,
}

impl<const SIZE: usize> FrameSender<'_, SIZE> {
    pub fn try_send(&self, frame: DisplayFrame) -> Result<(), TrySendError<DisplayFrame>> {
        self.channel.try_send(frame)
    }
}

impl<const SIZE: usize> DisplaySink for FrameSender<'_, SIZE> {
    fn publish(&mut self, frame: &DisplayFrame) {
        if self.channel.try_send(frame.clone()).is_err() {
            #[cfg(feature = "esp32-log")]
            println!(
                "[display] frame channel full, dropped {}",
                self.channel.dropped()
            );
        }
    }
}

/// A receiver handle for a [`FrameChannel`].
#[derive(Clone, Copy)]
pub struct FrameReceiver<'a, const SIZE: usize> {
    channel: &'a FrameChannel<SIZE>,
}

impl<const SIZE: usize> FrameReceiver<'_, SIZE> {
    pub fn try_receive(&self) -> Result<DisplayFrame, TryReceiveError> {
        self.channel.try_receive()
    }

    /// Number of frames the sender had to drop so far.
    pub fn dropped(&self) -> u32 {
        self.channel.dropped()
    }
}
