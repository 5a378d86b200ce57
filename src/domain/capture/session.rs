//! Capture session state machine
//!
//! A session owns the frame buffer for exactly one capture attempt. It is
//! created fresh for every attempt and consumed by [`CaptureSession::finish`],
//! so bytes from an abandoned attempt can never reach the next frame.
//!
//! State machine:
//!   IDLE -> CAPTURING (begin)
//!   CAPTURING -> COMPLETE (push completes the end marker)
//!   CAPTURING -> OVERFLOWED (push reaches capacity without the marker)
//!   CAPTURING -> TIMED_OUT (check_deadline after the deadline elapsed)

use std::fmt;

use thiserror::Error;

use super::frame::{ImageFrame, END_MARKER, MAX_FRAME_SIZE};
use crate::domain::timing::Duration;

/// Capture session states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CaptureState {
    #[default]
    Idle,
    Capturing,
    Complete,
    TimedOut,
    Overflowed,
}

impl CaptureState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Capturing => "capturing",
            Self::Complete => "complete",
            Self::TimedOut => "timed out",
            Self::Overflowed => "overflowed",
        }
    }

    /// Whether the session has reached one of its final states
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete | Self::TimedOut | Self::Overflowed)
    }
}

impl fmt::Display for CaptureState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Capture failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    #[error("Image capture timed out after {elapsed_ms} ms ({received} bytes received)")]
    TimedOut { elapsed_ms: u64, received: usize },

    #[error("Image capture overflowed the {capacity} byte buffer")]
    Overflowed { capacity: usize },

    #[error("Image capture ended while {state}")]
    Incomplete { state: CaptureState },

    #[error("Serial link error: {0}")]
    Link(String),
}

/// Size and time ceilings for one capture attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureLimits {
    pub capacity: usize,
    pub deadline: Duration,
}

impl CaptureLimits {
    pub const fn new(capacity: usize, deadline: Duration) -> Self {
        Self { capacity, deadline }
    }
}

impl Default for CaptureLimits {
    fn default() -> Self {
        Self::new(MAX_FRAME_SIZE, Duration::default_capture_timeout())
    }
}

/// One capture attempt. Timestamps are milliseconds from an arbitrary
/// monotonic origin supplied by the caller.
#[derive(Debug)]
pub struct CaptureSession {
    buffer: Vec<u8>,
    limits: CaptureLimits,
    started_at: u64,
    last_seen: u64,
    state: CaptureState,
}

impl CaptureSession {
    /// Create a session in idle state
    pub fn new(limits: CaptureLimits) -> Self {
        Self {
            buffer: Vec::with_capacity(limits.capacity),
            limits,
            started_at: 0,
            last_seen: 0,
            state: CaptureState::Idle,
        }
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    /// Number of bytes accumulated so far, marker included
    pub fn received(&self) -> usize {
        self.buffer.len()
    }

    /// Transition from IDLE to CAPTURING. Has no effect in any other state.
    pub fn begin(&mut self, now_ms: u64) -> CaptureState {
        if self.state == CaptureState::Idle {
            self.buffer.clear();
            self.started_at = now_ms;
            self.last_seen = now_ms;
            self.state = CaptureState::Capturing;
        }
        self.state
    }

    /// Fail the session if more than the deadline has elapsed since `begin`.
    pub fn check_deadline(&mut self, now_ms: u64) -> CaptureState {
        if self.state == CaptureState::Capturing {
            self.last_seen = now_ms;
            if self.elapsed_ms() > self.limits.deadline.as_millis() {
                self.state = CaptureState::TimedOut;
            }
        }
        self.state
    }

    /// Append one byte received from the link.
    pub fn push(&mut self, byte: u8) -> CaptureState {
        if self.state != CaptureState::Capturing {
            return self.state;
        }

        self.buffer.push(byte);

        if self.ends_with_marker() {
            self.state = CaptureState::Complete;
        } else if self.buffer.len() >= self.limits.capacity {
            self.state = CaptureState::Overflowed;
        }
        self.state
    }

    /// Consume the session, yielding the frame only if it completed.
    pub fn finish(self) -> Result<ImageFrame, CaptureError> {
        match self.state {
            CaptureState::Complete => {
                let mut data = self.buffer;
                data.truncate(data.len() - END_MARKER.len());
                Ok(ImageFrame::new(data))
            }
            CaptureState::TimedOut => Err(CaptureError::TimedOut {
                elapsed_ms: self.elapsed_ms(),
                received: self.buffer.len(),
            }),
            CaptureState::Overflowed => Err(CaptureError::Overflowed {
                capacity: self.limits.capacity,
            }),
            state => Err(CaptureError::Incomplete { state }),
        }
    }

    fn elapsed_ms(&self) -> u64 {
        self.last_seen.saturating_sub(self.started_at)
    }

    // Only the trailing window is compared, never the whole buffer
    fn ends_with_marker(&self) -> bool {
        self.buffer.len() >= END_MARKER.len()
            && self.buffer[self.buffer.len() - END_MARKER.len()..] == END_MARKER
    }
}
