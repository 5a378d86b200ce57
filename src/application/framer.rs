//! Serial image framer
//!
//! Drives one capture attempt over the serial link: requests a frame,
//! feeds received bytes into a fresh [`CaptureSession`] and stops at the
//! first terminal state. The loop polls the link one byte at a time and
//! checks the deadline on every poll.

use tracing::{debug, info, warn};

use crate::domain::capture::{CaptureError, CaptureLimits, CaptureSession, ImageFrame};

use super::ports::{Clock, SerialError, SerialLink};

/// Command that asks the camera module for one frame
pub const CAPTURE_COMMAND: &str = "capture";

/// Synchronous capture driver over a serial link
pub struct ImageFramer<L, C>
where
    L: SerialLink,
    C: Clock,
{
    link: L,
    clock: C,
    limits: CaptureLimits,
}

impl<L, C> ImageFramer<L, C>
where
    L: SerialLink,
    C: Clock,
{
    /// Create a framer with the reference capacity and deadline
    pub fn new(link: L, clock: C) -> Self {
        Self::with_limits(link, clock, CaptureLimits::default())
    }

    pub fn with_limits(link: L, clock: C, limits: CaptureLimits) -> Self {
        Self {
            link,
            clock,
            limits,
        }
    }

    /// Run one capture attempt to a terminal state. Never retries.
    pub fn capture(&mut self) -> Result<ImageFrame, CaptureError> {
        self.link.discard_pending().map_err(link_error)?;
        self.link.send_line(CAPTURE_COMMAND).map_err(link_error)?;

        let mut session = CaptureSession::new(self.limits);
        session.begin(self.clock.now_ms());
        debug!(
            capacity = self.limits.capacity,
            deadline = %self.limits.deadline,
            "Capture requested"
        );

        while !session.check_deadline(self.clock.now_ms()).is_terminal() {
            if let Some(byte) = self.link.read_byte().map_err(link_error)? {
                session.push(byte);
            }
        }

        let received = session.received();
        match session.finish() {
            Ok(frame) => {
                info!(
                    bytes = frame.len(),
                    size = %frame.human_readable_size(),
                    "Image captured"
                );
                Ok(frame)
            }
            Err(e) => {
                warn!(received, "Image capture failed: {}", e);
                Err(e)
            }
        }
    }
}

fn link_error(e: SerialError) -> CaptureError {
    CaptureError::Link(e.to_string())
}
