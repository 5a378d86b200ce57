//! Serial image capture domain module

mod frame;
mod session;

pub use frame::{ImageFrame, END_MARKER, FRAME_MIME_TYPE, MAX_FRAME_SIZE};
pub use session::{CaptureError, CaptureLimits, CaptureSession, CaptureState};
