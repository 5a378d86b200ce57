//! Camera port interface

use async_trait::async_trait;

use crate::domain::capture::{CaptureError, ImageFrame};

/// Port for acquiring one still image
#[async_trait]
pub trait Camera: Send + Sync {
    /// Capture a single frame.
    ///
    /// # Returns
    /// The frame with the end marker stripped, or the terminal failure of
    /// the attempt. Implementations never retry.
    async fn capture(&self) -> Result<ImageFrame, CaptureError>;
}
