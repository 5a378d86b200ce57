//! Camera adapter running the serial framer on the blocking pool

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::application::ports::{Camera, Clock, SerialLink};
use crate::application::ImageFramer;
use crate::domain::capture::{CaptureError, ImageFrame};

/// Camera backed by an [`ImageFramer`].
///
/// The busy-wait capture loop runs on a blocking thread; callers still
/// await it to completion, so at most one capture is in flight.
pub struct SerialCamera<L, C>
where
    L: SerialLink,
    C: Clock,
{
    framer: Arc<Mutex<ImageFramer<L, C>>>,
}

impl<L, C> SerialCamera<L, C>
where
    L: SerialLink,
    C: Clock,
{
    pub fn new(framer: ImageFramer<L, C>) -> Self {
        Self {
            framer: Arc::new(Mutex::new(framer)),
        }
    }
}

#[async_trait]
impl<L, C> Camera for SerialCamera<L, C>
where
    L: SerialLink + 'static,
    C: Clock + 'static,
{
    async fn capture(&self) -> Result<ImageFrame, CaptureError> {
        let framer = Arc::clone(&self.framer);

        tokio::task::spawn_blocking(move || {
            let mut framer = framer
                .lock()
                .map_err(|_| CaptureError::Link("Serial framer lock poisoned".to_string()))?;
            framer.capture()
        })
        .await
        .map_err(|e| CaptureError::Link(format!("Task join error: {}", e)))?
    }
}
