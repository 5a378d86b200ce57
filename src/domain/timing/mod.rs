//! Timing domain module

mod duration;

pub use duration::{
    Duration, DEFAULT_CAPTURE_TIMEOUT_MS, DEFAULT_PLAYBACK_TIMEOUT_MS, DEFAULT_REQUEST_TIMEOUT_MS,
    IDLE_INTERVAL_MS,
};
