//! Application layer - Use cases and port interfaces
//!
//! Contains the controller loop, the serial framer, the announcement
//! player and the trait definitions for external system interactions.

pub mod announce;
pub mod event_loop;
pub mod framer;
pub mod ports;

// Re-export use cases
pub use announce::{play_until_done, AnnouncementPlayer};
pub use event_loop::{
    ActionReport, CycleOutcome, EventLoop, Hardware, Services, RECOGNITION_FAILURE_TEXT,
};
pub use framer::{ImageFramer, CAPTURE_COMMAND};
