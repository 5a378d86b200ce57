//! Domain layer - Core business logic
//!
//! Contains value objects, entities, state machines and domain errors.
//! This layer has no dependencies on external systems.

pub mod capture;
pub mod config;
pub mod control;
pub mod error;
pub mod inventory;
pub mod timing;

// Re-export common types
pub use capture::{CaptureError, CaptureLimits, CaptureSession, CaptureState, ImageFrame};
pub use config::AppConfig;
pub use control::{ButtonState, LightGate, LightReading, PendingAction};
pub use error::*;
pub use inventory::{Instruction, Inventory};
pub use timing::Duration;
