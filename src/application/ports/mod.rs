//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod camera;
pub mod clock;
pub mod config;
pub mod inventory;
pub mod panel;
pub mod recognizer;
pub mod serial;
pub mod speech;

// Re-export common types
pub use camera::Camera;
pub use clock::Clock;
pub use config::ConfigStore;
pub use inventory::{InventoryError, InventoryStore};
pub use panel::{ButtonPanel, Led, LightSensor, PanelError, StatusLeds};
pub use recognizer::{RecognitionError, Recognizer};
pub use serial::{SerialError, SerialLink};
pub use speech::{
    Announcer, AudioOutput, Playback, PlaybackOutcome, SpeechError, SpeechSynthesizer,
};
