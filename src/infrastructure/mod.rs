//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with external systems like the UART camera, the
//! OpenAI API, the TTS server, the audio device and GPIO.

pub mod clock;
pub mod config;
pub mod inventory;
pub mod panel;
pub mod recognition;
pub mod serial;
pub mod speech;

// Re-export adapters
pub use clock::{ManualClock, SystemClock};
pub use config::XdgConfigStore;
pub use inventory::JsonInventoryStore;
pub use panel::{create_panel, IioLightSensor, NoOpButtons, NoOpLeds, PanelIo};
pub use recognition::OpenAiRecognizer;
pub use serial::{SerialCamera, SerialPortLink};
pub use speech::{HttpSpeechSynthesizer, RodioOutput};
