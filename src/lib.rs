//! FridgeSentry - light-gated fridge inventory controller
//!
//! While the fridge is open, an insert or remove button press captures a
//! JPEG from a serial camera module, asks a vision model what the product
//! is, updates a persistent inventory and speaks a confirmation.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Capture framing state machine, light gate, button actions, inventory, config
//! - **Application**: Controller loop, serial framer, announcement player and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (UART, OpenAI, TTS, rodio, GPIO, JSON store)
//! - **CLI**: Command-line interface, argument parsing, and signal handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
