//! Serial link port interface

use thiserror::Error;

/// Serial link errors
#[derive(Debug, Clone, Error)]
pub enum SerialError {
    #[error("Failed to open serial port {port}: {message}")]
    OpenFailed { port: String, message: String },

    #[error("Serial write failed: {0}")]
    WriteFailed(String),

    #[error("Serial read failed: {0}")]
    ReadFailed(String),
}

/// Port for the point-to-point byte link to the camera module.
///
/// Reads never block for longer than one poll tick.
pub trait SerialLink: Send {
    /// Send one command line, terminator appended
    fn send_line(&mut self, line: &str) -> Result<(), SerialError>;

    /// Read a single byte if one is available
    fn read_byte(&mut self) -> Result<Option<u8>, SerialError>;

    /// Drop any bytes already waiting on the link
    fn discard_pending(&mut self) -> Result<(), SerialError>;
}

impl<L: SerialLink + ?Sized> SerialLink for Box<L> {
    fn send_line(&mut self, line: &str) -> Result<(), SerialError> {
        (**self).send_line(line)
    }

    fn read_byte(&mut self) -> Result<Option<u8>, SerialError> {
        (**self).read_byte()
    }

    fn discard_pending(&mut self) -> Result<(), SerialError> {
        (**self).discard_pending()
    }
}
