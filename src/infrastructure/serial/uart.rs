//! UART link adapter built on the `serialport` crate

use std::io::{ErrorKind, Read, Write};
use std::time::Duration;

use serialport::{ClearBuffer, SerialPort};
use tracing::debug;

use crate::application::ports::{SerialError, SerialLink};

/// Longest a single read may block; one poll tick of the capture loop
pub const POLL_TIMEOUT: Duration = Duration::from_millis(5);

/// UART link to the camera module (8N1)
pub struct SerialPortLink {
    port: Box<dyn SerialPort>,
}

impl SerialPortLink {
    /// Open a serial device at the given baud rate
    pub fn open(path: &str, baud_rate: u32) -> Result<Self, SerialError> {
        let port = serialport::new(path, baud_rate)
            .timeout(POLL_TIMEOUT)
            .open()
            .map_err(|e| SerialError::OpenFailed {
                port: path.to_string(),
                message: e.to_string(),
            })?;
        debug!(port = path, baud_rate, "Serial link opened");
        Ok(Self { port })
    }
}

impl SerialLink for SerialPortLink {
    fn send_line(&mut self, line: &str) -> Result<(), SerialError> {
        let mut message = Vec::with_capacity(line.len() + 2);
        message.extend_from_slice(line.as_bytes());
        message.extend_from_slice(b"\r\n");

        self.port
            .write_all(&message)
            .and_then(|_| self.port.flush())
            .map_err(|e| SerialError::WriteFailed(e.to_string()))
    }

    fn read_byte(&mut self) -> Result<Option<u8>, SerialError> {
        let mut byte = [0u8; 1];
        match self.port.read(&mut byte) {
            Ok(0) => Ok(None),
            Ok(_) => Ok(Some(byte[0])),
            Err(e) => match e.kind() {
                ErrorKind::TimedOut | ErrorKind::WouldBlock | ErrorKind::Interrupted => Ok(None),
                _ => Err(SerialError::ReadFailed(e.to_string())),
            },
        }
    }

    fn discard_pending(&mut self) -> Result<(), SerialError> {
        self.port
            .clear(ClearBuffer::Input)
            .map_err(|e| SerialError::ReadFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_missing_device_fails_with_port_name() {
        let err = SerialPortLink::open("/dev/does-not-exist-fridge", 115_200)
            .err()
            .unwrap();
        match err {
            SerialError::OpenFailed { port, .. } => assert_eq!(port, "/dev/does-not-exist-fridge"),
            other => panic!("Expected open failure, got {:?}", other),
        }
    }

    #[test]
    #[ignore = "Requires the camera module on /dev/serial0"]
    fn can_request_a_frame() {
        let mut link = SerialPortLink::open("/dev/serial0", 115_200).unwrap();
        link.discard_pending().unwrap();
        link.send_line("capture").unwrap();
    }
}
