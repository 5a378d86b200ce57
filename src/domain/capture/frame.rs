//! Image frame value object

use base64::Engine;

/// Marker the camera module appends after the JPEG payload
pub const END_MARKER: [u8; 8] = [0xFF, 0xD9, 0x00, 0x00, 0xDE, 0xAD, 0xBE, 0xEF];

/// Maximum bytes accumulated for one frame, marker included
pub const MAX_FRAME_SIZE: usize = 100 * 256;

/// MIME type of the payload produced by the camera module
pub const FRAME_MIME_TYPE: &str = "image/jpeg";

/// Value object holding one captured image, end marker stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFrame {
    data: Vec<u8>,
}

impl ImageFrame {
    /// Create a frame from payload bytes (without the end marker)
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Get the payload bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Payload length in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get human-readable size
    pub fn human_readable_size(&self) -> String {
        let bytes = self.len();
        if bytes < 1024 {
            format!("{} B", bytes)
        } else {
            format!("{:.1} KB", bytes as f64 / 1024.0)
        }
    }

    /// Encode the payload as base64
    pub fn to_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.data)
    }

    /// Encode the payload as a `data:` URL for inline upload
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", FRAME_MIME_TYPE, self.to_base64())
    }
}
