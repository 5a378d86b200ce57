//! Rodio-based audio output adapter

use std::io::Cursor;

use rodio::{Decoder, OutputStream, Sink};

use crate::application::ports::{AudioOutput, Playback, SpeechError};
use crate::domain::config::DEFAULT_VOLUME;

/// Decodes audio (WAV, MP3, ...) and plays it on the default output device
pub struct RodioOutput {
    volume: f32,
}

impl RodioOutput {
    pub fn new(volume: f32) -> Self {
        Self {
            volume: volume.clamp(0.0, 1.0),
        }
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }
}

impl Default for RodioOutput {
    fn default() -> Self {
        Self::new(DEFAULT_VOLUME)
    }
}

impl AudioOutput for RodioOutput {
    fn start(&self, audio: Vec<u8>) -> Result<Box<dyn Playback>, SpeechError> {
        let (stream, handle) = OutputStream::try_default()
            .map_err(|e| SpeechError::DeviceNotAvailable(e.to_string()))?;

        let sink = Sink::try_new(&handle).map_err(|e| SpeechError::PlaybackFailed(e.to_string()))?;

        let source =
            Decoder::new(Cursor::new(audio)).map_err(|e| SpeechError::DecodeFailed(e.to_string()))?;

        sink.set_volume(self.volume);
        sink.append(source);

        Ok(Box::new(RodioPlayback {
            _stream: stream,
            sink,
        }))
    }
}

/// Playback handle; the stream must outlive the sink
struct RodioPlayback {
    _stream: OutputStream,
    sink: Sink,
}

impl Playback for RodioPlayback {
    fn is_running(&self) -> bool {
        !self.sink.empty()
    }

    fn stop(&mut self) {
        self.sink.stop();
    }
}
