//! Speech announcement port interfaces

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while producing an announcement
#[derive(Debug, Clone, Error)]
pub enum SpeechError {
    #[error("Speech request failed: {0}")]
    RequestFailed(String),

    #[error("Speech service returned HTTP {0}")]
    HttpStatus(u16),

    #[error("Audio device not available: {0}")]
    DeviceNotAvailable(String),

    #[error("Failed to decode audio: {0}")]
    DecodeFailed(String),

    #[error("Playback failed: {0}")]
    PlaybackFailed(String),
}

/// How an announcement ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackOutcome {
    /// The decoder ran out of audio
    Finished,
    /// The playback deadline elapsed and playback was cut off
    TimedOut,
}

impl PlaybackOutcome {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Finished => "finished",
            Self::TimedOut => "timed out",
        }
    }
}

impl fmt::Display for PlaybackOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Port for the remote text-to-speech service
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Fetch encoded audio for a text
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SpeechError>;
}

/// A playback in progress. Dropping the handle releases the decoder.
pub trait Playback {
    /// Whether the decoder still has audio queued
    fn is_running(&self) -> bool;

    /// Stop playback immediately
    fn stop(&mut self);
}

/// Port for the local audio decoder and output device.
///
/// `start` runs on a blocking thread; the returned handle never leaves it.
pub trait AudioOutput: Send + Sync {
    fn start(&self, audio: Vec<u8>) -> Result<Box<dyn Playback>, SpeechError>;
}

/// Port for speaking a text end to end
#[async_trait]
pub trait Announcer: Send + Sync {
    async fn announce(&self, text: &str) -> Result<PlaybackOutcome, SpeechError>;
}
