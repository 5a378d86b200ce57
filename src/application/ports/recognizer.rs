//! Recognition port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::capture::ImageFrame;
use crate::domain::inventory::Instruction;

/// Recognition service errors
#[derive(Debug, Clone, Error)]
pub enum RecognitionError {
    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("Empty response")]
    EmptyResponse,

    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    #[error("API error: {0}")]
    ApiError(String),
}

/// Port for the remote recognition service
#[async_trait]
pub trait Recognizer: Send + Sync {
    /// Identify the product shown in a frame.
    ///
    /// # Arguments
    /// * `frame` - The captured image
    /// * `instruction` - What to answer and how
    ///
    /// # Returns
    /// A short label
    async fn recognize(
        &self,
        frame: &ImageFrame,
        instruction: &Instruction,
    ) -> Result<String, RecognitionError>;

    /// Produce free text for a text-only instruction
    async fn phrase(&self, instruction: &Instruction) -> Result<String, RecognitionError>;
}
