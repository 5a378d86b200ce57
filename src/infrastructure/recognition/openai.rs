//! OpenAI chat-completions recognizer adapter

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ports::{RecognitionError, Recognizer};
use crate::domain::capture::ImageFrame;
use crate::domain::config::{DEFAULT_API_BASE_URL, DEFAULT_MODEL};
use crate::domain::inventory::Instruction;
use crate::domain::timing::Duration;

// Request types for the chat completions API

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: MessageContent,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

// Response types for the chat completions API

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Option<Vec<Choice>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Vision-capable chat completions client
pub struct OpenAiRecognizer {
    api_key: String,
    model: String,
    base_url: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl OpenAiRecognizer {
    /// Create a recognizer with the given API key and default model
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: Duration::default_request_timeout(),
            client: reqwest::Client::new(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Point the client at another OpenAI-compatible endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Bound every request, response body included
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the API URL
    fn api_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    /// Build the request body, attaching the frame if given
    fn build_request(&self, instruction: &Instruction, frame: Option<&ImageFrame>) -> ChatRequest {
        let content = match frame {
            Some(frame) => MessageContent::Parts(vec![
                ContentPart::Text {
                    text: instruction.content().to_string(),
                },
                ContentPart::ImageUrl {
                    image_url: ImageUrl {
                        url: frame.to_data_url(),
                    },
                },
            ]),
            None => MessageContent::Text(instruction.content().to_string()),
        };

        ChatRequest {
            model: self.model.clone(),
            messages: vec![Message {
                role: "user".to_string(),
                content,
            }],
        }
    }

    /// Extract text from response
    fn extract_text(response: &ChatResponse) -> Option<String> {
        response
            .choices
            .as_ref()?
            .first()?
            .message
            .as_ref()?
            .content
            .clone()
    }

    async fn complete(&self, body: ChatRequest) -> Result<String, RecognitionError> {
        let response = self
            .client
            .post(self.api_url())
            .bearer_auth(&self.api_key)
            .timeout(self.timeout.as_std())
            .json(&body)
            .send()
            .await
            .map_err(|e| RecognitionError::RequestFailed(e.to_string()))?;

        let status = response.status();

        // Handle HTTP errors
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(RecognitionError::InvalidApiKey);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(RecognitionError::RateLimited);
        }

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(RecognitionError::ApiError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let response: ChatResponse = response
            .json()
            .await
            .map_err(|e| RecognitionError::ParseError(e.to_string()))?;

        // Check for API error in response body
        if let Some(error) = response.error {
            return Err(RecognitionError::ApiError(error.message));
        }

        let text = Self::extract_text(&response).ok_or(RecognitionError::EmptyResponse)?;

        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(RecognitionError::EmptyResponse);
        }

        Ok(trimmed.to_string())
    }
}

#[async_trait]
impl Recognizer for OpenAiRecognizer {
    async fn recognize(
        &self,
        frame: &ImageFrame,
        instruction: &Instruction,
    ) -> Result<String, RecognitionError> {
        debug!(bytes = frame.len(), model = %self.model, "Sending frame for recognition");
        self.complete(self.build_request(instruction, Some(frame)))
            .await
    }

    async fn phrase(&self, instruction: &Instruction) -> Result<String, RecognitionError> {
        self.complete(self.build_request(instruction, None)).await
    }
}
