//! Recognition service adapters

mod openai;

pub use openai::OpenAiRecognizer;
