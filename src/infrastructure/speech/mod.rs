//! Speech synthesis and playback adapters

mod http_tts;
mod rodio;

pub use http_tts::HttpSpeechSynthesizer;
pub use self::rodio::RodioOutput;
