//! Voice processing module
//!
//! Speech-to-text and text-to-speech over cloud provider APIs. The
//! pipeline consumes both through narrow traits so tests can
//! substitute deterministic fakes without network access.

mod stt;
mod tts;

use async_trait::async_trait;

pub use stt::SpeechToText;
pub use tts::{TextToSpeech, REPLY_LANGUAGE};

use crate::Result;

/// Converts recorded audio into a text transcription
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe audio bytes (WAV or WebM) to text
    ///
    /// An empty transcript means the audio was unintelligible; an
    /// `Err` means the service could not be reached.
    async fn transcribe(&self, audio: &[u8]) -> Result<String>;
}

/// Converts text into synthesized speech audio
#[async_trait]
pub trait Synthesizer: Send + Sync {
    /// Synthesize text to audio bytes (MP3)
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>>;
}
