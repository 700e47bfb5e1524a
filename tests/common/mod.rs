//! Shared test utilities: deterministic fakes for the pipeline's
//! external collaborators

use async_trait::async_trait;

use aera_gateway::search::SearchProvider;
use aera_gateway::voice::{Synthesizer, Transcriber};
use aera_gateway::{Error, Result};

/// Transcriber that returns a canned transcript (or a service error)
pub struct FakeTranscriber {
    pub transcript: Option<String>,
}

impl FakeTranscriber {
    #[must_use]
    pub fn saying(text: &str) -> Self {
        Self {
            transcript: Some(text.to_string()),
        }
    }

    #[must_use]
    pub fn unreachable() -> Self {
        Self { transcript: None }
    }
}

#[async_trait]
impl Transcriber for FakeTranscriber {
    async fn transcribe(&self, _audio: &[u8]) -> Result<String> {
        self.transcript
            .clone()
            .ok_or_else(|| Error::Stt("speech service unreachable".to_string()))
    }
}

/// Search provider that returns a fixed answer string
pub struct FakeSearch {
    pub answer: String,
}

impl FakeSearch {
    #[must_use]
    pub fn answering(text: &str) -> Self {
        Self {
            answer: text.to_string(),
        }
    }

    /// Build the answer the way the real client does: snippets joined
    /// with single spaces
    #[must_use]
    pub fn from_snippets(snippets: &[&str]) -> Self {
        Self {
            answer: snippets.join(" "),
        }
    }
}

#[async_trait]
impl SearchProvider for FakeSearch {
    async fn answer(&self, _query: &str) -> String {
        self.answer.clone()
    }
}

/// Synthesizer that encodes its input so tests can assert what was
/// spoken
pub struct FakeSynthesizer {
    pub fail: bool,
}

impl FakeSynthesizer {
    #[must_use]
    pub fn working() -> Self {
        Self { fail: false }
    }

    #[must_use]
    pub fn broken() -> Self {
        Self { fail: true }
    }
}

#[async_trait]
impl Synthesizer for FakeSynthesizer {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>> {
        if self.fail {
            return Err(Error::Tts("synthesis backend down".to_string()));
        }
        Ok(format!("MP3:{text}").into_bytes())
    }
}
