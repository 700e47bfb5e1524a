//! One-shot assist pipeline
//!
//! Sequences a single user interaction: recorded audio is transcribed,
//! the transcript becomes a search query, the aggregated answer is
//! summarized for display and synthesized for playback. Runs are
//! strictly sequential per user action; audio passes between stages as
//! in-memory byte buffers, never through the filesystem.

use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use crate::search::SearchProvider;
use crate::summarize::summarize;
use crate::voice::{Synthesizer, Transcriber, REPLY_LANGUAGE};

/// Number of sentences shown in the displayed summary
pub const SUMMARY_SENTENCES: usize = 3;

/// Result of one completed pipeline run
#[derive(Debug, Clone)]
pub struct AssistOutcome {
    /// Unique ID for this run (tracing correlation)
    pub run_id: Uuid,
    /// What the user said, as transcribed
    pub transcript: String,
    /// Full aggregated search answer; this is what gets spoken
    pub answer: String,
    /// First sentences of the answer; this is what gets displayed
    pub summary: String,
    /// Synthesized speech for the full answer (MP3)
    pub audio: Vec<u8>,
}

/// Ways a pipeline run can abort
///
/// Search failures never appear here: the search stage converts every
/// failure into a sentinel answer string, so by the time text flows
/// downstream there is nothing left to fail except synthesis.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The audio produced no usable transcript; the user should record
    /// again
    #[error("audio was unclear, please try again")]
    UnintelligibleAudio,

    /// The speech-to-text service could not be reached
    #[error("could not reach the speech recognition service: {0}")]
    SttUnavailable(String),

    /// Speech synthesis of the answer failed
    #[error("speech synthesis failed: {0}")]
    SynthesisFailed(String),
}

/// The assist pipeline: STT → search → summarize → TTS
pub struct Pipeline {
    transcriber: Arc<dyn Transcriber>,
    search: Arc<dyn SearchProvider>,
    synthesizer: Arc<dyn Synthesizer>,
}

impl Pipeline {
    /// Wire up a pipeline from its three collaborators
    #[must_use]
    pub fn new(
        transcriber: Arc<dyn Transcriber>,
        search: Arc<dyn SearchProvider>,
        synthesizer: Arc<dyn Synthesizer>,
    ) -> Self {
        Self {
            transcriber,
            search,
            synthesizer,
        }
    }

    /// Run the pipeline once for a recorded utterance
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError`] when transcription yields nothing or a
    /// voice service is unreachable; search failures are folded into
    /// the answer text instead.
    pub async fn run(&self, audio: &[u8]) -> Result<AssistOutcome, PipelineError> {
        let run_id = Uuid::new_v4();

        let transcript = self
            .transcriber
            .transcribe(audio)
            .await
            .map_err(|e| PipelineError::SttUnavailable(e.to_string()))?;

        let transcript = transcript.trim().to_string();
        if transcript.is_empty() {
            tracing::info!(%run_id, "empty transcript, aborting run");
            return Err(PipelineError::UnintelligibleAudio);
        }
        tracing::info!(%run_id, transcript = %transcript, "transcription complete");

        let answer = self.search.answer(&transcript).await;
        let summary = summarize(&answer, SUMMARY_SENTENCES);
        tracing::debug!(
            %run_id,
            answer_chars = answer.len(),
            summary_chars = summary.len(),
            "search answer aggregated"
        );

        // The full answer is spoken; the summary is only displayed
        let audio = self
            .synthesizer
            .synthesize(&answer)
            .await
            .map_err(|e| PipelineError::SynthesisFailed(e.to_string()))?;

        tracing::info!(
            %run_id,
            audio_bytes = audio.len(),
            language = REPLY_LANGUAGE,
            "assist run complete"
        );

        Ok(AssistOutcome {
            run_id,
            transcript,
            answer,
            summary,
            audio,
        })
    }
}
