//! Aera Gateway - Voice search assistant gateway
//!
//! This library provides the core functionality for the Aera gateway:
//! - Speech-to-text and text-to-speech via cloud providers
//! - Web search with snippet aggregation (SerpAPI)
//! - Extractive summarization of search answers
//! - A one-shot pipeline wiring the three together behind an HTTP API
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                  Browser widget                      │
//! │       record button  │  text cards  │  player       │
//! └────────────────────┬────────────────────────────────┘
//!                      │ POST /api/assist (audio bytes)
//! ┌────────────────────▼────────────────────────────────┐
//! │                  Aera Gateway                        │
//! │   STT  →  SearchClient  →  Summarizer  →  TTS       │
//! └────────────────────┬────────────────────────────────┘
//!                      │
//! ┌────────────────────▼────────────────────────────────┐
//! │              External services                       │
//! │   Whisper/Deepgram  │  SerpAPI  │  OpenAI/11Labs    │
//! └─────────────────────────────────────────────────────┘
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod search;
pub mod summarize;
pub mod voice;

pub use config::Config;
pub use error::{Error, Result};
pub use pipeline::{AssistOutcome, Pipeline, PipelineError};
pub use search::{SearchClient, SearchProvider, NO_RESULTS, SEARCH_FAILED, SEARCH_UNAVAILABLE};
pub use summarize::summarize;
pub use voice::{SpeechToText, Synthesizer, TextToSpeech, Transcriber};
