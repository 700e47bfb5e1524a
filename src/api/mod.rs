//! HTTP API server for the Aera gateway

pub mod assist;
pub mod health;

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::config::{Config, SttProviderKind, TtsProviderKind};
use crate::pipeline::Pipeline;
use crate::search::{retry::RetryPolicy, SearchClient};
use crate::voice::{SpeechToText, TextToSpeech};
use crate::Result;

/// Shared state for API handlers
pub struct ApiState {
    /// The assist pipeline; `None` when no STT/TTS credentials are
    /// configured, in which case `/api/assist` reports unavailability
    pub pipeline: Option<Pipeline>,
}

/// API server
pub struct ApiServer {
    state: Arc<ApiState>,
    port: u16,
    static_dir: Option<PathBuf>,
}

impl ApiServer {
    /// Assemble the server from configuration
    ///
    /// The search client is always constructed (the SerpAPI key is
    /// mandatory). The voice pipeline is only assembled when the
    /// configured STT and TTS providers both have credentials.
    ///
    /// # Errors
    ///
    /// Returns error if a component rejects its configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let search = Arc::new(
            SearchClient::with_endpoint(
                config.search.api_key.clone(),
                config.search.endpoint.clone(),
            )?
            .with_retry_policy(RetryPolicy {
                max_attempts: config.search.max_retries,
                ..RetryPolicy::default()
            }),
        );

        let stt = match (config.voice.stt_provider, config.stt_key()) {
            (SttProviderKind::Whisper, Some(key)) => Some(SpeechToText::new_whisper(
                key.to_string(),
                config.voice.stt_model.clone(),
            )?),
            (SttProviderKind::Deepgram, Some(key)) => Some(SpeechToText::new_deepgram(
                key.to_string(),
                config.voice.stt_model.clone(),
            )?),
            (_, None) => None,
        };

        let tts = match (config.voice.tts_provider, config.tts_key()) {
            (TtsProviderKind::OpenAi, Some(key)) => Some(TextToSpeech::new_openai(
                key.to_string(),
                config.voice.tts_voice.clone(),
                config.voice.tts_model.clone(),
            )?),
            (TtsProviderKind::ElevenLabs, Some(key)) => Some(TextToSpeech::new_elevenlabs(
                key.to_string(),
                config.voice.tts_voice.clone(),
                config.voice.tts_model.clone(),
            )?),
            (_, None) => None,
        };

        let pipeline = match (stt, tts) {
            (Some(stt), Some(tts)) => {
                Some(Pipeline::new(Arc::new(stt), search, Arc::new(tts)))
            }
            _ => {
                tracing::warn!(
                    "no STT/TTS credentials configured, /api/assist will report unavailability"
                );
                None
            }
        };

        Ok(Self {
            state: Arc::new(ApiState { pipeline }),
            port: config.server.port,
            static_dir: config.server.static_dir.clone(),
        })
    }

    /// Build the router with all routes
    fn router(&self) -> Router {
        let mut router = Router::new()
            .nest("/api", assist::router(self.state.clone()))
            .merge(health::router())
            .merge(health::status_router(self.state.clone()));

        // Serve the web UI if configured
        if let Some(static_dir) = &self.static_dir {
            let index_file = static_dir.join("index.html");
            let serve_dir = ServeDir::new(static_dir).not_found_service(ServeFile::new(&index_file));

            router = router.fallback_service(serve_dir);
            tracing::info!(path = %static_dir.display(), "serving static files");
        }

        // CORS layer for cross-origin requests from dev frontends
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        router.layer(cors).layer(TraceLayer::new_for_http())
    }

    /// Run the API server
    ///
    /// # Errors
    ///
    /// Returns error if server fails to bind or run
    pub async fn run(self) -> Result<()> {
        let addr = format!("0.0.0.0:{}", self.port);
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| crate::Error::Config(format!("failed to bind API server: {e}")))?;

        tracing::info!(port = self.port, "API server listening");

        axum::serve(listener, self.router())
            .await
            .map_err(|e| crate::Error::Config(format!("API server error: {e}")))?;

        Ok(())
    }
}
