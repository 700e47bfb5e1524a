//! Configuration management for the Aera gateway
//!
//! Values layer as env > TOML file > default. The SerpAPI key is the
//! one hard requirement: without it the gateway refuses to start.

pub mod file;

use std::path::PathBuf;

use crate::{Error, Result};

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 8720;

/// Aera gateway configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API server configuration
    pub server: ServerConfig,

    /// Voice (STT/TTS) configuration
    pub voice: VoiceConfig,

    /// Search configuration
    pub search: SearchConfig,
}

/// HTTP API server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to listen on
    pub port: u16,

    /// Path to static files directory (web UI); `None` disables UI
    /// serving
    pub static_dir: Option<PathBuf>,
}

/// STT provider selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SttProviderKind {
    Whisper,
    Deepgram,
}

/// TTS provider selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TtsProviderKind {
    OpenAi,
    ElevenLabs,
}

/// Voice processing configuration
#[derive(Debug, Clone)]
pub struct VoiceConfig {
    /// STT backend
    pub stt_provider: SttProviderKind,

    /// STT model (e.g. "whisper-1", "nova-2")
    pub stt_model: String,

    /// TTS backend
    pub tts_provider: TtsProviderKind,

    /// TTS model (e.g. "tts-1", "eleven_monolingual_v1")
    pub tts_model: String,

    /// TTS voice identifier
    pub tts_voice: String,

    /// `OpenAI` API key (Whisper STT and OpenAI TTS)
    pub openai_key: Option<String>,

    /// Deepgram API key (alternate STT)
    pub deepgram_key: Option<String>,

    /// `ElevenLabs` API key (alternate TTS)
    pub elevenlabs_key: Option<String>,
}

/// Search configuration
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// SerpAPI key (required)
    pub api_key: String,

    /// Search endpoint URL
    pub endpoint: String,

    /// Total attempts per query (including the first)
    pub max_retries: u32,
}

impl Config {
    /// Load configuration from environment and optional config file
    ///
    /// # Errors
    ///
    /// Returns error if `SERP_API_KEY` is missing from both the
    /// environment and the config file. This is fatal by design: the
    /// gateway cannot answer anything without search.
    pub fn load() -> Result<Self> {
        let fc = file::load_config_file();

        let serp_key = std::env::var("SERP_API_KEY")
            .ok()
            .or(fc.api_keys.serp)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                Error::Config(
                    "SERP_API_KEY not set; get a key at https://serpapi.com and export it"
                        .to_string(),
                )
            })?;

        let server = ServerConfig {
            port: std::env::var("AERA_PORT")
                .or_else(|_| std::env::var("PORT"))
                .ok()
                .and_then(|s| s.parse().ok())
                .or(fc.server.port)
                .unwrap_or(DEFAULT_PORT),
            static_dir: std::env::var("AERA_STATIC_DIR")
                .ok()
                .map(PathBuf::from)
                .or(fc.server.static_dir)
                .or_else(default_static_dir),
        };

        let stt_provider = match std::env::var("AERA_STT_PROVIDER")
            .ok()
            .or(fc.voice.stt_provider)
            .as_deref()
        {
            Some("deepgram") => SttProviderKind::Deepgram,
            _ => SttProviderKind::Whisper,
        };

        let tts_provider = match std::env::var("AERA_TTS_PROVIDER")
            .ok()
            .or(fc.voice.tts_provider)
            .as_deref()
        {
            Some("elevenlabs") => TtsProviderKind::ElevenLabs,
            _ => TtsProviderKind::OpenAi,
        };

        let voice = VoiceConfig {
            stt_provider,
            stt_model: std::env::var("AERA_STT_MODEL")
                .ok()
                .or(fc.voice.stt_model)
                .unwrap_or_else(|| default_stt_model(stt_provider).to_string()),
            tts_provider,
            tts_model: std::env::var("AERA_TTS_MODEL")
                .ok()
                .or(fc.voice.tts_model)
                .unwrap_or_else(|| default_tts_model(tts_provider).to_string()),
            tts_voice: std::env::var("AERA_TTS_VOICE")
                .ok()
                .or(fc.voice.tts_voice)
                .unwrap_or_else(|| "alloy".to_string()),
            openai_key: std::env::var("OPENAI_API_KEY").ok().or(fc.api_keys.openai),
            deepgram_key: std::env::var("DEEPGRAM_API_KEY")
                .ok()
                .or(fc.api_keys.deepgram),
            elevenlabs_key: std::env::var("ELEVENLABS_API_KEY")
                .ok()
                .or(fc.api_keys.elevenlabs),
        };

        let search = SearchConfig {
            api_key: serp_key,
            endpoint: std::env::var("AERA_SEARCH_URL")
                .ok()
                .or(fc.search.endpoint)
                .unwrap_or_else(|| crate::search::DEFAULT_ENDPOINT.to_string()),
            max_retries: std::env::var("AERA_SEARCH_RETRIES")
                .ok()
                .and_then(|s| s.parse().ok())
                .or(fc.search.max_retries)
                .unwrap_or(3)
                .max(1),
        };

        Ok(Self {
            server,
            voice,
            search,
        })
    }

    /// The API key for the configured STT provider, if present
    #[must_use]
    pub fn stt_key(&self) -> Option<&str> {
        match self.voice.stt_provider {
            SttProviderKind::Whisper => self.voice.openai_key.as_deref(),
            SttProviderKind::Deepgram => self.voice.deepgram_key.as_deref(),
        }
    }

    /// The API key for the configured TTS provider, if present
    #[must_use]
    pub fn tts_key(&self) -> Option<&str> {
        match self.voice.tts_provider {
            TtsProviderKind::OpenAi => self.voice.openai_key.as_deref(),
            TtsProviderKind::ElevenLabs => self.voice.elevenlabs_key.as_deref(),
        }
    }
}

/// Default STT model per provider
const fn default_stt_model(provider: SttProviderKind) -> &'static str {
    match provider {
        SttProviderKind::Whisper => "whisper-1",
        SttProviderKind::Deepgram => "nova-2",
    }
}

/// Default TTS model per provider
const fn default_tts_model(provider: TtsProviderKind) -> &'static str {
    match provider {
        TtsProviderKind::OpenAi => "tts-1",
        TtsProviderKind::ElevenLabs => "eleven_monolingual_v1",
    }
}

/// Default static dir: `web/` next to the working directory, when it
/// exists
fn default_static_dir() -> Option<PathBuf> {
    let dir = PathBuf::from("web");
    dir.is_dir().then_some(dir)
}
