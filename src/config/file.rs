//! Optional TOML configuration file
//!
//! Loaded from `~/.config/aera/config.toml` (or the path in
//! `AERA_CONFIG`). Every field is optional; environment variables take
//! precedence over file values.

use std::path::PathBuf;

use serde::Deserialize;

/// Root of the config file
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub voice: VoiceSection,
    #[serde(default)]
    pub search: SearchSection,
    #[serde(default)]
    pub api_keys: ApiKeysSection,
}

/// `[server]` section
#[derive(Debug, Default, Deserialize)]
pub struct ServerSection {
    pub port: Option<u16>,
    pub static_dir: Option<PathBuf>,
}

/// `[voice]` section
#[derive(Debug, Default, Deserialize)]
pub struct VoiceSection {
    pub stt_provider: Option<String>,
    pub stt_model: Option<String>,
    pub tts_provider: Option<String>,
    pub tts_model: Option<String>,
    pub tts_voice: Option<String>,
}

/// `[search]` section
#[derive(Debug, Default, Deserialize)]
pub struct SearchSection {
    pub endpoint: Option<String>,
    pub max_retries: Option<u32>,
}

/// `[api_keys]` section
#[derive(Debug, Default, Deserialize)]
pub struct ApiKeysSection {
    pub serp: Option<String>,
    pub openai: Option<String>,
    pub deepgram: Option<String>,
    pub elevenlabs: Option<String>,
}

/// Resolve the config file path: `AERA_CONFIG` env override, then the
/// platform config dir
fn config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("AERA_CONFIG") {
        return Some(PathBuf::from(path));
    }

    directories::BaseDirs::new().map(|d| d.config_dir().join("aera").join("config.toml"))
}

/// Load the config file, returning defaults when absent or malformed.
///
/// A malformed file is logged and ignored rather than treated as
/// fatal; env vars and defaults still apply.
#[must_use]
pub fn load_config_file() -> ConfigFile {
    let Some(path) = config_path() else {
        return ConfigFile::default();
    };

    let Ok(contents) = std::fs::read_to_string(&path) else {
        return ConfigFile::default();
    };

    match toml::from_str(&contents) {
        Ok(fc) => {
            tracing::debug!(path = %path.display(), "loaded config file");
            fc
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring malformed config file");
            ConfigFile::default()
        }
    }
}
