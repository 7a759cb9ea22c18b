use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::ai::{DEFAULT_API_BASE, DEFAULT_MODEL};
use crate::error::AppError;

/// Application settings, stored as JSON under the questforge data directory.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Settings {
    /// Optional key in the settings file; the environment takes precedence.
    pub gemini_api_key: Option<String>,
    pub api_base: String,
    pub model: String,
    /// Opaque pass-through knob disabling any telemetry side channel.
    pub tracing_disabled: bool,
    pub debug_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            gemini_api_key: None,
            api_base: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            tracing_disabled: true,
            debug_mode: false,
        }
    }
}

impl Settings {
    /// Directory holding settings and the log file.
    pub fn data_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("questforge")
            .join("data")
    }

    pub fn settings_path() -> PathBuf {
        Self::data_dir().join("settings.json")
    }

    pub fn load() -> io::Result<Self> {
        Self::load_from_file(Self::settings_path())
    }

    pub fn save(&self) -> io::Result<()> {
        self.save_to_file(Self::settings_path())
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> io::Result<Self> {
        let data = fs::read_to_string(path)?;
        let settings = serde_json::from_str(&data)?;
        Ok(settings)
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let data = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = fs::File::create(path)?;
        file.write_all(data.as_bytes())?;
        Ok(())
    }

    /// Resolve the one required secret. Read once at startup; absence is a
    /// fatal startup error, never a per-turn one.
    pub fn resolve_api_key(&self) -> Result<String, AppError> {
        let env_key = std::env::var("GEMINI_API_KEY").ok();
        api_key_from(env_key, self.gemini_api_key.clone())
    }
}

fn api_key_from(
    env_key: Option<String>,
    file_key: Option<String>,
) -> Result<String, AppError> {
    env_key
        .filter(|key| !key.is_empty())
        .or(file_key.filter(|key| !key.is_empty()))
        .ok_or(AppError::MissingApiKey)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_gemini() {
        let settings = Settings::default();
        assert_eq!(settings.api_base, DEFAULT_API_BASE);
        assert_eq!(settings.model, "gemini-2.0-flash");
        assert!(settings.tracing_disabled);
        assert!(settings.gemini_api_key.is_none());
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let mut settings = Settings::default();
        settings.gemini_api_key = Some("test-key".to_string());
        settings.model = "gemini-1.5-pro".to_string();
        settings.save_to_file(&path).unwrap();

        let loaded = Settings::load_from_file(&path).unwrap();
        assert_eq!(loaded.gemini_api_key.as_deref(), Some("test-key"));
        assert_eq!(loaded.model, "gemini-1.5-pro");
    }

    #[test]
    fn partial_settings_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"model": "gemini-2.5-flash"}"#).unwrap();

        let loaded = Settings::load_from_file(&path).unwrap();
        assert_eq!(loaded.model, "gemini-2.5-flash");
        assert_eq!(loaded.api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn environment_wins_over_the_settings_file() {
        let key = api_key_from(Some("from-env".into()), Some("from-file".into())).unwrap();
        assert_eq!(key, "from-env");

        let key = api_key_from(None, Some("from-file".into())).unwrap();
        assert_eq!(key, "from-file");

        let key = api_key_from(Some(String::new()), Some("from-file".into())).unwrap();
        assert_eq!(key, "from-file");
    }

    #[test]
    fn missing_key_everywhere_is_fatal() {
        assert!(matches!(api_key_from(None, None), Err(AppError::MissingApiKey)));
    }
}
