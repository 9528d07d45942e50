//! Application configuration and provider factories.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use aula_core::traits::{ImageSource, SpeechSynthesizer};

use crate::elevenlabs::ElevenLabsSynthesizer;
use crate::mock::MockSynthesizer;
use crate::pexels::PexelsImages;

/// Configuration for a single media provider.
///
/// Note: Custom Debug impl masks API keys to prevent accidental exposure in logs.
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProviderConfig {
    ElevenLabs {
        api_key: String,
        #[serde(default)]
        base_url: Option<String>,
    },
    Pexels {
        api_key: String,
        #[serde(default)]
        base_url: Option<String>,
    },
    /// Offline synthesizer for development and tests.
    Mock,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderConfig::ElevenLabs {
                api_key: _,
                base_url,
            } => f
                .debug_struct("ElevenLabs")
                .field("api_key", &"***")
                .field("base_url", base_url)
                .finish(),
            ProviderConfig::Pexels {
                api_key: _,
                base_url,
            } => f
                .debug_struct("Pexels")
                .field("api_key", &"***")
                .field("base_url", base_url)
                .finish(),
            ProviderConfig::Mock => f.debug_struct("Mock").finish(),
        }
    }
}

impl ProviderConfig {
    /// The configured API key, for providers that have one.
    pub fn api_key(&self) -> Option<&str> {
        match self {
            ProviderConfig::ElevenLabs { api_key, .. } => Some(api_key),
            ProviderConfig::Pexels { api_key, .. } => Some(api_key),
            ProviderConfig::Mock => None,
        }
    }
}

/// Top-level aula configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AulaConfig {
    /// Provider configurations keyed by name.
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
    /// Directory holding the answer log, content blocks, and audio.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Path to the curriculum TOML file.
    #[serde(default = "default_course_file")]
    pub course_file: PathBuf,
    /// Default speech provider to use.
    #[serde(default = "default_speech_provider")]
    pub speech_provider: String,
    /// Default voice for synthesized clips.
    #[serde(default = "default_voice")]
    pub default_voice: String,
    /// Default image provider to use.
    #[serde(default = "default_image_provider")]
    pub image_provider: String,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}
fn default_course_file() -> PathBuf {
    PathBuf::from("./course/a2-elementary.toml")
}
fn default_speech_provider() -> String {
    "elevenlabs".to_string()
}
fn default_voice() -> String {
    "21m00Tcm4TlvDq8ikWAM".to_string()
}
fn default_image_provider() -> String {
    "pexels".to_string()
}

impl Default for AulaConfig {
    fn default() -> Self {
        Self {
            providers: HashMap::new(),
            data_dir: default_data_dir(),
            course_file: default_course_file(),
            speech_provider: default_speech_provider(),
            default_voice: default_voice(),
            image_provider: default_image_provider(),
        }
    }
}

impl AulaConfig {
    /// The answer CSV lives at a fixed path under the data directory.
    pub fn responses_path(&self) -> PathBuf {
        self.data_dir.join("responses.csv")
    }

    /// Root of the content-block store.
    pub fn content_dir(&self) -> PathBuf {
        self.data_dir.join("content")
    }

    /// Where synthesized audio clips are written.
    pub fn audio_dir(&self) -> PathBuf {
        self.data_dir.join("audio")
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Resolve env vars in a provider config.
fn resolve_provider_config(config: &ProviderConfig) -> ProviderConfig {
    match config {
        ProviderConfig::ElevenLabs { api_key, base_url } => ProviderConfig::ElevenLabs {
            api_key: resolve_env_vars(api_key),
            base_url: base_url.as_ref().map(|u| resolve_env_vars(u)),
        },
        ProviderConfig::Pexels { api_key, base_url } => ProviderConfig::Pexels {
            api_key: resolve_env_vars(api_key),
            base_url: base_url.as_ref().map(|u| resolve_env_vars(u)),
        },
        ProviderConfig::Mock => ProviderConfig::Mock,
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `aula.toml` in the current directory
/// 2. `~/.config/aula/config.toml`
///
/// Environment variable overrides: `AULA_ELEVENLABS_KEY`, `AULA_PEXELS_KEY`.
pub fn load_config() -> Result<AulaConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<AulaConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("aula.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<AulaConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => AulaConfig::default(),
    };

    // Apply env var overrides
    if let Ok(key) = std::env::var("AULA_ELEVENLABS_KEY") {
        config
            .providers
            .entry("elevenlabs".into())
            .or_insert(ProviderConfig::ElevenLabs {
                api_key: String::new(),
                base_url: None,
            });
        if let Some(ProviderConfig::ElevenLabs { api_key, .. }) =
            config.providers.get_mut("elevenlabs")
        {
            *api_key = key;
        }
    }

    if let Ok(key) = std::env::var("AULA_PEXELS_KEY") {
        config
            .providers
            .entry("pexels".into())
            .or_insert(ProviderConfig::Pexels {
                api_key: String::new(),
                base_url: None,
            });
        if let Some(ProviderConfig::Pexels { api_key, .. }) = config.providers.get_mut("pexels") {
            *api_key = key;
        }
    }

    // Resolve env vars in all provider configs
    let resolved: HashMap<String, ProviderConfig> = config
        .providers
        .iter()
        .map(|(k, v)| (k.clone(), resolve_provider_config(v)))
        .collect();
    config.providers = resolved;

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("aula"))
}

/// Create a speech synthesizer from its configuration.
pub fn create_synthesizer(name: &str, config: &ProviderConfig) -> Result<Box<dyn SpeechSynthesizer>> {
    match config {
        ProviderConfig::ElevenLabs { api_key, base_url } => Ok(Box::new(
            ElevenLabsSynthesizer::new(api_key, base_url.clone()),
        )),
        ProviderConfig::Mock => Ok(Box::new(MockSynthesizer::with_fixed_clip(b"mock-audio"))),
        ProviderConfig::Pexels { .. } => {
            anyhow::bail!("provider '{name}' is an image source, not a synthesizer")
        }
    }
}

/// Create an image source from its configuration.
pub fn create_image_source(name: &str, config: &ProviderConfig) -> Result<Box<dyn ImageSource>> {
    match config {
        ProviderConfig::Pexels { api_key, base_url } => {
            Ok(Box::new(PexelsImages::new(api_key, base_url.clone())))
        }
        _ => anyhow::bail!("provider '{name}' is not an image source"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_AULA_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_AULA_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_AULA_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        std::env::remove_var("_AULA_TEST_VAR");
    }

    #[test]
    fn default_config() {
        let config = AulaConfig::default();
        assert_eq!(config.speech_provider, "elevenlabs");
        assert_eq!(config.image_provider, "pexels");
        assert_eq!(config.responses_path(), PathBuf::from("./data/responses.csv"));
        assert_eq!(config.content_dir(), PathBuf::from("./data/content"));
    }

    #[test]
    fn parse_provider_config() {
        let toml_str = r#"
data_dir = "./classroom-data"
speech_provider = "elevenlabs"

[providers.elevenlabs]
type = "elevenlabs"
api_key = "el-test"

[providers.pexels]
type = "pexels"
api_key = "px-test"

[providers.mock]
type = "mock"
"#;
        let config: AulaConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.providers.len(), 3);
        assert!(matches!(
            config.providers.get("elevenlabs"),
            Some(ProviderConfig::ElevenLabs { .. })
        ));
        assert_eq!(config.responses_path(), PathBuf::from("./classroom-data/responses.csv"));
    }

    #[test]
    fn synthesizer_factory_rejects_image_providers() {
        let config = ProviderConfig::Pexels {
            api_key: "px".into(),
            base_url: None,
        };
        assert!(create_synthesizer("pexels", &config).is_err());
        assert!(create_image_source("pexels", &config).is_ok());
    }

    #[test]
    fn debug_masks_api_keys() {
        let config = ProviderConfig::ElevenLabs {
            api_key: "secret-key".into(),
            base_url: None,
        };
        let shown = format!("{config:?}");
        assert!(!shown.contains("secret-key"));
    }
}
