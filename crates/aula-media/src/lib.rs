//! aula-media — Outward media providers.
//!
//! Implements the `SpeechSynthesizer` and `ImageSource` traits for
//! ElevenLabs and Pexels, plus the application configuration that
//! carries their API keys.

pub mod config;
pub mod elevenlabs;
pub mod error;
pub mod mock;
pub mod pexels;

pub use config::{
    create_image_source, create_synthesizer, load_config, load_config_from, AulaConfig,
    ProviderConfig,
};
pub use error::MediaError;
