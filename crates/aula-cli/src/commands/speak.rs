//! The `aula speak` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use aula_core::traits::SpeechRequest;
use aula_media::{create_synthesizer, load_config_from};

pub async fn execute(
    text: String,
    voice: Option<String>,
    provider: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let provider_name = provider.unwrap_or_else(|| config.speech_provider.clone());
    let Some(pconfig) = config.providers.get(&provider_name) else {
        anyhow::bail!(
            "provider '{}' not found in config. Available: {:?}",
            provider_name,
            config.providers.keys().collect::<Vec<_>>()
        );
    };
    let synthesizer = create_synthesizer(&provider_name, pconfig)?;

    let request = SpeechRequest {
        voice_id: voice.unwrap_or_else(|| config.default_voice.clone()),
        text,
        model_id: None,
    };

    match synthesizer.synthesize(&request).await {
        Ok(clip) => {
            let audio_dir = config.audio_dir();
            std::fs::create_dir_all(&audio_dir)
                .with_context(|| format!("failed to create {}", audio_dir.display()))?;
            let filename = format!("clip-{}.mp3", chrono::Utc::now().format("%Y%m%dT%H%M%S"));
            let path = audio_dir.join(filename);
            std::fs::write(&path, &clip.audio)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!(
                "Audio saved to: {} ({} bytes, {}ms)",
                path.display(),
                clip.audio.len(),
                clip.latency_ms
            );
        }
        Err(e) => {
            // Synthesis is optional; a failed call never takes the app down
            tracing::warn!("speech synthesis failed: {e:#}");
            eprintln!("Warning: speech synthesis failed ({e:#}).");
        }
    }

    Ok(())
}
