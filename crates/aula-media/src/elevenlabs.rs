//! ElevenLabs text-to-speech provider.

use std::time::Instant;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use aula_core::traits::{SpeechClip, SpeechRequest, SpeechSynthesizer, VoiceInfo};

use crate::error::MediaError;

const DEFAULT_BASE_URL: &str = "https://api.elevenlabs.io";
const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_MODEL_ID: &str = "eleven_multilingual_v2";

/// ElevenLabs API provider.
pub struct ElevenLabsSynthesizer {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl ElevenLabsSynthesizer {
    pub fn new(api_key: &str, base_url: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("failed to build HTTP client");

        Self {
            api_key: api_key.to_string(),
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            client,
        }
    }
}

#[derive(Serialize)]
struct SynthesisBody {
    text: String,
    model_id: String,
}

#[derive(Deserialize)]
struct ElevenLabsError {
    detail: ElevenLabsErrorDetail,
}

#[derive(Deserialize)]
struct ElevenLabsErrorDetail {
    message: String,
}

#[async_trait]
impl SpeechSynthesizer for ElevenLabsSynthesizer {
    fn name(&self) -> &str {
        "elevenlabs"
    }

    #[instrument(skip(self, request), fields(voice = %request.voice_id))]
    async fn synthesize(&self, request: &SpeechRequest) -> anyhow::Result<SpeechClip> {
        let start = Instant::now();

        let body = SynthesisBody {
            text: request.text.clone(),
            model_id: request
                .model_id
                .clone()
                .unwrap_or_else(|| DEFAULT_MODEL_ID.to_string()),
        };

        let response = self
            .client
            .post(format!(
                "{}/v1/text-to-speech/{}",
                self.base_url, request.voice_id
            ))
            .header("xi-api-key", &self.api_key)
            .header("accept", "audio/mpeg")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MediaError::Timeout(DEFAULT_TIMEOUT_SECS)
                } else {
                    MediaError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        if status == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(5)
                * 1000;
            return Err(MediaError::RateLimited {
                retry_after_ms: retry_after,
            }
            .into());
        }
        if status == 401 {
            let body = response.text().await.unwrap_or_default();
            return Err(MediaError::AuthenticationFailed(body).into());
        }
        if status == 404 {
            return Err(MediaError::VoiceNotFound(request.voice_id.clone()).into());
        }
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ElevenLabsError>(&body)
                .map(|e| e.detail.message)
                .unwrap_or(body);
            return Err(MediaError::ApiError { status, message }.into());
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| MediaError::NetworkError(e.to_string()))?
            .to_vec();
        let latency_ms = start.elapsed().as_millis() as u64;

        Ok(SpeechClip {
            audio,
            mime_type: "audio/mpeg".to_string(),
            voice_id: request.voice_id.clone(),
            latency_ms,
        })
    }

    fn available_voices(&self) -> Vec<VoiceInfo> {
        vec![
            VoiceInfo {
                id: "21m00Tcm4TlvDq8ikWAM".into(),
                name: "Rachel".into(),
                provider: "elevenlabs".into(),
                language: "en".into(),
            },
            VoiceInfo {
                id: "pNInz6obpgDQGcFmaJgB".into(),
                name: "Adam".into(),
                provider: "elevenlabs".into(),
                language: "en".into(),
            },
        ]
    }
}
