//! Media provider traits.
//!
//! These async traits are implemented by the `aula-media` crate: speech
//! synthesis for listening exercises and image search for lesson pages.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Speech synthesis
// ---------------------------------------------------------------------------

/// Trait for text-to-speech backends that turn a script into audio.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Human-readable provider name (e.g. "elevenlabs").
    fn name(&self) -> &str;

    /// Synthesize speech for a piece of text.
    async fn synthesize(&self, request: &SpeechRequest) -> anyhow::Result<SpeechClip>;

    /// List voices this provider can synthesize with.
    fn available_voices(&self) -> Vec<VoiceInfo>;
}

/// Request to synthesize speech.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechRequest {
    /// Voice identifier, provider-specific.
    pub voice_id: String,
    /// The text to read out.
    pub text: String,
    /// Optional synthesis model override.
    #[serde(default)]
    pub model_id: Option<String>,
}

/// A synthesized audio clip.
#[derive(Debug, Clone)]
pub struct SpeechClip {
    /// Raw audio bytes, ready to write to disk.
    pub audio: Vec<u8>,
    /// MIME type of the audio (e.g. "audio/mpeg").
    pub mime_type: String,
    /// Voice that produced the clip.
    pub voice_id: String,
    /// Request latency in milliseconds.
    pub latency_ms: u64,
}

/// Information about an available voice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceInfo {
    /// Voice identifier.
    pub id: String,
    /// Human-readable voice name.
    pub name: String,
    /// Provider name.
    pub provider: String,
    /// Primary language of the voice.
    pub language: String,
}

// ---------------------------------------------------------------------------
// Image search
// ---------------------------------------------------------------------------

/// Trait for image backends that illustrate lesson pages.
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// Human-readable provider name (e.g. "pexels").
    fn name(&self) -> &str;

    /// Search for an image. `Ok(None)` means no usable result; the caller
    /// falls back to a placeholder.
    async fn search(&self, query: &ImageQuery) -> anyhow::Result<Option<ImageHit>>;
}

/// An image search request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageQuery {
    /// Free-text search query.
    pub query: String,
    /// Preferred orientation ("landscape", "portrait", "square").
    #[serde(default = "default_orientation")]
    pub orientation: String,
    /// Results to request per page.
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn default_orientation() -> String {
    "landscape".to_string()
}

fn default_per_page() -> u32 {
    12
}

impl ImageQuery {
    pub fn new(query: &str) -> Self {
        Self {
            query: query.to_string(),
            orientation: default_orientation(),
            per_page: default_per_page(),
        }
    }
}

/// A resolved image for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageHit {
    /// Direct URL to the image.
    pub url: String,
    /// Attribution line, when the source requires one.
    #[serde(default)]
    pub attribution: Option<String>,
    /// Link back to the image's page at the source.
    #[serde(default)]
    pub credit_url: Option<String>,
    /// Where the image came from ("pexels", "placeholder", ...).
    pub source: String,
}

impl ImageHit {
    /// The safe fallback used when search fails or returns nothing.
    pub fn placeholder(fallback_url: &str) -> Self {
        Self {
            url: fallback_url.to_string(),
            attribution: None,
            credit_url: None,
            source: "placeholder".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_query_defaults() {
        let query = ImageQuery::new("daily routine");
        assert_eq!(query.orientation, "landscape");
        assert_eq!(query.per_page, 12);
    }

    #[test]
    fn placeholder_has_no_attribution() {
        let hit = ImageHit::placeholder("https://example.com/fallback.jpg");
        assert_eq!(hit.source, "placeholder");
        assert!(hit.attribution.is_none());
        assert!(hit.credit_url.is_none());
    }

    #[test]
    fn speech_request_serde_roundtrip() {
        let request = SpeechRequest {
            voice_id: "voice-1".into(),
            text: "Good morning!".into(),
            model_id: None,
        };
        let json = serde_json::to_string(&request).unwrap();
        let back: SpeechRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back.voice_id, "voice-1");
        assert!(back.model_id.is_none());
    }
}
