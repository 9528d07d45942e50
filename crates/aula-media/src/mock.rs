//! Mock synthesizer for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use aula_core::traits::{SpeechClip, SpeechRequest, SpeechSynthesizer, VoiceInfo};

/// A mock speech synthesizer for testing without real API calls.
///
/// Returns configurable audio based on text substring matching.
pub struct MockSynthesizer {
    /// Map of text substring → audio bytes.
    clips: HashMap<String, Vec<u8>>,
    /// Default audio if no text matches.
    default_clip: Vec<u8>,
    /// Number of calls made.
    call_count: AtomicU32,
    /// Last request received.
    last_request: Mutex<Option<SpeechRequest>>,
}

impl MockSynthesizer {
    /// Create a new mock with the given text→audio mappings.
    pub fn new(clips: HashMap<String, Vec<u8>>) -> Self {
        Self {
            clips,
            default_clip: b"mock-audio".to_vec(),
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Create a mock that always returns the same audio.
    pub fn with_fixed_clip(audio: &[u8]) -> Self {
        Self {
            clips: HashMap::new(),
            default_clip: audio.to_vec(),
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Get the number of calls made to this synthesizer.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Get the last request made to this synthesizer.
    pub fn last_request(&self) -> Option<SpeechRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpeechSynthesizer for MockSynthesizer {
    fn name(&self) -> &str {
        "mock"
    }

    async fn synthesize(&self, request: &SpeechRequest) -> anyhow::Result<SpeechClip> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self.last_request.lock().unwrap() = Some(request.clone());

        let audio = self
            .clips
            .iter()
            .find(|(key, _)| request.text.contains(key.as_str()))
            .map(|(_, v)| v.clone())
            .unwrap_or_else(|| self.default_clip.clone());

        Ok(SpeechClip {
            audio,
            mime_type: "audio/mpeg".to_string(),
            voice_id: request.voice_id.clone(),
            latency_ms: 1,
        })
    }

    fn available_voices(&self) -> Vec<VoiceInfo> {
        vec![VoiceInfo {
            id: "mock-voice".into(),
            name: "Mock Voice".into(),
            provider: "mock".into(),
            language: "en".into(),
        }]
    }
}
