use reqwest::blocking::multipart;
use std::io::Cursor;
use std::sync::OnceLock;
use tracing::debug;

use crate::error::InferenceError;
use crate::pipeline::segment_buffer::Segment;
use crate::stt::SpeechToText;

/// Whisper-compatible HTTP transcription backend.
///
/// Segments are shipped as 16-bit PCM WAV in a multipart form to an
/// OpenAI-style `/v1/audio/transcriptions` endpoint (llama-server,
/// whisper.cpp server, or the hosted API all speak it).
pub struct RemoteWhisper {
    endpoint: String,
    model: String,
    language: String,
    api_key: Option<String>,
    // Built lazily on the transcriber thread. The blocking client must not
    // be created or driven from inside an async runtime.
    client: OnceLock<reqwest::blocking::Client>,
}

impl RemoteWhisper {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            model: "whisper-1".to_string(),
            language: "en".to_string(),
            api_key: None,
            client: OnceLock::new(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    fn client(&self) -> &reqwest::blocking::Client {
        self.client.get_or_init(reqwest::blocking::Client::new)
    }
}

impl SpeechToText for RemoteWhisper {
    fn transcribe(&self, segment: &Segment) -> Result<String, InferenceError> {
        let wav = encode_wav(segment)?;
        debug!(
            "Uploading {:.2}s segment ({} bytes WAV)",
            segment.duration_secs(),
            wav.len()
        );

        let part = multipart::Part::bytes(wav)
            .file_name("segment.wav")
            .mime_str("audio/wav")?;
        let form = multipart::Form::new()
            .text("model", self.model.clone())
            .text("language", self.language.clone())
            .part("file", part);

        let mut request = self.client().post(&self.endpoint).multipart(form);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send()?;
        if !response.status().is_success() {
            return Err(InferenceError::Status(response.status().as_u16()));
        }

        // A response without a text field reads as an empty transcription.
        let payload: serde_json::Value = response.json()?;
        Ok(payload
            .get("text")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string())
    }
}

/// Mono 16-bit PCM WAV, in memory.
fn encode_wav(segment: &Segment) -> Result<Vec<u8>, hound::Error> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: segment.sample_rate(),
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec)?;
        for &sample in segment.samples() {
            let scaled = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
            writer.write_sample(scaled)?;
        }
        writer.finalize()?;
    }
    Ok(cursor.into_inner())
}
