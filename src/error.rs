use thiserror::Error;

/// Failures while opening or controlling the capture device.
#[derive(Error, Debug)]
pub enum DeviceError {
    #[error("No input device available")]
    NoInputDevice,

    #[error("No input config supports {0}Hz capture")]
    UnsupportedRate(u32),

    #[error("Unsupported sample format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to query input configs: {0}")]
    Configs(#[from] cpal::SupportedStreamConfigsError),

    #[error("Failed to build input stream: {0}")]
    Build(#[from] cpal::BuildStreamError),

    #[error("Failed to start input stream: {0}")]
    Play(#[from] cpal::PlayStreamError),

    #[error("Failed to pause input stream: {0}")]
    Pause(#[from] cpal::PauseStreamError),
}

/// Failures while transcribing a single segment. The worker logs these,
/// drops the segment, and keeps going.
#[derive(Error, Debug)]
pub enum InferenceError {
    #[error("Failed to encode segment as WAV: {0}")]
    Encode(#[from] hound::Error),

    #[error("Transcription request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Transcription server returned status {0}")]
    Status(u16),
}

/// Failures while writing the transcript document.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write transcript document: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures of the session state machine itself.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("A recording session is already active")]
    AlreadyRecording,

    #[error(transparent)]
    Device(#[from] DeviceError),

    #[error("Failed to spawn transcriber thread: {0}")]
    Spawn(#[from] std::io::Error),
}
