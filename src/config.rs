use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tuning knobs for the capture/transcription pipeline.
///
/// The defaults mirror the intended live setup: 16 kHz mono capture,
/// three-second segments, and a 100 ms dequeue timeout so the worker
/// notices the stop signal promptly without spinning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Capture sample rate in Hz.
    pub sample_rate: u32,
    /// Seconds of audio accumulated before a segment is transcribed.
    pub segment_secs: u32,
    /// How long the worker blocks on the chunk queue before re-checking
    /// the stop signal.
    pub dequeue_timeout_ms: u64,
    /// Transcribe whatever is left in the buffer on stop, even if it is
    /// shorter than a full segment. Off by default; the tail is discarded.
    pub flush_partial_on_stop: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            sample_rate: 16_000,
            segment_secs: 3,
            dequeue_timeout_ms: 100,
            flush_partial_on_stop: false,
        }
    }
}

impl PipelineConfig {
    /// Samples per transcription segment.
    pub fn segment_samples(&self) -> usize {
        (self.sample_rate * self.segment_secs) as usize
    }

    pub fn dequeue_timeout(&self) -> Duration {
        Duration::from_millis(self.dequeue_timeout_ms)
    }
}
