pub mod remote;

pub use remote::RemoteWhisper;

use crate::error::InferenceError;
use crate::pipeline::segment_buffer::Segment;

/// A speech-to-text backend. Called once per segment from the transcriber
/// thread, which blocks until the result is back.
pub trait SpeechToText: Send + Sync {
    fn transcribe(&self, segment: &Segment) -> Result<String, InferenceError>;
}

/// Any plain function over a segment works as a backend.
impl<F> SpeechToText for F
where
    F: Fn(&Segment) -> Result<String, InferenceError> + Send + Sync,
{
    fn transcribe(&self, segment: &Segment) -> Result<String, InferenceError> {
        self(segment)
    }
}
