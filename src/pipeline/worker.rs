use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::audio::queue::{ChunkReceiver, Dequeued};
use crate::config::PipelineConfig;
use crate::pipeline::notifier::{Notifier, TranscriptEvent};
use crate::pipeline::segment_buffer::{Segment, SegmentBuffer};
use crate::pipeline::transcript::Transcript;
use crate::stt::SpeechToText;

/// Consumer side of the pipeline. Runs on its own thread, pulling chunks
/// off the queue, cutting full segments, and feeding them to the model.
pub struct TranscriberWorker {
    chunks: ChunkReceiver,
    model: Arc<dyn SpeechToText>,
    notifier: Notifier,
    stop: Arc<AtomicBool>,
    dequeue_timeout: Duration,
    flush_partial: bool,

    // State
    buffer: SegmentBuffer,
    transcript: Transcript,
}

impl TranscriberWorker {
    pub fn new(
        chunks: ChunkReceiver,
        model: Arc<dyn SpeechToText>,
        notifier: Notifier,
        stop: Arc<AtomicBool>,
        config: &PipelineConfig,
    ) -> Self {
        Self {
            chunks,
            model,
            notifier,
            stop,
            dequeue_timeout: config.dequeue_timeout(),
            flush_partial: config.flush_partial_on_stop,
            buffer: SegmentBuffer::new(config.sample_rate, config.segment_samples()),
            transcript: Transcript::new(),
        }
    }

    /// Consumes chunks until stopped, then returns the finished transcript.
    ///
    /// The loop keeps draining after the stop flag goes up: it exits only on
    /// a quiet timeout window with the flag set, or once every sender is gone
    /// and the queue is empty. Captured audio is never abandoned mid-queue.
    pub fn run(mut self) -> Transcript {
        info!(
            "Transcriber Worker Started. Segment: {} samples @ {}ms timeout",
            self.buffer.segment_samples(),
            self.dequeue_timeout.as_millis()
        );

        loop {
            match self.chunks.dequeue(self.dequeue_timeout) {
                Dequeued::Chunk(chunk) => {
                    self.buffer.push(&chunk);
                    // One chunk can complete more than one segment.
                    while let Some(segment) = self.buffer.pop_segment() {
                        self.flush(segment);
                    }
                }
                Dequeued::TimedOut => {
                    if self.stop.load(Ordering::SeqCst) {
                        break;
                    }
                }
                Dequeued::Disconnected => break,
            }
        }

        if self.flush_partial {
            if let Some(residue) = self.buffer.take_residue() {
                debug!("Flushing {} residual samples", residue.len());
                self.flush(residue);
            }
        } else if !self.buffer.is_empty() {
            debug!(
                "Discarding {} samples below segment threshold",
                self.buffer.len()
            );
        }

        info!(
            "Transcriber Worker Finished. Fragments: {}",
            self.transcript.len()
        );
        self.transcript
    }

    fn flush(&mut self, segment: Segment) {
        debug!("Transcribing {:.2}s segment", segment.duration_secs());
        match self.model.transcribe(&segment) {
            Ok(text) => {
                let text = text.trim();
                if text.is_empty() {
                    return;
                }
                self.transcript.push(text);
                self.notifier.broadcast(TranscriptEvent::Updated {
                    text: self.transcript.joined(),
                });
            }
            Err(e) => {
                // A bad segment is dropped; the session keeps going.
                warn!("Segment transcription failed: {}", e);
                self.notifier.broadcast(TranscriptEvent::Error {
                    message: e.to_string(),
                });
            }
        }
    }
}
