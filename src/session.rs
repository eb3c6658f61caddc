use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::audio::capture::{AudioInput, CaptureStream};
use crate::audio::queue::chunk_channel;
use crate::config::PipelineConfig;
use crate::error::{ExportError, SessionError};
use crate::export::DocumentSink;
use crate::pipeline::notifier::{Notifier, SubscriptionId, TranscriptEvent};
use crate::pipeline::transcript::Transcript;
use crate::pipeline::worker::TranscriberWorker;
use crate::stt::SpeechToText;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Recording,
    Stopping,
}

/// Result of ending a session: the final transcript text and what became
/// of the document export.
#[derive(Debug)]
pub struct StopSummary {
    pub transcript: String,
    pub export: ExportStatus,
}

#[derive(Debug)]
pub enum ExportStatus {
    /// Nothing was transcribed, so no document was written.
    Skipped,
    Saved(PathBuf),
    /// The sink failed. The transcript text is still in the summary.
    Failed(ExportError),
}

struct ActiveSession {
    capture: Box<dyn CaptureStream>,
    worker: JoinHandle<Transcript>,
    stop: Arc<AtomicBool>,
}

/// Owns one capture-and-transcribe session at a time: the input device,
/// the worker thread, the observer registry, and the document sink.
///
/// All mutable session state lives here. Start and stop take `&mut self`,
/// so the state machine cannot be driven from two places at once.
pub struct TranscriptionService {
    config: PipelineConfig,
    input: Box<dyn AudioInput>,
    model: Arc<dyn SpeechToText>,
    sink: Box<dyn DocumentSink>,
    notifier: Notifier,
    state: SessionState,
    active: Option<ActiveSession>,
}

impl TranscriptionService {
    pub fn new(
        config: PipelineConfig,
        input: Box<dyn AudioInput>,
        model: Arc<dyn SpeechToText>,
        sink: Box<dyn DocumentSink>,
    ) -> Self {
        Self {
            config,
            input,
            model,
            sink,
            notifier: Notifier::new(),
            state: SessionState::Idle,
            active: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Registers an observer for live transcript updates. Subscriptions
    /// survive across sessions until explicitly removed.
    pub fn subscribe(&self) -> (SubscriptionId, mpsc::UnboundedReceiver<TranscriptEvent>) {
        self.notifier.subscribe()
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    /// Begins a fresh session: new transcript, new queue, capture running,
    /// worker thread consuming. Returns the status line for the observer.
    ///
    /// Starting while a session is active is rejected; the running session
    /// keeps its transcript.
    pub fn start(&mut self) -> Result<String, SessionError> {
        if self.state != SessionState::Idle {
            return Err(SessionError::AlreadyRecording);
        }

        let (tx, rx) = chunk_channel();
        let stop = Arc::new(AtomicBool::new(false));

        // Open the device first. If that fails the session never started
        // and state stays Idle.
        let capture = self.input.open(tx, &self.config)?;

        let worker = TranscriberWorker::new(
            rx,
            self.model.clone(),
            self.notifier.clone(),
            stop.clone(),
            &self.config,
        );
        let handle = std::thread::Builder::new()
            .name("transcriber".to_string())
            .spawn(move || worker.run())?;

        self.active = Some(ActiveSession {
            capture,
            worker: handle,
            stop,
        });
        self.state = SessionState::Recording;
        info!("Session Started. Rate: {}Hz", self.config.sample_rate);

        Ok("Listening...".to_string())
    }

    /// Ends the session: signals the worker, halts capture, waits for the
    /// queue to drain, then exports. Every chunk enqueued before this call
    /// makes it into the transcript.
    ///
    /// Calling stop while Idle is a no-op that returns an empty summary.
    pub fn stop(&mut self) -> StopSummary {
        let Some(mut active) = self.active.take() else {
            return StopSummary {
                transcript: String::new(),
                export: ExportStatus::Skipped,
            };
        };
        self.state = SessionState::Stopping;

        // 1. Raise the stop signal, then halt delivery.
        active.stop.store(true, Ordering::SeqCst);
        if let Err(e) = active.capture.pause() {
            warn!("Failed to pause capture: {}", e);
        }
        // Dropping the capture releases the device and its queue sender,
        // which lets the worker see a drained, disconnected queue.
        drop(active.capture);

        // 2. Wait for the worker to finish draining.
        let transcript = match active.worker.join() {
            Ok(transcript) => transcript,
            Err(_) => {
                error!("Transcriber thread panicked");
                self.notifier.broadcast(TranscriptEvent::Error {
                    message: "transcriber thread panicked".to_string(),
                });
                Transcript::new()
            }
        };

        // 3. Export, unless there is nothing to export.
        let text = transcript.joined();
        let export = if text.is_empty() {
            ExportStatus::Skipped
        } else {
            match self.sink.save(&text) {
                Ok(path) => {
                    info!("Session Finished. Transcript saved: {:?}", path);
                    ExportStatus::Saved(path)
                }
                Err(e) => {
                    warn!("Transcript export failed: {}", e);
                    ExportStatus::Failed(e)
                }
            }
        };

        self.state = SessionState::Idle;
        StopSummary {
            transcript: text,
            export,
        }
    }
}
