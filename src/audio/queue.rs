use std::sync::mpsc;
use std::time::Duration;

/// Unbounded hand-off between the capture callback and the transcriber
/// worker. The callback must never block or fail, so sends are
/// fire-and-forget; if the receiver is gone the chunk is simply dropped.
pub fn chunk_channel() -> (ChunkSender, ChunkReceiver) {
    let (tx, rx) = mpsc::channel();
    (ChunkSender { tx }, ChunkReceiver { rx })
}

#[derive(Clone)]
pub struct ChunkSender {
    tx: mpsc::Sender<Vec<f32>>,
}

impl ChunkSender {
    /// Called from the real-time audio callback. Never blocks.
    pub fn enqueue(&self, chunk: Vec<f32>) {
        let _ = self.tx.send(chunk);
    }
}

pub struct ChunkReceiver {
    rx: mpsc::Receiver<Vec<f32>>,
}

/// Outcome of a single blocking dequeue attempt.
#[derive(Debug)]
pub enum Dequeued {
    Chunk(Vec<f32>),
    /// Nothing arrived within the timeout. Caller re-checks its stop signal.
    TimedOut,
    /// Every sender is gone and the queue is drained.
    Disconnected,
}

impl ChunkReceiver {
    /// Blocks for at most `timeout` waiting for the next chunk.
    pub fn dequeue(&self, timeout: Duration) -> Dequeued {
        match self.rx.recv_timeout(timeout) {
            Ok(chunk) => Dequeued::Chunk(chunk),
            Err(mpsc::RecvTimeoutError::Timeout) => Dequeued::TimedOut,
            Err(mpsc::RecvTimeoutError::Disconnected) => Dequeued::Disconnected,
        }
    }
}
