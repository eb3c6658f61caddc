pub mod capture;
pub mod queue;

pub use capture::{AudioInput, CaptureStream, MicInput};
pub use queue::{chunk_channel, ChunkReceiver, ChunkSender, Dequeued};
