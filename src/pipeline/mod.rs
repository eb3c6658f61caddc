pub mod notifier;
pub mod segment_buffer;
pub mod transcript;
pub mod worker;

pub use notifier::{Notifier, SubscriptionId, TranscriptEvent};
pub use segment_buffer::{Segment, SegmentBuffer};
pub use transcript::Transcript;
pub use worker::TranscriberWorker;
