pub mod audio;
pub mod config;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod session;
pub mod stt;

// Re-export the surface most callers need
pub use config::PipelineConfig;
pub use pipeline::notifier::{SubscriptionId, TranscriptEvent};
pub use session::{ExportStatus, SessionState, StopSummary, TranscriptionService};
