use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use sotto::audio::MicInput;
use sotto::export::DocumentExporter;
use sotto::stt::RemoteWhisper;
use sotto::{ExportStatus, PipelineConfig, TranscriptEvent, TranscriptionService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Setup Logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    tracing::info!("Starting sotto live transcriber...");

    // 2. Backend + sink from the environment
    let endpoint = std::env::var("SOTTO_ENDPOINT")
        .unwrap_or_else(|_| "http://localhost:8080/v1/audio/transcriptions".to_string());
    let mut model = RemoteWhisper::new(endpoint);
    if let Ok(name) = std::env::var("SOTTO_MODEL") {
        model = model.with_model(name);
    }
    if let Ok(key) = std::env::var("SOTTO_API_KEY") {
        model = model.with_api_key(key);
    }
    let export_dir = std::env::var("SOTTO_EXPORT_DIR").unwrap_or_else(|_| ".".to_string());

    let mut service = TranscriptionService::new(
        PipelineConfig::default(),
        Box::new(MicInput),
        Arc::new(model),
        Box::new(DocumentExporter::new(export_dir)),
    );

    // 3. Live transcript printer
    let (_subscription, mut events) = service.subscribe();
    tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            match event {
                TranscriptEvent::Updated { text } => println!("{}", text),
                TranscriptEvent::Error { message } => {
                    tracing::warn!("Transcription error: {}", message)
                }
            }
        }
    });

    // 4. One session: runs until Enter
    let status = service.start()?;
    println!("{} (press Enter to stop)", status);

    let stdin = tokio::io::stdin();
    let mut lines = BufReader::new(stdin).lines();
    let _ = lines.next_line().await;

    let summary = service.stop();
    if summary.transcript.is_empty() {
        println!("Nothing transcribed.");
    } else {
        println!("--- Transcript ---");
        println!("{}", summary.transcript);
    }
    match summary.export {
        ExportStatus::Saved(path) => println!("Saved: {}", path.display()),
        ExportStatus::Failed(e) => tracing::error!("Export failed: {}", e),
        ExportStatus::Skipped => {}
    }

    Ok(())
}
