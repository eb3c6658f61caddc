use std::fs;
use std::path::PathBuf;
use tracing::debug;

use crate::error::ExportError;

/// Destination for the finished transcript.
pub trait DocumentSink {
    /// Writes the transcript, returning the path of the saved document.
    fn save(&self, transcript: &str) -> Result<PathBuf, ExportError>;
}

/// Writes each transcript to `transcription_<YYYYMMDD>_<HHMMSS>.txt` under
/// the configured directory.
pub struct DocumentExporter {
    dir: PathBuf,
}

impl DocumentExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl DocumentSink for DocumentExporter {
    fn save(&self, transcript: &str) -> Result<PathBuf, ExportError> {
        fs::create_dir_all(&self.dir)?;

        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();
        let path = self.dir.join(format!("transcription_{}.txt", timestamp));
        fs::write(&path, format!("{}\n", transcript))?;

        debug!("Saved transcript document: {:?}", path);
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_timestamped_document() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = DocumentExporter::new(dir.path());

        let path = exporter.save("hello world").unwrap();

        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("transcription_"));
        assert!(name.ends_with(".txt"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello world\n");
    }

    #[test]
    fn creates_missing_export_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("exports");
        let exporter = DocumentExporter::new(&nested);

        let path = exporter.save("text").unwrap();
        assert!(path.starts_with(&nested));
        assert!(path.exists());
    }

    #[test]
    fn unwritable_directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocked = dir.path().join("block");
        fs::write(&blocked, "not a directory").unwrap();

        let exporter = DocumentExporter::new(&blocked);
        let err = exporter.save("text").unwrap_err();
        assert!(matches!(err, ExportError::Io(_)));
    }
}
