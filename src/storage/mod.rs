// src/storage/mod.rs
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use crate::directory::models::{Category, ContactRecord};
use crate::utils::error::StorageError;

/// Receives the final sample and its summary line.
pub trait OutputSink {
    fn emit(&mut self, records: &[ContactRecord], summary: &str) -> Result<(), StorageError>;
}

/// Serializes the sample as JSON with 2-space indentation.
pub fn records_to_json(records: &[ContactRecord]) -> Result<String, StorageError> {
    serde_json::to_string_pretty(records)
        .map_err(|e| StorageError::SerializationError(e.to_string()))
}

/// Summary on stderr, JSON on stdout, so the sample can be piped.
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn emit(&mut self, records: &[ContactRecord], summary: &str) -> Result<(), StorageError> {
        let json = records_to_json(records)?;
        eprintln!("{}", summary);

        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        writeln!(handle, "{}", json)?;
        handle.flush()?;
        Ok(())
    }
}

/// Run details stored next to the JSON sample.
#[derive(Debug, Clone, Default)]
pub struct RunContext {
    pub source: String,
    pub pages_scanned: usize,
    pub total_unique: usize,
}

/// Writes `contacts.json` and `contacts_meta.json` into a directory.
pub struct FileSink {
    base_dir: PathBuf,
    context: RunContext,
    written: Vec<PathBuf>,
}

impl FileSink {
    /// Creates the sink, creating the base directory if it doesn't exist
    pub fn new<P: AsRef<Path>>(base_dir: P, context: RunContext) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path, context, written: Vec::new() })
    }

    /// Paths written by the last `emit`.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn save_records(&self, records: &[ContactRecord]) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join("contacts.json");
        fs::write(&file_path, records_to_json(records)?).map_err(StorageError::IoError)?;

        tracing::info!("Saved {} contacts to {}", records.len(), file_path.display());
        Ok(file_path)
    }

    fn save_metadata(&self, records: &[ContactRecord], summary: &str) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join("contacts_meta.json");
        let targeted = records.iter().filter(|r| r.category() == Category::Targeted).count();

        let metadata = serde_json::json!({
            "source": self.context.source,
            "pages_scanned": self.context.pages_scanned,
            "unique_contacts": self.context.total_unique,
            "sample_size": records.len(),
            "targeted": targeted,
            "other": records.len() - targeted,
            "summary": summary,
            "extraction_timestamp": chrono::Utc::now().to_rfc3339(),
        });

        let metadata_str = serde_json::to_string_pretty(&metadata)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;
        fs::write(&file_path, metadata_str).map_err(StorageError::IoError)?;

        tracing::info!("Saved metadata to {}", file_path.display());
        Ok(file_path)
    }
}

impl OutputSink for FileSink {
    fn emit(&mut self, records: &[ContactRecord], summary: &str) -> Result<(), StorageError> {
        let records_path = self.save_records(records)?;
        let meta_path = self.save_metadata(records, summary)?;
        self.written = vec![records_path, meta_path];
        Ok(())
    }
}
