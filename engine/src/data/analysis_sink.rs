use super::AnalysisSink;
use crate::error::EngineError;
use async_trait::async_trait;
use shared::models::AnalysisRecord;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Appends one JSON object per line to a file. Writes run on the blocking
/// pool so a slow disk does not stall the runtime workers.
pub struct JsonlAnalysisSink {
    writer: Arc<Mutex<BufWriter<File>>>,
}

impl JsonlAnalysisSink {
    pub fn new(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        tracing::info!(path = %path.display(), "Analysis sink opened");
        Ok(Self { writer: Arc::new(Mutex::new(BufWriter::new(file))) })
    }
}

#[async_trait]
impl AnalysisSink for JsonlAnalysisSink {
    async fn store_analysis(&self, record: &AnalysisRecord) -> Result<(), EngineError> {
        let line = serde_json::to_string(record)?;
        let writer = Arc::clone(&self.writer);
        tokio::task::spawn_blocking(move || -> Result<(), EngineError> {
            let mut writer = writer
                .lock()
                .map_err(|_| EngineError::StorageError("analysis writer lock poisoned".to_string()))?;
            writeln!(writer, "{}", line)?;
            writer.flush()?;
            Ok(())
        })
        .await
        .map_err(|e| EngineError::StorageError(format!("analysis writer task failed: {}", e)))?
    }
}

/// Keeps stored records in memory, in arrival order.
#[derive(Default)]
pub struct MemoryAnalysisSink {
    records: Mutex<Vec<AnalysisRecord>>,
}

impl MemoryAnalysisSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<AnalysisRecord> {
        self.records.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl AnalysisSink for MemoryAnalysisSink {
    async fn store_analysis(&self, record: &AnalysisRecord) -> Result<(), EngineError> {
        self.records
            .lock()
            .map_err(|_| EngineError::StorageError("analysis records lock poisoned".to_string()))?
            .push(record.clone());
        Ok(())
    }
}
