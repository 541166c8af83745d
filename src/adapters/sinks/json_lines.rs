use std::path::Path;
use async_trait::async_trait;
use tokio::{
    fs::OpenOptions,
    io::{AsyncWrite, AsyncWriteExt, Stdout},
    sync::Mutex,
};
use crate::{
    application::{AppError, AppResult, RecordSink},
    domain::TransferRecord,
};

/// Writes each record as one JSON object per line.
pub struct JsonLinesSink<W> {
    writer: Mutex<W>,
    name: String,
}

impl<W> JsonLinesSink<W> {
    pub fn new(writer: W, name: impl Into<String>) -> Self {
        Self {
            writer: Mutex::new(writer),
            name: name.into(),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl JsonLinesSink<Stdout> {
    pub fn stdout() -> Self {
        Self::new(tokio::io::stdout(), "stdout")
    }
}

impl JsonLinesSink<tokio::fs::File> {
    /// Opens `path` for appending, creating it if needed.
    pub async fn append_to(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await
            .map_err(|e| AppError::SinkError(format!("cannot open {}: {e}", path.display())))?;
        Ok(Self::new(file, path.display().to_string()))
    }
}

#[async_trait]
impl<W> RecordSink for JsonLinesSink<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn append(&self, record: &TransferRecord) -> AppResult<()> {
        let mut line = serde_json::to_vec(record)
            .map_err(|e| AppError::SinkError(format!("cannot encode record: {e}")))?;
        line.push(b'\n');

        let mut writer = self.writer.lock().await;
        writer
            .write_all(&line)
            .await
            .map_err(|e| AppError::SinkError(e.to_string()))?;
        writer
            .flush()
            .await
            .map_err(|e| AppError::SinkError(e.to_string()))?;

        tracing::debug!(signature = %record.details.signature, sink = %self.name, "Appended record");
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
