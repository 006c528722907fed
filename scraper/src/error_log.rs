use std::{
    fmt,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use log::error;
use tokio::{
    fs::{create_dir_all, OpenOptions},
    io::AsyncWriteExt,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorLogEntry {
    pub timestamp: DateTime<Utc>,
    pub message: String,
}

impl ErrorLogEntry {
    pub fn now(message: String) -> Self {
        Self {
            timestamp: Utc::now(),
            message,
        }
    }
}

impl fmt::Display for ErrorLogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            self.message
        )
    }
}

/// Durable record of recoverable failures, kept apart from console logging.
#[async_trait]
pub trait ErrorSink: Send + Sync {
    async fn append(&self, entry: ErrorLogEntry);

    async fn record(&self, message: String) {
        self.append(ErrorLogEntry::now(message)).await
    }
}

/// Append-only text file, one entry per line. Never truncated.
#[derive(Debug, Clone)]
pub struct FileErrorLog {
    path: PathBuf,
}

impl FileErrorLog {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    async fn write_line(&self, line: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            create_dir_all(parent).await?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await
    }
}

#[async_trait]
impl ErrorSink for FileErrorLog {
    async fn append(&self, entry: ErrorLogEntry) {
        let line = format!("{}\n", entry);
        if let Err(e) = self.write_line(&line).await {
            error!(
                "failed to append to error log {}: {}",
                self.path.display(),
                e
            );
        }
    }
}

#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct MemoryErrorLog {
    entries: std::sync::Mutex<Vec<ErrorLogEntry>>,
}

#[cfg(test)]
impl MemoryErrorLog {
    pub(crate) fn messages(&self) -> Vec<String> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .map(|e| e.message.clone())
            .collect()
    }
}

#[cfg(test)]
#[async_trait]
impl ErrorSink for MemoryErrorLog {
    async fn append(&self, entry: ErrorLogEntry) {
        self.entries.lock().unwrap().push(entry);
    }
}
