use std::path::Path;

use serde::Serialize;
use serde_json::to_string_pretty;
use tokio::{fs::create_dir_all, fs::File, io::AsyncWriteExt};

use crate::types::Error;

pub trait OutputWriter {
    async fn write<T>(&self, data: &T, path: &Path) -> Result<(), Error>
    where
        T: Serialize + Sync;
}

/// Pretty-printed JSON, replacing whatever was at `path`.
pub struct JsonWriter {}

impl OutputWriter for JsonWriter {
    async fn write<T>(&self, data: &T, path: &Path) -> Result<(), Error>
    where
        T: Serialize + Sync,
    {
        let json = to_string_pretty(data).map_err(|e| Error::Output(e.to_string()))?;
        let io_err = |e: std::io::Error| Error::Output(format!("{} on path: {}", e, path.display()));

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            create_dir_all(parent).await.map_err(io_err)?;
        }
        let mut file = File::create(path).await.map_err(io_err)?;
        file.write_all(json.as_bytes()).await.map_err(io_err)?;
        file.flush().await.map_err(io_err)?;

        Ok(())
    }
}
