//! File export for generated documents
//!
//! Persists rendered document text as a named file inside a single export
//! directory. Labels are plain file names; anything that could escape the
//! directory is rejected.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::domain::{ExportError, ExportReceipt, ExportSink};

pub struct FileExportSink {
    directory: PathBuf,
}

impl FileExportSink {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// The directory exists, or can be created because its parent does.
    pub fn is_ready(&self) -> bool {
        if self.directory.is_dir() {
            return true;
        }
        if self.directory.exists() {
            return false;
        }
        match self.directory.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.is_dir(),
            _ => true,
        }
    }

    fn target(&self, label: &str) -> Result<PathBuf, ExportError> {
        let valid = !label.trim().is_empty()
            && label != "."
            && label != ".."
            && !label.contains(&['/', '\\'][..])
            && !label.contains('\0');
        if !valid {
            return Err(ExportError::InvalidFilename(label.to_string()));
        }
        Ok(self.directory.join(label))
    }
}

#[async_trait]
impl ExportSink for FileExportSink {
    async fn export(&self, label: &str, text: &str) -> Result<ExportReceipt, ExportError> {
        let path = self.target(label)?;
        tokio::fs::create_dir_all(&self.directory).await?;
        tokio::fs::write(&path, text).await?;
        tracing::info!("Exported {} ({} bytes)", path.display(), text.len());

        Ok(ExportReceipt {
            label: label.to_string(),
            location: path.display().to_string(),
            bytes: text.len(),
            exported_at: chrono::Utc::now(),
        })
    }
}
