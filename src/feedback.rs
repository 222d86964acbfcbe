//! Append-only CSV store for contact-form feedback

use anyhow::{Context, Result};
use chrono::Local;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::info;

const HEADER: [&str; 4] = ["Name", "Email", "Feedback", "Timestamp"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackEntry {
    pub name: String,
    pub email: String,
    pub feedback: String,
}

pub struct FeedbackStore {
    path: PathBuf,
    // Serializes appends so rows from concurrent submissions never interleave
    write_lock: Mutex<()>,
}

impl FeedbackStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one entry, creating the file (with header) and its directory
    /// on first use
    pub async fn append(&self, entry: &FeedbackEntry) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir)
                .await
                .with_context(|| format!("Failed to create feedback directory {}", dir.display()))?;
        }

        let is_new = !tokio::fs::try_exists(&self.path).await.unwrap_or(false);
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

        let mut writer = csv::Writer::from_writer(Vec::new());
        if is_new {
            writer.write_record(HEADER)?;
        }
        writer.write_record([
            entry.name.as_str(),
            entry.email.as_str(),
            entry.feedback.as_str(),
            timestamp.as_str(),
        ])?;
        let bytes = writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("Failed to encode feedback row: {}", e.error()))?;

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .with_context(|| format!("Failed to open feedback file {}", self.path.display()))?;
        file.write_all(&bytes).await?;
        file.flush().await?;

        info!("Stored feedback from {}", entry.name);
        Ok(())
    }
}
