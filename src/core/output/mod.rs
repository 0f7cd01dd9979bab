use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::core::transform::date::render_naive;

#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("failed to serialize payload: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    pub title: String,
    pub link: String,
    pub pub_date: String,
    pub excerpt: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FeedPayload {
    pub generated_at: String,
    pub source: String,
    pub items: Vec<PostRecord>,
}

impl FeedPayload {
    pub fn new(source: &str, items: Vec<PostRecord>, generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at: format!("{}Z", render_naive(&generated_at.naive_utc())),
            source: source.to_string(),
            items,
        }
    }
}

/// Serializes `payload` as pretty JSON and atomically replaces `path` with it.
pub fn write_payload(path: &Path, payload: &FeedPayload) -> Result<(), WriteError> {
    let json = serde_json::to_string_pretty(payload)?;
    let io_error = |source: std::io::Error| WriteError::Io {
        path: path.display().to_string(),
        source,
    };

    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(directory).map_err(io_error)?;
    // Temp files are created owner-only; the published file must stay world-readable.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        staged
            .as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))
            .map_err(io_error)?;
    }
    staged.write_all(json.as_bytes()).map_err(io_error)?;
    staged.as_file().sync_all().map_err(io_error)?;
    staged.persist(path).map_err(|error| io_error(error.error))?;

    tracing::info!(path = %path.display(), items = payload.items.len(), "payload written");
    Ok(())
}
