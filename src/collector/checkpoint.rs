//! Snapshot persistence for the output file.
//!
//! Every write replaces the whole file with the full record list. The JSON is
//! written to a hidden sibling first and then renamed over the target, so a
//! reader (or a crash) never sees a half-written file.

use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use super::error::HarvestError;
use crate::model::TrainerRecord;

/// Checks that `path` can receive snapshots: its parent directory exists and
/// the path itself is not a directory.
///
/// # Errors
///
/// Returns [`HarvestError::OutputDestination`] describing the problem.
pub fn validate_destination(path: &Path) -> Result<(), HarvestError> {
    if path.file_name().is_none() {
        return Err(HarvestError::output_destination(path, "path has no file name"));
    }
    if path.is_dir() {
        return Err(HarvestError::output_destination(path, "path is a directory"));
    }

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => return Ok(()),
    };
    if !parent.exists() {
        return Err(HarvestError::output_destination(
            path,
            "parent directory does not exist",
        ));
    }
    if !parent.is_dir() {
        return Err(HarvestError::output_destination(
            path,
            "parent is not a directory",
        ));
    }
    Ok(())
}

/// Sibling path used while a snapshot is being written.
#[must_use]
pub fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.tmp"))
}

/// Renders records the way they are stored on disk: pretty-printed, with
/// non-ASCII text left unescaped.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_snapshot(records: &[TrainerRecord]) -> Result<String, serde_json::Error> {
    let mut json = serde_json::to_string_pretty(records)?;
    json.push('\n');
    Ok(json)
}

/// Atomically replaces `path` with a snapshot of `records`.
///
/// # Errors
///
/// Returns the I/O error of the failed write or rename.
#[instrument(skip(path, records), fields(path = %path.display(), records = records.len()))]
pub async fn write_snapshot(path: &Path, records: &[TrainerRecord]) -> io::Result<()> {
    let json = render_snapshot(records).map_err(io::Error::other)?;
    let temp = temp_path(path);

    tokio::fs::write(&temp, json).await?;
    if let Err(error) = tokio::fs::rename(&temp, path).await {
        let _ = tokio::fs::remove_file(&temp).await;
        return Err(error);
    }

    debug!("snapshot written");
    Ok(())
}

/// Loads records from an existing output file for resuming.
///
/// A missing or blank file yields an empty list.
///
/// # Errors
///
/// Returns [`HarvestError::ResumeRead`] if the file exists but cannot be
/// read, and [`HarvestError::ResumeParse`] if it is not a record array.
#[instrument(skip(path), fields(path = %path.display()))]
pub async fn load_snapshot(path: &Path) -> Result<Vec<TrainerRecord>, HarvestError> {
    let text = match tokio::fs::read_to_string(path).await {
        Ok(text) => text,
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            debug!("no existing snapshot, starting fresh");
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(HarvestError::ResumeRead {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    serde_json::from_str(&text).map_err(|source| HarvestError::ResumeParse {
        path: path.to_path_buf(),
        source,
    })
}
