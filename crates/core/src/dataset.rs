//! Flat-file JSON dataset.
//!
//! The scraper writes the dataset with [`write_dataset`] and the API server
//! reads it back with [`read_dataset`]. The file is a pretty-printed JSON
//! array of [`MovieRecord`] objects.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::Error;
use crate::model::MovieRecord;

/// A run must produce more than this many records before the file is replaced.
///
/// Guards the existing dataset against being overwritten by a failed or
/// near-empty scrape.
pub const MIN_RECORDS_EXCLUSIVE: usize = 1;

/// What [`write_dataset`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The file was replaced with `count` records.
    Written { path: PathBuf, count: usize },
    /// The collection was too small; the existing file was left untouched.
    Skipped { count: usize },
}

/// Serialize `records` as pretty-printed JSON and replace the file at `path`.
///
/// Nothing is written unless `records.len() > 1`. The JSON is written to a
/// sibling temp file first and renamed into place.
pub async fn write_dataset(path: &Path, records: &[MovieRecord]) -> Result<WriteOutcome, Error> {
    let count = records.len();
    if count <= MIN_RECORDS_EXCLUSIVE {
        tracing::warn!(count, path = %path.display(), "not enough records to replace dataset, skipping write");
        return Ok(WriteOutcome::Skipped { count });
    }

    let json = serde_json::to_string_pretty(records).map_err(|e| Error::DatasetEncode(e.to_string()))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| Error::DatasetWrite(format!("{}: {}", parent.display(), e)))?;
    }

    let tmp = tmp_path(path);
    tokio::fs::write(&tmp, json.as_bytes())
        .await
        .map_err(|e| Error::DatasetWrite(format!("{}: {}", tmp.display(), e)))?;
    tokio::fs::rename(&tmp, path)
        .await
        .map_err(|e| Error::DatasetWrite(format!("{}: {}", path.display(), e)))?;

    tracing::info!(count, path = %path.display(), "dataset written");

    Ok(WriteOutcome::Written { path: path.to_path_buf(), count })
}

/// Read the dataset as a list of JSON objects.
///
/// Records are not forced through [`MovieRecord`] so that whatever the file
/// holds is passed through unchanged; only the top-level shape is checked.
pub async fn read_dataset(path: &Path) -> Result<Vec<Map<String, Value>>, Error> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| Error::DatasetRead(format!("{}: {}", path.display(), e)))?;

    serde_json::from_slice(&bytes).map_err(|e| Error::DatasetParse(e.to_string()))
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
