use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::io::lock::{FileLock, LockError};
use crate::model::{Id, Record};

/// Error type for reading and writing records files
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("could not write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("invalid records file {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("no record with id {0}")]
    NotFound(Id),
    #[error(transparent)]
    Lock(#[from] LockError),
}

/// Read a records file. A missing file is an empty dashboard.
pub fn load_records(path: &Path) -> Result<Vec<Record>, StoreError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(StoreError::Read {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(&text).map_err(|e| StoreError::Json {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Write a records file atomically (temp file in the same directory, then rename)
pub fn save_records(path: &Path, records: &[Record]) -> Result<(), StoreError> {
    let mut content = serde_json::to_string_pretty(records).map_err(|e| StoreError::Json {
        path: path.to_path_buf(),
        source: e,
    })?;
    content.push('\n');
    atomic_write(path, content.as_bytes()).map_err(|e| StoreError::Write {
        path: path.to_path_buf(),
        source: e,
    })
}

fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    fs::create_dir_all(dir)?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Set a record's status and stamp `updated_at`, under the project lock.
///
/// The file is re-read inside the lock so edits made since the board was
/// loaded are kept. Returns the updated record.
pub fn update_status(
    board_dir: &Path,
    path: &Path,
    id: &Id,
    status: &Id,
) -> Result<Record, StoreError> {
    let _lock = FileLock::acquire_default(board_dir)?;
    let mut records = load_records(path)?;
    let record = records
        .iter_mut()
        .find(|r| &r.id == id)
        .ok_or_else(|| StoreError::NotFound(id.clone()))?;
    record.status = status.clone();
    record.extra.insert(
        "updated_at".to_string(),
        serde_json::Value::String(now_rfc3339()),
    );
    let updated = record.clone();
    save_records(path, &records)?;
    tracing::info!(id = %id, status = %status, file = %path.display(), "status persisted");
    Ok(updated)
}

/// Append a new record with the next numeric id
pub fn add_record(
    board_dir: &Path,
    path: &Path,
    title: &str,
    status: &Id,
) -> Result<Record, StoreError> {
    let _lock = FileLock::acquire_default(board_dir)?;
    let mut records = load_records(path)?;
    let mut record = Record::new(next_id(&records), title, status.clone());
    record.extra.insert(
        "created_at".to_string(),
        serde_json::Value::String(now_rfc3339()),
    );
    records.push(record.clone());
    save_records(path, &records)?;
    tracing::info!(id = %record.id, file = %path.display(), "record added");
    Ok(record)
}

/// One past the largest numeric id in use
pub fn next_id(records: &[Record]) -> i64 {
    records
        .iter()
        .filter_map(|r| r.id.as_num())
        .max()
        .map_or(1, |max| max + 1)
}

fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}
