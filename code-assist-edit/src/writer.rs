//! Persisting edits and soft deletion

use crate::error::{EditError, EditResult};
use chrono::{DateTime, Local};
use std::fmt;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

const TRASH_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Where a deleted file was moved to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrashLocation {
    pub original: PathBuf,
    pub trashed: PathBuf,
}

impl fmt::Display for TrashLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Moved file to trash: {}", self.trashed.display())
    }
}

/// Read a file as text, treating a missing file as empty
pub fn read_or_empty(path: &Path) -> EditResult<String> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(EditError::io("read", path, e)),
    }
}

/// Replace the file at `path` with `content`
///
/// The content is written to a temporary file in the same directory and
/// renamed over the target, so readers never observe a partial write.
/// Permissions of an existing target are kept.
pub fn write_atomic(path: &Path, content: &str, create_parents: bool) -> EditResult<()> {
    let parent = path
        .parent()
        .ok_or_else(|| EditError::invalid_request(format!("'{}' has no parent directory", path.display())))?;

    if create_parents {
        fs::create_dir_all(parent).map_err(|e| EditError::io("create directory", parent, e))?;
    }

    let mut staged =
        NamedTempFile::new_in(parent).map_err(|e| EditError::io("create temporary file in", parent, e))?;
    staged
        .write_all(content.as_bytes())
        .and_then(|_| staged.as_file().sync_all())
        .map_err(|e| EditError::io("write", staged.path().to_path_buf(), e))?;

    if let Ok(metadata) = fs::metadata(path) {
        staged
            .as_file()
            .set_permissions(metadata.permissions())
            .map_err(|e| EditError::io("set permissions on", path, e))?;
    }

    staged
        .persist(path)
        .map_err(|e| EditError::io("write", path, e.error))?;

    debug!(path = %path.display(), bytes = content.len(), "Persisted file");
    Ok(())
}

/// Move a regular file into the trash directory next to it
///
/// The trashed name is `<name>_<YYYYMMDD_HHMMSS>`; a numeric suffix is added
/// if two deletions of the same name land in the same second.
pub fn move_to_trash(
    path: &Path,
    trash_dir_name: &str,
    now: DateTime<Local>,
) -> EditResult<TrashLocation> {
    if !path.is_file() {
        return Err(EditError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let (parent, file_name) = match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => (parent, name.to_string_lossy()),
        _ => {
            return Err(EditError::NotFound {
                path: path.to_path_buf(),
            })
        }
    };

    let trash_dir = parent.join(trash_dir_name);
    fs::create_dir_all(&trash_dir).map_err(|e| EditError::io("create directory", &trash_dir, e))?;

    let base_name = format!("{file_name}_{}", now.format(TRASH_TIMESTAMP_FORMAT));
    let mut trashed = trash_dir.join(&base_name);
    let mut counter = 1;
    while trashed.exists() {
        trashed = trash_dir.join(format!("{base_name}_{counter}"));
        counter += 1;
    }

    fs::rename(path, &trashed).map_err(|e| EditError::io("move to trash", path, e))?;

    Ok(TrashLocation {
        original: path.to_path_buf(),
        trashed,
    })
}
