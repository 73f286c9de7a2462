//! File access shared by every phase.
//!
//! Read failures and write failures are kept apart because the pipeline
//! treats them differently: an unreadable source file is skipped, an
//! unwritable one aborts the phase.

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;

#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FileError {
    pub fn path(&self) -> &Path {
        match self {
            FileError::Read { path, .. } | FileError::Write { path, .. } => path,
        }
    }
}

pub fn read_text(path: &Path) -> Result<String, FileError> {
    fs::read_to_string(path).map_err(|source| FileError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Like [`read_text`] but a missing file reads as `None`.
pub fn read_text_if_exists(path: &Path) -> Result<Option<String>, FileError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(FileError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Replaces `path` with `content` through a temp file in the same directory.
///
/// Readers see either the old file or the complete new one, never a mix.
pub fn write_atomic(path: &Path, content: &str) -> Result<(), FileError> {
    let to_write_error = |source: io::Error| FileError::Write {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(to_write_error)?;

    let mut temp_file = NamedTempFile::new_in(parent).map_err(to_write_error)?;
    temp_file
        .write_all(content.as_bytes())
        .map_err(to_write_error)?;
    temp_file.as_file().sync_all().map_err(to_write_error)?;
    temp_file
        .persist(path)
        .map_err(|err| to_write_error(err.error))?;

    Ok(())
}
