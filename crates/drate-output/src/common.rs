//! File handling shared by every writer.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{OutputError, Result};

/// Creates the parent directory of `path` if needed.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| OutputError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".partial");
    path.with_file_name(name)
}

/// Writes `path` through a sibling `.partial` file that is renamed into place
/// only after `write` succeeds and the data is flushed.
///
/// On failure the partial file is removed and `path` is left untouched.
pub fn write_atomically<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<()>,
{
    ensure_parent_dir(path)?;
    let partial = partial_path(path);
    let io_error = |source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    };
    let result = File::create(&partial).map_err(io_error).and_then(|file| {
        let mut writer = BufWriter::new(file);
        write(&mut writer)?;
        writer.flush().map_err(io_error)?;
        writer
            .into_inner()
            .map_err(|error| io_error(error.into_error()))?
            .sync_all()
            .map_err(io_error)
    });
    match result {
        Ok(()) => fs::rename(&partial, path).map_err(io_error),
        Err(error) => {
            let _ = fs::remove_file(&partial);
            Err(error)
        }
    }
}
