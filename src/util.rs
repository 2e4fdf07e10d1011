use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{Error, Result};

/// Regular files directly inside `folder` with exactly the given extension, sorted.
///
/// Behaves like a `*.ext` glob: the match is case-sensitive and hidden files are skipped.
pub fn image_files(folder: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !folder.exists() {
        return Err(Error::FolderNotFound(folder.to_path_buf()));
    }
    if !folder.is_dir() {
        return Err(Error::NotADirectory(folder.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(folder)? {
        let entry = entry?;
        let path = entry.path();
        let hidden = entry.file_name().to_string_lossy().starts_with('.');
        let matches = path.extension().is_some_and(|ext| ext == extension);
        if matches && !hidden && entry.file_type()?.is_file() {
            files.push(path);
        }
    }
    files.sort();
    log::trace!("Found {} .{extension} files in {}", files.len(), folder.display());
    Ok(files)
}

pub(crate) fn target_path(source: &Path, stem: &str, extension: &str) -> PathBuf {
    source.with_file_name(format!("{stem}.{extension}"))
}
