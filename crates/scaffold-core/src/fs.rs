//! Directory operations used to prepare and populate the target directory

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Version-control metadata directory that does not count as content
const VCS_DIR: &str = ".git";

/// True when `dir` has no entries, or only a `.git` entry
pub fn is_empty(dir: &Path) -> Result<bool> {
    let mut names = Vec::new();
    for entry in
        fs::read_dir(dir).with_context(|| format!("Failed to read directory: {}", dir.display()))?
    {
        let entry = entry.with_context(|| format!("Failed to read entry in {}", dir.display()))?;
        names.push(entry.file_name());
        if names.len() > 1 {
            return Ok(false);
        }
    }

    Ok(match names.as_slice() {
        [] => true,
        [only] => only == VCS_DIR,
        _ => false,
    })
}

/// Remove every child of `dir`, recursively. Missing `dir` is a no-op.
///
/// The first failure aborts the whole operation.
pub fn empty_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        return Ok(());
    }

    for entry in
        fs::read_dir(dir).with_context(|| format!("Failed to read directory: {}", dir.display()))?
    {
        let entry = entry.with_context(|| format!("Failed to read entry in {}", dir.display()))?;
        let path = entry.path();
        // file_type() does not follow symlinks, so a link to a directory is unlinked, not walked
        let file_type = entry
            .file_type()
            .with_context(|| format!("Failed to stat {}", path.display()))?;

        if file_type.is_dir() {
            fs::remove_dir_all(&path)
                .with_context(|| format!("Failed to remove directory: {}", path.display()))?;
        } else {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove file: {}", path.display()))?;
        }
    }

    Ok(())
}

/// Copy `src` to `dest`
///
/// Directories are copied depth-first in listing order, creating `dest` as needed.
/// Files are copied byte for byte, overwriting `dest`.
pub fn copy(src: &Path, dest: &Path) -> Result<()> {
    let metadata =
        fs::metadata(src).with_context(|| format!("Failed to stat {}", src.display()))?;

    if !metadata.is_dir() {
        fs::copy(src, dest).with_context(|| {
            format!("Failed to copy {} to {}", src.display(), dest.display())
        })?;
        return Ok(());
    }

    for entry in WalkDir::new(src).follow_links(true) {
        let entry = entry.with_context(|| format!("Failed to walk {}", src.display()))?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .with_context(|| format!("Unexpected path outside {}", src.display()))?;
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .with_context(|| format!("Failed to create directory: {}", target.display()))?;
        } else {
            fs::copy(entry.path(), &target).with_context(|| {
                format!(
                    "Failed to copy {} to {}",
                    entry.path().display(),
                    target.display()
                )
            })?;
        }
    }

    Ok(())
}
