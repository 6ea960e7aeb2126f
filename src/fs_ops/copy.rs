//! Copy primitives used by the facade.
//!
//! - Files: stream into a hidden temp sibling (create_new + fsync), then rename
//!   into place. On any failure the temp file is removed, so the chosen name is
//!   either complete or absent.
//! - Trees: create the root, recreate subdirectories and links, copy files in
//!   parallel (rayon). A failure or a shutdown request removes the partial tree.

use anyhow::Result;
use rayon::prelude::*;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::errors::FsError;
use crate::platform::create_symlink;
use crate::shutdown;

use super::atomic::rename_into_place;
use super::helpers::io_error_with_help;
use super::io_copy::copy_streaming;
use super::metadata::preserve_metadata;
use super::util::temp_sibling;

fn check_shutdown() -> Result<()> {
    if shutdown::is_requested() {
        return Err(FsError::Interrupted.into());
    }
    Ok(())
}

/// Copy one regular file to `dest` via temp sibling + atomic rename.
pub(super) fn copy_file_atomic(src: &Path, dest: &Path, preserve: bool) -> Result<u64> {
    let tmp = temp_sibling(dest);
    let bytes = match copy_streaming(src, &tmp) {
        Ok(n) => n,
        Err(e) => {
            let _ = fs::remove_file(&tmp);
            if e.kind() == io::ErrorKind::Interrupted && shutdown::is_requested() {
                return Err(FsError::Interrupted.into());
            }
            return Err(io_error_with_help("copy to temporary file", &tmp)(e));
        }
    };
    if preserve {
        match fs::metadata(src) {
            Ok(meta) => preserve_metadata(&tmp, &meta),
            Err(e) => warn!(src = %src.display(), error = %e, "cannot stat source; metadata not preserved"),
        }
    }
    if let Err(e) = rename_into_place(&tmp, dest) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    debug!(src = %src.display(), dest = %dest.display(), bytes, "copied file");
    Ok(bytes)
}

/// Recreate the symbolic link `src` (not its target) at `dest`.
pub(super) fn copy_link(src: &Path, dest: &Path) -> Result<()> {
    let target = fs::read_link(src).map_err(io_error_with_help("read symbolic link", src))?;
    create_symlink(&target, dest).map_err(io_error_with_help("create symbolic link", dest))
}

/// Copy the directory tree at `src` to the new directory `dest`.
/// `dest` itself must not exist yet. Returns the number of file bytes copied.
pub(super) fn copy_tree(src: &Path, dest: &Path, preserve: bool) -> Result<u64> {
    check_shutdown()?;
    fs::create_dir(dest).map_err(io_error_with_help("create directory", dest))?;
    let result = copy_tree_contents(src, dest, preserve);
    if result.is_err() {
        match fs::remove_dir_all(dest) {
            Ok(()) => debug!(dest = %dest.display(), "removed partial tree"),
            Err(e) => warn!(dest = %dest.display(), error = %e, "failed to remove partial tree"),
        }
    }
    result
}

fn copy_tree_contents(src: &Path, dest: &Path, preserve: bool) -> Result<u64> {
    let mut dirs: Vec<PathBuf> = Vec::new();
    let mut files: Vec<PathBuf> = Vec::new();
    for entry in WalkDir::new(src).min_depth(1) {
        let entry = entry?;
        let rel = entry.path().strip_prefix(src)?;
        let target = dest.join(rel);
        let ft = entry.file_type();
        if ft.is_dir() {
            fs::create_dir(&target).map_err(io_error_with_help("create directory", &target))?;
            dirs.push(entry.into_path());
        } else if ft.is_symlink() {
            copy_link(entry.path(), &target)?;
        } else {
            files.push(entry.into_path());
        }
    }

    let copied: Vec<u64> = files
        .par_iter()
        .map(|path| -> Result<u64> {
            check_shutdown()?;
            let rel = path.strip_prefix(src)?;
            let target = dest.join(rel);
            let bytes = copy_streaming(path, &target)
                .map_err(io_error_with_help("copy file to destination", &target))?;
            if preserve {
                let meta = fs::metadata(path).map_err(io_error_with_help("stat source", path))?;
                preserve_metadata(&target, &meta);
            }
            Ok(bytes)
        })
        .collect::<Result<Vec<u64>>>()?;

    if preserve {
        // Deepest first, so restrictive modes do not block later writes.
        for dir in dirs.iter().rev() {
            let rel = dir.strip_prefix(src)?;
            if let Ok(meta) = fs::metadata(dir) {
                preserve_metadata(&dest.join(rel), &meta);
            }
        }
        if let Ok(meta) = fs::metadata(src) {
            preserve_metadata(dest, &meta);
        }
    }

    Ok(copied.into_iter().sum())
}
