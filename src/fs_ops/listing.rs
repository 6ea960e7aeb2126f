//! Directory listing.

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::FsError;
use crate::resource::ResourceExt;

use super::helpers::io_error_with_help;

/// Filters applied by `contents_of_directory` and `file_count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListOptions {
    /// Skip entries carrying the platform hidden flag.
    pub skip_hidden: bool,
    /// Skip symbolic links.
    pub skip_symlinks: bool,
}

/// Immediate children of `dir`, sorted by path.
pub fn contents_of_directory(dir: &Path, opts: ListOptions) -> Result<Vec<PathBuf>> {
    let meta = fs::metadata(dir).map_err(io_error_with_help("stat directory", dir))?;
    if !meta.is_dir() {
        return Err(FsError::NotADirectory(dir.to_path_buf()).into());
    }
    let mut out = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error_with_help("read directory", dir))? {
        let entry = entry.map_err(io_error_with_help("read directory entry", dir))?;
        let path = entry.path();
        if opts.skip_symlinks && entry.file_type().is_ok_and(|ft| ft.is_symlink()) {
            continue;
        }
        if opts.skip_hidden && path.is_hidden(false) {
            continue;
        }
        out.push(path);
    }
    out.sort();
    Ok(out)
}
