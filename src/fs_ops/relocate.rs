//! Move implementation.
//! Tries an atomic rename first; across filesystems it copies (file, link or
//! tree) and then removes the source.

use anyhow::Result;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use super::copy::{copy_file_atomic, copy_link, copy_tree};
use super::helpers::io_error_with_help;
use super::space::ensure_space_for_copy;
use super::util::{fsync_dir, is_cross_device, parent_or_cwd};
use crate::resource::ResourceExt;

/// Move `src` to the free path `dest`.
pub(super) fn move_path(src: &Path, dest: &Path, preserve: bool) -> Result<()> {
    match fs::rename(src, dest) {
        Ok(()) => {
            let _ = fsync_dir(parent_or_cwd(dest));
            debug!(src = %src.display(), dest = %dest.display(), "renamed atomically");
            Ok(())
        }
        Err(e) if is_cross_device(&e) => {
            info!(src = %src.display(), dest = %dest.display(), "cross-filesystem move; copying instead");
            copy_then_remove(src, dest, preserve)
        }
        Err(e) => Err(io_error_with_help("rename", src)(e)),
    }
}

fn copy_then_remove(src: &Path, dest: &Path, preserve: bool) -> Result<()> {
    let meta = fs::symlink_metadata(src).map_err(io_error_with_help("stat source", src))?;
    let ft = meta.file_type();
    if ft.is_symlink() {
        copy_link(src, dest)?;
        fs::remove_file(src).map_err(io_error_with_help("remove original link", src))?;
    } else if ft.is_dir() {
        ensure_space_for_copy(parent_or_cwd(dest), src.size_of_contents())?;
        copy_tree(src, dest, preserve)?;
        fs::remove_dir_all(src).map_err(io_error_with_help("remove source directory", src))?;
    } else {
        ensure_space_for_copy(parent_or_cwd(dest), meta.len())?;
        copy_file_atomic(src, dest, preserve)?;
        fs::remove_file(src).map_err(io_error_with_help("remove original file", src))?;
    }
    Ok(())
}
