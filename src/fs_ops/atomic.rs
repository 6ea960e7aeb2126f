//! Atomic rename helper.
//! - Performs a rename with context-rich errors.
//! - On Unix, best-effort fsync of the destination directory after rename.
//! - The raw io::Error stays in the chain so callers can detect EXDEV.

use anyhow::Result;
use std::fs;
use std::path::Path;

use super::helpers::io_error_with_help;
use super::util::{fsync_dir, parent_or_cwd};

pub(super) fn rename_into_place(src: &Path, dst: &Path) -> Result<()> {
    fs::rename(src, dst).map_err(io_error_with_help("atomic rename", dst))?;
    // A successful rename must not turn into a failure because of fsync.
    let _ = fsync_dir(parent_or_cwd(dst));
    Ok(())
}
