use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use crate::platform::tmp_sibling_name;

/// Hidden temp sibling of `dest`, unique per process and call.
pub(super) fn temp_sibling(dest: &Path) -> PathBuf {
    tmp_sibling_name(dest, "copy")
}

/// EXDEV / ERROR_NOT_SAME_DEVICE: rename cannot cross filesystems.
pub(super) fn is_cross_device(e: &io::Error) -> bool {
    match e.raw_os_error() {
        #[cfg(unix)]
        Some(code) => code == libc::EXDEV,
        #[cfg(windows)]
        Some(code) => code == 17,
        #[cfg(not(any(unix, windows)))]
        Some(_) => false,
        None => false,
    }
}

#[cfg(unix)]
pub(super) fn fsync_dir(dir: &Path) -> io::Result<()> {
    File::open(dir)?.sync_all()
}

#[cfg(not(unix))]
pub(super) fn fsync_dir(_dir: &Path) -> io::Result<()> {
    Ok(())
}

/// Parent directory of `path`, or "." for bare names.
pub(super) fn parent_or_cwd(path: &Path) -> &Path {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}
