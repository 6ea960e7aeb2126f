//! Unix helpers shared by macOS and the other Unix targets.
//! Everything written here is owner-only: config files, log files, and the
//! directories holding them.

use anyhow::{anyhow, Context, Result};
use std::fs::{self, File, OpenOptions, Permissions};
use std::io::{self, Write};
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
use std::path::{Path, PathBuf};

use super::temp::tmp_sibling_name;

const OWNER_RW: u32 = 0o600;
const OWNER_RWX: u32 = 0o700;

/// Removes the temp file on drop unless `keep` was called.
struct TempGuard(Option<PathBuf>);

impl TempGuard {
    fn keep(mut self) {
        self.0 = None;
    }
}

impl Drop for TempGuard {
    fn drop(&mut self) {
        if let Some(p) = self.0.take() {
            let _ = fs::remove_file(p);
        }
    }
}

/// Write a brand-new owner-only file at `path`.
///
/// Contents land in a hidden sibling first and are renamed into place once
/// synced, so readers never observe a half-written file. The parent directory
/// is synced afterwards.
pub fn write_private_file_new(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| anyhow!("no parent directory for {}", path.display()))?;
    fs::create_dir_all(dir).with_context(|| format!("create directory {}", dir.display()))?;

    let staging = tmp_sibling_name(path, "config");
    let guard = TempGuard(Some(staging.clone()));
    {
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .mode(OWNER_RW)
            .open(&staging)
            .with_context(|| format!("create staging file {}", staging.display()))?;
        file.write_all(contents)
            .and_then(|()| file.sync_all())
            .with_context(|| format!("write staging file {}", staging.display()))?;
    }
    fs::rename(&staging, path)
        .with_context(|| format!("rename {} -> {}", staging.display(), path.display()))?;
    guard.keep();

    File::open(dir)
        .and_then(|d| d.sync_all())
        .with_context(|| format!("sync directory {}", dir.display()))
}

/// Open `path` for appending. A file created here is owner-only; an existing
/// file keeps whatever mode it already had.
pub fn open_private_append(path: &Path) -> io::Result<File> {
    if let Some(dir) = path.parent() {
        let _ = fs::create_dir_all(dir);
    }
    let fresh = fs::symlink_metadata(path).is_err();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .mode(OWNER_RW)
        .open(path)?;
    if fresh {
        // umask may have masked bits off at create time.
        file.set_permissions(Permissions::from_mode(OWNER_RW))?;
    }
    Ok(file)
}

pub fn restrict_dir_to_owner(path: &Path) -> io::Result<()> {
    fs::set_permissions(path, Permissions::from_mode(OWNER_RWX))
}

pub fn restrict_file_to_owner(path: &Path) -> io::Result<()> {
    fs::set_permissions(path, Permissions::from_mode(OWNER_RW))
}

/// Create a symbolic link at `link` pointing at `target`.
pub fn create_symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}
