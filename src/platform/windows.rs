//! Windows implementations of platform helpers (best-effort, minimal ACL awareness).
//!
//! Notes:
//! - Windows lacks POSIX mode semantics; we do not attempt ACL management here.
//! - Config writes are done via temp + rename to be atomic.

use anyhow::{anyhow, bail, Context, Result};
use std::fs::{self, File, Metadata, OpenOptions};
use std::io::{self, Write};
use std::os::windows::fs::MetadataExt;
use std::path::Path;
use windows_sys::Win32::Storage::FileSystem::FILE_ATTRIBUTE_HIDDEN;

use super::temp::tmp_sibling_name;

/// Open `path` for appending, creating it and its parents when missing.
pub fn open_private_append(path: &Path) -> io::Result<File> {
    if let Some(dir) = path.parent() {
        let _ = fs::create_dir_all(dir);
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Write a brand-new file at `path` through a staging sibling and a rename.
/// Refuses to replace an existing file. ACLs are inherited from the parent.
pub fn write_private_file_new(path: &Path, contents: &[u8]) -> Result<()> {
    if fs::symlink_metadata(path).is_ok() {
        bail!("refusing to replace existing file {}", path.display());
    }
    let dir = path
        .parent()
        .ok_or_else(|| anyhow!("no parent directory for {}", path.display()))?;
    fs::create_dir_all(dir).with_context(|| format!("create directory {}", dir.display()))?;

    let staging = tmp_sibling_name(path, "config");
    let written = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&staging)
        .and_then(|mut f| f.write_all(contents).and_then(|()| f.sync_all()))
        .and_then(|()| fs::rename(&staging, path));
    if let Err(e) = written {
        let _ = fs::remove_file(&staging);
        return Err(e).with_context(|| format!("write {}", path.display()));
    }
    Ok(())
}

/// Owner-only modes have no std equivalent here; access follows inherited ACLs.
pub fn restrict_dir_to_owner(_path: &Path) -> io::Result<()> {
    Ok(())
}

pub fn restrict_file_to_owner(_path: &Path) -> io::Result<()> {
    Ok(())
}

/// Windows needs to know the link flavor up front.
pub fn create_symlink(target: &Path, link: &Path) -> io::Result<()> {
    let resolved = match link.parent() {
        Some(parent) if target.is_relative() => parent.join(target),
        _ => target.to_path_buf(),
    };
    if resolved.is_dir() {
        std::os::windows::fs::symlink_dir(target, link)
    } else {
        std::os::windows::fs::symlink_file(target, link)
    }
}

pub fn is_flagged_hidden(_path: &Path, meta: &Metadata) -> bool {
    meta.file_attributes() & FILE_ATTRIBUTE_HIDDEN != 0
}
