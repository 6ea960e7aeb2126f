//! I/O helper utilities.
//!
//! Enriches io::Error with the operation, the path and a platform-aware hint,
//! usable with `map_err` in both io::Result and anyhow::Result code paths.
//!
//! Usage:
//!   fs::create_dir(dir).map_err(io_error_with_help("create directory", dir))?;
//!   File::open(p).map_err(io_error_with_help_io("open file", p))?;
//!
//! Permission failures become `FsError::PermissionDenied` so callers can
//! `downcast_ref` them.

use std::io;
use std::path::Path;

use crate::errors::FsError;

/// Hint for a raw OS error code, if we have one.
fn os_hint(code: i32) -> Option<&'static str> {
    #[cfg(unix)]
    {
        let hint = match code {
            libc::EACCES | libc::EPERM => "permission denied; check ownership and write permissions",
            libc::EXDEV => "cross-filesystem; atomic rename not possible",
            libc::EBUSY => "resource busy; ensure no other process is writing",
            libc::ENOENT => "path not found; verify it exists",
            libc::EEXIST => "already exists; another writer may have taken the name",
            libc::ENOSPC => "insufficient space on device",
            libc::EROFS => "read-only filesystem",
            libc::ELOOP => "too many symbolic link levels; possible symlink cycle",
            libc::ENAMETOOLONG => "file name too long; versioned suffixes add a few bytes",
            libc::ENOTDIR => "a path component is not a directory",
            libc::ENOTEMPTY => "directory not empty",
            libc::EMFILE | libc::ENFILE => "too many open files",
            _ => return None,
        };
        Some(hint)
    }
    #[cfg(windows)]
    {
        let hint = match code {
            5 => "access denied; check permissions",
            17 => "not same device; cross-filesystem move",
            32 => "sharing violation; file is in use",
            2 | 3 => "path not found; verify it exists",
            80 | 183 => "already exists; another writer may have taken the name",
            112 => "insufficient disk space",
            19 => "write protected media",
            206 => "file name or path too long",
            1314 => "symbolic links need developer mode or elevation",
            _ => return None,
        };
        Some(hint)
    }
    #[cfg(not(any(unix, windows)))]
    {
        let _ = code;
        None
    }
}

fn kind_hint(kind: io::ErrorKind) -> Option<&'static str> {
    match kind {
        io::ErrorKind::PermissionDenied => Some("permission denied; check ownership and write permissions"),
        io::ErrorKind::NotFound => Some("path not found; verify it exists"),
        io::ErrorKind::AlreadyExists => Some("already exists"),
        _ => None,
    }
}

/// "op 'path': error (hint) [os code: n]"
fn build_message(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{op} '{}': {e}", path.display());
    let hint = match e.raw_os_error() {
        Some(code) => os_hint(code),
        None => kind_hint(e.kind()),
    };
    if let Some(h) = hint {
        msg.push_str(" (");
        msg.push_str(h);
        msg.push(')');
    }
    if let Some(code) = e.raw_os_error() {
        msg.push_str(&format!(" [os code: {code}]"));
    }
    msg
}

/// Adapter for anyhow::Result code.
pub fn io_error_with_help<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> anyhow::Error + 'a {
    move |e: io::Error| {
        let msg = build_message(op, path, &e);
        if e.kind() == io::ErrorKind::PermissionDenied {
            FsError::PermissionDenied {
                path: path.to_path_buf(),
                context: msg,
            }
            .into()
        } else {
            anyhow::Error::new(e).context(msg)
        }
    }
}

/// Adapter for io::Result code; keeps the original ErrorKind.
pub fn io_error_with_help_io<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> io::Error + 'a {
    move |e: io::Error| io::Error::new(e.kind(), build_message(op, path, &e))
}
