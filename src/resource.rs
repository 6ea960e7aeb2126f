//! Property accessors on paths.
//!
//! Read-only helpers that never fail loudly: a missing path reports `false`,
//! `None` or `0`. Symbolic links are inspected themselves (not followed) except
//! where noted.

use chrono::{DateTime, Local};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use walkdir::WalkDir;

use crate::fs_ops::{contents_of_directory, ListOptions};
use crate::mime::MimeType;
use crate::platform::is_flagged_hidden;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceType {
    Regular,
    Directory,
    SymbolicLink,
    Unknown,
}

fn local_time(t: std::io::Result<SystemTime>) -> Option<DateTime<Local>> {
    t.ok().map(DateTime::<Local>::from)
}

pub trait ResourceExt {
    fn resource_type(&self) -> ResourceType;
    /// Anything at this path, including a dangling symlink.
    fn file_exists(&self) -> bool;
    fn is_regular_file(&self) -> bool;
    /// Follows symlinks, so a link to a directory counts.
    fn is_directory(&self) -> bool;
    fn is_symbolic_link(&self) -> bool;
    /// Name starts with `.` or `~`.
    fn is_inferred_hidden(&self) -> bool;
    /// Platform hidden flag, or the inferred rule when `include_inferred`.
    fn is_hidden(&self, include_inferred: bool) -> bool;
    /// Byte length of a regular file; `None` for directories and missing paths.
    fn file_size(&self) -> Option<u64>;
    /// Total bytes of all regular files below (or at) this path.
    fn size_of_contents(&self) -> u64;
    /// Number of immediate children passing `opts`.
    fn file_count(&self, opts: ListOptions) -> usize;
    fn creation_date(&self) -> Option<DateTime<Local>>;
    fn content_access_date(&self) -> Option<DateTime<Local>>;
    fn content_modification_date(&self) -> Option<DateTime<Local>>;
    fn mime_type(&self) -> Option<MimeType>;
}

impl ResourceExt for Path {
    fn resource_type(&self) -> ResourceType {
        match fs::symlink_metadata(self) {
            Ok(m) if m.file_type().is_symlink() => ResourceType::SymbolicLink,
            Ok(m) if m.is_dir() => ResourceType::Directory,
            Ok(m) if m.is_file() => ResourceType::Regular,
            _ => ResourceType::Unknown,
        }
    }

    fn file_exists(&self) -> bool {
        fs::symlink_metadata(self).is_ok()
    }

    fn is_regular_file(&self) -> bool {
        self.resource_type() == ResourceType::Regular
    }

    fn is_directory(&self) -> bool {
        fs::metadata(self).is_ok_and(|m| m.is_dir())
    }

    fn is_symbolic_link(&self) -> bool {
        self.resource_type() == ResourceType::SymbolicLink
    }

    fn is_inferred_hidden(&self) -> bool {
        self.file_name()
            .map(|n| matches!(n.as_encoded_bytes().first(), Some(b'.') | Some(b'~')))
            .unwrap_or(false)
    }

    fn is_hidden(&self, include_inferred: bool) -> bool {
        let flagged = fs::symlink_metadata(self).is_ok_and(|m| is_flagged_hidden(self, &m));
        flagged || (include_inferred && self.is_inferred_hidden())
    }

    fn file_size(&self) -> Option<u64> {
        fs::metadata(self).ok().filter(|m| m.is_file()).map(|m| m.len())
    }

    fn size_of_contents(&self) -> u64 {
        let Ok(meta) = fs::symlink_metadata(self) else {
            return 0;
        };
        if !meta.is_dir() {
            return if meta.is_file() { meta.len() } else { 0 };
        }
        let files: Vec<PathBuf> = WalkDir::new(self)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .collect();
        files
            .par_iter()
            .map(|p| fs::symlink_metadata(p).map(|m| m.len()).unwrap_or(0))
            .sum()
    }

    fn file_count(&self, opts: ListOptions) -> usize {
        contents_of_directory(self, opts).map(|v| v.len()).unwrap_or(0)
    }

    fn creation_date(&self) -> Option<DateTime<Local>> {
        local_time(fs::symlink_metadata(self).and_then(|m| m.created()))
    }

    fn content_access_date(&self) -> Option<DateTime<Local>> {
        local_time(fs::symlink_metadata(self).and_then(|m| m.accessed()))
    }

    fn content_modification_date(&self) -> Option<DateTime<Local>> {
        local_time(fs::symlink_metadata(self).and_then(|m| m.modified()))
    }

    fn mime_type(&self) -> Option<MimeType> {
        MimeType::sniff_path(self).ok()
    }
}

/// Compute `size_of_contents` on the rayon pool and hand the total to `completion`
/// (called on a pool thread).
pub fn size_of_contents_async<F>(path: PathBuf, completion: F)
where
    F: FnOnce(u64) + Send + 'static,
{
    rayon::spawn(move || completion(path.size_of_contents()));
}
