//! Platform-specific helpers.
//! This module hides OS differences (Unix/macOS/Windows) behind a uniform API so
//! the rest of the codebase can remain platform-agnostic.

#[cfg(unix)]
mod common_unix;
#[cfg(target_os = "macos")]
mod macos;
mod temp;
#[cfg(all(unix, not(target_os = "macos")))]
mod unix;
#[cfg(not(unix))]
mod windows;

use std::io;
use std::path::Path;

#[cfg(unix)]
pub use common_unix::{
    create_symlink, open_private_append, restrict_dir_to_owner, restrict_file_to_owner,
    write_private_file_new,
};
#[cfg(target_os = "macos")]
pub use macos::is_flagged_hidden;
#[cfg(all(unix, not(target_os = "macos")))]
pub use unix::is_flagged_hidden;
#[cfg(not(unix))]
pub use windows::{
    create_symlink, is_flagged_hidden, open_private_append, restrict_dir_to_owner,
    restrict_file_to_owner, write_private_file_new,
};

pub use temp::{tmp_sibling_name, TEMP_PREFIX};

/// Bytes available to the current user on the filesystem holding `path`.
pub fn available_space(path: &Path) -> io::Result<u64> {
    fs2::available_space(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn disk_space_smoke() {
        let dir = tempdir().unwrap();
        let bytes = available_space(dir.path()).unwrap();
        assert!(bytes > 0);
    }

    #[test]
    fn dotfiles_are_flagged_hidden_on_unix() {
        let dir = tempdir().unwrap();
        let dot = dir.path().join(".secret");
        std::fs::write(&dot, b"x").unwrap();
        let meta = std::fs::metadata(&dot).unwrap();
        if cfg!(unix) {
            assert!(is_flagged_hidden(&dot, &meta));
        }
        let plain = dir.path().join("visible");
        std::fs::write(&plain, b"x").unwrap();
        let meta = std::fs::metadata(&plain).unwrap();
        assert!(!is_flagged_hidden(&plain, &meta));
    }
}
