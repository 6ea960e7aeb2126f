//! Free-space guard run before copies.

use anyhow::Result;
use std::path::Path;
use tracing::debug;

use crate::data_size::{format_data_size, UnitFormat};
use crate::errors::FsError;
use crate::platform::available_space;

/// Headroom kept free on the destination filesystem.
const CUSHION: u64 = 4 * 1024 * 1024;

/// Fail with `FsError::InsufficientSpace` when `dst_dir`'s filesystem cannot hold
/// `required` bytes plus a small cushion. An unknown free size is not an error.
pub(super) fn ensure_space_for_copy(dst_dir: &Path, required: u64) -> Result<()> {
    let available = match available_space(dst_dir) {
        Ok(n) => n,
        Err(e) => {
            debug!(dir = %dst_dir.display(), error = %e, "free space unknown; skipping check");
            return Ok(());
        }
    };
    if available < required.saturating_add(CUSHION) {
        debug!(
            dir = %dst_dir.display(),
            need = %format_data_size(required, 1, UnitFormat::Short),
            free = %format_data_size(available, 1, UnitFormat::Short),
            "not enough free space"
        );
        return Err(FsError::InsufficientSpace {
            required,
            available,
            dest: dst_dir.to_path_buf(),
        }
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn small_copy_fits() {
        let dir = tempdir().unwrap();
        ensure_space_for_copy(dir.path(), 1).unwrap();
    }

    #[test]
    fn absurd_copy_is_refused() {
        let dir = tempdir().unwrap();
        let err = ensure_space_for_copy(dir.path(), u64::MAX - 1).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FsError>(),
            Some(FsError::InsufficientSpace { .. })
        ));
    }
}
