//! Replacing an occupied destination without losing it on failure.
//!
//! The occupant is renamed to a hidden sibling, the new entry is placed at the
//! freed name, and only then is the occupant deleted. If placing fails the
//! occupant is renamed back, so the destination is either the new entry or the
//! untouched old one.

use anyhow::Result;
use std::fs;
use std::path::Path;
use tracing::{debug, error, warn};

use crate::platform::tmp_sibling_name;

use super::helpers::io_error_with_help;
use super::util::{fsync_dir, parent_or_cwd};

/// Run `place` against the occupied path `dest`, keeping the occupant until
/// `place` has succeeded.
pub(super) fn replace_with<F>(dest: &Path, place: F) -> Result<()>
where
    F: FnOnce(&Path) -> Result<()>,
{
    let parked = tmp_sibling_name(dest, "replaced");
    fs::rename(dest, &parked).map_err(io_error_with_help("set aside existing entry", dest))?;
    debug!(dest = %dest.display(), parked = %parked.display(), "occupant set aside");

    if let Err(e) = place(dest) {
        match fs::rename(&parked, dest) {
            Ok(()) => debug!(dest = %dest.display(), "occupant restored"),
            Err(re) => error!(
                dest = %dest.display(),
                parked = %parked.display(),
                error = %re,
                "failed to restore occupant"
            ),
        }
        return Err(e);
    }

    let _ = fsync_dir(parent_or_cwd(dest));
    let removed = match fs::symlink_metadata(&parked) {
        Ok(meta) if meta.is_dir() => fs::remove_dir_all(&parked),
        Ok(_) => fs::remove_file(&parked),
        Err(e) => Err(e),
    };
    if let Err(e) = removed {
        warn!(parked = %parked.display(), error = %e, "replaced entry left behind");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use tempfile::tempdir;

    fn names_in(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn new_entry_replaces_file_occupant() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("report.txt");
        fs::write(&dest, b"old").unwrap();

        replace_with(&dest, |d| Ok(fs::write(d, b"new")?)).unwrap();

        assert_eq!(fs::read(&dest).unwrap(), b"new");
        assert_eq!(names_in(dir.path()), ["report.txt"]);
    }

    #[test]
    fn file_can_replace_directory_occupant() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("album");
        fs::create_dir_all(dest.join("inner")).unwrap();
        fs::write(dest.join("inner/track.mp3"), b"x").unwrap();

        replace_with(&dest, |d| Ok(fs::write(d, b"flat")?)).unwrap();

        assert!(dest.is_file());
        assert_eq!(names_in(dir.path()), ["album"]);
    }

    #[test]
    fn failed_placement_restores_occupant() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("notes.md");
        fs::write(&dest, b"keep me").unwrap();

        let err = replace_with(&dest, |_| bail!("placement failed")).unwrap_err();

        assert!(err.to_string().contains("placement failed"));
        assert_eq!(fs::read(&dest).unwrap(), b"keep me");
        assert_eq!(names_in(dir.path()), ["notes.md"]);
    }

    #[test]
    fn missing_occupant_is_an_error_and_place_never_runs() {
        let dir = tempdir().unwrap();
        let mut ran = false;
        let res = replace_with(&dir.path().join("absent"), |_| {
            ran = true;
            Ok(())
        });
        assert!(res.is_err());
        assert!(!ran);
    }
}
