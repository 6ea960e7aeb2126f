//! Default path helpers and symlink checks.
//! Determines OS-appropriate config/log paths and detects symlinked ancestors for safety.

use anyhow::{anyhow, Result};
use dirs::{config_dir, data_dir};
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::locations::APP_DIR_NAME;

use super::CONFIG_FILE_NAME;

/// Environment variable that points at an explicit config file (or a directory holding one).
pub const CONFIG_ENV: &str = "VERSIONED_FS_CONFIG";

/// Config path: `$VERSIONED_FS_CONFIG` when set, else the OS config dir.
/// A relative override is resolved against the current directory.
pub fn default_config_path() -> Result<PathBuf> {
    if let Some(raw) = env::var_os(CONFIG_ENV) {
        let mut p = PathBuf::from(raw);
        if p.is_relative() {
            p = env::current_dir()?.join(p);
        }
        if p.is_dir() {
            p.push(CONFIG_FILE_NAME);
        }
        return Ok(p);
    }
    if let Some(base) = config_dir() {
        return Ok(base.join(APP_DIR_NAME).join(CONFIG_FILE_NAME));
    }
    env::var_os("HOME")
        .map(|h| {
            PathBuf::from(h)
                .join(".config")
                .join(APP_DIR_NAME)
                .join(CONFIG_FILE_NAME)
        })
        .ok_or_else(|| anyhow!("could not determine a config directory"))
}

/// OS-appropriate default log file path (data dir). Nothing is created.
pub fn default_log_path() -> Result<PathBuf> {
    let log_name = format!("{APP_DIR_NAME}.log");
    if let Some(base) = data_dir() {
        return Ok(base.join(APP_DIR_NAME).join(log_name));
    }
    env::var_os("HOME")
        .map(|h| {
            PathBuf::from(h)
                .join(".local")
                .join("share")
                .join(APP_DIR_NAME)
                .join(&log_name)
        })
        .ok_or_else(|| anyhow!("could not determine a data directory"))
}

/// Return true if any existing ancestor of `path` is a symlink.
pub fn path_has_symlink_ancestor(path: &Path) -> io::Result<bool> {
    let mut p = path.parent();
    while let Some(anc) = p {
        if anc.exists() {
            let meta = fs::symlink_metadata(anc)?;
            if meta.file_type().is_symlink() {
                return Ok(true);
            }
        }
        p = anc.parent();
    }
    Ok(false)
}
