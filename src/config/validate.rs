//! Config validation.
//! Checks settings that cannot be verified while parsing: log file placement,
//! the documents override and naming flag conflicts.

use anyhow::{bail, Result};
use std::fs;
use tracing::warn;

use super::paths::path_has_symlink_ancestor;
use super::types::Config;
use crate::errors::FsError;

impl Config {
    /// Validate the merged config. Conflicting naming flags and a zero budget
    /// only warn; they are legal but probably unintended.
    pub fn validate(&self) -> Result<()> {
        if let Some(log) = &self.log_file {
            if path_has_symlink_ancestor(log)? {
                bail!(
                    "Refusing log file {}: an ancestor directory is a symlink",
                    log.display()
                );
            }
            if let Ok(meta) = fs::metadata(log)
                && meta.is_dir()
            {
                bail!("Log file path is a directory: {}", log.display());
            }
        }

        if let Some(docs) = &self.documents_dir
            && let Ok(meta) = fs::metadata(docs)
            && !meta.is_dir()
        {
            return Err(FsError::NotADirectory(docs.clone()).into());
        }

        let ignored = self.naming_options.ignored();
        if !ignored.is_empty() {
            warn!(options = %self.naming_options, ignored = %ignored, "conflicting naming options in config");
        }
        if self.max_renaming_attempts == 0 {
            warn!("max_renaming_attempts is 0; every collision will exhaust immediately");
        }
        Ok(())
    }
}
