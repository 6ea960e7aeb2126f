//! Core configuration types.
//! - Config holds runtime settings with sensible defaults.
//! - LogLevel represents verbosity with simple parsing helpers.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::fs_ops::{FileSystem, OnExhausted, TransferOptions};
use crate::locations::{Locations, APP_DIR_NAME};
use crate::naming::{NamingOptions, NamingPolicy};

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Informational output (default)
    #[default]
    Normal,
    /// More info (like verbose)
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Naming flags used to build versioned names
    pub naming_options: NamingOptions,
    /// Upper bound on versioned candidates probed per operation
    pub max_renaming_attempts: u64,
    /// What transfers do when every candidate is taken
    pub on_exhausted: OnExhausted,
    /// If true, preserve permissions and timestamps
    pub preserve_metadata: bool,
    /// If true, resolve names but do not modify the filesystem
    pub dry_run: bool,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
    /// Overrides the detected documents directory
    pub documents_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            naming_options: NamingPolicy::AUTOMATIC_OPTIONS,
            max_renaming_attempts: u64::MAX,
            on_exhausted: OnExhausted::default(),
            preserve_metadata: false,
            dry_run: false,
            log_level: LogLevel::Normal,
            log_file: None,
            documents_dir: None,
        }
    }
}

impl Config {
    /// Naming policy described by this config.
    pub fn naming_policy(&self) -> NamingPolicy {
        NamingPolicy::new(self.naming_options, self.max_renaming_attempts)
    }

    pub fn transfer_options(&self) -> TransferOptions {
        TransferOptions {
            preserve_metadata: self.preserve_metadata,
            dry_run: self.dry_run,
            on_exhausted: self.on_exhausted,
        }
    }

    /// Platform locations with the documents override applied.
    pub fn locations(&self) -> Locations {
        let detected = Locations::detect(APP_DIR_NAME);
        match &self.documents_dir {
            Some(docs) => detected.with_documents(docs),
            None => detected,
        }
    }

    /// Facade wired with this config's policy, transfer options and locations.
    pub fn file_system(&self) -> FileSystem {
        FileSystem::new(self.locations())
            .with_policy(self.naming_policy())
            .with_transfer_options(self.transfer_options())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn defaults_match_automatic_policy() {
        let cfg = Config::default();
        assert_eq!(cfg.naming_policy(), NamingPolicy::automatic());
        assert_eq!(cfg.on_exhausted, OnExhausted::Fail);
        assert!(cfg.log_file.is_none());
    }

    #[test]
    fn log_level_parse_aliases() {
        assert_eq!(LogLevel::parse(" Trace "), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse("verbose"), Some(LogLevel::Info));
        assert_eq!(LogLevel::parse("none"), Some(LogLevel::Quiet));
        assert!("loud".parse::<LogLevel>().is_err());
        assert_eq!(LogLevel::Info.to_string(), "info");
    }

    #[test]
    fn documents_override_flows_into_facade() {
        let cfg = Config {
            documents_dir: Some(PathBuf::from("/srv/docs")),
            dry_run: true,
            ..Config::default()
        };
        assert_eq!(cfg.locations().documents.as_deref(), Some(Path::new("/srv/docs")));
        let fs = cfg.file_system();
        assert!(fs.transfer_options().dry_run);
        assert_eq!(fs.policy(), &cfg.naming_policy());
    }
}
