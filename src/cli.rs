//! CLI definition and parsing.
//!
//! Global flags override values loaded from the XML config; `--debug` is a
//! shorthand for `--log-level debug`.

use clap::{Parser, Subcommand, ValueHint};
use std::path::PathBuf;

use crate::config::types::{Config, LogLevel};
use crate::data_size::UnitFormat;
use crate::fs_ops::OnExhausted;
use crate::naming::NamingOptions;

#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Copy, move and create files without clobbering: taken names get a version suffix"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(short = 'd', long, global = true)]
    pub debug: bool,

    /// Log level: quiet, normal, info, debug.
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    pub json: bool,

    /// Naming options, e.g. "dashed,parentheses" or "before-basename,brackets".
    #[arg(long, global = true, value_name = "LIST")]
    pub options: Option<NamingOptions>,

    /// Maximum number of versioned names to try.
    #[arg(long, global = true, value_name = "N")]
    pub max_attempts: Option<u64>,

    /// When every name is taken: fail or overwrite.
    #[arg(long, global = true, value_name = "MODE")]
    pub on_exhausted: Option<OnExhausted>,

    /// Preserve timestamps and permissions on copies.
    #[arg(long, global = true)]
    pub preserve_metadata: bool,

    /// Resolve and print names without modifying the filesystem.
    #[arg(long, global = true)]
    pub dry_run: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Copy a file, link or directory; prints the path actually written.
    Copy {
        #[arg(value_hint = ValueHint::AnyPath)]
        src: PathBuf,
        /// Destination path, or an existing directory to copy into.
        #[arg(value_hint = ValueHint::AnyPath)]
        dst: PathBuf,
    },
    /// Move a file, link or directory; prints the path actually used.
    Move {
        #[arg(value_hint = ValueHint::AnyPath)]
        src: PathBuf,
        #[arg(value_hint = ValueHint::AnyPath)]
        dst: PathBuf,
    },
    /// Create a directory (versioned if the name is taken).
    Mkdir {
        #[arg(value_hint = ValueHint::DirPath)]
        path: PathBuf,
        /// Create missing parent directories.
        #[arg(short = 'p', long)]
        parents: bool,
    },
    /// Create a symbolic link at AT pointing to TARGET.
    Link {
        #[arg(value_hint = ValueHint::AnyPath)]
        at: PathBuf,
        target: PathBuf,
    },
    /// Print the name a write to PATH would use, without writing.
    Probe {
        #[arg(value_hint = ValueHint::AnyPath)]
        path: PathBuf,
        /// Versions are tried from START + 1.
        #[arg(long, default_value_t = 0)]
        start: u64,
    },
    /// Show properties of a path.
    Info {
        #[arg(value_hint = ValueHint::AnyPath)]
        path: PathBuf,
        /// Size labels: short, long or conventional.
        #[arg(long, default_value = "conventional")]
        units: UnitFormat,
    },
    /// Print the detected well-known directories.
    Locations,
    /// Print where the config file is looked up, then exit.
    PrintConfig,
    /// Write a commented template config file.
    InitConfig {
        /// Write here instead of the default location.
        #[arg(long, value_hint = ValueHint::FilePath)]
        path: Option<PathBuf>,
    },
}

impl Args {
    /// Precedence: --debug > --log-level > None (use config value).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.clone()
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(options) = self.options {
            cfg.naming_options = options;
        }
        if let Some(n) = self.max_attempts {
            cfg.max_renaming_attempts = n;
        }
        if let Some(mode) = self.on_exhausted {
            cfg.on_exhausted = mode;
        }
        if self.preserve_metadata {
            cfg.preserve_metadata = true;
        }
        if self.dry_run {
            cfg.dry_run = true;
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
