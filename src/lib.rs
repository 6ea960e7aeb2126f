//! Core library for `versioned_fs`.
//!
//! File-system helpers whose copy, move and create operations never clobber:
//! when the requested name is taken, a versioned sibling such as
//! `report-(2).txt` is chosen instead.
//!
//! - `naming`: option flags, templates and the bounded probing loop (pure).
//! - `fs_ops`: the `FileSystem` facade that applies a policy to real I/O.
//! - `resource`: read-only path properties (type, hidden, sizes, dates, MIME).
//! - `config`: XML config + defaults; `cli` defines the binary's flags.

pub mod cli;
pub mod config;
pub mod data_size;
pub mod errors;
pub mod fs_ops;
pub mod locations;
pub mod mime;
pub mod naming;
pub mod output;
pub mod platform;
pub mod resource;
pub mod shutdown;

pub use config::{default_config_path, default_log_path, path_has_symlink_ancestor, Config, LogLevel};
pub use data_size::{format_data_size, DataSize, DataSizeUnit, UnitFormat};
pub use errors::FsError;
pub use fs_ops::{FileSystem, ListOptions, OnExhausted, TransferOptions};
pub use locations::Locations;
pub use mime::MimeType;
pub use naming::{NamingOptions, NamingPolicy, ProbeOutcome, Resolution};
pub use resource::{size_of_contents_async, ResourceExt, ResourceType};
