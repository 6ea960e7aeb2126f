//! Filesystem operations behind the `FileSystem` facade.

mod atomic;
mod copy;
mod file_system;
mod helpers;
mod io_copy;
mod listing;
mod metadata;
mod relocate;
mod replace;
mod space;
mod util;

pub use file_system::{FileSystem, OnExhausted, TransferOptions};
pub use helpers::{io_error_with_help, io_error_with_help_io};
pub use listing::{contents_of_directory, ListOptions};
