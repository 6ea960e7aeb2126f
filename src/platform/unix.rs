//! Unix (non-macOS) implementations of platform helpers.

use std::fs::Metadata;
use std::path::Path;

/// Platform "hidden" flag. Plain Unix has no attribute; the dotfile
/// convention is the flag.
pub fn is_flagged_hidden(path: &Path, _meta: &Metadata) -> bool {
    path.file_name()
        .map(|n| n.as_encoded_bytes().first() == Some(&b'.'))
        .unwrap_or(false)
}
