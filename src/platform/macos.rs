//! macOS implementations of platform helpers.
//! Finder hides files carrying the `UF_HIDDEN` BSD flag as well as dotfiles.

use std::fs::Metadata;
use std::os::macos::fs::MetadataExt;
use std::path::Path;

const UF_HIDDEN: u32 = 0x0000_8000;

pub fn is_flagged_hidden(path: &Path, meta: &Metadata) -> bool {
    let dotfile = path
        .file_name()
        .map(|n| n.as_encoded_bytes().first() == Some(&b'.'))
        .unwrap_or(false);
    dotfile || meta.st_flags() & UF_HIDDEN != 0
}
