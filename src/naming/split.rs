//! Filename parser: splits a file name into basename and optional extension.
//!
//! The recognized shape is the classic `(\w+)(?:\.(\w+))?$`: an extension is the
//! run after the final `.`, and only counts when it is non-empty and made of
//! word characters (alphanumerics or `_`). Everything before that dot is the
//! basename, including any leading dot of a dotfile.
//!
//! Examples:
//! - "TestFile.txt"   -> ("TestFile", Some("txt"))
//! - "archive.tar.gz" -> ("archive.tar", Some("gz"))
//! - ".env"           -> (".env", None)
//! - "notes"          -> ("notes", None)
//! - "draft.v 2"      -> ("draft.v 2", None)

use std::ffi::{OsStr, OsString};
use std::path::Path;

/// Text form of the pattern the parser recognizes.
/// Unlike a regex substitution, the whole stem is the basename: "my file.txt"
/// versions as "(1)-my file.txt", not "my (1)-file.txt".
pub const INPUT_FORMAT: &str = r"(\w+)(?:\.(\w+))?$";

/// A file name broken into its versionable parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameParts {
    pub basename: OsString,
    pub extension: Option<String>,
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Split `name` (a single path component) into basename and extension.
/// Non-UTF-8 basenames are carried through untouched.
pub fn split_file_name(name: &OsStr) -> NameParts {
    let as_path = Path::new(name);
    let extension = match (as_path.file_stem(), as_path.extension()) {
        (Some(stem), Some(ext)) if !stem.is_empty() => ext
            .to_str()
            .filter(|e| !e.is_empty() && e.chars().all(is_word_char))
            .map(|e| (stem.to_os_string(), e.to_string())),
        _ => None,
    };
    match extension {
        Some((basename, ext)) => NameParts {
            basename,
            extension: Some(ext),
        },
        None => NameParts {
            basename: name.to_os_string(),
            extension: None,
        },
    }
}
