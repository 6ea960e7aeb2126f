//! Well-known directories.
//! Detected once at startup (via `dirs`) and handed to `FileSystem`; nothing
//! here is read from ambient global state after construction.

use std::env;
use std::path::{Path, PathBuf};

/// Application directory name used under data/cache roots.
pub const APP_DIR_NAME: &str = "versioned_fs";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Locations {
    /// User documents directory.
    pub documents: Option<PathBuf>,
    /// Per-application support directory (data dir + app name).
    pub app_support: Option<PathBuf>,
    /// Per-application cache directory.
    pub cache: Option<PathBuf>,
    /// Temporary files directory.
    pub temp: PathBuf,
}

impl Locations {
    /// Detect platform defaults for `app_name`.
    pub fn detect(app_name: &str) -> Self {
        Self {
            documents: dirs::document_dir(),
            app_support: dirs::data_dir().map(|d| d.join(app_name)),
            cache: dirs::cache_dir().map(|d| d.join(app_name)),
            temp: env::temp_dir(),
        }
    }

    /// All locations rooted under `root` (useful for sandboxes and tests).
    pub fn rooted_at(root: &Path) -> Self {
        Self {
            documents: Some(root.join("Documents")),
            app_support: Some(root.join("Application Support")),
            cache: Some(root.join("Caches")),
            temp: root.join("tmp"),
        }
    }

    /// Replace the documents directory.
    pub fn with_documents(mut self, documents: impl Into<PathBuf>) -> Self {
        self.documents = Some(documents.into());
        self
    }

    /// Documents/Inbox.
    pub fn inbox(&self) -> Option<PathBuf> {
        self.documents.as_ref().map(|d| d.join("Inbox"))
    }

    /// True when `path` lives inside the documents directory.
    /// Both sides are canonicalized when possible (dunce keeps Windows paths non-UNC).
    pub fn is_local(&self, path: &Path) -> bool {
        let Some(docs) = &self.documents else {
            return false;
        };
        let docs_real = dunce::canonicalize(docs).unwrap_or_else(|_| docs.clone());
        let path_real = dunce::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        path_real.starts_with(&docs_real)
    }
}
