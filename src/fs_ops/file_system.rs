//! File-system facade with collision-avoiding copy, move and create.
//!
//! Every operation that produces a new name resolves it through a
//! `NamingPolicy` first, using `file_exists` as the availability oracle, and
//! only then touches the disk. The returned path is the name actually used.
//!
//! Probing and writing are separate steps; another process can take the name in
//! between. File copies create their temp file exclusively, but the final rename
//! and directory/link creation do not re-check the chosen name.

use anyhow::{anyhow, bail, Result};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info, warn};

use crate::errors::FsError;
use crate::locations::Locations;
use crate::naming::{NamingPolicy, ProbeOutcome};
use crate::platform::create_symlink;
use crate::resource::ResourceExt;
use crate::shutdown;

use super::copy::{copy_file_atomic, copy_link, copy_tree};
use super::helpers::io_error_with_help;
use super::listing::{contents_of_directory, ListOptions};
use super::relocate::move_path;
use super::replace::replace_with;
use super::space::ensure_space_for_copy;
use super::util::parent_or_cwd;

/// What to do when every candidate name is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnExhausted {
    /// Return `FsError::NamingExhausted`.
    #[default]
    Fail,
    /// Remove whatever occupies the last candidate and use it.
    Overwrite,
}

impl fmt::Display for OnExhausted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OnExhausted::Fail => "fail",
            OnExhausted::Overwrite => "overwrite",
        })
    }
}

impl FromStr for OnExhausted {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fail" | "error" => Ok(OnExhausted::Fail),
            "overwrite" | "replace" => Ok(OnExhausted::Overwrite),
            other => Err(format!("invalid on_exhausted value: '{other}'")),
        }
    }
}

/// Knobs shared by copy/move/create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransferOptions {
    /// Copy timestamps and permissions onto copies.
    pub preserve_metadata: bool,
    /// Resolve names and log, but never modify the disk.
    pub dry_run: bool,
    pub on_exhausted: OnExhausted,
}

/// Name picked by `claim`. `replaces` is set when an `Overwrite` claim landed
/// on an occupied path.
struct Claim {
    path: PathBuf,
    replaces: bool,
}

#[derive(Debug, Clone, Default)]
pub struct FileSystem {
    locations: Locations,
    policy: NamingPolicy,
    transfer: TransferOptions,
}

impl FileSystem {
    /// Facade with the automatic naming policy and default transfer options.
    pub fn new(locations: Locations) -> Self {
        Self {
            locations,
            policy: NamingPolicy::automatic(),
            transfer: TransferOptions::default(),
        }
    }

    pub fn with_policy(mut self, policy: NamingPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_transfer_options(mut self, transfer: TransferOptions) -> Self {
        self.transfer = transfer;
        self
    }

    pub fn locations(&self) -> &Locations {
        &self.locations
    }

    /// Default policy used by the plain (non-`_with`) operations.
    pub fn policy(&self) -> &NamingPolicy {
        &self.policy
    }

    pub fn transfer_options(&self) -> TransferOptions {
        self.transfer
    }

    pub fn documents_directory(&self) -> Option<&Path> {
        self.locations.documents.as_deref()
    }

    pub fn inbox_directory(&self) -> Option<PathBuf> {
        self.locations.inbox()
    }

    /// Whether anything occupies `path`. A dangling symlink counts.
    pub fn file_exists(&self, path: &Path) -> bool {
        path.file_exists()
    }

    /// True when `path` is inside the documents directory.
    pub fn is_local(&self, path: &Path) -> bool {
        self.locations.is_local(path)
    }

    /// Where `src` would land for a copy/move to `dst`: inside `dst` when it is
    /// an existing directory, else `dst` itself.
    pub fn destination_for(&self, src: &Path, dst: &Path) -> Result<PathBuf> {
        if dst.is_directory() {
            let name = src
                .file_name()
                .ok_or_else(|| anyhow!("source has no file name: {}", src.display()))?;
            Ok(dst.join(name))
        } else {
            Ok(dst.to_path_buf())
        }
    }

    /// Resolve `target` against the disk and apply the exhaustion strategy.
    ///
    /// Nothing is removed here. An `Overwrite` claim on an occupied path is
    /// returned with `replaces` set, and the caller swaps the new entry in
    /// through `replace_with` once it can be produced. A last candidate that is
    /// `src` itself, or contains it, is never handed out for replacement.
    fn claim(&self, target: &Path, src: Option<&Path>, policy: &NamingPolicy) -> Result<Claim> {
        let resolution = policy.resolve(target, 0, |p| !self.file_exists(p));
        let ProbeOutcome::Exhausted { attempts, .. } = resolution.outcome else {
            return Ok(Claim { path: resolution.into_path(), replaces: false });
        };
        let path = resolution.into_path();
        if self.transfer.on_exhausted == OnExhausted::Fail {
            return Err(FsError::NamingExhausted { target: path, attempts }.into());
        }
        if let Some(src) = src
            && Self::occupant_holds_source(&path, src)
        {
            warn!(
                path = %path.display(),
                src = %src.display(),
                "last candidate holds the source; refusing to overwrite"
            );
            return Err(FsError::NamingExhausted { target: path, attempts }.into());
        }
        warn!(path = %path.display(), "names exhausted; overwriting last candidate");
        let replaces = self.file_exists(&path);
        Ok(Claim { path, replaces })
    }

    /// True when replacing `occupant` would destroy `src`: same entry, or an
    /// ancestor directory of it. The final component is not followed, so a
    /// link is compared as the link itself.
    fn occupant_holds_source(occupant: &Path, src: &Path) -> bool {
        fn located(p: &Path) -> PathBuf {
            let parent = parent_or_cwd(p);
            let parent = dunce::canonicalize(parent).unwrap_or_else(|_| parent.to_path_buf());
            match p.file_name() {
                Some(name) => parent.join(name),
                None => parent,
            }
        }
        let occupant = located(occupant);
        let src = located(src);
        src.starts_with(&occupant)
    }

    /// Run `produce` on the claimed path, through `replace_with` when the claim
    /// replaces an occupant.
    fn place<F>(claim: &Claim, produce: F) -> Result<()>
    where
        F: FnOnce(&Path) -> Result<()>,
    {
        if claim.replaces {
            replace_with(&claim.path, produce)
        } else {
            produce(&claim.path)
        }
    }

    fn source_metadata(src: &Path) -> Result<fs::Metadata> {
        fs::symlink_metadata(src).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                FsError::SourceNotFound(src.to_path_buf()).into()
            } else {
                io_error_with_help("stat source", src)(e)
            }
        })
    }

    /// Refuse to place a directory inside itself.
    fn ensure_not_nested(src: &Path, target: &Path) -> Result<()> {
        let Ok(src_real) = dunce::canonicalize(src) else {
            return Ok(());
        };
        let parent_real = dunce::canonicalize(parent_or_cwd(target))
            .unwrap_or_else(|_| parent_or_cwd(target).to_path_buf());
        if parent_real.starts_with(&src_real) {
            bail!(
                "cannot copy or move '{}' into itself ('{}')",
                src.display(),
                target.display()
            );
        }
        Ok(())
    }

    fn check_shutdown() -> Result<()> {
        if shutdown::is_requested() {
            return Err(FsError::Interrupted.into());
        }
        Ok(())
    }

    /// Copy `src` to `dst` under the default policy.
    pub fn copy_item(&self, src: &Path, dst: &Path) -> Result<PathBuf> {
        self.copy_item_with(src, dst, &self.policy)
    }

    /// Copy a file, link or directory tree to a collision-free name derived from `dst`.
    pub fn copy_item_with(&self, src: &Path, dst: &Path, policy: &NamingPolicy) -> Result<PathBuf> {
        Self::check_shutdown()?;
        let meta = Self::source_metadata(src)?;
        let target = self.destination_for(src, dst)?;
        let ft = meta.file_type();
        if ft.is_dir() {
            Self::ensure_not_nested(src, &target)?;
        }
        let required = if ft.is_dir() {
            src.size_of_contents()
        } else if ft.is_symlink() {
            0
        } else {
            meta.len()
        };
        if !self.transfer.dry_run {
            ensure_space_for_copy(parent_or_cwd(&target), required)?;
        }

        let claim = self.claim(&target, Some(src), policy)?;
        if self.transfer.dry_run {
            info!(src = %src.display(), dest = %claim.path.display(), "dry-run: would copy");
            return Ok(claim.path);
        }

        let preserve = self.transfer.preserve_metadata;
        Self::place(&claim, |dest| {
            if ft.is_symlink() {
                copy_link(src, dest)
            } else if ft.is_dir() {
                copy_tree(src, dest, preserve).map(drop)
            } else {
                copy_file_atomic(src, dest, preserve).map(drop)
            }
        })?;
        info!(src = %src.display(), dest = %claim.path.display(), replaced = claim.replaces, "copied");
        Ok(claim.path)
    }

    /// Move `src` to `dst` under the default policy.
    pub fn move_item(&self, src: &Path, dst: &Path) -> Result<PathBuf> {
        self.move_item_with(src, dst, &self.policy)
    }

    /// Move to a collision-free name derived from `dst`.
    pub fn move_item_with(&self, src: &Path, dst: &Path, policy: &NamingPolicy) -> Result<PathBuf> {
        Self::check_shutdown()?;
        let meta = Self::source_metadata(src)?;
        let target = self.destination_for(src, dst)?;
        if meta.is_dir() {
            Self::ensure_not_nested(src, &target)?;
        }
        let claim = self.claim(&target, Some(src), policy)?;
        if self.transfer.dry_run {
            info!(src = %src.display(), dest = %claim.path.display(), "dry-run: would move");
            return Ok(claim.path);
        }
        let preserve = self.transfer.preserve_metadata;
        Self::place(&claim, |dest| move_path(src, dest, preserve))?;
        info!(src = %src.display(), dest = %claim.path.display(), replaced = claim.replaces, "moved");
        Ok(claim.path)
    }

    /// Create a directory at a collision-free name derived from `at`.
    pub fn create_directory(&self, at: &Path, intermediates: bool) -> Result<PathBuf> {
        self.create_directory_with(at, intermediates, &self.policy)
    }

    /// Missing parents are created only when `intermediates` is set; the leaf
    /// name is the one that gets versioned.
    pub fn create_directory_with(
        &self,
        at: &Path,
        intermediates: bool,
        policy: &NamingPolicy,
    ) -> Result<PathBuf> {
        let claim = self.claim(at, None, policy)?;
        if self.transfer.dry_run {
            info!(path = %claim.path.display(), "dry-run: would create directory");
            return Ok(claim.path);
        }
        if intermediates {
            let parent = parent_or_cwd(&claim.path);
            fs::create_dir_all(parent).map_err(io_error_with_help("create parent directories", parent))?;
        }
        Self::place(&claim, |dest| {
            fs::create_dir(dest).map_err(io_error_with_help("create directory", dest))
        })?;
        debug!(path = %claim.path.display(), "created directory");
        Ok(claim.path)
    }

    /// Create a symbolic link at a collision-free name derived from `at`,
    /// pointing at `destination`.
    pub fn create_symbolic_link(&self, at: &Path, destination: &Path) -> Result<PathBuf> {
        self.create_symbolic_link_with(at, destination, &self.policy)
    }

    pub fn create_symbolic_link_with(
        &self,
        at: &Path,
        destination: &Path,
        policy: &NamingPolicy,
    ) -> Result<PathBuf> {
        let claim = self.claim(at, None, policy)?;
        if self.transfer.dry_run {
            info!(link = %claim.path.display(), target = %destination.display(), "dry-run: would create symbolic link");
            return Ok(claim.path);
        }
        Self::place(&claim, |dest| {
            create_symlink(destination, dest).map_err(io_error_with_help("create symbolic link", dest))
        })?;
        debug!(link = %claim.path.display(), target = %destination.display(), "created symbolic link");
        Ok(claim.path)
    }

    /// Target stored in the link at `path` (not resolved).
    pub fn destination_of_symbolic_link(&self, path: &Path) -> Result<PathBuf> {
        fs::read_link(path).map_err(io_error_with_help("read symbolic link", path))
    }

    pub fn contents_of_directory(&self, dir: &Path, opts: ListOptions) -> Result<Vec<PathBuf>> {
        contents_of_directory(dir, opts)
    }

    /// Remove a file, link or whole directory tree.
    pub fn remove_item(&self, path: &Path) -> Result<()> {
        let meta = Self::source_metadata(path)?;
        if meta.is_dir() {
            fs::remove_dir_all(path).map_err(io_error_with_help("remove directory", path))?;
        } else {
            fs::remove_file(path).map_err(io_error_with_help("remove file", path))?;
        }
        debug!(path = %path.display(), "removed");
        Ok(())
    }
}
