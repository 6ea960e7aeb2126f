//! Versioned naming policy: candidate generation and the bounded probing loop.
//!
//! Policy:
//! - The original target is always probed first and returned untouched when free.
//! - Otherwise versions `start + 1, start + 2, ...` are rendered from the original
//!   name, strictly ascending, until one is available or the attempt budget runs out.
//! - Exhaustion never raises: the last candidate is returned, marked `Exhausted`.
//!
//! Notes:
//! - The policy is a pure value. Probing performs no I/O besides calling the
//!   caller's availability predicate, so "probe then write" is not atomic; callers
//!   that need exclusivity must create the chosen path with an exclusive primitive.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

use crate::errors::FsError;

use super::options::NamingOptions;
use super::split::{split_file_name, NameParts, INPUT_FORMAT};
use super::template::Template;

/// Outcome of a probing run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The original target was available.
    Original,
    /// A versioned candidate was available.
    Versioned(u64),
    /// The budget ran out; the returned path may still be occupied.
    Exhausted { version: u64, attempts: u64 },
}

/// Path chosen by a probing run, plus how it was reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub path: PathBuf,
    pub outcome: ProbeOutcome,
}

impl Resolution {
    pub fn is_exhausted(&self) -> bool {
        matches!(self.outcome, ProbeOutcome::Exhausted { .. })
    }

    /// Version applied to the path, if any.
    pub fn version(&self) -> Option<u64> {
        match self.outcome {
            ProbeOutcome::Original => None,
            ProbeOutcome::Versioned(v) => Some(v),
            ProbeOutcome::Exhausted { attempts: 0, .. } => None,
            ProbeOutcome::Exhausted { version, .. } => Some(version),
        }
    }

    pub fn into_path(self) -> PathBuf {
        self.path
    }

    /// Treat exhaustion as an error instead of a best-effort path.
    pub fn into_result(self) -> Result<PathBuf, FsError> {
        match self.outcome {
            ProbeOutcome::Exhausted { attempts, .. } => Err(FsError::NamingExhausted {
                target: self.path,
                attempts,
            }),
            _ => Ok(self.path),
        }
    }
}

/// Immutable renaming policy. Cheap to clone, safe to share across threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingPolicy {
    options: NamingOptions,
    output_format: Template,
    max_renaming_attempts: u64,
}

impl Default for NamingPolicy {
    fn default() -> Self {
        Self::automatic()
    }
}

impl NamingPolicy {
    /// Options used by `automatic()`: `name-(n).ext`.
    pub const AUTOMATIC_OPTIONS: NamingOptions = NamingOptions::VERSION_DASHED
        .union(NamingOptions::VERSION_INSIDE_PARENTHESES);

    /// Dash + parenthesized integer after the basename, effectively unbounded.
    pub fn automatic() -> Self {
        Self::new(Self::AUTOMATIC_OPTIONS, u64::MAX)
    }

    pub fn new(options: NamingOptions, max_renaming_attempts: u64) -> Self {
        let ignored = options.ignored();
        if !ignored.is_empty() {
            warn!(options = %options, ignored = %ignored, "conflicting naming options; lower-priority flags ignored");
        }
        Self {
            options,
            output_format: Template::compile(options),
            max_renaming_attempts,
        }
    }

    /// New policy with different options, same budget.
    pub fn with_options(&self, options: NamingOptions) -> Self {
        Self::new(options, self.max_renaming_attempts)
    }

    /// New policy with a different budget, same options.
    pub fn with_max_renaming_attempts(&self, max_renaming_attempts: u64) -> Self {
        Self::new(self.options, max_renaming_attempts)
    }

    pub fn options(&self) -> NamingOptions {
        self.options
    }

    pub fn input_format(&self) -> &'static str {
        INPUT_FORMAT
    }

    pub fn output_format(&self) -> &Template {
        &self.output_format
    }

    pub fn max_renaming_attempts(&self) -> u64 {
        self.max_renaming_attempts
    }

    /// Candidate path for `path` at `version` (same parent directory).
    pub fn candidate(&self, path: &Path, version: u64) -> PathBuf {
        self.render_in_parent(path, |tpl, parts| tpl.render(parts, version))
    }

    /// Candidate path with a text label in the version slot.
    pub fn candidate_with_label(&self, path: &Path, label: &str) -> PathBuf {
        self.render_in_parent(path, |tpl, parts| tpl.render_label(parts, label))
    }

    fn render_in_parent(
        &self,
        path: &Path,
        render: impl FnOnce(&Template, &NameParts) -> OsString,
    ) -> PathBuf {
        let Some(name) = path.file_name() else {
            // Nothing to version (e.g. "/" or ".."); leave as-is.
            return path.to_path_buf();
        };
        let parts = split_file_name(name);
        let file_name = render(&self.output_format, &parts);
        path.with_file_name(file_name)
    }

    /// Probe `target`, then successive versions, until `is_available` accepts one
    /// or the budget is spent.
    pub fn resolve<F>(&self, target: &Path, start_version: u64, mut is_available: F) -> Resolution
    where
        F: FnMut(&Path) -> bool,
    {
        trace!(target = %target.display(), "probe original");
        if is_available(target) {
            return Resolution {
                path: target.to_path_buf(),
                outcome: ProbeOutcome::Original,
            };
        }

        let mut version = start_version;
        let mut attempts: u64 = 0;
        let mut candidate = target.to_path_buf();
        while attempts < self.max_renaming_attempts {
            // Versions never wrap or repeat; running out of them is exhaustion.
            let Some(next) = version.checked_add(1) else {
                break;
            };
            version = next;
            attempts += 1;
            candidate = self.candidate(target, version);
            trace!(candidate = %candidate.display(), version, attempts, "probe candidate");
            if is_available(&candidate) {
                debug!(target = %target.display(), chosen = %candidate.display(), version, "resolved collision with versioned name");
                return Resolution {
                    path: candidate,
                    outcome: ProbeOutcome::Versioned(version),
                };
            }
        }

        warn!(
            target = %target.display(),
            candidate = %candidate.display(),
            attempts,
            "renaming attempts exhausted; returning last candidate"
        );
        Resolution {
            path: candidate,
            outcome: ProbeOutcome::Exhausted { version, attempts },
        }
    }

    /// Best-effort path: same as `resolve(..).into_path()`.
    pub fn generate_versioned_path<F>(&self, path: &Path, start_version: u64, is_available: F) -> PathBuf
    where
        F: FnMut(&Path) -> bool,
    {
        self.resolve(path, start_version, is_available).into_path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn occupied(names: &[&str]) -> HashSet<PathBuf> {
        names.iter().map(|n| Path::new("/d").join(n)).collect()
    }

    #[test]
    fn free_original_is_untouched() {
        let policy = NamingPolicy::automatic();
        let res = policy.resolve(Path::new("/d/TestFile.txt"), 0, |_| true);
        assert_eq!(res.path, PathBuf::from("/d/TestFile.txt"));
        assert_eq!(res.outcome, ProbeOutcome::Original);
        assert_eq!(res.version(), None);
    }

    #[test]
    fn first_free_version_wins() {
        let taken = occupied(&["a.txt", "a-(1).txt", "a-(2).txt"]);
        let res = NamingPolicy::automatic().resolve(Path::new("/d/a.txt"), 0, |p| !taken.contains(p));
        assert_eq!(res.path, PathBuf::from("/d/a-(3).txt"));
        assert_eq!(res.outcome, ProbeOutcome::Versioned(3));
    }

    #[test]
    fn versions_ascend_by_one_from_start() {
        let policy = NamingPolicy::automatic().with_max_renaming_attempts(5);
        let mut seen = Vec::new();
        let res = policy.resolve(Path::new("/d/f.log"), 0, |p| {
            seen.push(p.to_path_buf());
            false
        });
        let expected: Vec<PathBuf> = std::iter::once(PathBuf::from("/d/f.log"))
            .chain((1..=5).map(|v| PathBuf::from(format!("/d/f-({v}).log"))))
            .collect();
        assert_eq!(seen, expected);
        assert_eq!(res.path, PathBuf::from("/d/f-(5).log"));
        assert_eq!(res.outcome, ProbeOutcome::Exhausted { version: 5, attempts: 5 });
        assert!(res.clone().into_result().is_err());
    }

    #[test]
    fn custom_start_version() {
        let policy = NamingPolicy::new(NamingOptions::VERSION_DASHED, 3);
        let res = policy.resolve(Path::new("/d/x.bin"), 10, |p| p.ends_with("x-12.bin"));
        assert_eq!(res.outcome, ProbeOutcome::Versioned(12));
    }

    #[test]
    fn version_space_end_is_exhaustion() {
        let policy = NamingPolicy::new(NamingOptions::VERSION_DASHED, 10);
        let mut seen = Vec::new();
        let res = policy.resolve(Path::new("/d/x.bin"), u64::MAX - 2, |p| {
            seen.push(p.to_path_buf());
            false
        });
        let max = u64::MAX;
        assert_eq!(
            seen,
            vec![
                PathBuf::from("/d/x.bin"),
                PathBuf::from(format!("/d/x-{}.bin", max - 1)),
                PathBuf::from(format!("/d/x-{max}.bin")),
            ]
        );
        assert_eq!(res.outcome, ProbeOutcome::Exhausted { version: max, attempts: 2 });
        assert_eq!(res.path, PathBuf::from(format!("/d/x-{max}.bin")));

        let at_top = policy.resolve(Path::new("/d/x.bin"), max, |_| false);
        assert_eq!(at_top.outcome, ProbeOutcome::Exhausted { version: max, attempts: 0 });
        assert_eq!(at_top.path, PathBuf::from("/d/x.bin"));
    }

    #[test]
    fn zero_budget_returns_original_exhausted() {
        let policy = NamingPolicy::automatic().with_max_renaming_attempts(0);
        let res = policy.resolve(Path::new("/d/a.txt"), 0, |_| false);
        assert_eq!(res.path, PathBuf::from("/d/a.txt"));
        assert_eq!(res.outcome, ProbeOutcome::Exhausted { version: 0, attempts: 0 });
        assert_eq!(res.version(), None);
    }

    #[test]
    fn derived_policies_do_not_mutate_original() {
        let base = NamingPolicy::automatic();
        let tight = base.with_max_renaming_attempts(2);
        let braces = base.with_options(NamingOptions::VERSION_INSIDE_BRACES);
        assert_eq!(base.max_renaming_attempts(), u64::MAX);
        assert_eq!(base.options(), NamingPolicy::AUTOMATIC_OPTIONS);
        assert_eq!(tight.options(), base.options());
        assert_eq!(braces.max_renaming_attempts(), u64::MAX);
        assert_eq!(braces.candidate(Path::new("/d/a.txt"), 1), PathBuf::from("/d/a{1}.txt"));
    }

    #[test]
    fn identical_options_give_identical_templates() {
        let a = NamingPolicy::new(NamingPolicy::AUTOMATIC_OPTIONS, 4);
        let b = NamingPolicy::new(NamingPolicy::AUTOMATIC_OPTIONS, 99);
        assert_eq!(a.output_format(), b.output_format());
    }

    #[test]
    fn prefixed_name_keeps_whole_stem_together() {
        let policy = NamingPolicy::new(
            NamingOptions::VERSION_BEFORE_BASENAME | NamingPolicy::AUTOMATIC_OPTIONS,
            1,
        );
        assert_eq!(
            policy.candidate(Path::new("/d/my file.txt"), 1),
            PathBuf::from("/d/(1)-my file.txt")
        );
    }

    #[test]
    fn candidate_without_file_name_is_unchanged() {
        let policy = NamingPolicy::automatic();
        assert_eq!(policy.candidate(Path::new("/"), 1), PathBuf::from("/"));
    }

    #[test]
    fn label_candidate() {
        let policy = NamingPolicy::new(
            NamingOptions::VERSION_AS_STRING | NamingOptions::VERSION_INSIDE_BRACKETS,
            1,
        );
        assert_eq!(
            policy.candidate_with_label(Path::new("rel/notes.md"), "draft"),
            PathBuf::from("rel/notes[draft].md")
        );
    }

    #[test]
    fn policy_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<NamingPolicy>();
    }
}
