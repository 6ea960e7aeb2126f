use std::collections::HashSet;
use std::path::{Path, PathBuf};

use versioned_fs::naming::{NamingOptions, NamingPolicy, ProbeOutcome};

fn all_option_sets() -> impl Iterator<Item = NamingOptions> {
    (0u8..=0x7F).map(NamingOptions::from_bits_truncate)
}

#[test]
fn every_combination_renders_a_usable_name() {
    for options in all_option_sets() {
        let policy = NamingPolicy::new(options, 5);
        for name in ["TestFile.txt", "README", "archive.tar.gz", ".bashrc"] {
            let candidate = policy.candidate(&Path::new("/d").join(name), 7);
            let file_name = candidate.file_name().unwrap().to_string_lossy().into_owned();
            assert!(!file_name.is_empty(), "{options}: empty name for {name}");
            assert!(file_name.contains('7'), "{options}: {file_name} lacks the version");
            assert!(!file_name.ends_with('.'), "{options}: trailing dot in {file_name}");
            assert_eq!(candidate.parent(), Some(Path::new("/d")));
        }
    }
}

#[test]
fn available_original_is_returned_unchanged_under_every_policy() {
    let target = Path::new("/data/photo.jpeg");
    for options in all_option_sets() {
        let res = NamingPolicy::new(options, 3).resolve(target, 0, |_| true);
        assert_eq!(res.path, target);
        assert_eq!(res.outcome, ProbeOutcome::Original);
    }
}

#[test]
fn occupied_original_with_free_first_version_yields_version_one() {
    let target = PathBuf::from("/data/photo.jpeg");
    for options in all_option_sets() {
        let policy = NamingPolicy::new(options, 3);
        let res = policy.resolve(&target, 0, |p| p != target);
        assert_eq!(res.outcome, ProbeOutcome::Versioned(1), "{options}");
        assert_eq!(res.path, policy.candidate(&target, 1));
    }
}

#[test]
fn all_occupied_returns_final_candidate() {
    let target = Path::new("/d/TestFile.txt");
    let policy = NamingPolicy::new(NamingPolicy::AUTOMATIC_OPTIONS, 10);
    let mut probed = Vec::new();
    let res = policy.resolve(target, 0, |p| {
        probed.push(p.to_path_buf());
        false
    });
    assert_eq!(probed.len(), 11, "original plus ten versions");
    assert_eq!(res.path, PathBuf::from("/d/TestFile-(10).txt"));
    assert_eq!(res.outcome, ProbeOutcome::Exhausted { version: 10, attempts: 10 });
    assert_eq!(probed.iter().collect::<HashSet<_>>().len(), probed.len(), "no candidate probed twice");
}

#[test]
fn documented_layouts() {
    let p = Path::new("TestFile.txt");
    let cases = [
        (NamingPolicy::AUTOMATIC_OPTIONS, "TestFile-(3).txt"),
        (NamingOptions::VERSION_DASHED, "TestFile-3.txt"),
        (NamingOptions::VERSION_INSIDE_BRACKETS, "TestFile[3].txt"),
        (
            NamingOptions::VERSION_BEFORE_BASENAME | NamingOptions::VERSION_DASHED,
            "3-TestFile.txt",
        ),
        (
            NamingOptions::VERSION_AFTER_EXTENSION | NamingOptions::VERSION_INSIDE_BRACES,
            "TestFile.txt.{3}",
        ),
    ];
    for (options, expected) in cases {
        assert_eq!(NamingPolicy::new(options, 1).candidate(p, 3), PathBuf::from(expected), "{options}");
    }
}

#[test]
fn options_parse_like_config_values() {
    let parsed: NamingOptions = "Dashed, PARENTHESES".parse().unwrap();
    assert_eq!(parsed, NamingPolicy::AUTOMATIC_OPTIONS);
    assert!("dashed,sideways".parse::<NamingOptions>().is_err());
}
