//! Naming option flags and their resolved form.
//!
//! `NamingOptions` is a small bit set of independent toggles. Several toggles
//! compete for the same decision (placement, bracket style), so the set is
//! resolved once into tagged enums using a fixed priority:
//! - placement: before-basename > after-extension > after-basename (default)
//! - bracket:   parentheses > braces > brackets > none
//!
//! Flags that lose a priority contest are reported by `ignored()` so callers
//! can log them; they are never rejected.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;

use crate::errors::FsError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NamingOptions(u8);

impl NamingOptions {
    pub const VERSION_BEFORE_BASENAME: Self = Self(1 << 0);
    pub const VERSION_AFTER_EXTENSION: Self = Self(1 << 1);
    pub const VERSION_DASHED: Self = Self(1 << 2);
    pub const VERSION_INSIDE_PARENTHESES: Self = Self(1 << 3);
    pub const VERSION_INSIDE_BRACES: Self = Self(1 << 4);
    pub const VERSION_INSIDE_BRACKETS: Self = Self(1 << 5);
    pub const VERSION_AS_STRING: Self = Self(1 << 6);

    /// Every flag with its text name, in declaration order.
    const NAMED: [(Self, &'static str); 7] = [
        (Self::VERSION_BEFORE_BASENAME, "before-basename"),
        (Self::VERSION_AFTER_EXTENSION, "after-extension"),
        (Self::VERSION_DASHED, "dashed"),
        (Self::VERSION_INSIDE_PARENTHESES, "parentheses"),
        (Self::VERSION_INSIDE_BRACES, "braces"),
        (Self::VERSION_INSIDE_BRACKETS, "brackets"),
        (Self::VERSION_AS_STRING, "as-string"),
    ];

    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Build from raw bits; unknown bits are dropped.
    pub const fn from_bits_truncate(bits: u8) -> Self {
        Self(bits & 0x7F)
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate the text names of the flags that are set.
    pub fn names(self) -> impl Iterator<Item = &'static str> {
        Self::NAMED
            .into_iter()
            .filter(move |(flag, _)| self.contains(*flag))
            .map(|(_, name)| name)
    }

    /// Resolve competing flags into a single unambiguous layout.
    pub fn resolve(self) -> ResolvedOptions {
        let placement = if self.contains(Self::VERSION_BEFORE_BASENAME) {
            Placement::BeforeBasename
        } else if self.contains(Self::VERSION_AFTER_EXTENSION) {
            Placement::AfterExtension
        } else {
            Placement::AfterBasename
        };
        let bracket = if self.contains(Self::VERSION_INSIDE_PARENTHESES) {
            Bracket::Parentheses
        } else if self.contains(Self::VERSION_INSIDE_BRACES) {
            Bracket::Braces
        } else if self.contains(Self::VERSION_INSIDE_BRACKETS) {
            Bracket::Brackets
        } else {
            Bracket::None
        };
        let slot = if self.contains(Self::VERSION_AS_STRING) {
            VersionSlot::Text
        } else {
            VersionSlot::Integer
        };
        ResolvedOptions {
            placement,
            bracket,
            dashed: self.contains(Self::VERSION_DASHED),
            slot,
        }
    }

    /// Flags that are set but have no effect after priority resolution.
    pub fn ignored(self) -> NamingOptions {
        let mut ignored = NamingOptions::empty();
        if self.contains(Self::VERSION_BEFORE_BASENAME) {
            ignored.insert(Self(self.0 & Self::VERSION_AFTER_EXTENSION.0));
        }
        if self.contains(Self::VERSION_INSIDE_PARENTHESES) {
            ignored.insert(Self(
                self.0 & (Self::VERSION_INSIDE_BRACES.0 | Self::VERSION_INSIDE_BRACKETS.0),
            ));
        } else if self.contains(Self::VERSION_INSIDE_BRACES) {
            ignored.insert(Self(self.0 & Self::VERSION_INSIDE_BRACKETS.0));
        }
        // A dash after the extension is never emitted.
        if !self.contains(Self::VERSION_BEFORE_BASENAME)
            && self.contains(Self::VERSION_AFTER_EXTENSION)
        {
            ignored.insert(Self(self.0 & Self::VERSION_DASHED.0));
        }
        ignored
    }
}

impl BitOr for NamingOptions {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for NamingOptions {
    fn bitor_assign(&mut self, rhs: Self) {
        self.insert(rhs);
    }
}

impl fmt::Display for NamingOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.names().collect();
        f.write_str(&names.join(","))
    }
}

impl FromStr for NamingOptions {
    type Err = FsError;

    /// Parse a comma- or whitespace-separated list of flag names.
    /// Names are case-insensitive; `_` and `-` are interchangeable.
    /// The empty string and `none` parse to the empty set.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut opts = NamingOptions::empty();
        for raw in s.split(|c: char| c == ',' || c.is_whitespace()) {
            let token = raw.trim().to_ascii_lowercase().replace('_', "-");
            if token.is_empty() || token == "none" {
                continue;
            }
            let token = token.strip_prefix("version-").unwrap_or(token.as_str());
            let flag = match token {
                "before-basename" => Self::VERSION_BEFORE_BASENAME,
                "after-extension" => Self::VERSION_AFTER_EXTENSION,
                "dashed" => Self::VERSION_DASHED,
                "parentheses" | "inside-parentheses" => Self::VERSION_INSIDE_PARENTHESES,
                "braces" | "inside-braces" => Self::VERSION_INSIDE_BRACES,
                "brackets" | "inside-brackets" => Self::VERSION_INSIDE_BRACKETS,
                "as-string" => Self::VERSION_AS_STRING,
                _ => return Err(FsError::InvalidOption(raw.trim().to_string())),
            };
            opts.insert(flag);
        }
        Ok(opts)
    }
}

/// Where the version marker goes relative to the name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Placement {
    #[default]
    AfterBasename,
    BeforeBasename,
    AfterExtension,
}

/// Bracket pair wrapped around the version marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Bracket {
    #[default]
    None,
    Parentheses,
    Braces,
    Brackets,
}

impl Bracket {
    pub fn pair(self) -> Option<(&'static str, &'static str)> {
        match self {
            Bracket::None => None,
            Bracket::Parentheses => Some(("(", ")")),
            Bracket::Braces => Some(("{", "}")),
            Bracket::Brackets => Some(("[", "]")),
        }
    }
}

/// How the version slot is typed in the template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VersionSlot {
    #[default]
    Integer,
    Text,
}

/// Unambiguous layout derived from a `NamingOptions` set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResolvedOptions {
    pub placement: Placement,
    pub bracket: Bracket,
    pub dashed: bool,
    pub slot: VersionSlot,
}
