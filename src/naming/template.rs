//! Pattern compiler: turns naming options into a structured output template.
//!
//! A template is a flat list of segments. Rendering substitutes the parsed
//! basename/extension and a version value; no textual regex replacement is
//! involved, so names containing `$`, `\` or `%` render verbatim.

use std::ffi::OsString;
use std::fmt;

use super::options::{NamingOptions, Placement, VersionSlot};
use super::split::NameParts;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Basename,
    /// `.ext` when the name has an extension, nothing otherwise.
    Extension,
    Literal(&'static str),
    Version,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
    slot: VersionSlot,
}

impl Template {
    /// Compile `options` into a template. Total: every option set compiles.
    pub fn compile(options: NamingOptions) -> Self {
        let resolved = options.resolve();

        let mut marker = Vec::with_capacity(3);
        match resolved.bracket.pair() {
            Some((open, close)) => {
                marker.push(Segment::Literal(open));
                marker.push(Segment::Version);
                marker.push(Segment::Literal(close));
            }
            None => marker.push(Segment::Version),
        }

        let mut segments = Vec::with_capacity(marker.len() + 4);
        match resolved.placement {
            Placement::BeforeBasename => {
                segments.extend(marker);
                if resolved.dashed {
                    segments.push(Segment::Literal("-"));
                }
                segments.push(Segment::Basename);
                segments.push(Segment::Extension);
            }
            Placement::AfterExtension => {
                segments.push(Segment::Basename);
                segments.push(Segment::Extension);
                segments.push(Segment::Literal("."));
                segments.extend(marker);
            }
            Placement::AfterBasename => {
                segments.push(Segment::Basename);
                if resolved.dashed {
                    segments.push(Segment::Literal("-"));
                }
                segments.extend(marker);
                segments.push(Segment::Extension);
            }
        }

        Self {
            segments,
            slot: resolved.slot,
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn slot(&self) -> VersionSlot {
        self.slot
    }

    /// Render a file name for `parts` with `version` in the slot.
    pub fn render(&self, parts: &NameParts, version: impl fmt::Display) -> OsString {
        self.render_label(parts, &version.to_string())
    }

    /// Render a file name with an arbitrary text label in the slot.
    pub fn render_label(&self, parts: &NameParts, label: &str) -> OsString {
        let mut out = OsString::with_capacity(parts.basename.len() + label.len() + 16);
        for seg in &self.segments {
            match seg {
                Segment::Basename => out.push(&parts.basename),
                Segment::Extension => {
                    if let Some(ext) = &parts.extension {
                        out.push(".");
                        out.push(ext);
                    }
                }
                Segment::Literal(s) => out.push(s),
                Segment::Version => out.push(label),
            }
        }
        out
    }
}

impl fmt::Display for Template {
    /// Human-readable form, e.g. `{basename}-({version}).{extension}`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for seg in &self.segments {
            match seg {
                Segment::Basename => f.write_str("{basename}")?,
                Segment::Extension => f.write_str(".{extension}")?,
                Segment::Literal(s) => f.write_str(s)?,
                Segment::Version => match self.slot {
                    VersionSlot::Integer => f.write_str("{version}")?,
                    VersionSlot::Text => f.write_str("{label}")?,
                },
            }
        }
        Ok(())
    }
}
