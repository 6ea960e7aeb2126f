//! Versioned naming: option flags -> template -> candidate names -> probing loop.

pub mod options;
pub mod policy;
pub mod split;
pub mod template;

pub use options::{Bracket, NamingOptions, Placement, ResolvedOptions, VersionSlot};
pub use policy::{NamingPolicy, ProbeOutcome, Resolution};
pub use split::{split_file_name, NameParts, INPUT_FORMAT};
pub use template::{Segment, Template};
