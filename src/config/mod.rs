//! Config module.
//! Provides configuration types, default paths, XML loading, and validation.
//!
//! Precedence: built-in defaults < XML file < CLI flags.

pub mod paths;
pub mod types;
mod validate;
pub mod xml;

pub use paths::{default_config_path, default_log_path, path_has_symlink_ancestor, CONFIG_ENV};
pub use types::{Config, LogLevel};
pub use xml::{create_template_config, load_config_from_xml, parse_config_xml, XmlConfig};

/// File name of the XML config inside the app config directory.
pub const CONFIG_FILE_NAME: &str = "config.xml";

/// Option set used when nothing else is configured.
pub const NAMING_OPTIONS_DEFAULT: &str = "dashed,parentheses";
