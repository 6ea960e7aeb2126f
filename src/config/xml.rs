//! XML configuration support.
//! - Loads settings from config.xml (quick_xml + serde).
//! - Writes a commented template on request (`init-config`).
//!
//! Notes:
//! - Unknown XML fields are a hard error so typos surface early.
//! - Values are trimmed; an empty `log_file` or `documents_dir` means "unset".

use anyhow::{anyhow, bail, Context, Result};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::paths::{default_config_path, default_log_path, path_has_symlink_ancestor};
use super::NAMING_OPTIONS_DEFAULT;

use crate::config::types::{Config, LogLevel};
use crate::fs_ops::OnExhausted;
use crate::naming::NamingOptions;
use crate::platform::{restrict_dir_to_owner, restrict_file_to_owner, write_private_file_new};

/// Struct mirroring the XML config for deserialization. Every field is optional.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
pub struct XmlConfig {
    #[serde(default)]
    pub naming_options: Option<String>,
    #[serde(default)]
    pub max_renaming_attempts: Option<String>,
    #[serde(default)]
    pub on_exhausted: Option<String>,
    #[serde(default)]
    pub preserve_metadata: Option<String>,
    #[serde(default)]
    pub dry_run: Option<String>,
    #[serde(default)]
    pub log_level: Option<String>,
    #[serde(default)]
    pub log_file: Option<String>,
    #[serde(default)]
    pub documents_dir: Option<String>,
}

fn trimmed(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn parse_bool(field: &str, raw: &str) -> Result<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        _ => bail!("invalid boolean for <{field}>: '{raw}'"),
    }
}

/// Parse XML text into raw settings.
pub fn parse_config_xml(content: &str) -> Result<XmlConfig> {
    from_xml_str(content).map_err(|e| anyhow!("invalid config XML: {e}"))
}

impl XmlConfig {
    /// Overlay every field present in the XML onto `cfg`.
    pub fn apply_to(&self, cfg: &mut Config) -> Result<()> {
        if let Some(s) = trimmed(&self.naming_options) {
            cfg.naming_options = s.parse::<NamingOptions>()?;
        }
        if let Some(s) = trimmed(&self.max_renaming_attempts) {
            cfg.max_renaming_attempts = s
                .parse::<u64>()
                .with_context(|| format!("invalid <max_renaming_attempts>: '{s}'"))?;
        }
        if let Some(s) = trimmed(&self.on_exhausted) {
            cfg.on_exhausted = s.parse::<OnExhausted>().map_err(|e| anyhow!(e))?;
        }
        if let Some(s) = trimmed(&self.preserve_metadata) {
            cfg.preserve_metadata = parse_bool("preserve_metadata", s)?;
        }
        if let Some(s) = trimmed(&self.dry_run) {
            cfg.dry_run = parse_bool("dry_run", s)?;
        }
        if let Some(s) = trimmed(&self.log_level) {
            cfg.log_level = s.parse::<LogLevel>().map_err(|e| anyhow!(e))?;
        }
        if self.log_file.is_some() {
            cfg.log_file = trimmed(&self.log_file).map(PathBuf::from);
        }
        if self.documents_dir.is_some() {
            cfg.documents_dir = trimmed(&self.documents_dir).map(PathBuf::from);
        }
        Ok(())
    }
}

/// Read and parse the config file at `path`.
pub fn read_config_file(path: &Path) -> Result<XmlConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("read config '{}'", path.display()))?;
    parse_config_xml(&content).with_context(|| format!("parse config '{}'", path.display()))
}

/// Load the config file from its default location.
/// Returns Ok(None) when no file exists there; parse errors are surfaced.
pub fn load_config_from_xml() -> Result<Option<(PathBuf, XmlConfig)>> {
    let cfg_path = default_config_path()?;
    if !cfg_path.exists() {
        debug!(path = %cfg_path.display(), "no config file; using defaults");
        return Ok(None);
    }
    let parsed = read_config_file(&cfg_path)?;
    debug!(path = %cfg_path.display(), "loaded config file");
    Ok(Some((cfg_path, parsed)))
}

impl Config {
    /// Defaults overlaid with the XML file, if one exists.
    pub fn load() -> Result<(Config, Option<PathBuf>)> {
        let mut cfg = Config::default();
        match load_config_from_xml()? {
            Some((path, xml)) => {
                xml.apply_to(&mut cfg)
                    .with_context(|| format!("apply config '{}'", path.display()))?;
                Ok((cfg, Some(path)))
            }
            None => Ok((cfg, None)),
        }
    }
}

/// Create a commented template config file (0600) and its parent directory.
/// Refuses to write through a symlinked ancestor or over an existing file.
pub fn create_template_config(path: &Path) -> Result<()> {
    if path_has_symlink_ancestor(path)? {
        bail!(
            "Refusing to create config: ancestor of {} is a symlink",
            path.display()
        );
    }
    if path.exists() {
        bail!("Config file already exists: {}", path.display());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
        let _ = restrict_dir_to_owner(parent);
    }

    let suggested_log = default_log_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "/path/to/versioned_fs.log".into());

    let content = format!(
        "<!--\n  versioned_fs configuration (XML)\n\n  naming_options         -> comma separated: before-basename, after-extension, dashed,\n                            parentheses, braces, brackets, as-string\n  max_renaming_attempts  -> upper bound on versioned names tried (empty = unlimited)\n  on_exhausted           -> fail | overwrite\n  preserve_metadata      -> copy permissions + timestamps (true/false)\n  dry_run                -> resolve names without touching the disk (true/false)\n  log_level              -> quiet | normal | info | debug\n  log_file               -> path to log file (optional), e.g. {suggested_log}\n  documents_dir          -> override the documents directory (optional)\n\n  CLI flags override XML values.\n-->\n<config>\n  <naming_options>{NAMING_OPTIONS_DEFAULT}</naming_options>\n  <max_renaming_attempts></max_renaming_attempts>\n  <on_exhausted>fail</on_exhausted>\n  <preserve_metadata>false</preserve_metadata>\n  <dry_run>false</dry_run>\n  <log_level>normal</log_level>\n  <log_file></log_file>\n  <documents_dir></documents_dir>\n</config>\n"
    );

    write_private_file_new(path, content.as_bytes())?;
    let _ = restrict_file_to_owner(path);

    info!(path = %path.display(), "Created template config");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn parses_and_trims_fields() {
        let xml = "<config>\n  <naming_options> braces , as-string </naming_options>\n  <max_renaming_attempts> 99 </max_renaming_attempts>\n  <on_exhausted>Overwrite</on_exhausted>\n  <preserve_metadata> true </preserve_metadata>\n  <log_level> debug </log_level>\n  <log_file>   </log_file>\n</config>";
        let parsed = parse_config_xml(xml).unwrap();
        let mut cfg = Config {
            log_file: Some(PathBuf::from("/old.log")),
            ..Config::default()
        };
        parsed.apply_to(&mut cfg).unwrap();
        assert_eq!(
            cfg.naming_options,
            NamingOptions::VERSION_INSIDE_BRACES | NamingOptions::VERSION_AS_STRING
        );
        assert_eq!(cfg.max_renaming_attempts, 99);
        assert_eq!(cfg.on_exhausted, OnExhausted::Overwrite);
        assert!(cfg.preserve_metadata);
        assert!(!cfg.dry_run);
        assert_eq!(cfg.log_level, LogLevel::Debug);
        assert_eq!(cfg.log_file, None, "empty log_file clears the setting");
    }

    #[test]
    fn missing_fields_keep_defaults() {
        let parsed = parse_config_xml("<config><dry_run>yes</dry_run></config>").unwrap();
        let mut cfg = Config::default();
        parsed.apply_to(&mut cfg).unwrap();
        assert!(cfg.dry_run);
        assert_eq!(cfg.max_renaming_attempts, u64::MAX);
        assert_eq!(cfg.naming_options, Config::default().naming_options);
    }

    #[test]
    fn unknown_field_is_rejected() {
        assert!(parse_config_xml("<config><download_base>/x</download_base></config>").is_err());
    }

    #[test]
    fn bad_values_are_rejected() {
        for xml in [
            "<config><naming_options>sideways</naming_options></config>",
            "<config><max_renaming_attempts>-3</max_renaming_attempts></config>",
            "<config><on_exhausted>retry</on_exhausted></config>",
            "<config><preserve_metadata>maybe</preserve_metadata></config>",
        ] {
            let parsed = parse_config_xml(xml).unwrap();
            assert!(parsed.apply_to(&mut Config::default()).is_err(), "{xml}");
        }
    }

    #[test]
    fn template_round_trips_through_parser() {
        let td = tempdir().unwrap();
        let path = td.path().join("cfg").join("config.xml");
        create_template_config(&path).unwrap();
        let parsed = read_config_file(&path).unwrap();
        let mut cfg = Config::default();
        parsed.apply_to(&mut cfg).unwrap();
        assert_eq!(cfg.naming_options, Config::default().naming_options);
        assert_eq!(cfg.max_renaming_attempts, u64::MAX);
        assert!(create_template_config(&path).is_err(), "never overwrites");
    }
}
