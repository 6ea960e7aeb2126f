//! Application orchestrator.
//! Loads and merges config, initializes logging, installs the Ctrl-C handler and
//! dispatches the subcommand.

use anyhow::{anyhow, Result};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, error};

use versioned_fs::cli::{Args, Command};
use versioned_fs::config::{create_template_config, CONFIG_ENV};
use versioned_fs::output as out;
use versioned_fs::{
    default_config_path, format_data_size, shutdown, Config, FileSystem, FsError, ListOptions,
    ResourceExt, ResourceType, UnitFormat,
};

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    // Config-file commands run before config loading and logging.
    match &args.command {
        Command::PrintConfig => return print_config(),
        Command::InitConfig { path } => return init_config(path.as_deref()),
        _ => {}
    }

    let (mut cfg, cfg_path) = Config::load()?;
    args.apply_overrides(&mut cfg);

    let guard_opt = init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {e}"));
        e
    })?;

    // Guard is dropped on SIGINT to flush logs
    let guard_slot = Arc::new(Mutex::new(guard_opt));
    {
        let guard_slot = Arc::clone(&guard_slot);
        if let Err(e) = ctrlc::set_handler(move || {
            shutdown::request();
            out::print_warn("Received interrupt; stopping after the current file...");
            if let Ok(mut g) = guard_slot.lock() {
                let _ = g.take();
            }
        }) {
            out::print_warn(&format!("Could not install Ctrl-C handler: {e}"));
        }
    }

    debug!(config_file = ?cfg_path, config = ?cfg, "starting versioned_fs");

    let result = cfg.validate().and_then(|()| {
        let fs = cfg.file_system();
        execute(&args.command, &cfg, &fs)
    });
    if let Err(e) = &result {
        log_failure(e);
    }

    if let Ok(mut g) = guard_slot.lock() {
        let _ = g.take();
    }
    result
}

fn log_failure(e: &anyhow::Error) {
    match e.downcast_ref::<FsError>() {
        Some(FsError::NamingExhausted { target, attempts }) => {
            error!(code = 3, kind = "naming_exhausted", target = %target.display(), attempts = *attempts, "Operation failed")
        }
        Some(FsError::InsufficientSpace { required, available, dest }) => {
            error!(code = 5, kind = "insufficient_space", required = *required, available = *available, dest = %dest.display(), "Operation failed")
        }
        Some(fe) => error!(code = fe.code(), kind = fe.kind(), error = %fe, "Operation failed"),
        None => error!(error = ?e, "Operation failed"),
    }
}

fn execute(command: &Command, cfg: &Config, fs: &FileSystem) -> Result<()> {
    match command {
        Command::Copy { src, dst } => {
            let dest = fs.copy_item(src, dst)?;
            report(cfg, "copy", src, &dest);
        }
        Command::Move { src, dst } => {
            let dest = fs.move_item(src, dst)?;
            report(cfg, "move", src, &dest);
        }
        Command::Mkdir { path, parents } => {
            out::print_user(&fs.create_directory(path, *parents)?.display().to_string());
        }
        Command::Link { at, target } => {
            out::print_user(&fs.create_symbolic_link(at, target)?.display().to_string());
        }
        Command::Probe { path, start } => {
            let resolution = cfg.naming_policy().resolve(path, *start, |p| !fs.file_exists(p));
            if resolution.is_exhausted() {
                out::print_warn(&format!(
                    "No free name within {} attempts; showing the last candidate",
                    cfg.max_renaming_attempts
                ));
            }
            out::print_user(&resolution.path.display().to_string());
        }
        Command::Info { path, units } => info(fs, path, *units)?,
        Command::Locations => {
            let loc = fs.locations();
            let show = |p: Option<&Path>| p.map(|p| p.display().to_string()).unwrap_or_else(|| "-".into());
            out::print_field("documents", &show(loc.documents.as_deref()));
            out::print_field("inbox", &show(loc.inbox().as_deref()));
            out::print_field("support", &show(loc.app_support.as_deref()));
            out::print_field("cache", &show(loc.cache.as_deref()));
            out::print_field("temp", &loc.temp.display().to_string());
        }
        Command::PrintConfig | Command::InitConfig { .. } => {}
    }
    Ok(())
}

fn report(cfg: &Config, verb: &str, src: &Path, dest: &Path) {
    if cfg.dry_run {
        out::print_info(&format!("Dry-run: would {verb} '{}' -> '{}'", src.display(), dest.display()));
    }
    out::print_user(&dest.display().to_string());
}

fn info(fs: &FileSystem, path: &Path, units: UnitFormat) -> Result<()> {
    let kind = path.resource_type();
    if kind == ResourceType::Unknown && !path.file_exists() {
        return Err(FsError::SourceNotFound(path.to_path_buf()).into());
    }
    let date = |d: Option<chrono::DateTime<chrono::Local>>| {
        d.map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string()).unwrap_or_else(|| "-".into())
    };
    out::print_field("path", &path.display().to_string());
    out::print_field("type", &format!("{kind:?}").to_lowercase());
    out::print_field("size", &format_data_size(path.size_of_contents(), 1, units));
    if kind == ResourceType::Directory {
        out::print_field("entries", &path.file_count(ListOptions::default()).to_string());
    }
    if kind == ResourceType::Regular
        && let Some(mime) = path.mime_type()
    {
        out::print_field("mime", mime.as_str());
    }
    if kind == ResourceType::SymbolicLink {
        out::print_field("target", &fs.destination_of_symbolic_link(path)?.display().to_string());
    }
    out::print_field("hidden", &path.is_hidden(true).to_string());
    out::print_field("local", &fs.is_local(path).to_string());
    out::print_field("created", &date(path.creation_date()));
    out::print_field("modified", &date(path.content_modification_date()));
    out::print_field("accessed", &date(path.content_access_date()));
    Ok(())
}

fn print_config() -> Result<()> {
    if let Some(env_path) = std::env::var_os(CONFIG_ENV) {
        out::print_info(&format!(
            "Using {CONFIG_ENV} (explicit):\n  {}",
            Path::new(&env_path).display()
        ));
    }
    let p = default_config_path()?;
    out::print_user(&p.display().to_string());
    if p.exists() {
        out::print_info("A config file exists at that location.");
    } else {
        out::print_info("No config file exists there yet. Run `versioned_fs init-config` to create one.");
    }
    Ok(())
}

fn init_config(path: Option<&Path>) -> Result<()> {
    let target = match path {
        Some(p) => p.to_path_buf(),
        None => default_config_path()?,
    };
    create_template_config(&target).map_err(|e| anyhow!("{e:#}"))?;
    out::print_success(&format!("Template config written to {}", target.display()));
    Ok(())
}
