//! `tsguard.json` loading and option resolution.
//!
//! Precedence is command line, then config file, then built-in defaults.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use tsg_generator::{CommandFormatter, Flags};

use crate::args::CliArgs;

pub const CONFIG_FILE_NAME: &str = "tsguard.json";

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub flags: Option<Flags>,
    #[serde(default)]
    pub format: Option<bool>,
    /// Formatter argv, program first.
    #[serde(default)]
    pub formatter: Option<Vec<String>>,
    /// Resolved against the directory holding the config file.
    #[serde(default)]
    pub out_dir: Option<PathBuf>,
}

pub fn parse_config(text: &str) -> Result<ConfigFile> {
    serde_json::from_str(text).context("invalid tsguard config")
}

/// Load the explicit config, or `tsguard.json` in `cwd` if one exists.
///
/// A missing explicit path is an error; a missing default file is not.
pub fn load_config(explicit: Option<&Path>, cwd: &Path) -> Result<Option<(PathBuf, ConfigFile)>> {
    let path = match explicit {
        Some(path) => {
            let path = cwd.join(path);
            if !path.is_file() {
                bail!("config file not found: {}", path.display());
            }
            path
        }
        None => {
            let path = cwd.join(CONFIG_FILE_NAME);
            if !path.is_file() {
                return Ok(None);
            }
            path
        }
    };

    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let mut config =
        parse_config(&text).with_context(|| format!("failed to load config {}", path.display()))?;

    if let Some(out_dir) = config.out_dir.take() {
        let base = path.parent().unwrap_or(cwd);
        config.out_dir = Some(base.join(out_dir));
    }
    tracing::debug!(config = %path.display(), "loaded config");
    Ok(Some((path, config)))
}

/// Everything a run needs after merging arguments and config.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedOptions {
    pub flags: Flags,
    pub format: bool,
    pub formatter: Vec<String>,
    pub out_dir: Option<PathBuf>,
    pub json: bool,
    pub include_source: bool,
}

impl ResolvedOptions {
    /// The formatter to apply, or `None` when formatting is off.
    pub fn formatter(&self) -> Result<Option<CommandFormatter>> {
        if !self.format {
            return Ok(None);
        }
        let formatter = CommandFormatter::from_argv(&self.formatter)
            .context("invalid formatter command")?;
        Ok(Some(formatter))
    }
}

pub fn default_formatter_argv() -> Vec<String> {
    ["prettier", "--parser", "typescript"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

pub fn resolve_options(args: &CliArgs, config: Option<&ConfigFile>, cwd: &Path) -> ResolvedOptions {
    let mut flags = config.and_then(|c| c.flags).unwrap_or_default();
    if let Some(check) = args.plain_object_check {
        flags.plain_object_check = check.into();
    }
    if let Some(check) = args.has_own_check {
        flags.has_own_check = check.into();
    }

    let formatter = match &args.formatter {
        Some(command) => command.split_whitespace().map(str::to_string).collect(),
        None => config
            .and_then(|c| c.formatter.clone())
            .unwrap_or_else(default_formatter_argv),
    };

    // Naming a formatter on the command line implies --format.
    let format = args.format
        || args.formatter.is_some()
        || config.and_then(|c| c.format).unwrap_or(false);

    let out_dir = args
        .out_dir
        .as_ref()
        .map(|dir| cwd.join(dir))
        .or_else(|| config.and_then(|c| c.out_dir.clone()));

    ResolvedOptions {
        flags,
        format,
        formatter,
        out_dir,
        json: args.json,
        include_source: !args.no_source,
    }
}
