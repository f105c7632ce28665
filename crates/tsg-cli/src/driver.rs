//! Input discovery and the per-file generate/format/write pipeline.

use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use tsg_generator::{
    CommandFormatter, Formatter, GuardOutput, generate_type_guards_from_source, render_formatted,
};

use crate::args::CliArgs;
use crate::config::{ResolvedOptions, load_config, resolve_options};
use crate::reporter::Reporter;

const SOURCE_EXTENSIONS: &[&str] = &["ts", "tsx", "mts", "cts"];
const DECLARATION_SUFFIXES: &[&str] = &[".d.ts", ".d.mts", ".d.cts"];
const SKIPPED_DIRECTORIES: &[&str] = &["node_modules"];

pub const GUARD_SUFFIX: &str = ".guard.ts";
pub const GUARD_JSON_SUFFIX: &str = ".guard.json";
pub const STDIN_NAME: &str = "<stdin>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Stdin,
    File {
        path: PathBuf,
        /// Path as shown in diagnostics, relative to the working directory when possible.
        name: String,
    },
}

impl Input {
    pub fn file(path: PathBuf, cwd: &Path) -> Self {
        let name = path
            .strip_prefix(cwd)
            .unwrap_or(&path)
            .display()
            .to_string();
        Input::File { path, name }
    }

    pub fn name(&self) -> &str {
        match self {
            Input::Stdin => STDIN_NAME,
            Input::File { name, .. } => name,
        }
    }

    fn read(&self) -> Result<String> {
        match self {
            Input::Stdin => {
                std::io::read_to_string(std::io::stdin()).context("failed to read from stdin")
            }
            Input::File { path, name } => {
                std::fs::read_to_string(path).with_context(|| format!("failed to read {name}"))
            }
        }
    }

    fn stem(&self) -> String {
        match self {
            Input::Stdin => "stdin".to_string(),
            Input::File { path, .. } => path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| "output".to_string()),
        }
    }
}

/// TypeScript sources that should get guards: no declaration files and no
/// previously generated guard files.
pub fn is_guard_source(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
        return false;
    };
    if name.ends_with(GUARD_SUFFIX) || DECLARATION_SUFFIXES.iter().any(|s| name.ends_with(s)) {
        return false;
    }
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

fn is_skipped_directory(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry.file_name().to_str().is_some_and(|name| {
            name.starts_with('.') || SKIPPED_DIRECTORIES.contains(&name)
        })
}

/// Expand the positional inputs. Directories are walked and sorted; files are
/// taken as given. No inputs means stdin.
pub fn discover_inputs(paths: &[PathBuf], cwd: &Path) -> Result<Vec<Input>> {
    if paths.is_empty() {
        return Ok(vec![Input::Stdin]);
    }

    let mut inputs = Vec::new();
    for path in paths {
        if path.as_os_str() == "-" {
            if !inputs.contains(&Input::Stdin) {
                inputs.push(Input::Stdin);
            }
            continue;
        }

        let full = cwd.join(path);
        if full.is_dir() {
            let mut files: Vec<PathBuf> = WalkDir::new(&full)
                .follow_links(true)
                .into_iter()
                .filter_entry(|entry| !is_skipped_directory(entry))
                .filter_map(|entry| entry.ok())
                .filter(|entry| entry.file_type().is_file())
                .map(|entry| entry.into_path())
                .filter(|path| is_guard_source(path))
                .collect();
            files.sort();
            debug!(dir = %full.display(), count = files.len(), "discovered inputs");
            inputs.extend(files.into_iter().map(|file| Input::file(file, cwd)));
        } else if full.is_file() {
            inputs.push(Input::file(full, cwd));
        } else {
            bail!("input not found: {}", path.display());
        }
    }
    Ok(inputs)
}

/// One successfully processed input.
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    pub name: String,
    pub source: String,
    pub output: GuardOutput,
    /// What gets written: the (formatted) guard file, or its JSON form.
    pub text: String,
}

pub fn generate_file(
    name: &str,
    source: String,
    options: &ResolvedOptions,
    formatter: Option<&CommandFormatter>,
) -> Result<GeneratedFile> {
    let output = generate_type_guards_from_source(name, &source, options.flags)
        .with_context(|| format!("failed to generate guards for {name}"))?;
    let output = if options.include_source {
        output
    } else {
        output.without_source()
    };

    let text = if options.json {
        let mut json = serde_json::to_string(&output).context("failed to serialize output")?;
        json.push('\n');
        json
    } else {
        render_formatted(&output, formatter.map(|f| f as &dyn Formatter))
            .with_context(|| format!("failed to format guards for {name}"))?
    };

    Ok(GeneratedFile {
        name: name.to_string(),
        source,
        output,
        text,
    })
}

pub fn output_path(out_dir: &Path, input: &Input, json: bool) -> PathBuf {
    let suffix = if json { GUARD_JSON_SUFFIX } else { GUARD_SUFFIX };
    out_dir.join(format!("{}{suffix}", input.stem()))
}

fn check_output_collisions(inputs: &[Input], out_dir: &Path, json: bool) -> Result<()> {
    let mut seen: FxHashMap<PathBuf, &str> = FxHashMap::default();
    for input in inputs {
        let path = output_path(out_dir, input, json);
        if let Some(previous) = seen.insert(path.clone(), input.name()) {
            bail!(
                "{} and {} would both be written to {}",
                previous,
                input.name(),
                path.display()
            );
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub processed: usize,
    pub failed: usize,
    pub warnings: usize,
}

impl RunSummary {
    pub fn success(&self) -> bool {
        self.failed == 0
    }
}

/// Resolve options from `args` and the config file, then process every input.
pub fn run(args: &CliArgs, cwd: &Path) -> Result<RunSummary> {
    let config = load_config(args.config.as_deref(), cwd)?;
    let options = resolve_options(args, config.as_ref().map(|(_, config)| config), cwd);
    let inputs = discover_inputs(&args.inputs, cwd)?;
    if inputs.is_empty() {
        bail!("no TypeScript sources found");
    }

    let color = args
        .pretty
        .unwrap_or_else(|| std::io::stderr().is_terminal());
    let reporter = Reporter::new(color);

    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    run_inputs(
        &inputs,
        &options,
        &reporter,
        &mut stdout.lock(),
        &mut stderr.lock(),
    )
}

/// Generate every input in parallel, then report and write in input order.
///
/// Per-file failures are reported and counted; only I/O on `out`/`err`
/// and invalid setup abort the run.
pub fn run_inputs(
    inputs: &[Input],
    options: &ResolvedOptions,
    reporter: &Reporter,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<RunSummary> {
    let formatter = options.formatter()?;
    if let Some(dir) = &options.out_dir {
        check_output_collisions(inputs, dir, options.json)?;
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create output directory {}", dir.display()))?;
    }

    let results: Vec<Result<GeneratedFile>> = inputs
        .par_iter()
        .map(|input| {
            let source = input.read()?;
            generate_file(input.name(), source, options, formatter.as_ref())
        })
        .collect();

    let mut summary = RunSummary::default();
    for (input, result) in inputs.iter().zip(results) {
        summary.processed += 1;
        let generated = match result {
            Ok(generated) => generated,
            Err(error) => {
                summary.failed += 1;
                err.write_all(reporter.render_error(&error).as_bytes())?;
                continue;
            }
        };

        let warnings = generated.output.warnings();
        summary.warnings += warnings.len();
        err.write_all(
            reporter
                .render_diagnostics(&generated.name, &generated.source, &warnings)
                .as_bytes(),
        )?;

        match &options.out_dir {
            Some(dir) => {
                let path = output_path(dir, input, options.json);
                let written = std::fs::write(&path, &generated.text)
                    .with_context(|| format!("failed to write {}", path.display()));
                match written {
                    Ok(()) => debug!(input = input.name(), output = %path.display(), "wrote guards"),
                    Err(error) => {
                        summary.failed += 1;
                        err.write_all(reporter.render_error(&error).as_bytes())?;
                    }
                }
            }
            None => out.write_all(generated.text.as_bytes())?,
        }
    }

    if inputs.len() > 1 {
        err.write_all(
            reporter
                .render_summary(summary.processed, summary.failed, summary.warnings)
                .as_bytes(),
        )?;
    }
    out.flush()?;
    err.flush()?;
    Ok(summary)
}
