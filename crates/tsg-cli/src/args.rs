use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use tsg_generator::{HasOwnCheck, PlainObjectCheck};

/// CLI arguments for the tsguard binary.
#[derive(Parser, Debug)]
#[command(
    name = "tsguard",
    version,
    about = "Generate runtime type guards from TypeScript type declarations"
)]
pub struct CliArgs {
    /// Input files or directories. `-` (or no input) reads from stdin.
    #[arg(value_name = "INPUT")]
    pub inputs: Vec<PathBuf>,

    /// How object-ness is tested before member checks.
    #[arg(long = "plain-object-check", alias = "plainObjectCheck", value_enum)]
    pub plain_object_check: Option<PlainObjectCheckArg>,

    /// How property existence is tested.
    #[arg(long = "has-own-check", alias = "hasOwnCheck", value_enum)]
    pub has_own_check: Option<HasOwnCheckArg>,

    /// Path to a JSON config file (defaults to ./tsguard.json when present).
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Write `<stem>.guard.ts` files into this directory instead of stdout.
    #[arg(short = 'o', long = "out-dir", alias = "outDir")]
    pub out_dir: Option<PathBuf>,

    /// Pipe the output through the formatter command.
    #[arg(long)]
    pub format: bool,

    /// Formatter command line, e.g. "prettier --parser typescript".
    #[arg(long, value_name = "COMMAND")]
    pub formatter: Option<String>,

    /// Print the generated output as JSON.
    #[arg(long)]
    pub json: bool,

    /// Leave the original source out of the generated file.
    #[arg(long = "no-source", alias = "noSource")]
    pub no_source: bool,

    /// Force colored warnings on or off.
    #[arg(long)]
    pub pretty: Option<bool>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum PlainObjectCheckArg {
    Simple,
    Insert,
    Lodash,
    #[value(name = "es-toolkit", alias = "esToolkit")]
    EsToolkit,
}

impl From<PlainObjectCheckArg> for PlainObjectCheck {
    fn from(value: PlainObjectCheckArg) -> Self {
        match value {
            PlainObjectCheckArg::Simple => PlainObjectCheck::Simple,
            PlainObjectCheckArg::Insert => PlainObjectCheck::Insert,
            PlainObjectCheckArg::Lodash => PlainObjectCheck::Lodash,
            PlainObjectCheckArg::EsToolkit => PlainObjectCheck::EsToolkit,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum HasOwnCheckArg {
    In,
    #[value(name = "hasOwn", alias = "has-own")]
    HasOwn,
}

impl From<HasOwnCheckArg> for HasOwnCheck {
    fn from(value: HasOwnCheckArg) -> Self {
        match value {
            HasOwnCheckArg::In => HasOwnCheck::In,
            HasOwnCheckArg::HasOwn => HasOwnCheck::HasOwn,
        }
    }
}
