use anyhow::{Context, Result};
use clap::Parser;

use tsg_cli::args::CliArgs;
use tsg_cli::driver;
use tsg_cli::tracing_config::init_tracing;

fn main() -> Result<()> {
    init_tracing();

    let args = CliArgs::parse();
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;

    let summary = driver::run(&args, &cwd)?;
    if !summary.success() {
        std::process::exit(1);
    }
    Ok(())
}
