#![allow(clippy::print_stderr)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::BufReader;

use tsg_cli::config::default_formatter_argv;
use tsg_cli::server::Server;
use tsg_cli::tracing_config::init_tracing;
use tsg_generator::CommandFormatter;

/// CLI arguments for the tsguard-server binary.
#[derive(Parser, Debug)]
#[command(
    name = "tsguard-server",
    version,
    about = "Answer type-guard generation requests as line-delimited JSON on stdio"
)]
struct ServerArgs {
    /// Formatter command line used for requests with `"format": true`.
    #[arg(long, value_name = "COMMAND")]
    formatter: Option<String>,
}

fn main() -> Result<()> {
    init_tracing();

    let args = ServerArgs::parse();
    let argv = match args.formatter {
        Some(command) => command.split_whitespace().map(str::to_string).collect(),
        None => default_formatter_argv(),
    };
    let formatter = CommandFormatter::from_argv(&argv).context("invalid formatter command")?;

    let mut server = Server::new(Box::new(formatter));
    let stdin = BufReader::new(std::io::stdin());
    let mut stdout = std::io::stdout();
    if let Err(error) = server.run(stdin, &mut stdout) {
        eprintln!("tsguard-server: {error:#}");
        std::process::exit(1);
    }
    Ok(())
}
