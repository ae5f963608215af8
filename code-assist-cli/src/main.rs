//! `code-assist` - MCP server for structured file editing
//!
//! Commands:
//! - `code-assist` / `code-assist serve`: run the MCP server on stdio
//! - `code-assist config`: print the effective configuration
//! - `code-assist tools`: list the available tools
//!
//! Exit codes:
//! - 0: Success
//! - 2: Error

use std::process;

use clap::Parser;
use code_assist_common::ErrorChain;

mod cli;
mod commands;
mod exit_codes;
mod logging;

use cli::{Cli, Commands};
use exit_codes::{EXIT_ERROR, EXIT_SUCCESS};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let exit_code = match run(cli).await {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            let error: &(dyn std::error::Error + 'static) = e.as_ref();
            tracing::error!("{e:#}");
            eprint!("{}", ErrorChain::new(error));
            EXIT_ERROR
        }
    };
    process::exit(exit_code);
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let level = logging::log_level(cli.verbose, cli.debug, cli.quiet);

    match cli.command() {
        Commands::Serve(args) => {
            let config = commands::load_config(&args)?;
            logging::configure_logging(level, config.log_file.as_deref())?;
            commands::serve(config).await
        }
        Commands::Config(args) => {
            logging::configure_logging(level, None)?;
            let config = commands::load_config(&args)?;
            commands::print_config(&config, &mut std::io::stdout().lock())
        }
        Commands::Tools => {
            logging::configure_logging(level, None)?;
            commands::print_tools(&mut std::io::stdout().lock())
        }
    }
}
