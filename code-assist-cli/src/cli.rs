//! Command-line definition for `code-assist`

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Code Assist - MCP server for structured file editing
///
/// Runs a Model Context Protocol server on stdio that lets AI agents create,
/// modify, rewrite and delete files inside the allowed roots through an XML
/// diff protocol, and inspect git repositories.
#[derive(Parser, Debug)]
#[command(name = "code-assist")]
#[command(version)]
#[command(about = "MCP server for structured file editing")]
pub struct Cli {
    /// Log everything (trace level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log debug output
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with_all = ["verbose", "debug"])]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the MCP server on stdio (default)
    Serve(ConfigArgs),
    /// Print the effective configuration as YAML
    Config(ConfigArgs),
    /// List the tools the server offers
    Tools,
}

/// Options that feed into the effective configuration
#[derive(Args, Debug, Default, Clone)]
pub struct ConfigArgs {
    /// Change to this directory before loading configuration
    #[arg(long, value_name = "DIR")]
    pub working_dir: Option<PathBuf>,

    /// Directory the server may read and edit (repeatable)
    #[arg(long = "allowed-root", value_name = "DIR")]
    pub allowed_roots: Vec<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// The subcommand to run, `serve` when none was given
    pub fn command(&self) -> Commands {
        match &self.command {
            Some(Commands::Serve(args)) => Commands::Serve(args.clone()),
            Some(Commands::Config(args)) => Commands::Config(args.clone()),
            Some(Commands::Tools) => Commands::Tools,
            None => Commands::Serve(ConfigArgs::default()),
        }
    }
}
