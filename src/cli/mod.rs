//! Command-line interface for Gangway
//!
//! This module provides the main CLI structure and command dispatch for
//! Gangway. The four fixed commands are clap subcommands; anything else
//! is captured verbatim by the external-subcommand arm and executed in
//! place of this process.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::ffi::OsString;

mod commands;
mod output;

pub use output::Output;

use crate::config::GangwayConfig;

/// Gangway - container entrypoint dispatch
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable quiet output (minimal)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Open an interactive shell in the service source directory
    Shell,
    /// Replace this process with the service entry point
    Start,
    /// Watch the service sources and restart the entry point on change
    Develop,
    /// Run the service test suite and exit with its status
    Selfcheck,
    /// Execute any other command line verbatim in place of this process
    #[command(external_subcommand)]
    Other(Vec<OsString>),
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        setup_logging(self.verbose, self.quiet);

        let config = GangwayConfig::load(self.config.as_deref())?;
        let output = Output::new(self.verbose, self.quiet);

        // The banner precedes every action, including the usage error
        output.banner(&config.deploy.version, &config.deploy.context);

        match self.command {
            Some(Commands::Shell) => commands::shell::execute(&config, &output),
            Some(Commands::Start) => commands::start::execute(&config, &output),
            Some(Commands::Develop) => commands::develop::execute(&config, &output),
            Some(Commands::Selfcheck) => commands::selfcheck::execute(&config, &output),
            Some(Commands::Other(argv)) => commands::passthrough::execute(&config, &output, &argv),
            None => anyhow::bail!(
                "cannot start without a command \
                 (shell, start, develop, selfcheck, or any command line)"
            ),
        }
    }
}

/// Set up tracing on stderr; stdout belongs to the dispatched command
fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return;
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            tracing_subscriber::EnvFilter::new("debug")
        } else {
            tracing_subscriber::EnvFilter::new("warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
