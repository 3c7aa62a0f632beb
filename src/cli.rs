// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! Every deployment field is optional here; missing values are filled from
//! the `--config` file and then from built-in defaults when the
//! [`DeployRequest`](crate::deploy::DeployRequest) is resolved.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::deploy::PipelineOrigin;

/// Command-line arguments for `sfdeploy`.
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "sfdeploy",
    version,
    about = "Deploy or validate metadata with the Salesforce CLI and quick-deploy validated push builds.",
    long_about = None
)]
pub struct CliArgs {
    /// Comma-separated Apex test classes to run.
    ///
    /// Default: `not,a,test`, which means "no tests were specified".
    #[arg(short = 't', long, value_name = "CLASSES")]
    pub tests: Option<String>,

    /// Path to the package.xml manifest.
    #[arg(short = 'm', long, value_name = "PATH")]
    pub manifest: Option<PathBuf>,

    /// Minutes to wait for each client command.
    #[arg(short = 'w', long, value_name = "MINUTES")]
    pub wait: Option<u32>,

    /// Base URL of the target org, used to build the monitoring link.
    #[arg(short = 'e', long, value_name = "URL")]
    pub environment: Option<String>,

    /// Deploy log that the client output is written to and scanned for the
    /// Deploy ID.
    #[arg(short = 'l', long, value_name = "PATH")]
    pub log: Option<PathBuf>,

    /// Pipeline source that triggered this run.
    #[arg(short = 'p', long, value_enum, value_name = "ORIGIN")]
    pub pipeline: Option<PipelineOrigin>,

    /// Run a validation-only deployment (quick-deployed afterwards on push
    /// pipelines).
    #[arg(short = 'v', long)]
    pub validate: bool,

    /// Print the assembled command instead of running it.
    #[arg(short = 'd', long, alias = "debug")]
    pub dry_run: bool,

    /// The log file is already fed by an outer `tee -a` pipeline; inherit
    /// stdout instead of mirroring client output into it.
    #[arg(long)]
    pub external_log: bool,

    /// Optional TOML file with client settings and deploy defaults.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `SFDEPLOY_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
