// src/lib.rs

pub mod cli;
pub mod config;
pub mod deploy;
pub mod errors;
pub mod exec;
pub mod extract;
pub mod logging;

use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::load_optional;
use crate::deploy::{ClientSettings, DeployOrchestrator, DeployOutcome, DeployRequest};
use crate::errors::Result;
use crate::exec::ShellCommandRunner;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - optional config file loading
/// - request / client settings resolution
/// - the orchestrator with the real shell runner
pub async fn run(args: CliArgs) -> Result<DeployOutcome> {
    let cfg = load_optional(args.config.as_deref())?;
    let request = DeployRequest::resolve(&args, &cfg)?;
    let settings = ClientSettings::resolve(&args, &cfg);

    debug!(?request, ?settings, "resolved deploy request");

    let mut orchestrator = DeployOrchestrator::new(ShellCommandRunner::new(), settings);
    let outcome = orchestrator.run(&request).await?;

    if let DeployOutcome::Completed {
        deploy_id,
        quick_deployed,
    } = &outcome
    {
        info!(deploy_id = ?deploy_id, quick_deployed, "deployment finished");
    }

    Ok(outcome)
}
