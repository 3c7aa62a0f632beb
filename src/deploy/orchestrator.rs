// src/deploy/orchestrator.rs

//! Runs one deployment end to end.
//!
//! 1. Assemble the client command and log it.
//! 2. Skip or dry-run according to [`plan`].
//! 3. Truncate the deploy log and spawn the [`LogIdExtractor`] against it.
//! 4. Run the command; its output lands in the deploy log.
//! 5. For push validations, quick-deploy using the captured Deploy ID.
//!
//! Step 5 does not wait for the extractor. The client prints the Deploy ID
//! early and the extractor normally publishes it long before the command
//! exits; if it has not, the run fails with
//! [`DeployError::MissingDeployId`] rather than quick-deploying without an id.

use tokio::fs::File;
use tracing::{debug, info};

use crate::deploy::command::{primary_command, quick_deploy_command};
use crate::deploy::plan::{Plan, plan, wants_quick_deploy};
use crate::deploy::request::{ClientSettings, DeployRequest};
use crate::errors::{DeployError, Result};
use crate::exec::{CommandOutput, CommandRunner};
use crate::extract::LogIdExtractor;

/// What a finished [`DeployOrchestrator::run`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployOutcome {
    /// Push validation without tests; nothing was run.
    Skipped,
    /// The command was printed, not run.
    DryRun { command: String },
    /// The primary command succeeded.
    Completed {
        /// The Deploy ID, if the extractor had published it by the time the
        /// command finished.
        deploy_id: Option<String>,
        quick_deployed: bool,
    },
}

pub struct DeployOrchestrator<R> {
    runner: R,
    settings: ClientSettings,
}

impl<R: CommandRunner> DeployOrchestrator<R> {
    pub fn new(runner: R, settings: ClientSettings) -> Self {
        Self { runner, settings }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub async fn run(&mut self, request: &DeployRequest) -> Result<DeployOutcome> {
        let command = primary_command(&self.settings.program, request);
        info!("{command}");

        match plan(request) {
            Plan::Skip => {
                info!("Not running a validation without test classes.");
                return Ok(DeployOutcome::Skipped);
            }
            Plan::DryRun => {
                println!("{command}");
                debug!("dry-run complete (no execution)");
                return Ok(DeployOutcome::DryRun { command });
            }
            Plan::Run => {}
        }

        // Fresh log for this run; the extractor must never see a previous
        // run's Deploy ID.
        File::create(&request.log).await?;

        let mut slot = LogIdExtractor::new(
            request.environment.clone(),
            request.log.clone(),
            self.settings.poll_interval,
        )?
        .spawn();

        if request.validate {
            info!("Running the validation.");
        } else {
            info!("Running the deployment.");
        }
        info!("Please open the URL to view real-time progress.");

        let output = if self.settings.external_log {
            CommandOutput::Inherit
        } else {
            CommandOutput::Tee(request.log.clone())
        };

        self.runner.run(&command, &output).await?;

        let deploy_id = slot.try_take();
        if !wants_quick_deploy(request) {
            return Ok(DeployOutcome::Completed {
                deploy_id,
                quick_deployed: false,
            });
        }

        let deploy_id = deploy_id.ok_or(DeployError::MissingDeployId)?;
        let quick = quick_deploy_command(&self.settings.program, &deploy_id, request.wait);
        info!("{quick}");
        info!("Running the quick-deployment.");
        self.runner.run(&quick, &output).await?;

        Ok(DeployOutcome::Completed {
            deploy_id: Some(deploy_id),
            quick_deployed: true,
        })
    }
}
