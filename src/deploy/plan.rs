// src/deploy/plan.rs

//! Pure decision logic for a deploy request; no IO happens here.

use crate::deploy::request::{DeployRequest, PipelineOrigin};

/// What the orchestrator does once the command has been assembled.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Plan {
    /// Push validations without explicit tests are never quick-deploy
    /// eligible, so nothing is run.
    Skip,
    /// Print the command only.
    DryRun,
    /// Run the command (and possibly a quick-deploy afterwards).
    Run,
}

/// Decide how to handle `request`. The skip check comes first.
pub fn plan(request: &DeployRequest) -> Plan {
    if request.validate && request.has_no_tests() && request.pipeline == PipelineOrigin::Push {
        Plan::Skip
    } else if request.dry_run {
        Plan::DryRun
    } else {
        Plan::Run
    }
}

/// Quick-deploy follows only a validation started from a push pipeline.
pub fn wants_quick_deploy(request: &DeployRequest) -> bool {
    request.validate && request.pipeline == PipelineOrigin::Push
}
