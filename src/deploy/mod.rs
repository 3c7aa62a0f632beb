// src/deploy/mod.rs

//! Deployment orchestration.
//!
//! - [`request`] resolves the immutable [`DeployRequest`] from CLI flags and
//!   the optional config file.
//! - [`command`] assembles the client command lines.
//! - [`plan`] is the pure decision of whether a request is skipped, printed
//!   (dry-run) or executed, and whether a quick-deploy follows.
//! - [`orchestrator`] drives the run: log file, background Deploy ID
//!   extractor, primary command, quick-deploy.

pub mod command;
pub mod orchestrator;
pub mod plan;
pub mod request;

pub use command::{NO_TESTS_SENTINEL, primary_command, quick_deploy_command};
pub use orchestrator::{DeployOrchestrator, DeployOutcome};
pub use plan::{Plan, plan, wants_quick_deploy};
pub use request::{ClientSettings, DeployRequest, PipelineOrigin};
