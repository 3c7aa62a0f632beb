// src/deploy/request.rs

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use clap::ValueEnum;
use serde::Deserialize;

use crate::cli::CliArgs;
use crate::config::ConfigFile;
use crate::deploy::command::NO_TESTS_SENTINEL;
use crate::errors::{DeployError, Result};

const DEFAULT_MANIFEST: &str = "manifest/package.xml";
const DEFAULT_WAIT_MINUTES: u32 = 33;
const DEFAULT_LOG: &str = "deploy_log.txt";

/// Which kind of pipeline triggered the run.
///
/// Push pipelines that validate are followed by a quick-deploy; merge
/// request pipelines only validate.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PipelineOrigin {
    #[default]
    Push,
    #[value(alias = "merge_request", alias = "mr")]
    #[serde(alias = "merge_request", alias = "mr")]
    MergeRequest,
}

impl fmt::Display for PipelineOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineOrigin::Push => f.write_str("push"),
            PipelineOrigin::MergeRequest => f.write_str("merge-request"),
        }
    }
}

/// Everything needed to run one deployment. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployRequest {
    /// Comma-separated test classes, or [`NO_TESTS_SENTINEL`].
    pub tests: String,
    pub manifest: PathBuf,
    /// Minutes the client waits for each command.
    pub wait: u32,
    /// Base URL of the org; without it no monitoring link is printed.
    pub environment: Option<String>,
    pub log: PathBuf,
    pub pipeline: PipelineOrigin,
    pub validate: bool,
    pub dry_run: bool,
}

impl DeployRequest {
    /// Resolve a request with precedence CLI flag > config file > default.
    pub fn resolve(args: &CliArgs, cfg: &ConfigFile) -> Result<Self> {
        let defaults = &cfg.deploy;

        let wait = args
            .wait
            .or(defaults.wait)
            .unwrap_or(DEFAULT_WAIT_MINUTES);
        if wait == 0 {
            return Err(DeployError::Config(
                "--wait must be at least 1 minute".to_string(),
            ));
        }

        Ok(Self {
            tests: args
                .tests
                .clone()
                .or_else(|| defaults.tests.clone())
                .unwrap_or_else(|| NO_TESTS_SENTINEL.to_string()),
            manifest: args
                .manifest
                .clone()
                .or_else(|| defaults.manifest.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_MANIFEST)),
            wait,
            environment: args
                .environment
                .clone()
                .or_else(|| defaults.environment.clone()),
            log: args
                .log
                .clone()
                .or_else(|| defaults.log.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG)),
            pipeline: args.pipeline.or(defaults.pipeline).unwrap_or_default(),
            validate: args.validate,
            dry_run: args.dry_run,
        })
    }

    /// True when no explicit test classes were requested.
    pub fn has_no_tests(&self) -> bool {
        self.tests == NO_TESTS_SENTINEL
    }
}

/// How the external client is invoked; not part of the request itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    /// Command prefix, `sf` unless configured otherwise.
    pub program: String,
    /// Sleep between empty reads while tailing the deploy log.
    pub poll_interval: Duration,
    /// Log file is fed by an outer `tee -a`; do not mirror output into it.
    pub external_log: bool,
}

impl ClientSettings {
    pub fn resolve(args: &CliArgs, cfg: &ConfigFile) -> Self {
        Self {
            program: cfg.client.program.trim().to_string(),
            poll_interval: Duration::from_millis(cfg.client.poll_interval_ms),
            external_log: args.external_log,
        }
    }
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self::resolve(&CliArgs::default(), &ConfigFile::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_defaults_apply_without_flags_or_config() {
        let req = DeployRequest::resolve(&CliArgs::default(), &ConfigFile::default()).unwrap();

        assert_eq!(req.tests, NO_TESTS_SENTINEL);
        assert!(req.has_no_tests());
        assert_eq!(req.manifest, PathBuf::from("manifest/package.xml"));
        assert_eq!(req.wait, 33);
        assert_eq!(req.log, PathBuf::from("deploy_log.txt"));
        assert_eq!(req.pipeline, PipelineOrigin::Push);
        assert!(req.environment.is_none());
        assert!(!req.validate);
        assert!(!req.dry_run);
    }

    #[test]
    fn cli_overrides_config_which_overrides_defaults() {
        let mut cfg = ConfigFile::default();
        cfg.deploy.wait = Some(20);
        cfg.deploy.environment = Some("https://cfg.my.salesforce.com".to_string());
        cfg.deploy.pipeline = Some(PipelineOrigin::MergeRequest);

        let args = CliArgs {
            wait: Some(10),
            ..CliArgs::default()
        };

        let req = DeployRequest::resolve(&args, &cfg).unwrap();
        assert_eq!(req.wait, 10);
        assert_eq!(
            req.environment.as_deref(),
            Some("https://cfg.my.salesforce.com")
        );
        assert_eq!(req.pipeline, PipelineOrigin::MergeRequest);
    }

    #[test]
    fn zero_wait_from_cli_is_rejected() {
        let args = CliArgs {
            wait: Some(0),
            ..CliArgs::default()
        };
        assert!(matches!(
            DeployRequest::resolve(&args, &ConfigFile::default()),
            Err(DeployError::Config(_))
        ));
    }

    #[test]
    fn client_settings_follow_config() {
        let mut cfg = ConfigFile::default();
        cfg.client.program = " npx @salesforce/cli ".to_string();
        cfg.client.poll_interval_ms = 5;
        let args = CliArgs {
            external_log: true,
            ..CliArgs::default()
        };

        let settings = ClientSettings::resolve(&args, &cfg);
        assert_eq!(settings.program, "npx @salesforce/cli");
        assert_eq!(settings.poll_interval, Duration::from_millis(5));
        assert!(settings.external_log);
    }

    #[test]
    fn pipeline_displays_its_cli_spelling() {
        assert_eq!(PipelineOrigin::Push.to_string(), "push");
        assert_eq!(PipelineOrigin::MergeRequest.to_string(), "merge-request");
    }
}
