use std::path::{Path, PathBuf};
use std::time::Duration;

use sfdeploy::deploy::{ClientSettings, DeployRequest, NO_TESTS_SENTINEL, PipelineOrigin};

/// Builder for `DeployRequest` to simplify test setup.
pub struct DeployRequestBuilder {
    request: DeployRequest,
}

impl DeployRequestBuilder {
    /// Start from the CLI defaults, logging to `log`.
    pub fn new(log: &Path) -> Self {
        Self {
            request: DeployRequest {
                tests: NO_TESTS_SENTINEL.to_string(),
                manifest: PathBuf::from("manifest/package.xml"),
                wait: 33,
                environment: None,
                log: log.to_path_buf(),
                pipeline: PipelineOrigin::Push,
                validate: false,
                dry_run: false,
            },
        }
    }

    pub fn tests(mut self, tests: &str) -> Self {
        self.request.tests = tests.to_string();
        self
    }

    pub fn wait(mut self, wait: u32) -> Self {
        self.request.wait = wait;
        self
    }

    pub fn environment(mut self, url: &str) -> Self {
        self.request.environment = Some(url.to_string());
        self
    }

    pub fn pipeline(mut self, pipeline: PipelineOrigin) -> Self {
        self.request.pipeline = pipeline;
        self
    }

    pub fn validate(mut self, validate: bool) -> Self {
        self.request.validate = validate;
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.request.dry_run = dry_run;
        self
    }

    pub fn build(self) -> DeployRequest {
        self.request
    }
}

/// Client settings with a fast log poll, suitable for tests.
pub fn fast_settings() -> ClientSettings {
    ClientSettings {
        program: "sf".to_string(),
        poll_interval: Duration::from_millis(5),
        external_log: false,
    }
}
