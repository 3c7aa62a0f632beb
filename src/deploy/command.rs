// src/deploy/command.rs

//! Client command assembly.

use crate::deploy::request::DeployRequest;

/// Test selector meaning "no test classes were given".
pub const NO_TESTS_SENTINEL: &str = "not,a,test";

/// Build the validate / deploy command for `request`.
///
/// `program` is the client prefix, normally `sf`.
pub fn primary_command(program: &str, request: &DeployRequest) -> String {
    let verb = if request.validate { "validate" } else { "start" };
    format!(
        "{program} project deploy {verb} -x {manifest} -l RunSpecifiedTests -t {tests} -w {wait} --verbose",
        manifest = request.manifest.display(),
        tests = request.tests,
        wait = request.wait,
    )
}

/// Build the quick-deploy command that promotes a validated deployment.
pub fn quick_deploy_command(program: &str, deploy_id: &str, wait: u32) -> String {
    format!("{program} project deploy quick -i {deploy_id} -w {wait}")
}
