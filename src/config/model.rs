// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

use crate::deploy::PipelineOrigin;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [client]
/// program = "sf"
/// poll_interval_ms = 100
///
/// [deploy]
/// manifest = "manifest/package.xml"
/// wait = 33
/// log = "deploy_log.txt"
/// environment = "https://org.my.salesforce.com"
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// How the external client is invoked, from `[client]`.
    #[serde(default)]
    pub client: ClientSection,

    /// Defaults for deploy flags not given on the command line, from `[deploy]`.
    #[serde(default)]
    pub deploy: DeploySection,
}

/// `[client]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientSection {
    /// Prefix of every command, e.g. `"sf"` or `"npx @salesforce/cli"`.
    #[serde(default = "default_program")]
    pub program: String,

    /// How long the log tailer sleeps after reaching the current end of the
    /// deploy log.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_program() -> String {
    "sf".to_string()
}

fn default_poll_interval_ms() -> u64 {
    100
}

impl Default for ClientSection {
    fn default() -> Self {
        Self {
            program: default_program(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

/// `[deploy]` section. Every key mirrors a CLI flag.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeploySection {
    pub tests: Option<String>,
    pub manifest: Option<PathBuf>,
    pub wait: Option<u32>,
    pub environment: Option<String>,
    pub log: Option<PathBuf>,
    pub pipeline: Option<PipelineOrigin>,
}
