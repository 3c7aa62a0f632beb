// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeployError {
    /// The external client exited with a non-zero status.
    ///
    /// `code` is `None` when the process was terminated by a signal.
    #[error("command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    #[error("failed to spawn shell for command: {command}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Quick-deploy was due but no `Deploy ID:` line had been seen in the log.
    #[error("no Deploy ID was captured from the deploy log; refusing to quick-deploy")]
    MissingDeployId,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, DeployError>;
