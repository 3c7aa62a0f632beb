// src/exec/backend.rs

//! Pluggable command runner abstraction.
//!
//! - `ShellCommandRunner` is the production implementation.
//! - Tests provide their own `CommandRunner` that records the commands and,
//!   for example, writes scripted client output into the deploy log.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use crate::errors::Result;

/// Where the output of a command goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    /// Inherit stdout/stderr from this process.
    Inherit,
    /// Echo stdout/stderr to this process and append every line to the file.
    Tee(PathBuf),
}

/// Trait abstracting how a client command is executed.
pub trait CommandRunner: Send {
    /// Run `command` to completion.
    ///
    /// A non-zero exit must be reported as
    /// [`DeployError::CommandFailed`](crate::errors::DeployError::CommandFailed);
    /// callers treat it as fatal and do not retry.
    fn run<'a>(
        &'a mut self,
        command: &'a str,
        output: &'a CommandOutput,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;
}
