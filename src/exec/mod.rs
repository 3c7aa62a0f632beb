// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`backend`] provides the `CommandRunner` trait the orchestrator talks
//!   to, so tests can swap in a fake that never spawns processes.
//! - [`command`] holds `ShellCommandRunner`, which runs commands through the
//!   platform shell with `tokio::process::Command`.

pub mod backend;
pub mod command;

pub use backend::{CommandOutput, CommandRunner};
pub use command::{ShellCommandRunner, shell_command};
