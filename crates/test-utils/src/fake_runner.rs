use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use sfdeploy::errors::{DeployError, Result};
use sfdeploy::exec::{CommandOutput, CommandRunner};
use tokio::io::AsyncWriteExt;

/// A fake client that:
/// - records every command it is asked to run
/// - on the first command, waits `startup`, appends scripted lines to the
///   deploy log (when the output mode is `Tee`) and then keeps "running"
///   for `hold`
/// - optionally fails the n-th command with a given exit code.
pub struct RecordingRunner {
    commands: Arc<Mutex<Vec<String>>>,
    client_output: Vec<String>,
    startup: Duration,
    hold: Duration,
    fail_at: Option<(usize, i32)>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self {
            commands: Arc::new(Mutex::new(Vec::new())),
            client_output: Vec::new(),
            startup: Duration::ZERO,
            hold: Duration::ZERO,
            fail_at: None,
        }
    }

    /// Lines the primary command writes into the log, then how long it keeps
    /// running afterwards.
    pub fn with_client_output(mut self, lines: &[&str], hold: Duration) -> Self {
        self.client_output = lines.iter().map(|l| l.to_string()).collect();
        self.hold = hold;
        self
    }

    /// Delay before the primary command writes its first line.
    pub fn with_startup_delay(mut self, startup: Duration) -> Self {
        self.startup = startup;
        self
    }

    /// Fail the command with index `call` (0-based) with `exit_code`.
    pub fn failing_at(mut self, call: usize, exit_code: i32) -> Self {
        self.fail_at = Some((call, exit_code));
        self
    }

    pub fn recorded(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }
}

impl Default for RecordingRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for RecordingRunner {
    fn run<'a>(
        &'a mut self,
        command: &'a str,
        output: &'a CommandOutput,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async move {
            let call = {
                let mut guard = self.commands.lock().unwrap();
                guard.push(command.to_string());
                guard.len() - 1
            };

            if call == 0 {
                tokio::time::sleep(self.startup).await;
                if let CommandOutput::Tee(path) = output {
                    let mut log = tokio::fs::OpenOptions::new()
                        .create(true)
                        .append(true)
                        .open(path)
                        .await?;
                    for line in &self.client_output {
                        log.write_all(line.as_bytes()).await?;
                        log.write_all(b"\n").await?;
                        log.flush().await?;
                    }
                }
                tokio::time::sleep(self.hold).await;
            }

            match self.fail_at {
                Some((n, code)) if n == call => Err(DeployError::CommandFailed {
                    command: command.to_string(),
                    code: Some(code),
                }),
                _ => Ok(()),
            }
        })
    }
}
