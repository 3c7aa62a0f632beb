// src/exec/command.rs

use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::process::Stdio;
use std::sync::Arc;

use anyhow::anyhow;
use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::process::Command;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::errors::{DeployError, Result};
use crate::exec::backend::{CommandOutput, CommandRunner};

/// Runs commands through `sh -c` (`cmd /C` on Windows) and blocks the
/// caller until the process exits.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellCommandRunner;

impl ShellCommandRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for ShellCommandRunner {
    fn run<'a>(
        &'a mut self,
        command: &'a str,
        output: &'a CommandOutput,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(run_shell(command, output))
    }
}

/// Build a shell command appropriate for the platform.
pub fn shell_command(command: &str) -> Command {
    if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(command);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(command);
        c
    }
}

async fn run_shell(command: &str, output: &CommandOutput) -> Result<()> {
    debug!(cmd = %command, "starting client process");

    let mut cmd = shell_command(command);
    cmd.stdin(Stdio::inherit()).kill_on_drop(true);

    let status = match output {
        CommandOutput::Inherit => {
            cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
            let mut child = cmd.spawn().map_err(|source| DeployError::Spawn {
                command: command.to_string(),
                source,
            })?;
            child.wait().await?
        }
        CommandOutput::Tee(log_path) => {
            cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
            let mut child = cmd.spawn().map_err(|source| DeployError::Spawn {
                command: command.to_string(),
                source,
            })?;

            let stdout = child
                .stdout
                .take()
                .ok_or_else(|| anyhow!("stdout of client process was not captured"))?;
            let stderr = child
                .stderr
                .take()
                .ok_or_else(|| anyhow!("stderr of client process was not captured"))?;

            let log = Arc::new(Mutex::new(open_append(log_path).await?));

            // Both pipes are drained before returning so the log file holds
            // every line the process wrote.
            let (status, out_res, err_res) = tokio::join!(
                child.wait(),
                mirror_lines(stdout, tokio::io::stdout(), Arc::clone(&log)),
                mirror_lines(stderr, tokio::io::stderr(), Arc::clone(&log)),
            );

            for res in [out_res, err_res] {
                if let Err(e) = res {
                    warn!(log = %log_path.display(), error = %e, "mirroring client output failed");
                }
            }

            status?
        }
    };

    let code = status.code();
    info!(
        cmd = %command,
        exit_code = code.unwrap_or(-1),
        success = status.success(),
        "client process exited"
    );

    if status.success() {
        Ok(())
    } else {
        Err(DeployError::CommandFailed {
            command: command.to_string(),
            code,
        })
    }
}

async fn open_append(path: &Path) -> Result<File> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await?;
    Ok(file)
}

/// Copy `source` line by line to the shared log file and to `echo`.
///
/// The log is written first. If `echo` fails (e.g. our stdout reader went
/// away), echoing stops but the pipe keeps draining into the log.
async fn mirror_lines<R, W>(source: R, echo: W, log: Arc<Mutex<File>>) -> std::io::Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut reader = BufReader::new(source);
    let mut echo = Some(echo);
    let mut line = Vec::new();

    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line).await? == 0 {
            break;
        }

        {
            let mut log = log.lock().await;
            log.write_all(&line).await?;
            log.flush().await?;
        }

        if let Some(out) = echo.as_mut() {
            if let Err(e) = echo_line(out, &line).await {
                warn!(error = %e, "echoing client output failed; output still goes to the deploy log");
                echo = None;
            }
        }
    }

    Ok(())
}

async fn echo_line<W: AsyncWrite + Unpin>(out: &mut W, line: &[u8]) -> std::io::Result<()> {
    out.write_all(line).await?;
    out.flush().await
}
