// src/extract/mod.rs

//! Deploy ID extraction from the live deploy log.
//!
//! The client writes its output into the deploy log while it runs. A
//! [`LogIdExtractor`] is spawned as a detached Tokio task that follows that
//! file like `tail -f`, stops at the first `Deploy ID: <id>` line, prints the
//! monitoring URL and hands `<id>` over through a [`DeployIdSlot`].
//!
//! The task is never joined. If no marker ever appears (e.g. an empty
//! package.xml) it keeps polling until the runtime shuts down, and the slot
//! stays empty.

pub mod link;

use std::path::PathBuf;
use std::time::Duration;

use regex::Regex;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::oneshot;
use tokio::time::sleep;
use tracing::{debug, info, trace, warn};

use crate::errors::{DeployError, Result};

pub use link::{deploy_link_url, job_id};

/// Marker the client prints once the asynchronous deploy job exists.
pub const DEPLOY_ID_PATTERN: &str = r"Deploy ID: (.+)";

/// Receiving half of the single-use Deploy ID handoff.
///
/// The extractor writes at most once; the orchestrator reads without
/// waiting and sees either nothing or the whole identifier.
#[derive(Debug)]
pub struct DeployIdSlot {
    rx: oneshot::Receiver<String>,
}

impl DeployIdSlot {
    /// Take the identifier if the extractor has already published it.
    pub fn try_take(&mut self) -> Option<String> {
        self.rx.try_recv().ok()
    }

    /// Wait until the extractor publishes or gives up.
    ///
    /// The orchestrator never calls this; it exists for callers that want
    /// to observe the extractor deterministically.
    pub async fn recv(self) -> Option<String> {
        self.rx.await.ok()
    }
}

/// Follows a deploy log until the `Deploy ID:` marker shows up.
#[derive(Debug, Clone)]
pub struct LogIdExtractor {
    environment: Option<String>,
    log_path: PathBuf,
    poll_interval: Duration,
    pattern: Regex,
}

impl LogIdExtractor {
    pub fn new(
        environment: Option<String>,
        log_path: impl Into<PathBuf>,
        poll_interval: Duration,
    ) -> Result<Self> {
        let pattern = Regex::new(DEPLOY_ID_PATTERN)
            .map_err(|e| DeployError::Other(anyhow::anyhow!("compiling Deploy ID pattern: {e}")))?;

        Ok(Self {
            environment,
            log_path: log_path.into(),
            poll_interval,
            pattern,
        })
    }

    /// Spawn the extractor as a detached background task.
    ///
    /// The `JoinHandle` is dropped on purpose: the task lives until it finds
    /// the marker or the runtime goes away, whichever comes first.
    pub fn spawn(self) -> DeployIdSlot {
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let log = self.log_path.clone();
            if let Err(err) = self.run(tx).await {
                warn!(log = %log.display(), error = %err, "deploy log tailer stopped");
            }
        });

        DeployIdSlot { rx }
    }

    /// Tail the log and publish the first captured identifier into `sink`.
    ///
    /// The log file must already exist; the orchestrator truncates it before
    /// spawning the extractor.
    pub async fn run(self, sink: oneshot::Sender<String>) -> Result<()> {
        let file = File::open(&self.log_path).await?;
        let mut reader = BufReader::new(file);
        let mut line = Vec::new();

        debug!(log = %self.log_path.display(), "tailing deploy log for Deploy ID");

        loop {
            let read = reader.read_until(b'\n', &mut line).await?;

            // EOF on a file that is still being written is not the end; a
            // partial line is kept until its newline arrives.
            if read == 0 || line.last() != Some(&b'\n') {
                sleep(self.poll_interval).await;
                continue;
            }

            let text = String::from_utf8_lossy(&line).into_owned();
            line.clear();
            trace!(line = %text.trim_end(), "deploy log line");

            if let Some(deploy_id) = self.match_line(&text) {
                self.publish(deploy_id, sink);
                return Ok(());
            }
        }
    }

    /// Extract the identifier from a single log line, if it is the marker.
    pub fn match_line(&self, line: &str) -> Option<String> {
        let caps = self.pattern.captures(line)?;
        let id = caps.get(1)?.as_str().trim_end();
        if id.is_empty() {
            None
        } else {
            Some(id.to_string())
        }
    }

    fn publish(&self, deploy_id: String, sink: oneshot::Sender<String>) {
        match self.environment.as_deref() {
            Some(env) => info!("{}", deploy_link_url(env, &deploy_id)),
            None => debug!(deploy_id = %deploy_id, "no environment URL given; skipping monitoring link"),
        }

        if sink.send(deploy_id).is_err() {
            debug!("Deploy ID receiver already dropped");
        }
    }
}
