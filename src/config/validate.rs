// src/config/validate.rs

use crate::config::model::ConfigFile;
use crate::errors::{DeployError, Result};

/// Run basic semantic validation against a loaded configuration.
///
/// This checks:
/// - `[client].program` is not blank
/// - `[client].poll_interval_ms >= 1`
/// - `[deploy].wait >= 1` when set
pub fn validate_config(cfg: &ConfigFile) -> Result<()> {
    if cfg.client.program.trim().is_empty() {
        return Err(DeployError::Config(
            "[client].program must not be empty".to_string(),
        ));
    }

    if cfg.client.poll_interval_ms == 0 {
        return Err(DeployError::Config(
            "[client].poll_interval_ms must be >= 1 (got 0)".to_string(),
        ));
    }

    if cfg.deploy.wait == Some(0) {
        return Err(DeployError::Config(
            "[deploy].wait must be >= 1 minute (got 0)".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(validate_config(&ConfigFile::default()).is_ok());
    }

    #[test]
    fn blank_program_is_rejected() {
        let mut cfg = ConfigFile::default();
        cfg.client.program = "  ".to_string();
        let err = validate_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("program"));
    }

    #[test]
    fn zero_poll_interval_is_rejected() {
        let mut cfg = ConfigFile::default();
        cfg.client.poll_interval_ms = 0;
        assert!(matches!(validate_config(&cfg), Err(DeployError::Config(_))));
    }

    #[test]
    fn zero_wait_is_rejected() {
        let mut cfg = ConfigFile::default();
        cfg.deploy.wait = Some(0);
        assert!(matches!(validate_config(&cfg), Err(DeployError::Config(_))));
    }
}
