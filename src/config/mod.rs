// src/config/mod.rs

//! Optional TOML configuration for sfdeploy.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate basic invariants like a non-empty client program (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path, load_optional};
pub use model::{ClientSection, ConfigFile, DeploySection};
pub use validate::validate_config;
