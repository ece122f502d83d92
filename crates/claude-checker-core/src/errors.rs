//! Error taxonomy for the checker harness.
//!
//! Every error here is terminal for the run. A judge that exits non-zero
//! is not an error of the harness and never shows up in this module.

use crate::exit_codes;
use std::path::PathBuf;
use thiserror::Error;

/// Invalid or missing input detected before the judge is launched.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("CLAUDE.md not found at: {}", path.display())]
    DocumentNotFound { path: PathBuf },

    #[error("invalid preferences file '{}': {reason}", path.display())]
    InvalidPreferenceSource { path: PathBuf, reason: String },

    #[error("unknown setting source '{value}' (expected 'user' or 'project')")]
    UnknownSettingSource { value: String },

    #[error("cannot locate a home directory for the default CLAUDE.md path")]
    NoHomeDirectory,

    #[error("cannot read the current working directory: {0}")]
    WorkingDirectory(#[source] std::io::Error),
}

/// The judge could not be started.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("failed to start judge '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode MCP config: {0}")]
    McpConfig(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum CheckError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Launch(#[from] LaunchError),
}

impl CheckError {
    /// Process exit code the binary should terminate with.
    pub fn exit_code(&self) -> i32 {
        match self {
            CheckError::Configuration(_) => exit_codes::CONFIG_ERROR,
            CheckError::Launch(_) => exit_codes::INTERNAL_ERROR,
        }
    }
}
