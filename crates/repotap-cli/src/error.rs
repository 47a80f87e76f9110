//! CLI error types with exit code handling

use miette::Diagnostic;
use thiserror::Error;

use crate::exit_codes;
use repotap_core::ProvisionError;

/// CLI-specific error type that includes exit code information
#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    /// Invalid arguments, manifest, or endpoint
    #[error("{message}")]
    #[diagnostic(code(repotap::cli::input))]
    Input {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// Provisioning a repository failed (network, negotiation, resolution)
    #[error("Provisioning failed: {message}")]
    #[diagnostic(code(repotap::cli::provision))]
    Provision { message: String },

    /// One or more manifest entries failed to provision
    #[error("{failed} of {total} repositories failed to provision")]
    #[diagnostic(code(repotap::cli::apply))]
    PartialFailure { failed: usize, total: usize },

    /// IO error (file not found, permissions, etc.)
    #[error("IO error: {message}")]
    #[diagnostic(code(repotap::cli::io))]
    Io { message: String },
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Input { .. } => exit_codes::USAGE_ERROR,
            CliError::Provision { .. } => exit_codes::PROVISION_ERROR,
            CliError::PartialFailure { .. } => exit_codes::PROVISION_ERROR,
            CliError::Io { .. } => exit_codes::IO_ERROR,
        }
    }

    /// Create an input error
    pub fn input(message: impl Into<String>) -> Self {
        Self::Input {
            message: message.into(),
            help: None,
        }
    }

    /// Create an input error with help text
    pub fn input_with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Input {
            message: message.into(),
            help: Some(help.into()),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Io {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io {
            message: err.to_string(),
        }
    }
}

impl From<ProvisionError> for CliError {
    fn from(err: ProvisionError) -> Self {
        match err {
            ProvisionError::UnknownRepositoryType { .. } => CliError::input_with_help(
                err.to_string(),
                "valid repository types are: deb, rpm, gem",
            ),
            ProvisionError::InvalidEndpoint { .. } | ProvisionError::InvalidManifest { .. } => {
                CliError::input(err.to_string())
            }
            ProvisionError::Io(e) => CliError::from(e),
            other => CliError::Provision {
                message: other.to_string(),
            },
        }
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
