//! Error types for provisioning operations

use thiserror::Error;

/// Provisioning operation errors
#[derive(Debug, Error)]
pub enum ProvisionError {
    // ============ Configuration Errors ============
    #[error("{value} is an unknown repository type (expected deb, rpm, or gem)")]
    UnknownRepositoryType { value: String },

    #[error("Invalid endpoint URL: {url} - {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("Invalid provisioning manifest: {message}")]
    InvalidManifest { message: String },

    // ============ Network Errors ============
    #[error("Remote request failed with status {status}: {body}")]
    RemoteRequest { status: u16, body: String },

    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Request timeout after {seconds}s")]
    Timeout { seconds: u64 },

    // ============ Resolution Errors ============
    #[error("rpm_base_url response is not a valid URL: {body:?} - {reason}")]
    Resolution { body: String, reason: String },

    // ============ IO Errors ============
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for provisioning operations
pub type Result<T> = std::result::Result<T, ProvisionError>;

impl From<reqwest::Error> for ProvisionError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ProvisionError::Timeout {
                seconds: crate::transport::REQUEST_TIMEOUT_SECS,
            }
        } else if e.is_connect() {
            ProvisionError::Network {
                message: format!("Connection failed: {}", e),
            }
        } else {
            ProvisionError::Network {
                message: e.to_string(),
            }
        }
    }
}

impl From<serde_yaml::Error> for ProvisionError {
    fn from(e: serde_yaml::Error) -> Self {
        ProvisionError::InvalidManifest {
            message: e.to_string(),
        }
    }
}
