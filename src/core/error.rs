//! Custom error types for the exporter
//!
//! Provides a unified error handling system across all modules.

use thiserror::Error;

/// Main error type for exporter operations
#[derive(Error, Debug)]
pub enum ExporterError {
    /// Browser launch or CDP-level errors
    #[error("Browser error: {0}")]
    Browser(String),

    /// An element the run depends on never appeared
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// A dashboard key missing from the catalog. The catalog is static, so
    /// hitting this means the declarations themselves are wrong.
    #[error("Dashboard '{0}' is not declared in the catalog")]
    UnknownDashboard(String),

    /// A country with no entry in the country-code table. The table is
    /// intentionally not exhaustive; extend it rather than guessing codes.
    #[error("Country '{0}' has no entry in the country-code table")]
    UnmappedCountry(String),

    /// The dashboard never cleared its "Loading" state
    #[error("Dashboard still loading after {waited_secs}s")]
    LoadTimeout { waited_secs: u64 },

    /// The triggered download never finished
    #[error("Download did not complete within {waited_secs}s")]
    DownloadTimeout { waited_secs: u64 },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// CDP protocol errors
    #[error("CDP error: {0}")]
    Cdp(#[from] chromiumoxide::error::CdpError),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type for exporter operations
pub type Result<T> = std::result::Result<T, ExporterError>;

impl ExporterError {
    /// Create a browser error
    pub fn browser(msg: impl Into<String>) -> Self {
        Self::Browser(msg.into())
    }

    /// Create an element-not-found error
    pub fn element(msg: impl Into<String>) -> Self {
        Self::ElementNotFound(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
