//! Core module - shared infrastructure for the exporter
//!
//! Contains configuration and error handling used throughout the application.

pub mod config;
pub mod error;

pub use config::ExporterConfig;
pub use error::{ExporterError, Result};
