//! hiringlab-exporter - scripted CSV exporter for the Hiring Lab dashboards
//!
//! Replaces the manual "click through the dashboard, download files"
//! workflow: enumerates (dashboard, series-type, country) combinations,
//! drives a Chromium page into each matching state, and persists every CSV
//! download under a deterministic name.
//!
//! # Architecture
//!
//! - **Core**: configuration and error handling
//! - **Browser**: chromiumoxide session wrapper (the automation surface)
//! - **Export**: combination catalog, UI navigator, selector applier,
//!   download trigger, and the traversal engine that sequences them
//!
//! # Usage
//!
//! ```rust,no_run
//! use hiringlab_exporter::browser::BrowserSession;
//! use hiringlab_exporter::export::{Catalog, ExportPlan, TraversalEngine};
//! use hiringlab_exporter::ExporterConfig;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ExporterConfig::load();
//!     let session = BrowserSession::launch(&config).await.unwrap();
//!     let engine =
//!         TraversalEngine::new(session, Catalog::default(), ExportPlan::default(), config);
//!
//!     let summary = engine.run().await.unwrap();
//!     println!("{} files exported", summary.files.len());
//! }
//! ```

pub mod browser;
pub mod core;
pub mod export;

// Re-export commonly used items
pub use crate::core::{ExporterConfig, ExporterError, Result};
pub use crate::export::{Catalog, Dashboard, ExportPlan, ExportTask, SeriesType, TraversalEngine};
