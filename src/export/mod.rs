//! Export module - the traversal engine and its collaborators
//!
//! The engine is the sole caller of the navigator, selector applier, and
//! download trigger; none of them call each other.

use std::time::Duration;

pub mod catalog;
pub mod download;
pub mod engine;
pub mod navigator;
pub mod selectors;

pub use catalog::{Catalog, Dashboard, ExportPlan, ExportTask, SeriesType};
pub use engine::{ExportSummary, TraversalEngine};

// Settle delays: fixed pauses after UI mutations where the site offers no
// readiness signal to wait on. Heuristics, not guarantees.

/// After toggling a single filter item
pub(crate) const SETTLE_TOGGLE: Duration = Duration::from_millis(500);

/// After closing a menu
pub(crate) const SETTLE_MENU: Duration = Duration::from_secs(1);

/// After switching series-type tabs
pub(crate) const SETTLE_TAB: Duration = Duration::from_secs(1);

/// After entering or leaving a dashboard
pub(crate) const SETTLE_NAVIGATION: Duration = Duration::from_millis(1500);

/// Between sector multiselect toggles; each one triggers a series recompute
pub(crate) const SECTOR_TOGGLE_DELAY: Duration = Duration::from_secs(1);
