//! UI navigator - moves the browser between dashboards and tabs

use tokio::time::sleep;

use crate::browser::BrowserSession;
use crate::core::error::Result;
use crate::export::catalog::{Catalog, Dashboard, SeriesType};
use crate::export::{SETTLE_NAVIGATION, SETTLE_TAB};

/// Selector for the dashboard tile group on the home page. Generated CSS
/// class names; the only handle the page offers.
const DASHBOARD_TILES: &str = ".css-11dmwc2.eac13zx0";

/// Selector for series-type tab controls
const SERIES_TAB: &str = "[role='tab']";

/// Drives dashboard and tab navigation for one session
pub struct Navigator<'a> {
    session: &'a BrowserSession,
    catalog: &'a Catalog,
    dashboard_wait: std::time::Duration,
}

impl<'a> Navigator<'a> {
    pub fn new(
        session: &'a BrowserSession,
        catalog: &'a Catalog,
        dashboard_wait: std::time::Duration,
    ) -> Self {
        Self {
            session,
            catalog,
            dashboard_wait,
        }
    }

    /// From home, open a dashboard by clicking its tile
    ///
    /// Waits for the tile group to render, then clicks the tile at the
    /// catalog's declared position. Position-based dispatch: the tiles carry
    /// no stable identifier, so this breaks if the site reorders them.
    pub async fn enter_dashboard(&self, dashboard: Dashboard) -> Result<()> {
        self.session
            .wait_for_selector(DASHBOARD_TILES, self.dashboard_wait)
            .await?;

        let position = self.catalog.tile_position(dashboard)?;
        self.session.click_nth(DASHBOARD_TILES, position).await?;

        // Client-side rendering continues after the click
        sleep(SETTLE_NAVIGATION).await;
        Ok(())
    }

    /// Switch the open dashboard to a series-type tab
    ///
    /// The Artificial Intelligence dashboard exposes no series-type control,
    /// so this is a no-op there.
    pub async fn select_series_type(
        &self,
        series: SeriesType,
        dashboard: Dashboard,
    ) -> Result<()> {
        if dashboard == Dashboard::ArtificialIntelligence {
            return Ok(());
        }

        self.session.click_labeled(SERIES_TAB, series.label()).await?;
        sleep(SETTLE_TAB).await;
        Ok(())
    }

    /// Return to the home view between dashboards
    ///
    /// The dashboard switcher is only reliably reachable from home.
    pub async fn return_home(&self) -> Result<()> {
        self.session.history_back().await?;
        sleep(SETTLE_NAVIGATION).await;
        Ok(())
    }
}
