//! Traversal engine - sequences the whole export run
//!
//! Sole caller of the navigator, selector applier, and download trigger.
//! Owns the page and the output directory for the run's duration; strictly
//! sequential, one export in flight at a time.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::browser::BrowserSession;
use crate::core::config::ExporterConfig;
use crate::core::error::Result;
use crate::export::catalog::{Catalog, Dashboard, ExportPlan, ExportTask, SeriesType};
use crate::export::download::DownloadTrigger;
use crate::export::navigator::Navigator;
use crate::export::selectors::SelectorApplier;

/// What a completed run produced
#[derive(Debug)]
pub struct ExportSummary {
    /// Files written, in export order
    pub files: Vec<PathBuf>,
}

/// Orchestrates one full export run
pub struct TraversalEngine {
    session: BrowserSession,
    catalog: Catalog,
    plan: ExportPlan,
    config: ExporterConfig,
}

impl TraversalEngine {
    pub fn new(
        session: BrowserSession,
        catalog: Catalog,
        plan: ExportPlan,
        config: ExporterConfig,
    ) -> Self {
        Self {
            session,
            catalog,
            plan,
            config,
        }
    }

    /// Run the declared plan from start to finish
    ///
    /// Aborts on the first fault; there is no retry or partial-skip. The
    /// caller closes the browser via [`TraversalEngine::shutdown`] whether
    /// this succeeds or not.
    pub async fn run(&self) -> Result<ExportSummary> {
        let staging_dir = self.config.export.output_dir.join(".staging");
        fs::create_dir_all(&staging_dir)?;
        self.session.set_download_dir(&staging_dir).await?;

        self.session.goto(&self.config.site.base_url).await?;
        println!("Page loaded.");

        let navigator = Navigator::new(
            &self.session,
            &self.catalog,
            Duration::from_secs(self.config.site.dashboard_wait_secs),
        );
        let selectors = SelectorApplier::new(&self.session, &self.catalog);
        let trigger = DownloadTrigger::new(
            &self.session,
            &self.config.export.output_dir,
            &staging_dir,
            Duration::from_secs(self.config.site.data_load_timeout_secs),
            Duration::from_secs(self.config.site.download_timeout_secs),
        );

        let mut files = Vec::new();
        let mut first = true;

        for (dashboard, series_list) in &self.plan.entries {
            // The dashboard switcher is only reachable from home
            if !first {
                navigator.return_home().await?;
            }
            first = false;

            navigator.enter_dashboard(*dashboard).await?;
            println!("\n=== Dashboard: {} ===", dashboard);

            for series in series_list {
                println!("Exporting: {} - {}", dashboard, series);
                self.export_dataset(&navigator, &selectors, &trigger, *dashboard, *series, &mut files)
                    .await?;
            }
        }

        let _ = fs::remove_dir_all(&staging_dir);
        Ok(ExportSummary { files })
    }

    /// One export pass for a (dashboard, series) pair
    ///
    /// Sector mode with more than one declared country is the only branch
    /// that produces multiple files: country filter, all sectors, export,
    /// once per country. Headline applies its batched country selection;
    /// sector with 0-1 countries leaves the country filter implicit.
    async fn export_dataset(
        &self,
        navigator: &Navigator<'_>,
        selectors: &SelectorApplier<'_>,
        trigger: &DownloadTrigger<'_>,
        dashboard: Dashboard,
        series: SeriesType,
        files: &mut Vec<PathBuf>,
    ) -> Result<()> {
        navigator.select_series_type(series, dashboard).await?;

        let sector_countries = self.catalog.sector_countries(dashboard)?.to_vec();

        if series == SeriesType::Sector && sector_countries.len() > 1 {
            for country in sector_countries {
                selectors.apply_sector_country(&country).await?;
                selectors.apply_all_sectors().await?;

                let task = ExportTask {
                    dashboard,
                    series,
                    country: Some(country),
                };
                files.push(trigger.export_csv(&task).await?);
            }
            return Ok(());
        }

        match series {
            SeriesType::Headline => selectors.apply_headline_countries(dashboard).await?,
            SeriesType::Sector => selectors.apply_all_sectors().await?,
        }

        let task = ExportTask {
            dashboard,
            series,
            country: None,
        };
        files.push(trigger.export_csv(&task).await?);
        Ok(())
    }

    /// Close the browser. Called in all outcomes.
    pub async fn shutdown(self) -> Result<()> {
        self.session.close().await
    }
}

/// Wipe and recreate the output directory
///
/// Runs before the browser launches so partial output from a failed prior
/// run never leaks into this one.
pub fn reset_output_dir(dir: &std::path::Path) -> Result<()> {
    if dir.exists() {
        fs::remove_dir_all(dir)?;
    }
    fs::create_dir_all(dir)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_output_dir_wipes_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("exported_data");

        fs::create_dir_all(&output).unwrap();
        fs::write(output.join("stale.csv"), "old").unwrap();

        reset_output_dir(&output).unwrap();

        assert!(output.exists());
        assert_eq!(fs::read_dir(&output).unwrap().count(), 0);
    }
}
