//! Combination catalog - which exports exist
//!
//! Static declarations of dashboards, series types, country lists, the
//! country-code table, and the dashboard tile positions. Changing these
//! declarations is the supported way to add or remove export coverage.
//!
//! The catalog is an explicit value passed into the traversal engine, so
//! tests can substitute reduced catalogs.

use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::error::{ExporterError, Result};

/// One of the site's top-level data views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dashboard {
    Wages,
    ArtificialIntelligence,
    JobPostings,
}

impl Dashboard {
    /// Human-readable label, as rendered on the site
    pub fn label(&self) -> &'static str {
        match self {
            Dashboard::Wages => "Wages",
            Dashboard::ArtificialIntelligence => "Artificial Intelligence",
            Dashboard::JobPostings => "Job Postings",
        }
    }

    /// Filename slug
    pub fn slug(&self) -> String {
        slug(self.label())
    }
}

impl fmt::Display for Dashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Granularity of a dashboard's data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeriesType {
    Headline,
    Sector,
}

impl SeriesType {
    /// Tab label on the site
    pub fn label(&self) -> &'static str {
        match self {
            SeriesType::Headline => "Headline",
            SeriesType::Sector => "Sector",
        }
    }

    /// Filename slug
    pub fn slug(&self) -> String {
        slug(self.label())
    }
}

impl fmt::Display for SeriesType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lower-cased, underscore-joined form of a human-readable name
pub fn slug(name: &str) -> String {
    name.to_lowercase().replace(' ', "_")
}

/// One resolved unit of work, destined for one CSV file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTask {
    pub dashboard: Dashboard,
    pub series: SeriesType,
    /// Set only for sector exports that iterate multiple countries
    pub country: Option<String>,
}

impl ExportTask {
    /// Deterministic filename for this task on `date` (UTC)
    ///
    /// `{DD_MM_YYYY}_{dashboard}_{series}[_{country}].csv`. Downstream
    /// consumers parse this exact layout; do not reorder the parts.
    pub fn filename(&self, date: NaiveDate) -> String {
        let date_str = date.format("%d_%m_%Y");
        match &self.country {
            Some(country) => format!(
                "{}_{}_{}_{}.csv",
                date_str,
                self.dashboard.slug(),
                self.series.slug(),
                slug(country)
            ),
            None => format!(
                "{}_{}_{}.csv",
                date_str,
                self.dashboard.slug(),
                self.series.slug()
            ),
        }
    }
}

/// Static export declarations for a run
///
/// Fields are public so tests can build reduced catalogs directly.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Countries applied as one batched multi-select in headline mode
    pub headline_countries: HashMap<Dashboard, Vec<String>>,
    /// Countries iterated one-by-one in sector mode. Empty list means the
    /// dashboard has no sector series; a single entry means one pass with
    /// the country filter left implicit.
    pub sector_countries: HashMap<Dashboard, Vec<String>>,
    /// Country name to the code used by the sector country `<select>`
    pub country_codes: HashMap<String, String>,
    /// Dashboard to its position among the home-page tiles. Index-based
    /// dispatch tied to the current page layout; breaks if the site reorders
    /// its dashboard list.
    pub tile_positions: HashMap<Dashboard, usize>,
}

impl Default for Catalog {
    fn default() -> Self {
        let headline_countries = HashMap::from([
            (
                Dashboard::Wages,
                countries(&["United States", "Spain", "United Kingdom", "Japan", "Euro Area"]),
            ),
            (
                Dashboard::ArtificialIntelligence,
                countries(&["United States", "United Kingdom", "Germany", "Australia", "Ireland"]),
            ),
            (
                Dashboard::JobPostings,
                countries(&[
                    "United States",
                    "United Kingdom",
                    "Spain",
                    "Ireland",
                    "Euro Area",
                    "Australia",
                ]),
            ),
        ]);

        let sector_countries = HashMap::from([
            (Dashboard::Wages, countries(&["United States"])),
            (
                Dashboard::JobPostings,
                countries(&["United States", "United Kingdom", "Australia"]),
            ),
            // AI has no sector series
            (Dashboard::ArtificialIntelligence, Vec::new()),
        ]);

        let country_codes = HashMap::from([
            ("United States".to_string(), "US".to_string()),
            ("United Kingdom".to_string(), "GB".to_string()),
            ("Australia".to_string(), "AU".to_string()),
            ("Canada".to_string(), "CA".to_string()),
            ("France".to_string(), "FR".to_string()),
            ("Germany".to_string(), "DE".to_string()),
        ]);

        let tile_positions = HashMap::from([
            (Dashboard::JobPostings, 1),
            (Dashboard::Wages, 2),
            (Dashboard::ArtificialIntelligence, 4),
        ]);

        Self {
            headline_countries,
            sector_countries,
            country_codes,
            tile_positions,
        }
    }
}

impl Catalog {
    /// Headline country list for a dashboard
    pub fn headline_countries(&self, dashboard: Dashboard) -> Result<&[String]> {
        self.headline_countries
            .get(&dashboard)
            .map(Vec::as_slice)
            .ok_or_else(|| ExporterError::UnknownDashboard(dashboard.label().to_string()))
    }

    /// Sector country list for a dashboard (possibly empty)
    pub fn sector_countries(&self, dashboard: Dashboard) -> Result<&[String]> {
        self.sector_countries
            .get(&dashboard)
            .map(Vec::as_slice)
            .ok_or_else(|| ExporterError::UnknownDashboard(dashboard.label().to_string()))
    }

    /// Map a country name to its `<select>` value code
    pub fn country_code(&self, country: &str) -> Result<&str> {
        self.country_codes
            .get(country)
            .map(String::as_str)
            .ok_or_else(|| ExporterError::UnmappedCountry(country.to_string()))
    }

    /// Home-page tile position for a dashboard
    pub fn tile_position(&self, dashboard: Dashboard) -> Result<usize> {
        self.tile_positions
            .get(&dashboard)
            .copied()
            .ok_or_else(|| ExporterError::UnknownDashboard(dashboard.label().to_string()))
    }

    /// Expand one (dashboard, series) pair into its export tasks
    ///
    /// Sector mode with more than one declared country produces one task per
    /// country; every other case produces a single task with no country.
    pub fn tasks_for(&self, dashboard: Dashboard, series: SeriesType) -> Result<Vec<ExportTask>> {
        if series == SeriesType::Sector {
            let sector = self.sector_countries(dashboard)?;
            if sector.len() > 1 {
                return Ok(sector
                    .iter()
                    .map(|country| ExportTask {
                        dashboard,
                        series,
                        country: Some(country.clone()),
                    })
                    .collect());
            }
        }

        Ok(vec![ExportTask {
            dashboard,
            series,
            country: None,
        }])
    }
}

/// Ordered mapping from dashboard to the series types to export for it
#[derive(Debug, Clone)]
pub struct ExportPlan {
    pub entries: Vec<(Dashboard, Vec<SeriesType>)>,
}

impl Default for ExportPlan {
    fn default() -> Self {
        Self {
            entries: vec![
                (Dashboard::Wages, vec![SeriesType::Headline, SeriesType::Sector]),
                (Dashboard::ArtificialIntelligence, vec![SeriesType::Headline]),
                (Dashboard::JobPostings, vec![SeriesType::Headline, SeriesType::Sector]),
            ],
        }
    }
}

impl ExportPlan {
    /// Expand the whole plan against a catalog, in declared order
    pub fn expand(&self, catalog: &Catalog) -> Result<Vec<ExportTask>> {
        let mut tasks = Vec::new();
        for (dashboard, series_list) in &self.entries {
            for series in series_list {
                tasks.extend(catalog.tasks_for(*dashboard, *series)?);
            }
        }
        Ok(tasks)
    }
}

fn countries(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugs() {
        assert_eq!(Dashboard::JobPostings.slug(), "job_postings");
        assert_eq!(Dashboard::ArtificialIntelligence.slug(), "artificial_intelligence");
        assert_eq!(SeriesType::Headline.slug(), "headline");
        assert_eq!(slug("United States"), "united_states");
    }

    #[test]
    fn test_filename_without_country() {
        let task = ExportTask {
            dashboard: Dashboard::Wages,
            series: SeriesType::Headline,
            country: None,
        };
        let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        assert_eq!(task.filename(date), "07_03_2025_wages_headline.csv");
    }

    #[test]
    fn test_filename_with_country() {
        let task = ExportTask {
            dashboard: Dashboard::JobPostings,
            series: SeriesType::Sector,
            country: Some("United Kingdom".to_string()),
        };
        let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        assert_eq!(
            task.filename(date),
            "07_03_2025_job_postings_sector_united_kingdom.csv"
        );
    }

    #[test]
    fn test_filename_deterministic() {
        let task = ExportTask {
            dashboard: Dashboard::Wages,
            series: SeriesType::Sector,
            country: Some("United States".to_string()),
        };
        let date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        assert_eq!(task.filename(date), task.filename(date));
    }

    #[test]
    fn test_sector_multi_country_expands_per_country() {
        let catalog = Catalog::default();
        let tasks = catalog
            .tasks_for(Dashboard::JobPostings, SeriesType::Sector)
            .unwrap();
        assert_eq!(tasks.len(), 3);
        assert!(tasks.iter().all(|t| t.country.is_some()));
    }

    #[test]
    fn test_sector_single_country_is_one_task_without_suffix() {
        let catalog = Catalog::default();
        let tasks = catalog.tasks_for(Dashboard::Wages, SeriesType::Sector).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].country, None);
    }

    #[test]
    fn test_sector_no_countries_is_one_task_without_suffix() {
        let catalog = Catalog::default();
        let tasks = catalog
            .tasks_for(Dashboard::ArtificialIntelligence, SeriesType::Sector)
            .unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].country, None);
    }

    #[test]
    fn test_headline_is_always_one_task() {
        let catalog = Catalog::default();
        for dashboard in [
            Dashboard::Wages,
            Dashboard::ArtificialIntelligence,
            Dashboard::JobPostings,
        ] {
            let tasks = catalog.tasks_for(dashboard, SeriesType::Headline).unwrap();
            assert_eq!(tasks.len(), 1);
            assert_eq!(tasks[0].country, None);
        }
    }

    #[test]
    fn test_country_code_lookup() {
        let catalog = Catalog::default();
        assert_eq!(catalog.country_code("United Kingdom").unwrap(), "GB");
    }

    #[test]
    fn test_unmapped_country_is_an_error() {
        let mut catalog = Catalog::default();
        catalog.country_codes.remove("France");

        let err = catalog.country_code("France").unwrap_err();
        assert!(matches!(err, ExporterError::UnmappedCountry(ref c) if c == "France"));
    }

    #[test]
    fn test_unknown_dashboard_is_an_error() {
        let mut catalog = Catalog::default();
        catalog.headline_countries.remove(&Dashboard::Wages);

        let err = catalog.headline_countries(Dashboard::Wages).unwrap_err();
        assert!(matches!(err, ExporterError::UnknownDashboard(_)));
    }

    #[test]
    fn test_default_plan_expansion() {
        let catalog = Catalog::default();
        let plan = ExportPlan::default();
        let tasks = plan.expand(&catalog).unwrap();

        // Wages: headline + sector(1 country) = 2
        // AI: headline = 1
        // Job Postings: headline + sector(3 countries) = 4
        assert_eq!(tasks.len(), 7);
    }

    #[test]
    fn test_expanded_tasks_are_unique() {
        let catalog = Catalog::default();
        let tasks = ExportPlan::default().expand(&catalog).unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();

        let mut names: Vec<String> = tasks.iter().map(|t| t.filename(date)).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), tasks.len());
    }
}
