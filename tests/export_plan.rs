//! Export plan expansion tests
//!
//! Checks that plans expand into exactly the files a run would produce,
//! using reduced catalogs as test doubles.

use chrono::NaiveDate;
use hiringlab_exporter::{Catalog, Dashboard, ExportPlan, SeriesType};

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
}

fn filenames(plan: &ExportPlan, catalog: &Catalog) -> Vec<String> {
    plan.expand(catalog)
        .unwrap()
        .iter()
        .map(|task| task.filename(date()))
        .collect()
}

/// Wages with one sector country: two files, neither country-suffixed
#[test]
fn wages_headline_and_sector_produce_two_files() {
    let catalog = Catalog::default();
    let plan = ExportPlan {
        entries: vec![(
            Dashboard::Wages,
            vec![SeriesType::Headline, SeriesType::Sector],
        )],
    };

    assert_eq!(
        filenames(&plan, &catalog),
        vec![
            "15_06_2025_wages_headline.csv",
            "15_06_2025_wages_sector.csv",
        ]
    );
}

/// Job Postings sector with three countries: one file per country
#[test]
fn job_postings_sector_produces_one_file_per_country() {
    let catalog = Catalog::default();
    let plan = ExportPlan {
        entries: vec![(Dashboard::JobPostings, vec![SeriesType::Sector])],
    };

    assert_eq!(
        filenames(&plan, &catalog),
        vec![
            "15_06_2025_job_postings_sector_united_states.csv",
            "15_06_2025_job_postings_sector_united_kingdom.csv",
            "15_06_2025_job_postings_sector_australia.csv",
        ]
    );
}

/// AI has no series-type control, but headline export still happens
#[test]
fn artificial_intelligence_headline_produces_one_file() {
    let catalog = Catalog::default();
    let plan = ExportPlan {
        entries: vec![(Dashboard::ArtificialIntelligence, vec![SeriesType::Headline])],
    };

    assert_eq!(
        filenames(&plan, &catalog),
        vec!["15_06_2025_artificial_intelligence_headline.csv"]
    );
}

/// A reduced sector list flips the multi-country branch off
#[test]
fn reduced_catalog_collapses_sector_to_one_file() {
    let mut catalog = Catalog::default();
    catalog
        .sector_countries
        .insert(Dashboard::JobPostings, vec!["United States".to_string()]);

    let plan = ExportPlan {
        entries: vec![(Dashboard::JobPostings, vec![SeriesType::Sector])],
    };

    assert_eq!(
        filenames(&plan, &catalog),
        vec!["15_06_2025_job_postings_sector.csv"]
    );
}

/// The full default plan: 2 (Wages) + 1 (AI) + 4 (Job Postings)
#[test]
fn default_plan_produces_seven_unique_files() {
    let catalog = Catalog::default();
    let names = filenames(&ExportPlan::default(), &catalog);

    assert_eq!(names.len(), 7);

    let mut deduped = names.clone();
    deduped.sort();
    deduped.dedup();
    assert_eq!(deduped.len(), names.len());
}

/// Same plan, same day, same names
#[test]
fn expansion_is_deterministic() {
    let catalog = Catalog::default();
    let plan = ExportPlan::default();

    assert_eq!(filenames(&plan, &catalog), filenames(&plan, &catalog));
}
