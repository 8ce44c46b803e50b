//! Download trigger - waits for readiness, requests CSV, persists the file
//!
//! Downloads land in a staging directory under GUID names (see
//! [`BrowserSession::set_download_dir`]), then get renamed to the
//! deterministic filename of their task.

use std::collections::HashSet;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Utc;
use tokio::time::{sleep, Instant};

use crate::browser::BrowserSession;
use crate::core::error::{ExporterError, Result};
use crate::export::catalog::ExportTask;
use crate::export::SETTLE_TOGGLE;

/// Buttons, whether native or ARIA-annotated
const BUTTON: &str = "button, [role='button']";

/// True while any button still shows the dashboard's "Loading" label
const LOADING_PROBE: &str = r#"[...document.querySelectorAll('button')]
    .some(b => b.textContent.includes('Loading'))"#;

/// Interval between readiness probes
const LOAD_POLL: Duration = Duration::from_secs(2);

/// Interval between download-completion probes
const DOWNLOAD_POLL: Duration = Duration::from_millis(500);

/// Triggers CSV exports for one session
pub struct DownloadTrigger<'a> {
    session: &'a BrowserSession,
    output_dir: &'a Path,
    staging_dir: &'a Path,
    load_timeout: Duration,
    download_timeout: Duration,
}

impl<'a> DownloadTrigger<'a> {
    pub fn new(
        session: &'a BrowserSession,
        output_dir: &'a Path,
        staging_dir: &'a Path,
        load_timeout: Duration,
        download_timeout: Duration,
    ) -> Self {
        Self {
            session,
            output_dir,
            staging_dir,
            load_timeout,
            download_timeout,
        }
    }

    /// Export the current dashboard state as CSV under the task's filename
    ///
    /// Re-running the same task on the same UTC day overwrites the previous
    /// file; a run is a complete refresh of the output directory.
    pub async fn export_csv(&self, task: &ExportTask) -> Result<PathBuf> {
        self.wait_until_loaded().await?;

        let before = list_dir(self.staging_dir)?;

        self.session.click_labeled(BUTTON, "Download").await?;
        sleep(SETTLE_TOGGLE).await;
        self.session.click_labeled(BUTTON, "as CSV").await?;

        let downloaded = self.wait_for_download(&before).await?;

        let filename = task.filename(Utc::now().date_naive());
        let destination = self.output_dir.join(&filename);
        fs::rename(&downloaded, &destination)?;

        println!("Saved {}", destination.display());
        Ok(destination)
    }

    /// Wait until no control shows "Loading" - the dashboard's own readiness
    /// signal. Bounded by the configured long timeout.
    async fn wait_until_loaded(&self) -> Result<()> {
        let deadline = Instant::now() + self.load_timeout;

        while self.session.eval_bool(LOADING_PROBE).await? {
            if Instant::now() >= deadline {
                return Err(ExporterError::LoadTimeout {
                    waited_secs: self.load_timeout.as_secs(),
                });
            }
            sleep(LOAD_POLL).await;
        }

        Ok(())
    }

    /// Wait for a new file to appear in staging and finish being written
    ///
    /// A file counts as finished once its size holds steady across two
    /// consecutive probes. Chrome writes GUID-named files directly, so there
    /// is no `.crdownload` marker to key off.
    async fn wait_for_download(&self, before: &HashSet<OsString>) -> Result<PathBuf> {
        let deadline = Instant::now() + self.download_timeout;
        let mut last_size: Option<(OsString, u64)> = None;

        loop {
            for entry in fs::read_dir(self.staging_dir)? {
                let entry = entry?;
                let name = entry.file_name();
                if before.contains(&name) {
                    continue;
                }

                let size = entry.metadata()?.len();
                if let Some((ref seen_name, seen_size)) = last_size {
                    if *seen_name == name && seen_size == size && size > 0 {
                        return Ok(entry.path());
                    }
                }
                last_size = Some((name, size));
            }

            if Instant::now() >= deadline {
                return Err(ExporterError::DownloadTimeout {
                    waited_secs: self.download_timeout.as_secs(),
                });
            }
            sleep(DOWNLOAD_POLL).await;
        }
    }
}

fn list_dir(dir: &Path) -> Result<HashSet<OsString>> {
    let mut names = HashSet::new();
    for entry in fs::read_dir(dir)? {
        names.insert(entry?.file_name());
    }
    Ok(names)
}
