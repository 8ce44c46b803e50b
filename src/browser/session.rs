//! Browser session - wraps a chromiumoxide page
//!
//! Owns the Chromium process, its CDP event loop, and the single page the
//! whole run drives. The export components never touch chromiumoxide types
//! directly; everything goes through the helpers here.

use std::path::Path;
use std::time::Duration;

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::browser::{
    SetDownloadBehaviorBehavior, SetDownloadBehaviorParams,
};
use chromiumoxide::cdp::browser_protocol::input::{
    DispatchKeyEventParams, DispatchKeyEventType,
};
use chromiumoxide::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Instant};

use crate::core::config::ExporterConfig;
use crate::core::error::{ExporterError, Result};

/// Interval between element-presence probes
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// A launched browser with one page attached
pub struct BrowserSession {
    browser: Browser,
    page: Page,
    event_loop: JoinHandle<()>,
    // Dropped (and deleted) with the session; every run starts cookie-free
    _profile_dir: tempfile::TempDir,
}

impl BrowserSession {
    /// Launch Chromium and open a blank page
    pub async fn launch(config: &ExporterConfig) -> Result<Self> {
        let profile_dir = tempfile::tempdir()?;

        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .window_size(1920, 1080)
            .arg("--disable-dev-shm-usage")
            .user_data_dir(profile_dir.path());

        if config.browser.headless {
            // New headless mode; the legacy --headless flag chromiumoxide adds
            // by default breaks some client-side rendering on the target site.
            builder = builder.with_head().arg("--headless=new");
        } else {
            builder = builder.with_head();
        }

        if let Some(ref path) = config.browser.chrome_executable {
            builder = builder.chrome_executable(path);
        }

        let browser_config = builder.build().map_err(ExporterError::browser)?;

        let (browser, mut handler) = Browser::launch(browser_config).await?;

        // Drive the CDP event loop for the lifetime of the session
        let event_loop = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                let _ = event;
            }
        });

        let page = browser.new_page("about:blank").await?;

        Ok(Self {
            browser,
            page,
            event_loop,
            _profile_dir: profile_dir,
        })
    }

    /// Navigate to a URL and wait for the load event
    pub async fn goto(&self, url: &str) -> Result<()> {
        self.page.goto(url).await?;
        self.page.wait_for_navigation().await?;
        Ok(())
    }

    /// Step back one entry in the page's history
    pub async fn history_back(&self) -> Result<()> {
        self.page.evaluate("window.history.back()").await?;
        Ok(())
    }

    /// Wait until at least one element matches `selector`, bounded by `timeout`
    pub async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;

        loop {
            if self.page.find_element(selector).await.is_ok() {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(ExporterError::element(format!(
                    "'{}' did not appear within {}s",
                    selector,
                    timeout.as_secs()
                )));
            }
            sleep(POLL_INTERVAL).await;
        }
    }

    /// Click the element at `index` among those matching `selector`
    pub async fn click_nth(&self, selector: &str, index: usize) -> Result<()> {
        let elements = self.page.find_elements(selector).await?;

        let element = elements.get(index).ok_or_else(|| {
            ExporterError::element(format!(
                "'{}' has {} matches, wanted index {}",
                selector,
                elements.len(),
                index
            ))
        })?;

        element.click().await?;
        Ok(())
    }

    /// Click the element matching `selector` whose trimmed text equals `label`
    ///
    /// Exact match on purpose: the site reuses label substrings across
    /// controls ("Download", "Download all", ...).
    pub async fn click_labeled(&self, selector: &str, label: &str) -> Result<()> {
        for element in self.page.find_elements(selector).await? {
            if let Ok(Some(text)) = element.inner_text().await {
                if text.trim() == label {
                    element.click().await?;
                    return Ok(());
                }
            }
        }

        Err(ExporterError::element(format!(
            "no '{}' element labeled '{}'",
            selector, label
        )))
    }

    /// Read the `aria-checked` state of every element matching `selector`,
    /// in document order
    pub async fn checked_states(&self, selector: &str) -> Result<Vec<bool>> {
        let mut states = Vec::new();

        for element in self.page.find_elements(selector).await? {
            let checked = element.attribute("aria-checked").await?;
            states.push(checked.as_deref() == Some("true"));
        }

        Ok(states)
    }

    /// Send an Escape key press to the page (closes open menus)
    pub async fn press_escape(&self) -> Result<()> {
        let down = DispatchKeyEventParams::builder()
            .r#type(DispatchKeyEventType::KeyDown)
            .key("Escape")
            .build()
            .map_err(ExporterError::browser)?;
        self.page.execute(down).await?;

        let up = DispatchKeyEventParams::builder()
            .r#type(DispatchKeyEventType::KeyUp)
            .key("Escape")
            .build()
            .map_err(ExporterError::browser)?;
        self.page.execute(up).await?;

        Ok(())
    }

    /// Evaluate a JavaScript expression that yields a boolean
    pub async fn eval_bool(&self, script: &str) -> Result<bool> {
        let result = self.page.evaluate(script).await?;
        Ok(result.into_value::<bool>()?)
    }

    /// Route all downloads into `dir`, named by download GUID
    ///
    /// GUID naming avoids any dependence on the site's suggested filenames;
    /// the download trigger renames the file deterministically afterwards.
    pub async fn set_download_dir(&self, dir: &Path) -> Result<()> {
        let params = SetDownloadBehaviorParams::builder()
            .behavior(SetDownloadBehaviorBehavior::AllowAndName)
            .download_path(dir.display().to_string())
            .events_enabled(true)
            .build()
            .map_err(ExporterError::browser)?;

        self.browser.execute(params).await?;
        Ok(())
    }

    /// Close the browser and stop the event loop
    pub async fn close(mut self) -> Result<()> {
        self.browser.close().await?;
        let _ = self.browser.wait().await;
        self.event_loop.abort();
        Ok(())
    }
}
