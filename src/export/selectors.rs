//! Selector applier - drives the dashboard's filter controls
//!
//! Three interaction patterns: the headline country multiselect, the native
//! sector country dropdown, and the "all sectors" multiselect. Each leaves
//! the UI with its menus closed.

use tokio::time::sleep;

use crate::browser::BrowserSession;
use crate::core::error::{ExporterError, Result};
use crate::export::catalog::{Catalog, Dashboard};
use crate::export::{SECTOR_TOGGLE_DELAY, SETTLE_MENU, SETTLE_TOGGLE};

/// Filter comboboxes, in document order: 0 = country, 1 = sector
const COMBOBOX: &str = "[role='combobox']";

/// Items inside an open checkbox-style filter menu
const MENU_CHECKBOX: &str = "[role='menuitemcheckbox']";

/// The native sector-mode country dropdown
const COUNTRY_SELECT: &str = "select[placeholder='Select country']";

/// Applies filter selections for one session
pub struct SelectorApplier<'a> {
    session: &'a BrowserSession,
    catalog: &'a Catalog,
}

impl<'a> SelectorApplier<'a> {
    pub fn new(session: &'a BrowserSession, catalog: &'a Catalog) -> Self {
        Self { session, catalog }
    }

    /// Toggle every declared headline country in the first filter menu
    pub async fn apply_headline_countries(&self, dashboard: Dashboard) -> Result<()> {
        self.session.click_nth(COMBOBOX, 0).await?;

        for country in self.catalog.headline_countries(dashboard)? {
            self.session.click_labeled(MENU_CHECKBOX, country).await?;
            // Let the page process each toggle before the next one
            sleep(SETTLE_TOGGLE).await;
        }

        self.session.press_escape().await?;
        sleep(SETTLE_MENU).await;
        Ok(())
    }

    /// Select one country in the sector-mode dropdown
    ///
    /// The `<select>` can be visually hidden while still holding the state,
    /// so the value is set by script and a change event dispatched rather
    /// than clicking through the control.
    pub async fn apply_sector_country(&self, country: &str) -> Result<()> {
        let code = self.catalog.country_code(country)?;

        let script = format!(
            r#"(function() {{
                const sel = document.querySelector("{COUNTRY_SELECT}");
                if (!sel) return false;
                sel.value = '{code}';
                sel.dispatchEvent(new Event('change', {{ bubbles: true }}));
                return true;
            }})()"#
        );

        if !self.session.eval_bool(&script).await? {
            return Err(ExporterError::element(format!(
                "'{}' not present on the page",
                COUNTRY_SELECT
            )));
        }

        sleep(SETTLE_TOGGLE).await;
        self.session.press_escape().await?;
        sleep(SETTLE_MENU).await;
        Ok(())
    }

    /// Turn on every item in the sector multiselect
    ///
    /// Only items not already checked are clicked, so repeating the call
    /// performs no extra activations.
    pub async fn apply_all_sectors(&self) -> Result<()> {
        self.session.click_nth(COMBOBOX, 1).await?;

        let states = self.session.checked_states(MENU_CHECKBOX).await?;
        for index in pending_toggles(&states) {
            self.session.click_nth(MENU_CHECKBOX, index).await?;
            // The page recomputes its series after every toggle; pacing the
            // clicks keeps it from falling behind
            sleep(SECTOR_TOGGLE_DELAY).await;
        }

        self.session.press_escape().await?;
        sleep(SETTLE_MENU).await;
        Ok(())
    }
}

/// Indices of menu items that still need activation
pub fn pending_toggles(checked: &[bool]) -> Vec<usize> {
    checked
        .iter()
        .enumerate()
        .filter(|(_, &state)| !state)
        .map(|(index, _)| index)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_toggles_skips_checked_items() {
        assert_eq!(pending_toggles(&[false, true, false, true]), vec![0, 2]);
    }

    #[test]
    fn test_pending_toggles_empty_menu() {
        assert!(pending_toggles(&[]).is_empty());
    }

    #[test]
    fn test_all_sectors_idempotent() {
        // First pass activates everything
        let first = pending_toggles(&[false, false, false]);
        assert_eq!(first.len(), 3);

        // Second pass sees everything checked and activates nothing
        let second = pending_toggles(&[true, true, true]);
        assert!(second.is_empty());
    }
}
