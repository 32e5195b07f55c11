use crate::config::{Selectors, Timings};
use crate::driver::BrowserDriver;
use crate::error::ScrapeError;
use crate::models::OfferEntry;
use crate::utils::pause;
use crate::Result;
use tracing::{debug, info, warn};

const SCROLL_TO_BOTTOM_JS: &str = "function() { window.scroll(0, 0); window.scroll({ left: 0, top: document.body.scrollHeight, behavior: 'smooth' }); }";
const SCROLL_TO_TOP_JS: &str = "function() { window.scroll(0, 0); }";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOutcome {
    pub loaded: usize,
    pub met_minimum: bool,
}

/// Scrolls the results page until enough offers are loaded or the site stops
/// serving more.
pub struct OfferLoader<'d, D> {
    driver: &'d D,
    selectors: &'d Selectors,
    timings: Timings,
    max_stalled_scrolls: usize,
}

impl<'d, D: BrowserDriver> OfferLoader<'d, D> {
    pub fn new(
        driver: &'d D,
        selectors: &'d Selectors,
        timings: Timings,
        max_stalled_scrolls: usize,
    ) -> Self {
        Self {
            driver,
            selectors,
            timings,
            max_stalled_scrolls,
        }
    }

    pub fn load(&self, min_count: usize) -> Result<LoadOutcome> {
        info!(min_count, "scrolling to load offers");
        let mut loaded = self.count_entries()?;
        let mut stalled = 0;

        while loaded < min_count {
            self.driver.execute_script(SCROLL_TO_BOTTOM_JS, None)?;
            pause(self.timings.scroll_settle);

            let previous = loaded;
            loaded = self.count_entries()?;
            debug!(loaded, "offers after scroll");

            // The load-more button only shows up once infinite scrolling is exhausted.
            if self.load_more_visible()? {
                info!(loaded, "load-more control shown, no more offers will stream in");
                break;
            }

            stalled = if loaded > previous { 0 } else { stalled + 1 };
            if self.max_stalled_scrolls > 0 && stalled >= self.max_stalled_scrolls {
                info!(loaded, stalled, "no new offers after repeated scrolls");
                break;
            }
        }

        self.driver.execute_script(SCROLL_TO_TOP_JS, None)?;

        let met_minimum = loaded >= min_count;
        if !met_minimum {
            warn!(min_count, loaded, "could not load the requested minimum of offers");
        }
        info!(loaded, "offers loaded in total to be parsed");

        Ok(LoadOutcome {
            loaded,
            met_minimum,
        })
    }

    /// Loaded offers in list order.
    pub fn entries(&self) -> Result<Vec<OfferEntry>> {
        self.ensure_results_list()?;
        Ok(self
            .driver
            .find_elements(&self.selectors.offer_entries)?
            .into_iter()
            .enumerate()
            .map(|(position, handle)| OfferEntry::new(position, handle))
            .collect())
    }

    fn count_entries(&self) -> Result<usize> {
        self.ensure_results_list()?;
        Ok(self.driver.find_elements(&self.selectors.offer_entries)?.len())
    }

    fn ensure_results_list(&self) -> Result<()> {
        match self.driver.find_element(&self.selectors.results_list)? {
            Some(_) => Ok(()),
            None => Err(ScrapeError::not_found(&self.selectors.results_list)),
        }
    }

    fn load_more_visible(&self) -> Result<bool> {
        match self.driver.find_element(&self.selectors.load_more)? {
            Some(button) => self.driver.is_rendered(&button),
            None => Ok(false),
        }
    }
}
