use crate::config::{ScrapeConfig, Selectors};
use crate::driver::{BrowserDriver, ChromeDriver, ElementHandle};
use crate::error::ScrapeError;
use crate::pipeline::OfferSource;
use crate::Result;
use tracing::info;

pub const SEARCH_PAGE_URL: &str =
    "https://www.linkedin.com/jobs/search?trk=guest_homepage-basic_guest_nav_menu_jobs&position=1&pageNum=0";

/// Public (logged-out) LinkedIn job search.
pub struct LinkedInClient {
    base_url: String,
    config: ScrapeConfig,
}

impl LinkedInClient {
    pub fn new(config: ScrapeConfig) -> Self {
        Self {
            base_url: SEARCH_PAGE_URL.to_string(),
            config,
        }
    }
}

impl Default for LinkedInClient {
    fn default() -> Self {
        Self::new(ScrapeConfig::default())
    }
}

impl OfferSource for LinkedInClient {
    type Driver = ChromeDriver;

    fn open_session(&self) -> Result<ChromeDriver> {
        info!("connecting to LinkedIn");
        let driver = ChromeDriver::launch(&self.config.search, self.config.timings.page_load_timeout)
            .inspect_err(|e| tracing::error!(error = %e, "browser launch failed"))?;

        driver.navigate(&self.base_url)?;
        submit_search(
            &driver,
            &self.config.selectors,
            &self.config.search.search_term,
            &self.config.search.location,
        )?;
        driver.wait_until_visible(
            &self.config.selectors.results_list,
            self.config.timings.page_load_timeout,
        )?;

        Ok(driver)
    }
}

/// Fills the keyword and location boxes and submits the search form.
pub fn submit_search<D: BrowserDriver>(
    driver: &D,
    selectors: &Selectors,
    search_term: &str,
    location: &str,
) -> Result<()> {
    let required = |selector: &str| -> Result<ElementHandle> {
        driver
            .find_element(selector)?
            .ok_or_else(|| ScrapeError::not_found(selector))
    };

    let keywords = required(&selectors.keywords_input)?;
    let place = required(&selectors.location_input)?;
    let button = required(&selectors.search_button)?;

    driver.type_text(&keywords, search_term)?;
    driver.type_text(&place, location)?;
    driver.click(&button)?;

    info!(search_term, location, "search submitted");
    Ok(())
}
