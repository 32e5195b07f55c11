use crate::config::{Selectors, Timings};
use crate::driver::{BrowserDriver, ElementHandle};
use crate::models::{ExtractFailure, ExtractionResult, OfferEntry};
use crate::utils::pause;
use scraper::Html;
use tracing::{debug, warn};

/// Opens one offer at a time and reads its full description.
///
/// The site sometimes does not render the "show more" control for an offer that is
/// opened for the first time, or renders it without a layout box so it cannot be
/// clicked. Selecting a neighbouring offer and coming back makes it usable, so a missed
/// or failed expand triggers that maneuver before the next attempt.
pub struct OfferExtractor<'d, D> {
    driver: &'d D,
    selectors: &'d Selectors,
    timings: Timings,
    max_attempts: u32,
}

impl<'d, D: BrowserDriver> OfferExtractor<'d, D> {
    pub fn new(driver: &'d D, selectors: &'d Selectors, timings: Timings, max_attempts: u32) -> Self {
        Self {
            driver,
            selectors,
            timings,
            max_attempts: max_attempts.max(1),
        }
    }

    /// `entries` is the full list `entry` belongs to; its neighbour is used for recovery.
    pub fn extract(&self, entry: &OfferEntry, entries: &[OfferEntry]) -> ExtractionResult {
        let result = self.try_extract(entry, entries);
        if let Err(failure) = &result {
            warn!(position = entry.position, %failure, "skipping offer");
        }
        pause(self.timings.offer_pacing);
        result
    }

    fn try_extract(&self, entry: &OfferEntry, entries: &[OfferEntry]) -> ExtractionResult {
        self.driver.click(&entry.handle)?;
        self.expand(entry, entries)?;

        let body = self
            .driver
            .wait_until_visible(&self.selectors.offer_body, self.timings.visibility_timeout)?;
        let html = self
            .driver
            .read_inner_content(&body)?
            .filter(|html| !html.trim().is_empty())
            .ok_or(ExtractFailure::EmptyBody)?;

        let text = html_to_text(&html);
        if text.trim().is_empty() {
            return Err(ExtractFailure::EmptyBody);
        }
        Ok(text)
    }

    fn expand(&self, entry: &OfferEntry, entries: &[OfferEntry]) -> Result<(), ExtractFailure> {
        for attempt in 1..=self.max_attempts {
            pause(self.timings.expand_pause);
            if self.click_expand(entry, attempt)? {
                debug!(position = entry.position, attempt, "offer expanded");
                return Ok(());
            }

            if attempt < self.max_attempts {
                self.refocus(entry, entries)?;
            }
        }
        Err(ExtractFailure::ElementNotFound)
    }

    /// `Ok(false)` when the control is absent, not laid out yet, or rejects the click.
    fn click_expand(&self, entry: &OfferEntry, attempt: u32) -> Result<bool, ExtractFailure> {
        let Some(button) = self.driver.find_element(&self.selectors.expand_button)? else {
            debug!(position = entry.position, attempt, "expand control missing");
            return Ok(false);
        };
        if !self.driver.is_rendered(&button)? {
            debug!(position = entry.position, attempt, "expand control not rendered yet");
            return Ok(false);
        }
        match self.driver.click(&button) {
            Ok(()) => Ok(true),
            Err(err) => {
                debug!(position = entry.position, attempt, error = %err, "expand click failed");
                Ok(false)
            }
        }
    }

    fn refocus(&self, entry: &OfferEntry, entries: &[OfferEntry]) -> Result<(), ExtractFailure> {
        let neighbour = neighbour_of(entry, entries);
        self.driver.click(&neighbour)?;
        pause(self.timings.recovery_pause);

        let seen = self
            .driver
            .find_element(&self.selectors.expand_button)?
            .is_some();
        debug!(position = entry.position, seen, "expand control after selecting neighbour");

        self.driver.click(&entry.handle)?;
        Ok(())
    }
}

/// The entry listed right before `entry`, or the first entry when `entry` leads.
fn neighbour_of(entry: &OfferEntry, entries: &[OfferEntry]) -> ElementHandle {
    entry
        .position
        .checked_sub(1)
        .and_then(|previous| entries.get(previous))
        .or_else(|| entries.first())
        .map_or(entry.handle, |neighbour| neighbour.handle)
}

/// Text nodes of an HTML fragment joined by single spaces.
pub fn html_to_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let words: Vec<&str> = fragment
        .root_element()
        .text()
        .flat_map(str::split_whitespace)
        .collect();
    words.join(" ")
}
