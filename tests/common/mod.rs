#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use jd_demand::{BrowserDriver, ElementHandle, ScrapeConfig, ScrapeError, Selectors, Timings};
use serde_json::Value;

const RESULTS_LIST: ElementHandle = ElementHandle { node_id: 1 };
const LOAD_MORE: ElementHandle = ElementHandle { node_id: 2 };
pub const EXPAND: ElementHandle = ElementHandle { node_id: 3 };
const BODY: ElementHandle = ElementHandle { node_id: 4 };
pub const KEYWORDS_INPUT: ElementHandle = ElementHandle { node_id: 5 };
pub const LOCATION_INPUT: ElementHandle = ElementHandle { node_id: 6 };
pub const SEARCH_BUTTON: ElementHandle = ElementHandle { node_id: 7 };

const FIRST_ENTRY: u32 = 100;

pub fn entry(position: usize) -> ElementHandle {
    ElementHandle::new(FIRST_ENTRY + position as u32)
}

/// Config with no pauses, as used against [`FakeDriver`].
pub fn fast_config() -> ScrapeConfig {
    ScrapeConfig {
        timings: Timings::immediate(),
        ..ScrapeConfig::default()
    }
}

#[derive(Default)]
struct FakeState {
    entry_counts: Vec<usize>,
    scrolls: usize,
    load_more_after: Option<usize>,
    list_missing: bool,
    search_form_missing: bool,
    expand_misses: HashMap<usize, usize>,
    expand_unrendered: HashMap<usize, usize>,
    expand_click_failures: HashMap<usize, usize>,
    bodies: HashMap<usize, Option<String>>,
    hidden_bodies: HashSet<usize>,
    selected: Option<usize>,
    expanded: bool,
    clicks: Vec<ElementHandle>,
    expand_lookups: usize,
    typed: Vec<(ElementHandle, String)>,
    visited: Vec<String>,
    scrolled_to_top: bool,
}

/// Scripted stand-in for a results page.
///
/// `entry_counts[i]` is the number of listed offers after `i` scrolls (the last value
/// repeats). Offer bodies default to `<p>offer N</p>`.
pub struct FakeDriver {
    selectors: Selectors,
    state: RefCell<FakeState>,
}

impl FakeDriver {
    pub fn new(entry_counts: &[usize]) -> Self {
        Self {
            selectors: Selectors::default(),
            state: RefCell::new(FakeState {
                entry_counts: entry_counts.to_vec(),
                ..FakeState::default()
            }),
        }
    }

    pub fn with_offers(count: usize) -> Self {
        Self::new(&[count])
    }

    pub fn load_more_after(self, scrolls: usize) -> Self {
        self.state.borrow_mut().load_more_after = Some(scrolls);
        self
    }

    pub fn without_results_list(self) -> Self {
        self.state.borrow_mut().list_missing = true;
        self
    }

    pub fn without_search_form(self) -> Self {
        self.state.borrow_mut().search_form_missing = true;
        self
    }

    /// The expand control is missing for the next `misses` lookups while `position` is selected.
    pub fn expand_misses(self, position: usize, misses: usize) -> Self {
        self.state.borrow_mut().expand_misses.insert(position, misses);
        self
    }

    /// The expand control is found but has no layout for the next `checks` visibility checks.
    pub fn expand_unrendered(self, position: usize, checks: usize) -> Self {
        self.state
            .borrow_mut()
            .expand_unrendered
            .insert(position, checks);
        self
    }

    /// The next `failures` clicks on the expand control fail while `position` is selected.
    pub fn expand_click_failures(self, position: usize, failures: usize) -> Self {
        self.state
            .borrow_mut()
            .expand_click_failures
            .insert(position, failures);
        self
    }

    pub fn body(self, position: usize, html: Option<&str>) -> Self {
        self.state
            .borrow_mut()
            .bodies
            .insert(position, html.map(str::to_owned));
        self
    }

    pub fn hidden_body(self, position: usize) -> Self {
        self.state.borrow_mut().hidden_bodies.insert(position);
        self
    }

    pub fn scrolls(&self) -> usize {
        self.state.borrow().scrolls
    }

    pub fn clicks(&self) -> Vec<ElementHandle> {
        self.state.borrow().clicks.clone()
    }

    pub fn expand_lookups(&self) -> usize {
        self.state.borrow().expand_lookups
    }

    pub fn typed(&self) -> Vec<(ElementHandle, String)> {
        self.state.borrow().typed.clone()
    }

    pub fn visited(&self) -> Vec<String> {
        self.state.borrow().visited.clone()
    }

    pub fn scrolled_to_top(&self) -> bool {
        self.state.borrow().scrolled_to_top
    }

    fn entry_count(state: &FakeState) -> usize {
        let index = state.scrolls.min(state.entry_counts.len().saturating_sub(1));
        state.entry_counts.get(index).copied().unwrap_or(0)
    }
}

impl BrowserDriver for FakeDriver {
    fn navigate(&self, url: &str) -> jd_demand::Result<()> {
        self.state.borrow_mut().visited.push(url.to_string());
        Ok(())
    }

    fn find_element(&self, selector: &str) -> jd_demand::Result<Option<ElementHandle>> {
        let s = &self.selectors;
        let mut state = self.state.borrow_mut();

        let found = if selector == s.results_list {
            (!state.list_missing).then_some(RESULTS_LIST)
        } else if selector == s.load_more {
            Some(LOAD_MORE)
        } else if selector == s.expand_button {
            state.expand_lookups += 1;
            let selected = state.selected;
            let missed =
                selected.is_some_and(|position| consume(&mut state.expand_misses, position));
            if missed {
                None
            } else {
                selected.map(|_| EXPAND)
            }
        } else if selector == s.offer_body {
            state.expanded.then_some(BODY)
        } else if selector == s.keywords_input {
            (!state.search_form_missing).then_some(KEYWORDS_INPUT)
        } else if selector == s.location_input {
            (!state.search_form_missing).then_some(LOCATION_INPUT)
        } else if selector == s.search_button {
            (!state.search_form_missing).then_some(SEARCH_BUTTON)
        } else {
            None
        };
        Ok(found)
    }

    fn find_elements(&self, selector: &str) -> jd_demand::Result<Vec<ElementHandle>> {
        let state = self.state.borrow();
        if selector != self.selectors.offer_entries || state.list_missing {
            return Ok(Vec::new());
        }
        Ok((0..Self::entry_count(&state)).map(entry).collect())
    }

    fn click(&self, element: &ElementHandle) -> jd_demand::Result<()> {
        let mut state = self.state.borrow_mut();
        state.clicks.push(*element);

        if element.node_id >= FIRST_ENTRY {
            let position = (element.node_id - FIRST_ENTRY) as usize;
            if position >= Self::entry_count(&state) {
                return Err(ScrapeError::not_found("stale offer"));
            }
            state.selected = Some(position);
            state.expanded = false;
        } else if *element == EXPAND {
            let selected = state.selected;
            if selected.is_some_and(|position| consume(&mut state.expand_click_failures, position)) {
                return Err(ScrapeError::Browser(anyhow::anyhow!(
                    "Could not compute box model."
                )));
            }
            state.expanded = true;
        }
        Ok(())
    }

    fn type_text(&self, element: &ElementHandle, text: &str) -> jd_demand::Result<()> {
        self.state
            .borrow_mut()
            .typed
            .push((*element, text.to_string()));
        Ok(())
    }

    fn execute_script(
        &self,
        script: &str,
        _target: Option<&ElementHandle>,
    ) -> jd_demand::Result<Option<Value>> {
        let mut state = self.state.borrow_mut();
        if script.contains("scrollHeight") {
            state.scrolls += 1;
        } else if script.contains("window.scroll(0, 0)") {
            state.scrolled_to_top = true;
        }
        Ok(None)
    }

    fn read_inner_content(&self, element: &ElementHandle) -> jd_demand::Result<Option<String>> {
        let state = self.state.borrow();
        if *element != BODY {
            return Ok(None);
        }
        let Some(position) = state.selected else {
            return Ok(None);
        };
        Ok(match state.bodies.get(&position) {
            Some(body) => body.clone(),
            None => Some(format!("<p>offer {position}</p>")),
        })
    }

    fn is_rendered(&self, element: &ElementHandle) -> jd_demand::Result<bool> {
        let mut state = self.state.borrow_mut();
        Ok(if *element == LOAD_MORE {
            state
                .load_more_after
                .is_some_and(|after| state.scrolls >= after)
        } else if *element == BODY {
            state
                .selected
                .is_some_and(|position| !state.hidden_bodies.contains(&position))
        } else if *element == EXPAND {
            let selected = state.selected;
            !selected.is_some_and(|position| consume(&mut state.expand_unrendered, position))
        } else {
            true
        })
    }
}

/// Takes one from the budget left for `position`; false once it is used up.
fn consume(budget: &mut HashMap<usize, usize>, position: usize) -> bool {
    match budget.get_mut(&position) {
        Some(left) if *left > 0 => {
            *left -= 1;
            true
        }
        _ => false,
    }
}
